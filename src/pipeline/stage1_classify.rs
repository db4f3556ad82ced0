use crate::model::classification::{ClassificationResult, DeficiencyType, Severity};
use crate::model::response::ResponseVector;
use crate::model::thresholds::ScreeningProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCounts {
    pub red_green: u32,
    pub blue_yellow: u32,
}

impl ErrorCounts {
    pub fn total(&self) -> u32 {
        self.red_green + self.blue_yellow
    }
}

pub fn classify(responses: &ResponseVector) -> ClassificationResult {
    classify_with(responses, &ScreeningProfile::hrr_v1())
}

pub fn classify_with(responses: &ResponseVector, profile: &ScreeningProfile) -> ClassificationResult {
    let counts = count_errors(responses);
    let total = counts.total();
    ClassificationResult {
        deficiency: decide_type(counts.red_green, counts.blue_yellow, total, profile),
        severity: decide_severity(total, profile),
    }
}

pub fn count_errors(responses: &ResponseVector) -> ErrorCounts {
    let red_green = responses.red_green().iter().filter(|o| o.is_fail()).count() as u32;

    // one error per plate, however many of its two readings failed
    let blue_yellow = responses
        .pairs()
        .filter(|(normal, defect)| normal.is_fail() || defect.is_fail())
        .count() as u32;

    ErrorCounts {
        red_green,
        blue_yellow,
    }
}

fn decide_type(
    red_green: u32,
    blue_yellow: u32,
    total: u32,
    profile: &ScreeningProfile,
) -> DeficiencyType {
    if red_green >= profile.red_green_min {
        return DeficiencyType::ProtanDeutan;
    }

    if blue_yellow >= profile.blue_yellow_min {
        return DeficiencyType::Tritan;
    }

    if total >= profile.combined_min_total {
        return DeficiencyType::Combined;
    }

    DeficiencyType::Normal
}

fn decide_severity(total: u32, profile: &ScreeningProfile) -> Severity {
    if total == 0 {
        Severity::None
    } else if total <= profile.mild_max_total {
        Severity::Mild
    } else if total <= profile.moderate_max_total {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_classify.rs"]
mod tests;
