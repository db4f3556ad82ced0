#[derive(Debug, Clone)]
pub struct ScreeningProfile {
    pub red_green_min: u32,
    pub blue_yellow_min: u32,
    pub combined_min_total: u32,
    pub mild_max_total: u32,
    pub moderate_max_total: u32,
    pub expected_prevalence: f64,
    pub alpha: f64,
}

impl ScreeningProfile {
    pub fn hrr_v1() -> Self {
        Self {
            red_green_min: 3,
            blue_yellow_min: 2,
            combined_min_total: 5,
            mild_max_total: 2,
            moderate_max_total: 4,
            expected_prevalence: 0.076,
            alpha: 0.05,
        }
    }
}

impl Default for ScreeningProfile {
    fn default() -> Self {
        Self::hrr_v1()
    }
}

/// Inclusive age filter applied before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn new(min: u8, max: u8) -> Result<Self, crate::error::ConfigError> {
        if min > max {
            return Err(crate::error::ConfigError::AgeRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, age: u8) -> bool {
        self.min <= age && age <= self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self { min: 18, max: 30 }
    }
}
