use super::*;
use crate::model::response::{Outcome, PAIRED_PLATES, RED_GREEN_RANGE, RESPONSE_LEN, SINGLE_PLATES};

fn with_fails(indices: &[usize]) -> ResponseVector {
    let mut v = ResponseVector::all_pass();
    for &i in indices {
        v.set(i, Outcome::Fail);
    }
    v
}

/// Index of the normal reading of paired plate `k` (0 = plate 11).
fn normal_idx(k: usize) -> usize {
    SINGLE_PLATES + 2 * k
}

fn defect_idx(k: usize) -> usize {
    SINGLE_PLATES + 2 * k + 1
}

fn result(deficiency: DeficiencyType, severity: Severity) -> ClassificationResult {
    ClassificationResult {
        deficiency,
        severity,
    }
}

#[test]
fn test_all_pass_is_normal_none() {
    let out = classify(&ResponseVector::all_pass());
    assert_eq!(out, result(DeficiencyType::Normal, Severity::None));
}

#[test]
fn test_three_red_green_fails_is_protan_moderate() {
    let out = classify(&with_fails(&[4, 6, 9]));
    assert_eq!(out, result(DeficiencyType::ProtanDeutan, Severity::Moderate));
}

#[test]
fn test_two_red_green_fails_stay_normal_mild() {
    let out = classify(&with_fails(&[5, 8]));
    assert_eq!(out, result(DeficiencyType::Normal, Severity::Mild));
}

#[test]
fn test_two_blue_yellow_plates_is_tritan_mild() {
    // one plate fails on its normal reading, the other on its defect reading
    let out = classify(&with_fails(&[normal_idx(0), defect_idx(7)]));
    assert_eq!(out, result(DeficiencyType::Tritan, Severity::Mild));
}

#[test]
fn test_pair_counts_once_when_both_readings_fail() {
    let v = with_fails(&[normal_idx(3), defect_idx(3)]);
    let counts = count_errors(&v);
    assert_eq!(counts.blue_yellow, 1);
    assert_eq!(classify(&v), result(DeficiencyType::Normal, Severity::Mild));
}

#[test]
fn test_plates_one_to_four_are_not_scored() {
    let v = with_fails(&[0, 1, 2, 3]);
    assert_eq!(count_errors(&v).total(), 0);
    assert_eq!(classify(&v), result(DeficiencyType::Normal, Severity::None));
}

#[test]
fn test_protan_takes_priority_over_tritan() {
    let v = with_fails(&[4, 5, 6, normal_idx(0), normal_idx(1), normal_idx(2)]);
    let counts = count_errors(&v);
    assert_eq!(counts.red_green, 3);
    assert_eq!(counts.blue_yellow, 3);
    assert_eq!(classify(&v), result(DeficiencyType::ProtanDeutan, Severity::Severe));
}

#[test]
fn test_all_fail_is_protan_severe() {
    let all: Vec<usize> = (0..RESPONSE_LEN).collect();
    let v = with_fails(&all);
    let counts = count_errors(&v);
    assert_eq!(counts.red_green, 6);
    assert_eq!(counts.blue_yellow, 14);
    assert_eq!(classify(&v), result(DeficiencyType::ProtanDeutan, Severity::Severe));
}

#[test]
fn test_combined_branch_on_decision_rule() {
    let profile = ScreeningProfile::hrr_v1();
    assert_eq!(decide_type(2, 1, 5, &profile), DeficiencyType::Combined);
    assert_eq!(decide_severity(5, &profile), Severity::Severe);
    assert_eq!(decide_type(2, 1, 4, &profile), DeficiencyType::Normal);
    assert_eq!(decide_type(3, 2, 5, &profile), DeficiencyType::ProtanDeutan);
    assert_eq!(decide_type(2, 2, 5, &profile), DeficiencyType::Tritan);
}

#[test]
fn test_combined_unreachable_from_plate_counts() {
    for rg in 0..=RED_GREEN_RANGE.len() {
        for by in 0..=PAIRED_PLATES {
            let mut fails: Vec<usize> = RED_GREEN_RANGE.take(rg).collect();
            fails.extend((0..by).map(defect_idx));
            let out = classify(&with_fails(&fails));
            assert_ne!(out.deficiency, DeficiencyType::Combined, "rg={rg} by={by}");
        }
    }
}

#[test]
fn test_type_priority_sweep() {
    for rg in 0..=RED_GREEN_RANGE.len() {
        for by in 0..=PAIRED_PLATES {
            let mut fails: Vec<usize> = RED_GREEN_RANGE.take(rg).collect();
            fails.extend((0..by).map(normal_idx));
            let out = classify(&with_fails(&fails));
            let expected = if rg >= 3 {
                DeficiencyType::ProtanDeutan
            } else if by >= 2 {
                DeficiencyType::Tritan
            } else {
                DeficiencyType::Normal
            };
            assert_eq!(out.deficiency, expected, "rg={rg} by={by}");
        }
    }
}

#[test]
fn test_severity_monotonic_in_total() {
    let profile = ScreeningProfile::hrr_v1();
    let mut prev = Severity::None;
    for total in 0..=20 {
        let sev = decide_severity(total, &profile);
        assert!(sev >= prev, "severity dropped at total={total}");
        prev = sev;
    }
    assert_eq!(decide_severity(0, &profile), Severity::None);
    assert_eq!(decide_severity(1, &profile), Severity::Mild);
    assert_eq!(decide_severity(2, &profile), Severity::Mild);
    assert_eq!(decide_severity(3, &profile), Severity::Moderate);
    assert_eq!(decide_severity(4, &profile), Severity::Moderate);
    assert_eq!(decide_severity(5, &profile), Severity::Severe);
}
