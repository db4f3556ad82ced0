pub mod stage1_classify;
pub mod stage2_aggregate;
pub mod stage3_prevalence;
pub mod stage4_report;
