use crate::model::classification::{DeficiencyType, Severity, severity_order, type_order};
use crate::model::record::Record;
use crate::model::thresholds::AgeRange;

#[derive(Debug, Clone)]
pub struct AggregateView {
    pub age_range: AgeRange,
    pub records: Vec<Record>,
    pub type_counts: Vec<(DeficiencyType, usize)>,
    pub severity_counts: Vec<(Severity, usize)>,
}

impl AggregateView {
    pub fn n(&self) -> usize {
        self.records.len()
    }

    pub fn non_normal(&self) -> usize {
        self.type_counts
            .iter()
            .filter(|(t, _)| *t != DeficiencyType::Normal)
            .map(|(_, c)| c)
            .sum()
    }
}

pub fn build_view(records: &[Record], age_range: AgeRange) -> AggregateView {
    let filtered: Vec<Record> = records
        .iter()
        .filter(|r| age_range.contains(r.age))
        .cloned()
        .collect();

    let type_counts = type_order()
        .iter()
        .map(|t| {
            let count = filtered.iter().filter(|r| r.result.deficiency == *t).count();
            (*t, count)
        })
        .collect();

    let severity_counts = severity_order()
        .iter()
        .map(|s| {
            let count = filtered.iter().filter(|r| r.result.severity == *s).count();
            (*s, count)
        })
        .collect();

    tracing::debug!(
        total = records.len(),
        kept = filtered.len(),
        age_min = age_range.min,
        age_max = age_range.max,
        "filtered records by age"
    );

    AggregateView {
        age_range,
        records: filtered,
        type_counts,
        severity_counts,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
