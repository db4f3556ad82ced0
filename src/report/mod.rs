pub mod json;
pub mod text;

use serde::Serialize;

use crate::pipeline::stage3_prevalence::PrevalenceTest;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub name: &'static str,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    pub tool_name: String,
    pub tool_version: String,
    pub age_min: u8,
    pub age_max: u8,
    pub n_records: usize,
    pub types: Vec<CategoryStat>,
    pub severities: Vec<CategoryStat>,
    /// `None` when the filtered population is empty.
    pub prevalence: Option<PrevalenceTest>,
}

pub fn category_stats<T: Copy>(
    counts: &[(T, usize)],
    label: impl Fn(T) -> &'static str,
) -> Vec<CategoryStat> {
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    counts
        .iter()
        .map(|&(key, count)| CategoryStat {
            name: label(key),
            count,
            fraction: fraction(count, total),
        })
        .collect()
}

pub fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// `category\tcount` table for one distribution.
pub fn render_distribution_tsv(header: &str, stats: &[CategoryStat]) -> String {
    let mut out = format!("{header}\tcount\n");
    for stat in stats {
        out.push_str(&format!("{}\t{}\n", stat.name, stat.count));
    }
    out
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
