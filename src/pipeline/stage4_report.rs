use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::model::classification::{DeficiencyType, Severity};
use crate::pipeline::stage2_aggregate::AggregateView;
use crate::pipeline::stage3_prevalence::PrevalenceOutcome;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{StatsSummary, category_stats, render_distribution_tsv};
use crate::store::csv_store::write_table;

pub const REPORT_FILE: &str = "report.txt";
pub const SUMMARY_FILE: &str = "summary.json";
pub const TYPE_TABLE_FILE: &str = "tipo.tsv";
pub const SEVERITY_TABLE_FILE: &str = "severidad.tsv";
pub const EXPORT_FILE: &str = "resultados_HRR.csv";

#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub view: &'a AggregateView,
    pub prevalence: PrevalenceOutcome,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn build_summary(input: &ReportInput<'_>) -> StatsSummary {
    let view = input.view;
    StatsSummary {
        tool_name: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        age_min: view.age_range.min,
        age_max: view.age_range.max,
        n_records: view.n(),
        types: category_stats(&view.type_counts, DeficiencyType::label),
        severities: category_stats(&view.severity_counts, Severity::label),
        prevalence: match input.prevalence {
            PrevalenceOutcome::Tested(test) => Some(test),
            PrevalenceOutcome::InsufficientData => None,
        },
    }
}

pub fn write_reports(input: &ReportInput<'_>, out_dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(out_dir)?;

    let summary = build_summary(input);

    write_text(&out_dir.join(REPORT_FILE), &render_report_text(&summary))?;

    let json = render_summary_json(&summary).map_err(std::io::Error::from)?;
    write_text(&out_dir.join(SUMMARY_FILE), &json)?;

    write_text(
        &out_dir.join(TYPE_TABLE_FILE),
        &render_distribution_tsv("Tipo", &summary.types),
    )?;
    write_text(
        &out_dir.join(SEVERITY_TABLE_FILE),
        &render_distribution_tsv("Severidad", &summary.severities),
    )?;

    write_table(&out_dir.join(EXPORT_FILE), &input.view.records)?;

    tracing::info!(out_dir = %out_dir.display(), "reports written");
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
