use crate::report::StatsSummary;

pub fn render_summary_json(summary: &StatsSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
