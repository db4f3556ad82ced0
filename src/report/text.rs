use crate::report::{CategoryStat, StatsSummary, format_f64_3};

const BAR_WIDTH: usize = 40;

pub fn render_report_text(summary: &StatsSummary) -> String {
    let mut out = String::new();

    out.push_str("Registro de prueba HRR\n");
    out.push_str("======================\n\n");

    out.push_str("Estadísticas acumuladas\n");
    out.push_str(&format!("Edad: {}-{}\n", summary.age_min, summary.age_max));
    out.push_str(&format!("Total de registros: {}\n\n", summary.n_records));

    out.push_str("Distribución por tipo\n");
    out.push_str(&render_bar_chart(&summary.types));
    out.push('\n');

    out.push_str("Distribución por severidad\n");
    out.push_str(&render_bar_chart(&summary.severities));
    out.push('\n');

    out.push_str("Prueba de hipótesis\n");
    match &summary.prevalence {
        Some(test) => {
            out.push_str(&format!(
                "Prevalencia observada: {}\n",
                format_f64_3(test.p_observed)
            ));
            out.push_str(&format!(
                "Prevalencia esperada: {}\n",
                format_f64_3(test.p_expected)
            ));
            out.push_str(&format!("Z = {:.2}, p = {:.4}\n", test.z, test.p_value));
            out.push_str(&significance_statement(test.significant, test.alpha));
            out.push('\n');
        }
        None => {
            out.push_str("Datos insuficientes: no hay registros en el rango de edad seleccionado.\n");
        }
    }

    out
}

/// Horizontal bars scaled to the largest category.
pub fn render_bar_chart(stats: &[CategoryStat]) -> String {
    let max = stats.iter().map(|s| s.count).max().unwrap_or(0);
    let label_width = stats
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for stat in stats {
        let len = if max == 0 {
            0
        } else {
            (stat.count * BAR_WIDTH).div_ceil(max)
        };
        let pad = label_width - stat.name.chars().count();
        out.push_str(&format!(
            "  {}{} | {} {}\n",
            stat.name,
            " ".repeat(pad),
            "#".repeat(len),
            stat.count
        ));
    }
    out
}

fn significance_statement(significant: bool, alpha: f64) -> String {
    if significant {
        format!("La diferencia es estadísticamente significativa (p < {alpha:.2})")
    } else {
        format!("No hay diferencia significativa (p ≥ {alpha:.2})")
    }
}
