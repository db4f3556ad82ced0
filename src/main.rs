mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hrr_screen::error::AppError;
use hrr_screen::model::record::{MAX_AGE, Record};
use hrr_screen::model::response::ResponseVector;
use hrr_screen::model::thresholds::{AgeRange, ScreeningProfile};
use hrr_screen::pipeline::stage1_classify::{classify, count_errors};
use hrr_screen::pipeline::stage2_aggregate::build_view;
use hrr_screen::pipeline::stage3_prevalence::prevalence_test;
use hrr_screen::pipeline::stage4_report::{ReportInput, build_summary, write_reports};
use hrr_screen::report::text::render_report_text;
use hrr_screen::store::{CsvRecordStore, DEFAULT_STORE_FILE, RecordStore};

#[derive(Parser, Debug)]
#[command(
    name = "hrr-screen",
    version,
    about = "Record, classify and summarise Hardy-Rand-Rittler colour-vision plate tests."
)]
struct Cli {
    /// CSV file holding every stored record.
    #[arg(long, global = true, default_value = DEFAULT_STORE_FILE)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one sitting and append it to the store.
    Record {
        #[arg(long)]
        id: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_AGE as i64))]
        age: u8,
        /// 38 symbols: plates 1-10, then (normal, defect) for plates 11-24.
        /// `✓`/`p`/`1` pass, `✗`/`f`/`x`/`0` fail; whitespace is ignored.
        #[arg(long)]
        responses: String,
    },
    /// Classify one sitting without storing it.
    Classify {
        #[arg(long)]
        responses: String,
    },
    /// Aggregate stored records and test prevalence.
    Stats {
        #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u8).range(0..=MAX_AGE as i64))]
        age_min: u8,
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(0..=MAX_AGE as i64))]
        age_max: u8,
        /// Directory for report.txt, summary.json, distribution tables and the filtered export.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone)]
struct RunConfig {
    store_path: PathBuf,
    action: Action,
}

#[derive(Debug, Clone)]
enum Action {
    Record {
        id: String,
        age: u8,
        responses: ResponseVector,
    },
    Classify {
        responses: ResponseVector,
    },
    Stats {
        age_range: AgeRange,
        out_dir: Option<PathBuf>,
    },
}

fn main() {
    logging::init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(cli)?;
    let mut store = CsvRecordStore::new(&config.store_path);

    match config.action {
        Action::Record { id, age, responses } => {
            let counts = count_errors(&responses);
            let record = Record::new(id, age, responses);
            tracing::info!(
                id = %record.id,
                red_green = counts.red_green,
                blue_yellow = counts.blue_yellow,
                "classified sitting"
            );
            store.append(&record)?;
            println!(
                "Resultado guardado: {} ({})",
                record.result.deficiency.label(),
                record.result.severity.label()
            );
        }
        Action::Classify { responses } => {
            let counts = count_errors(&responses);
            let result = classify(&responses);
            println!(
                "{} ({}) errores rojo-verde={} azul-amarillo={}",
                result.deficiency.label(),
                result.severity.label(),
                counts.red_green,
                counts.blue_yellow
            );
        }
        Action::Stats { age_range, out_dir } => {
            run_stats(&store, age_range, out_dir)?;
        }
    }

    Ok(())
}

fn run_stats(
    store: &impl RecordStore,
    age_range: AgeRange,
    out_dir: Option<PathBuf>,
) -> Result<(), AppError> {
    let records = store.read_all()?;
    if records.is_empty() {
        println!("No hay datos registrados aún.");
        return Ok(());
    }

    let profile = ScreeningProfile::hrr_v1();
    let view = build_view(&records, age_range);
    let input = ReportInput {
        view: &view,
        prevalence: prevalence_test(&view, &profile),
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    print!("{}", render_report_text(&build_summary(&input)));

    if let Some(dir) = out_dir {
        write_reports(&input, &dir)?;
    }
    Ok(())
}

fn resolve_config(cli: Cli) -> Result<RunConfig, AppError> {
    let action = match cli.command {
        Command::Record { id, age, responses } => Action::Record {
            id,
            age,
            responses: ResponseVector::parse(&responses)?,
        },
        Command::Classify { responses } => Action::Classify {
            responses: ResponseVector::parse(&responses)?,
        },
        Command::Stats {
            age_min,
            age_max,
            out,
        } => Action::Stats {
            age_range: AgeRange::new(age_min, age_max)?,
            out_dir: out,
        },
    };
    Ok(RunConfig {
        store_path: cli.store,
        action,
    })
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
