pub mod csv_store;
pub mod memory;

use thiserror::Error;

use crate::model::record::Record;
use crate::model::response::{PAIRED_PLATES, SINGLE_PLATES};

pub use csv_store::CsvRecordStore;
pub use memory::MemoryRecordStore;

pub const DEFAULT_STORE_FILE: &str = "resultados_HRR.csv";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error on line {line}: {reason}")]
    Parse { line: u64, reason: String },
}

/// Append-only persistence for screening records.
pub trait RecordStore {
    fn read_all(&self) -> Result<Vec<Record>, StoreError>;
    fn append(&mut self, record: &Record) -> Result<(), StoreError>;
}

/// Column names of the stored table, in storage order.
pub fn header() -> Vec<String> {
    let mut cols = Vec::with_capacity(2 + SINGLE_PLATES + 2 * PAIRED_PLATES + 2);
    cols.push("ID".to_string());
    cols.push("Edad".to_string());
    for plate in 1..=SINGLE_PLATES {
        cols.push(format!("Lámina {plate}"));
    }
    let paired = (SINGLE_PLATES + 1)..=(SINGLE_PLATES + PAIRED_PLATES);
    for plate in paired.clone() {
        cols.push(format!("Lámina {plate} (Normal)"));
    }
    for plate in paired {
        cols.push(format!("Lámina {plate} (Defecto)"));
    }
    cols.push("Tipo".to_string());
    cols.push("Severidad".to_string());
    cols
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/tests.rs"]
mod tests;
