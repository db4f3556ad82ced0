use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, StringRecord, WriterBuilder};

use crate::model::classification::{ClassificationResult, DeficiencyType, Severity};
use crate::model::record::{MAX_AGE, Record};
use crate::model::response::{Outcome, PAIRED_PLATES, ResponseVector, SINGLE_PLATES};
use crate::store::{RecordStore, StoreError, header};

const COLUMNS: usize = 2 + SINGLE_PLATES + 2 * PAIRED_PLATES + 2;

/// File-backed store. One writer at a time; appends are not locked.
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_empty_or_missing(&self) -> Result<bool, StoreError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }
}

impl RecordStore for CsvRecordStore {
    fn read_all(&self) -> Result<Vec<Record>, StoreError> {
        if self.is_empty_or_missing()? {
            tracing::info!(path = %self.path.display(), "no record store yet; treating as empty");
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let expected = header();
        let found = reader.byte_headers()?.clone();
        if found.iter().ne(expected.iter().map(String::as_bytes)) {
            tracing::warn!(
                path = %self.path.display(),
                "record store header differs from the expected layout; reading by position"
            );
        }

        let mut records = Vec::new();
        for row in reader.byte_records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            match decode_row(row, line).and_then(|row| parse_row(&row, line)) {
                Ok(record) => records.push(record),
                Err(err) => tracing::warn!("skipping stored row: {err}"),
            }
        }
        tracing::info!(path = %self.path.display(), n = records.len(), "loaded records");
        Ok(records)
    }

    fn append(&mut self, record: &Record) -> Result<(), StoreError> {
        let fresh = self.is_empty_or_missing()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        if !fresh && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if fresh {
            writer.write_record(header())?;
        }
        writer.write_record(to_row(record))?;
        writer.flush()?;
        tracing::debug!(path = %self.path.display(), id = %record.id, "appended record");
        Ok(())
    }
}

/// Files saved by editors or spreadsheets may lack the final line break.
fn ends_with_newline(file: &mut File) -> Result<bool, StoreError> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn decode_row(row: ByteRecord, line: u64) -> Result<StringRecord, StoreError> {
    StringRecord::from_byte_record(row).map_err(|e| StoreError::Parse {
        line,
        reason: format!("invalid UTF-8 in field {}", e.utf8_error().field() + 1),
    })
}

/// Writes `records` as a complete table, header included, replacing `path`.
pub fn write_table(path: &Path, records: &[Record]) -> Result<(), StoreError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(File::create(path)?);
    writer.write_record(header())?;
    for record in records {
        writer.write_record(to_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Storage order: singles, then every normal reading, then every defect reading.
pub fn to_row(record: &Record) -> Vec<String> {
    let responses = &record.responses;
    let mut row = Vec::with_capacity(COLUMNS);
    row.push(record.id.clone());
    row.push(record.age.to_string());
    let outcomes = responses
        .single()
        .iter()
        .copied()
        .chain(responses.normal())
        .chain(responses.defect());
    row.extend(outcomes.map(|o| o.symbol().to_string()));
    row.push(record.result.deficiency.label().to_string());
    row.push(record.result.severity.label().to_string());
    row
}

pub fn parse_row(row: &StringRecord, line: u64) -> Result<Record, StoreError> {
    let fail = |reason: String| StoreError::Parse { line, reason };

    if row.len() != COLUMNS {
        return Err(fail(format!("expected {COLUMNS} columns, found {}", row.len())));
    }

    let id = row[0].to_string();
    let age: u8 = row[1]
        .trim()
        .parse()
        .map_err(|_| fail(format!("invalid age '{}'", &row[1])))?;
    if age > MAX_AGE {
        return Err(fail(format!("age {age} exceeds {MAX_AGE}")));
    }

    let mut outcomes = Vec::with_capacity(SINGLE_PLATES + 2 * PAIRED_PLATES);
    for col in 2..(2 + SINGLE_PLATES + 2 * PAIRED_PLATES) {
        let outcome = parse_outcome(&row[col])
            .ok_or_else(|| fail(format!("invalid outcome '{}' in column {}", &row[col], col + 1)))?;
        outcomes.push(outcome);
    }
    let (single, rest) = outcomes.split_at(SINGLE_PLATES);
    let (normal, defect) = rest.split_at(PAIRED_PLATES);
    let responses =
        ResponseVector::from_groups(single, normal, defect).map_err(|e| fail(e.to_string()))?;

    let type_label = &row[COLUMNS - 2];
    let deficiency = DeficiencyType::from_label(type_label.trim())
        .ok_or_else(|| fail(format!("unknown type '{type_label}'")))?;
    let severity_label = &row[COLUMNS - 1];
    let severity = Severity::from_label(severity_label.trim())
        .ok_or_else(|| fail(format!("unknown severity '{severity_label}'")))?;

    Ok(Record {
        id,
        age,
        responses,
        result: ClassificationResult {
            deficiency,
            severity,
        },
    })
}

fn parse_outcome(cell: &str) -> Option<Outcome> {
    let mut chars = cell.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Outcome::from_symbol(c),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/store/csv_store.rs"]
mod tests;
