use std::fs;

use super::*;
use crate::model::classification::{DeficiencyType, Severity};
use crate::store::MemoryRecordStore;

fn mixed_record(id: &str, age: u8) -> Record {
    let mut responses = ResponseVector::all_pass();
    for i in [0, 4, 5, 6, 10, 13, 37] {
        responses.set(i, Outcome::Fail);
    }
    Record::new(id.to_string(), age, responses)
}

#[test]
fn test_missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvRecordStore::new(dir.path().join("absent.csv"));
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_empty_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();
    let store = CsvRecordStore::new(&path);
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_round_trip_preserves_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CsvRecordStore::new(dir.path().join("nested").join("store.csv"));
    let first = mixed_record("Estudiante, 01", 21);
    let second = Record::new("02".to_string(), 0, ResponseVector::all_pass());
    store.append(&first).unwrap();
    store.append(&second).unwrap();

    let back = store.read_all().unwrap();
    assert_eq!(back, vec![first.clone(), second]);
    assert_eq!(back[0].result.deficiency, DeficiencyType::ProtanDeutan);
    assert_eq!(back[0].result.severity, Severity::Severe);
}

#[test]
fn test_header_written_once_and_columns_grouped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.csv");
    let mut store = CsvRecordStore::new(&path);
    store.append(&mixed_record("a", 20)).unwrap();
    store.append(&mixed_record("b", 22)).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ID,Edad,Lámina 1,"));
    assert!(lines[0].ends_with(",Tipo,Severidad"));
    assert_eq!(text.matches("Lámina 11 (Normal)").count(), 1);

    let row: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(row.len(), COLUMNS);
    // index 10 is plate 11 normal, index 37 plate 24 defect, index 13 plate 12 defect
    assert_eq!(row[2 + 10], "✗");
    assert_eq!(row[2 + SINGLE_PLATES + PAIRED_PLATES + 13], "✗");
    assert_eq!(row[2 + SINGLE_PLATES + PAIRED_PLATES + 1], "✗");
    assert_eq!(row[2 + SINGLE_PLATES + 1], "✓");
    assert_eq!(row[COLUMNS - 2], "Protan/Deutan");
    assert_eq!(row[COLUMNS - 1], "Severa");
}

#[test]
fn test_malformed_rows_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.csv");
    let mut store = CsvRecordStore::new(&path);
    store.append(&mixed_record("good", 20)).unwrap();

    let good = to_row(&mixed_record("later", 25)).join(",");
    let mut bad_age = to_row(&mixed_record("old", 20));
    bad_age[1] = "121".to_string();
    let mut bad_symbol = to_row(&mixed_record("sym", 20));
    bad_symbol[5] = "?".to_string();
    let mut bad_label = to_row(&mixed_record("lbl", 20));
    bad_label[COLUMNS - 2] = "Deuteranopia".to_string();

    let mut text = fs::read_to_string(&path).unwrap();
    text.push_str("short,row\n");
    for row in [bad_age, bad_symbol, bad_label] {
        text.push_str(&row.join(","));
        text.push('\n');
    }
    text.push_str(&good);
    text.push('\n');
    fs::write(&path, text).unwrap();

    let ids: Vec<String> = store.read_all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["good".to_string(), "later".to_string()]);
}

#[test]
fn test_non_utf8_row_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.csv");
    let mut store = CsvRecordStore::new(&path);
    store.append(&mixed_record("before", 20)).unwrap();

    let mut bytes = fs::read(&path).unwrap();
    let mut latin1 = to_row(&mixed_record("x", 20)).join(",").into_bytes();
    latin1[0] = 0xFF;
    bytes.extend_from_slice(&latin1);
    bytes.push(b'\n');
    fs::write(&path, bytes).unwrap();
    store.append(&mixed_record("after", 22)).unwrap();

    let ids: Vec<String> = store.read_all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["before".to_string(), "after".to_string()]);
}

#[test]
fn test_append_after_missing_final_newline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.csv");
    let mut store = CsvRecordStore::new(&path);
    store.append(&mixed_record("first", 20)).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    fs::write(&path, text.trim_end_matches('\n')).unwrap();
    store.append(&mixed_record("second", 21)).unwrap();

    let ids: Vec<String> = store.read_all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["first".to_string(), "second".to_string()]);
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);
}

#[test]
fn test_parse_row_reports_line() {
    let row = StringRecord::from(vec!["x", "20"]);
    match parse_row(&row, 7) {
        Err(StoreError::Parse { line, .. }) => assert_eq!(line, 7),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn test_write_table_matches_store_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    let records = vec![mixed_record("a", 20), mixed_record("b", 40)];
    write_table(&path, &records).unwrap();

    let reread = CsvRecordStore::new(&path).read_all().unwrap();
    assert_eq!(reread, records);

    let mut memory = MemoryRecordStore::new();
    for r in &records {
        memory.append(r).unwrap();
    }
    assert_eq!(memory.read_all().unwrap(), reread);
}
