//! Integration tests for tamper detection on the durable document

use certchain::chain::Chain;
use certchain::clock::FixedClock;
use certchain::error::ChainError;
use certchain::store::FileStore;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

fn seeded_ledger(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("cert_chain.json");
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
    let mut chain = Chain::with_clock(Box::new(FileStore::new(&path)), Box::new(clock));

    let f1 = chain
        .mint("filehash01", "John Doe", "Physics", "2025", "John Doe")
        .unwrap();
    chain.transfer(&f1, "John Doe", "University Admin").unwrap();
    chain
        .mint("filehash02", "Jane Roe", "Chemistry", "2024", "Jane Roe")
        .unwrap();
    path
}

fn corrupted_index_on_load(path: &std::path::Path) -> u64 {
    match Chain::load(Box::new(FileStore::new(path))).map(|_| ()) {
        Err(ChainError::ChainCorrupted { index, .. }) => index,
        other => panic!("expected ChainCorrupted, got {:?}", other),
    }
}

/// Flip one hex character of a string field in the stored document.
fn flip_field_byte(path: &std::path::Path, block: usize, field: &str) {
    let raw = std::fs::read_to_string(path).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let value = doc[block][field].as_str().unwrap();
    let mut bytes = value.to_string().into_bytes();
    bytes[0] = if bytes[0] == b'0' { b'1' } else { b'0' };
    doc[block][field] = serde_json::Value::String(String::from_utf8(bytes).unwrap());

    std::fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

#[test]
fn pristine_ledger_loads_cleanly() {
    let dir = TempDir::new().unwrap();
    let path = seeded_ledger(&dir);
    let chain = Chain::load(Box::new(FileStore::new(&path))).unwrap();
    assert_eq!(chain.len(), 3);
}

#[test]
fn mutated_digest_is_reported_at_that_block() {
    let dir = TempDir::new().unwrap();
    let path = seeded_ledger(&dir);

    flip_field_byte(&path, 1, "digest");
    assert_eq!(corrupted_index_on_load(&path), 1);
}

#[test]
fn mutated_previous_digest_is_reported_at_that_block() {
    let dir = TempDir::new().unwrap();
    let path = seeded_ledger(&dir);

    flip_field_byte(&path, 2, "previous_digest");
    assert_eq!(corrupted_index_on_load(&path), 2);
}

#[test]
fn edited_payload_is_reported_at_that_block() {
    let dir = TempDir::new().unwrap();
    let path = seeded_ledger(&dir);

    // Rewrite history: change who the certificate was transferred to.
    let raw = std::fs::read_to_string(&path).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    doc[1]["to_owner"] = serde_json::Value::String("Mallory".to_string());
    std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    assert_eq!(corrupted_index_on_load(&path), 1);
}

#[test]
fn earliest_of_several_corruptions_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = seeded_ledger(&dir);

    flip_field_byte(&path, 2, "digest");
    flip_field_byte(&path, 0, "digest");
    assert_eq!(corrupted_index_on_load(&path), 0);
}

#[test]
fn truncated_ledger_breaks_linkage() {
    let dir = TempDir::new().unwrap();
    let path = seeded_ledger(&dir);

    // Drop the middle block; the chain must not silently close the gap.
    let raw = std::fs::read_to_string(&path).unwrap();
    let mut doc: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    doc.remove(1);
    std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

    assert_eq!(corrupted_index_on_load(&path), 1);
}
