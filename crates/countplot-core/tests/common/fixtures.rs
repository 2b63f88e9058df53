//! Test fixture loading utilities

use countplot_core::DatasetTable;
use std::path::PathBuf;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load a dataset tick recorded as JSON
#[allow(dead_code)]
pub fn load_tick(name: &str) -> DatasetTable {
    DatasetTable::from_json(&load_fixture(&format!("ticks/{}", name)))
        .unwrap_or_else(|e| panic!("Failed to parse tick {}: {}", name, e))
}

/// Counts matrix from integer rows
#[allow(dead_code)]
pub fn counts(rows: &[&[u32]]) -> Vec<Vec<f64>> {
    rows.iter()
        .map(|row| row.iter().map(|&v| f64::from(v)).collect())
        .collect()
}
