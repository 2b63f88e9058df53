//! Dataset source model
//!
//! On every tick the dataset source hands the applet a table of named
//! datasets, each carrying a validity flag and a value. Lookups here turn a
//! missing or invalid entry, or a value of the wrong shape, into an
//! [`UpdateError`] so that the caller can drop the whole update.

use crate::error::{UpdateError, UpdateResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value of one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetValue {
    Scalar(f64),
    Array(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl DatasetValue {
    pub fn kind(&self) -> &'static str {
        match self {
            DatasetValue::Scalar(_) => "scalar",
            DatasetValue::Array(_) => "array",
            DatasetValue::Matrix(_) => "matrix",
        }
    }
}

impl From<f64> for DatasetValue {
    fn from(value: f64) -> Self {
        DatasetValue::Scalar(value)
    }
}

impl From<Vec<f64>> for DatasetValue {
    fn from(values: Vec<f64>) -> Self {
        DatasetValue::Array(values)
    }
}

impl From<Vec<Vec<f64>>> for DatasetValue {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        DatasetValue::Matrix(rows)
    }
}

/// Dataset with its validity flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub valid: bool,
    pub value: DatasetValue,
}

impl DatasetEntry {
    pub fn valid(value: impl Into<DatasetValue>) -> Self {
        Self {
            valid: true,
            value: value.into(),
        }
    }

    pub fn invalid(value: impl Into<DatasetValue>) -> Self {
        Self {
            valid: false,
            value: value.into(),
        }
    }
}

/// Anything that can look datasets up by name
pub trait DatasetSource {
    fn dataset(&self, name: &str) -> Option<&DatasetEntry>;
}

impl DatasetSource for HashMap<String, DatasetEntry> {
    fn dataset(&self, name: &str) -> Option<&DatasetEntry> {
        self.get(name)
    }
}

/// In-memory dataset table, one per update tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetTable {
    entries: HashMap<String, DatasetEntry>,
}

impl DatasetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a valid dataset
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<DatasetValue>) {
        self.entries.insert(name.into(), DatasetEntry::valid(value));
    }

    pub fn insert_entry(&mut self, name: impl Into<String>, entry: DatasetEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Builder form of [`DatasetTable::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<DatasetValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<DatasetEntry> {
        self.entries.remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a table from JSON (`{"name": {"valid": true, "value": ...}}`)
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }
}

impl DatasetSource for DatasetTable {
    fn dataset(&self, name: &str) -> Option<&DatasetEntry> {
        self.entries.get(name)
    }
}

/// Value of a dataset that must be present and valid
pub fn require<'a, S: DatasetSource + ?Sized>(
    source: &'a S,
    name: &str,
) -> UpdateResult<&'a DatasetValue> {
    let entry = source
        .dataset(name)
        .ok_or_else(|| UpdateError::MissingDataset {
            name: name.to_string(),
        })?;
    if !entry.valid {
        return Err(UpdateError::InvalidDataset {
            name: name.to_string(),
        });
    }
    Ok(&entry.value)
}

fn mismatch(name: &str, expected: &'static str) -> UpdateError {
    UpdateError::TypeMismatch {
        name: name.to_string(),
        expected,
    }
}

/// Scalar dataset
pub fn scalar<S: DatasetSource + ?Sized>(source: &S, name: &str) -> UpdateResult<f64> {
    match require(source, name)? {
        DatasetValue::Scalar(v) => Ok(*v),
        _ => Err(mismatch(name, "scalar")),
    }
}

/// 1D dataset
pub fn array<'a, S: DatasetSource + ?Sized>(source: &'a S, name: &str) -> UpdateResult<&'a [f64]> {
    match require(source, name)? {
        DatasetValue::Array(values) => Ok(values),
        _ => Err(mismatch(name, "array")),
    }
}

/// 2D dataset; an empty array counts as a matrix with no rows
pub fn matrix<'a, S: DatasetSource + ?Sized>(
    source: &'a S,
    name: &str,
) -> UpdateResult<&'a [Vec<f64>]> {
    match require(source, name)? {
        DatasetValue::Matrix(rows) => Ok(rows),
        DatasetValue::Array(values) if values.is_empty() => Ok(&[]),
        _ => Err(mismatch(name, "matrix")),
    }
}

/// Convert a value to a non-negative integer count
pub fn to_count(name: &str, value: f64) -> UpdateResult<u64> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(UpdateError::InvalidValue {
            name: name.to_string(),
            message: format!("{value} is not a non-negative integer"),
        });
    }
    Ok(value as u64)
}

/// 2D dataset of photon counts
pub fn count_rows<S: DatasetSource + ?Sized>(source: &S, name: &str) -> UpdateResult<Vec<Vec<u32>>> {
    matrix(source, name)?
        .iter()
        .map(|row| {
            row.iter()
                .map(|&v| {
                    let count = to_count(name, v)?;
                    u32::try_from(count).map_err(|_| UpdateError::InvalidValue {
                        name: name.to_string(),
                        message: format!("{v} does not fit a photon count"),
                    })
                })
                .collect::<UpdateResult<Vec<u32>>>()
        })
        .collect()
}

/// 1D dataset of non-negative integers
pub fn count_array<S: DatasetSource + ?Sized>(source: &S, name: &str) -> UpdateResult<Vec<u64>> {
    array(source, name)?
        .iter()
        .map(|&v| to_count(name, v))
        .collect()
}
