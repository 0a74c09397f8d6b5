//! Reading of the stored event records
//!
//! Event files are JSON documents whose top level maps record store names
//! (such as "Events") to arrays of records. Each record maps column names to
//! either a single number or one number per jet:
//!
//! ```json
//! { "Events": [ { "nFatJet": 2, "FatJet_pt": [412.0, 388.5], ... } ] }
//! ```

use crate::{numeric::Float, Result};

use eyre::{format_err, WrapErr};
use serde::Deserialize;

use std::{collections::BTreeMap, fs, path::Path, slice};

/// Content of one column of a record
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColumnValue {
    Scalar(Float),
    Array(Vec<Float>),
}
//
impl ColumnValue {
    /// View the column as a sequence, scalars being single-element ones
    pub fn as_slice(&self) -> &[Float] {
        match self {
            Self::Scalar(value) => slice::from_ref(value),
            Self::Array(values) => values,
        }
    }
}

/// One event of the record store
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, ColumnValue>);
//
impl Record {
    /// Access a column by name
    pub fn column(&self, name: &str) -> Option<&[Float]> {
        self.0.get(name).map(ColumnValue::as_slice)
    }

    /// Add or replace a column
    #[cfg(test)]
    pub fn with_column(mut self, name: &str, values: Vec<Float>) -> Self {
        self.0.insert(name.to_owned(), ColumnValue::Array(values));
        self
    }
}

/// Named collection of event records
pub struct Dataset {
    /// Name of the record store in the event file
    pub name: String,

    /// Event records, in storage order
    pub records: Vec<Record>,
}
//
impl Dataset {
    /// Open an event file and extract one of its record stores
    pub fn load(path: impl AsRef<Path>, store: &str) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read event file {}", path.display()))?;
        Self::parse(&text, store)
            .wrap_err_with(|| format!("Failed to decode event file {}", path.display()))
    }

    /// Extract a record store from the text of an event file
    pub fn parse(text: &str, store: &str) -> Result<Self> {
        let mut stores: BTreeMap<String, Vec<Record>> =
            serde_json::from_str(text).wrap_err("Malformed event records")?;
        let records = stores.remove(store).ok_or_else(|| {
            let available = stores.keys().cloned().collect::<Vec<_>>().join(", ");
            format_err!("No record store named {} (available: {})", store, available)
        })?;
        Ok(Self {
            name: store.to_owned(),
            records,
        })
    }
}
