//! Normalized entry model
//!
//! The [`OeisEntry`] is the single output type of a successful parse: one
//! canonical record per sequence, ready for serialization.

use crate::config::compile_time::entry::A_NUMBER_WIDTH;
use serde::{Deserialize, Serialize};

/// Format a numeric sequence id as its canonical A-number (`A000045`).
pub fn a_number(sequence_id: u32) -> String {
    format!("A{:0width$}", sequence_id, width = A_NUMBER_WIDTH)
}

/// The declared offset pair of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offset {
    /// Index of the first term of the sequence.
    pub first_index: i64,
    /// 1-based position of the first term whose magnitude exceeds 1.
    pub first_large_index: i64,
}

impl Offset {
    pub fn new(first_index: i64, first_large_index: i64) -> Self {
        Self {
            first_index,
            first_large_index,
        }
    }
}

/// One normalized OEIS entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OeisEntry {
    /// Numeric sequence id (45 for A000045).
    pub sequence_id: u32,
    /// Raw identification payload, if the entry carried one.
    pub identification: Option<String>,
    /// Reconciled sequence values, longest trusted prefix available.
    pub values: Vec<i64>,
    /// The sequence's name.
    pub name: String,
    /// Declared offset pair; absent when the directive was missing
    /// or unusable.
    pub offset: Option<Offset>,
    /// Canonical keyword list: known-or-not, deduplicated, sorted.
    pub keywords: Vec<String>,
}

impl OeisEntry {
    pub fn new(
        sequence_id: u32,
        identification: Option<String>,
        values: Vec<i64>,
        name: String,
        offset: Option<Offset>,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            sequence_id,
            identification,
            values,
            name,
            offset,
            keywords,
        }
    }

    /// The entry's canonical A-number.
    pub fn a_number(&self) -> String {
        a_number(self.sequence_id)
    }
}
