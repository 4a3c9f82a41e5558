//! Numeric table parser for b-files
//!
//! A b-file is the authoritative `<index> <value>` table accompanying an
//! entry. Parsing is tolerant by design: a line that fails to parse, or
//! an index that is not exactly one past the previous, truncates the
//! table at that point instead of failing the entry. Everything parsed
//! before the stop is kept.

use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// The parsed (index, value) table of a b-file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BfileTable {
    /// Index of the first parsed row; absent when no row parsed.
    pub first_index: Option<i64>,
    pub values: Vec<i64>,
}

impl BfileTable {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse `bfile_text` into an index-contiguous value table.
///
/// `#`-comment lines and blank lines are skipped. Truncation points are
/// reported as diagnostics, never as errors.
pub fn parse_bfile(
    sequence_id: u32,
    bfile_text: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> BfileTable {
    let mut table = BfileTable::default();
    let mut last_index: Option<i64> = None;

    for (number, raw_line) in bfile_text.split('\n').enumerate() {
        let line_number = number + 1;

        // comment check happens before trimming, as published b-files
        // only ever carry the marker in column one
        if raw_line.starts_with('#') {
            continue;
        }
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (index, value) = match parse_row(trimmed) {
            Some(pair) => pair,
            None => {
                diagnostics.push(Diagnostic::new(
                    sequence_id,
                    DiagnosticKind::BfileLineUnparsed {
                        line_number,
                        line: raw_line.to_string(),
                    },
                ));
                break;
            }
        };

        if let Some(previous) = last_index {
            if index != previous + 1 {
                diagnostics.push(Diagnostic::new(
                    sequence_id,
                    DiagnosticKind::BfileNonSequentialIndex {
                        line_number,
                        index,
                        previous,
                    },
                ));
                break;
            }
        } else {
            table.first_index = Some(index);
        }

        last_index = Some(index);
        table.values.push(value);
    }

    table
}

/// Parse one `<index> <value>` row. Anything after the second integer is
/// ignored, matching the tolerance of the published format.
fn parse_row(line: &str) -> Option<(i64, i64)> {
    let mut tokens = line.split_whitespace();
    let index = parse_integer(tokens.next()?)?;
    let value = parse_integer(tokens.next()?)?;
    Some((index, value))
}

/// Plain decimal integers, optionally `-`-signed. An explicit `+` sign
/// is not part of the published format.
fn parse_integer(token: &str) -> Option<i64> {
    if token.starts_with('+') {
        return None;
    }
    token.parse().ok()
}
