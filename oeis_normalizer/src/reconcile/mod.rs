//! Sequence reconciliation between inline values and the b-file table
//!
//! The inline S/T/U values and the b-file both describe the same
//! sequence. When they agree on their overlapping prefix, the longer one
//! wins; when they disagree, the inline values are the safe fallback and
//! the b-file is ignored for the entry. Reconciliation never fails, it
//! only decides which values are installed and which diagnostics attach.

use crate::bfile::BfileTable;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::entry::Offset;

/// The reconciled value sequence for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledSequence {
    pub values: Vec<i64>,
    /// First index reported by the b-file, regardless of which side's
    /// values were selected.
    pub first_index: Option<i64>,
}

/// Reconcile the inline values against the b-file table and check both
/// components of the declared offset.
pub fn reconcile(
    sequence_id: u32,
    stu_values: &[i64],
    bfile: &BfileTable,
    offset: Option<Offset>,
    diagnostics: &mut Vec<Diagnostic>,
) -> ReconciledSequence {
    if bfile.len() < stu_values.len() {
        diagnostics.push(Diagnostic::new(
            sequence_id,
            DiagnosticKind::BfileShorterThanInline {
                inline_len: stu_values.len(),
                bfile_len: bfile.len(),
            },
        ));
    }

    let overlap = stu_values.len().min(bfile.len());
    let mismatch = (0..overlap).find(|&i| stu_values[i] != bfile.values[i]);

    let values = match mismatch {
        Some(position) => {
            diagnostics.push(Diagnostic::new(
                sequence_id,
                DiagnosticKind::ValuesMismatch {
                    position,
                    inline_value: stu_values[position],
                    bfile_value: bfile.values[position],
                },
            ));
            stu_values.to_vec()
        }
        // the b-file wins only when strictly longer
        None if bfile.len() > stu_values.len() => bfile.values.clone(),
        None => stu_values.to_vec(),
    };

    if let Some(offset) = offset {
        if bfile.first_index != Some(offset.first_index) {
            diagnostics.push(Diagnostic::new(
                sequence_id,
                DiagnosticKind::OffsetIndexMismatch {
                    declared: offset.first_index,
                    actual: bfile.first_index,
                },
            ));
        }

        let computed = first_large_position(&values);
        if offset.first_large_index != computed {
            diagnostics.push(Diagnostic::new(
                sequence_id,
                DiagnosticKind::OffsetMagnitudeMismatch {
                    declared: offset.first_large_index,
                    computed,
                },
            ));
        }
    }

    ReconciledSequence {
        values,
        first_index: bfile.first_index,
    }
}

/// 1-based position of the first value whose magnitude exceeds 1,
/// defaulting to 1 when no such value exists.
fn first_large_position(values: &[i64]) -> i64 {
    values
        .iter()
        .position(|v| v.abs() > 1)
        .map(|p| p as i64 + 1)
        .unwrap_or(1)
}
