//! The entry parsing pipeline
//!
//! One pure, synchronous function from `(sequence_id, main_text,
//! bfile_text)` to a normalized entry. Stages run in fixed order: split,
//! order validation, field extraction, b-file parsing, keyword
//! canonicalization, reconciliation, composition. Non-fatal diagnostics
//! are returned alongside the result, never logged from here; calls are
//! independent and safe to run concurrently across entries.

mod error;

pub use error::{ParseError, ParseErrorKind};

use crate::bfile;
use crate::config::charmap::{default_policies, CharacterPolicies};
use crate::diagnostics::Diagnostic;
use crate::directives;
use crate::entry::OeisEntry;
use crate::fields;
use crate::keywords;
use crate::reconcile;

/// The complete output of parsing one entry: the result plus every
/// non-fatal finding, in emission order.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub result: Result<OeisEntry, ParseError>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Parse one entry with the default character policies.
pub fn parse_entry(sequence_id: u32, main_text: &str, bfile_text: &str) -> ParseOutcome {
    parse_entry_with_policies(sequence_id, main_text, bfile_text, default_policies())
}

/// Parse one entry, checking directive lines against `policies`.
pub fn parse_entry_with_policies(
    sequence_id: u32,
    main_text: &str,
    bfile_text: &str,
    policies: &CharacterPolicies,
) -> ParseOutcome {
    let mut diagnostics = Vec::new();
    let result = run_stages(sequence_id, main_text, bfile_text, policies, &mut diagnostics);
    ParseOutcome {
        result,
        diagnostics,
    }
}

fn run_stages(
    sequence_id: u32,
    main_text: &str,
    bfile_text: &str,
    policies: &CharacterPolicies,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<OeisEntry, ParseError> {
    let lines = directives::split_directives(sequence_id, main_text, policies, diagnostics)
        .map_err(|err| ParseError::new(sequence_id, err))?;

    directives::validate_order(&lines).map_err(|err| ParseError::new(sequence_id, err))?;

    let extracted = fields::extract_fields(sequence_id, &lines, diagnostics)
        .map_err(|err| ParseError::new(sequence_id, err))?;

    let table = bfile::parse_bfile(sequence_id, bfile_text, diagnostics);

    let canonical_keywords = keywords::canonicalize(sequence_id, &extracted.raw_keywords, diagnostics);

    let reconciled = reconcile::reconcile(
        sequence_id,
        &extracted.stu_values,
        &table,
        extracted.offset,
        diagnostics,
    );

    Ok(OeisEntry::new(
        sequence_id,
        extracted.identification,
        reconciled.values,
        extracted.name,
        extracted.offset,
        canonical_keywords,
    ))
}
