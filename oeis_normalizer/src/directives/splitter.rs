//! Splits an entry's main text into validated directive lines
//!
//! Every line must be non-empty, begin with `%`, and carry a recognized
//! directive code; anything else is fatal for the entry. The splitter also
//! runs the injected permitted-character check per directive, which only
//! ever produces non-fatal diagnostics.

use super::error::StructureError;
use super::{DirectiveCode, DirectiveLine};
use crate::config::charmap::CharacterPolicies;
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// Split `main_text` into one validated [`DirectiveLine`] per input line.
///
/// Character-set violations are appended to `diagnostics`; structural
/// violations abort with a [`StructureError`].
pub fn split_directives(
    sequence_id: u32,
    main_text: &str,
    policies: &CharacterPolicies,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<DirectiveLine>, StructureError> {
    let mut lines = Vec::new();

    for (index, raw_line) in main_text.split('\n').enumerate() {
        let line_number = index + 1;

        let mut chars = raw_line.chars();
        let (first, second) = (chars.next(), chars.next());

        if first != Some('%') {
            return Err(StructureError::malformed_line(line_number, raw_line));
        }
        let marker = match second {
            Some(c) => c,
            None => return Err(StructureError::malformed_line(line_number, raw_line)),
        };

        let code = DirectiveCode::from_char(marker)
            .ok_or_else(|| StructureError::unknown_directive(line_number, marker))?;

        if let Some(offending) = policies.check(code, raw_line) {
            diagnostics.push(Diagnostic::new(
                sequence_id,
                DiagnosticKind::UnacceptableCharacters {
                    directive: code.as_str(),
                    characters: offending,
                },
            ));
        }

        lines.push(DirectiveLine::new(code, line_number, raw_line));
    }

    Ok(lines)
}
