//! Per-directive field extraction
//!
//! Turns the validated, grammar-ordered directive lines into typed values.
//! One extractor per directive code; fatal problems abort the entry, while
//! data-quality findings accumulate as diagnostics.

mod error;

pub use error::ExtractError;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::directives::{DirectiveCode, DirectiveLine};
use crate::entry::Offset;

/// The typed fields of one entry, before reconciliation against the
/// b-file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub identification: Option<String>,
    /// Parsed inline sequence values from the concatenated S/T/U payloads.
    pub stu_values: Vec<i64>,
    pub name: String,
    pub comments: Vec<String>,
    pub references: Vec<String>,
    pub links: Vec<String>,
    pub offset: Option<Offset>,
    /// Raw comma-split keyword fragments, empties retained.
    pub raw_keywords: Vec<String>,
}

/// Extract all typed fields from an entry's validated directive lines.
///
/// `lines` must already have passed order validation, so singleton
/// directives appear at most once.
pub fn extract_fields(
    sequence_id: u32,
    lines: &[DirectiveLine],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<EntryFields, ExtractError> {
    let find = |code: DirectiveCode| lines.iter().find(|l| l.code == code);
    let collect = |code: DirectiveCode| -> Result<Vec<String>, ExtractError> {
        lines
            .iter()
            .filter(|l| l.code == code)
            .map(|l| {
                l.payload()
                    .map(str::to_string)
                    .ok_or_else(|| ExtractError::malformed_line(&l.text))
            })
            .collect()
    };

    let identification = extract_identification(
        sequence_id,
        find(DirectiveCode::Identification)
            .ok_or_else(|| ExtractError::missing_mandatory("%I"))?,
        diagnostics,
    )?;

    let stu_values = extract_sequence_values(sequence_id, lines, diagnostics)?;

    let name_line = find(DirectiveCode::Name).ok_or_else(|| ExtractError::missing_mandatory("%N"))?;
    let name = name_line
        .payload()
        .map(str::to_string)
        .ok_or_else(|| ExtractError::malformed_line(&name_line.text))?;

    let comments = collect(DirectiveCode::Comment)?;
    let references = collect(DirectiveCode::Reference)?;
    let links = collect(DirectiveCode::Link)?;

    let raw_keywords = extract_raw_keywords(
        find(DirectiveCode::Keywords).ok_or_else(|| ExtractError::missing_mandatory("%K"))?,
    )?;

    let offset = extract_offset(sequence_id, find(DirectiveCode::Offset), diagnostics)?;

    if find(DirectiveCode::Author).is_none() {
        diagnostics.push(Diagnostic::new(sequence_id, DiagnosticKind::MissingAuthor));
    }

    Ok(EntryFields {
        identification,
        stu_values,
        name,
        comments,
        references,
        links,
        offset,
        raw_keywords,
    })
}

/// A bare `%I` is an accepted way of saying "no identification"; any
/// longer line must carry the payload prefix. A payload present must
/// match one of the catalogue shapes: `N####`, `M####`, `M#### N####`,
/// or `M#### N#### N####`.
fn extract_identification(
    sequence_id: u32,
    line: &DirectiveLine,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<String>, ExtractError> {
    let payload = match line.payload() {
        Some(payload) => payload,
        None if line.is_bare() => return Ok(None),
        None => return Err(ExtractError::malformed_line(&line.text)),
    };
    if payload.is_empty() {
        return Ok(None);
    }

    if !identification_shape_is_valid(payload) {
        diagnostics.push(Diagnostic::new(
            sequence_id,
            DiagnosticKind::IllFormedIdentification {
                payload: payload.to_string(),
            },
        ));
    }

    Ok(Some(payload.to_string()))
}

fn is_catalogue_token(token: &str, letter: u8) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 5 && bytes[0] == letter && bytes[1..].iter().all(u8::is_ascii_digit)
}

fn identification_shape_is_valid(payload: &str) -> bool {
    let tokens: Vec<&str> = payload.split(' ').collect();
    match tokens.as_slice() {
        [single] => is_catalogue_token(single, b'N') || is_catalogue_token(single, b'M'),
        [m, n] => is_catalogue_token(m, b'M') && is_catalogue_token(n, b'N'),
        [m, n1, n2] => {
            is_catalogue_token(m, b'M')
                && is_catalogue_token(n1, b'N')
                && is_catalogue_token(n2, b'N')
        }
        _ => false,
    }
}

/// Concatenate the S/T/U payloads, enforce the continuation rules, and
/// parse the comma-separated values.
fn extract_sequence_values(
    sequence_id: u32,
    lines: &[DirectiveLine],
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<i64>, ExtractError> {
    let find = |code: DirectiveCode| lines.iter().find(|l| l.code == code);

    let start = find(DirectiveCode::SequenceStart)
        .ok_or_else(|| ExtractError::missing_mandatory("%S"))?;
    let second = find(DirectiveCode::SequenceSecond);
    let third = find(DirectiveCode::SequenceThird);

    // A bare "%S" is tolerated as an empty payload, with a diagnostic.
    let start_payload = match start.payload() {
        Some(payload) => payload.to_string(),
        None if start.is_bare() => {
            diagnostics.push(Diagnostic::new(
                sequence_id,
                DiagnosticKind::UnusualLine {
                    line: start.text.clone(),
                },
            ));
            String::new()
        }
        None => return Err(ExtractError::malformed_line(&start.text)),
    };

    // Continuation lines are only legal when the previous line's payload
    // ends mid-list, on a comma.
    if let Some(second) = second {
        if !start_payload.ends_with(',') {
            return Err(ExtractError::inconsistent_continuation(
                "%T present but %S does not end with a comma",
            ));
        }
        if third.is_some() {
            let second_payload = second
                .payload()
                .ok_or_else(|| ExtractError::malformed_line(&second.text))?;
            if !second_payload.ends_with(',') {
                return Err(ExtractError::inconsistent_continuation(
                    "%U present but %T does not end with a comma",
                ));
            }
        }
    }

    let mut concatenated = start_payload;
    for line in [second, third].into_iter().flatten() {
        concatenated.push_str(
            line.payload()
                .ok_or_else(|| ExtractError::malformed_line(&line.text))?,
        );
    }

    parse_digit_list(&concatenated)
}

/// Comma-split, drop empty trailing fragments, parse as signed integers,
/// and demand that rejoining reproduces the input exactly. The round trip
/// catches stray characters the split would otherwise swallow.
fn parse_digit_list(concatenated: &str) -> Result<Vec<i64>, ExtractError> {
    let mut fragments: Vec<&str> = concatenated.split(',').collect();
    while fragments.last() == Some(&"") {
        fragments.pop();
    }

    let values = fragments
        .iter()
        .map(|fragment| fragment.parse::<i64>())
        .collect::<Result<Vec<i64>, _>>()
        .map_err(|_| ExtractError::corrupt(concatenated))?;

    let rejoined = values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    if rejoined != concatenated {
        return Err(ExtractError::corrupt(concatenated));
    }

    Ok(values)
}

fn extract_raw_keywords(line: &DirectiveLine) -> Result<Vec<String>, ExtractError> {
    let payload = line
        .payload()
        .ok_or_else(|| ExtractError::malformed_line(&line.text))?;
    Ok(payload.split(',').map(str::to_string).collect())
}

/// An absent `%O` yields no offset; a present one must carry the prefix
/// and exactly two comma-separated integers. Anything else contributes
/// no usable offset data at all.
fn extract_offset(
    sequence_id: u32,
    line: Option<&DirectiveLine>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<Offset>, ExtractError> {
    let line = match line {
        Some(line) => line,
        None => {
            diagnostics.push(Diagnostic::new(sequence_id, DiagnosticKind::MissingOffset));
            return Ok(None);
        }
    };

    let payload = line
        .payload()
        .ok_or_else(|| ExtractError::malformed_line(&line.text))?;

    let parsed: Result<Vec<i64>, _> = payload.split(',').map(str::parse::<i64>).collect();
    match parsed.ok().as_deref() {
        Some([first_index, first_large_index]) => {
            Ok(Some(Offset::new(*first_index, *first_large_index)))
        }
        _ => {
            diagnostics.push(Diagnostic::new(
                sequence_id,
                DiagnosticKind::IllFormedOffset {
                    payload: payload.to_string(),
                },
            ));
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn lines_from(text: &str) -> Vec<DirectiveLine> {
        text.split('\n')
            .enumerate()
            .map(|(i, raw)| {
                let code = DirectiveCode::from_char(raw.chars().nth(1).unwrap()).unwrap();
                DirectiveLine::new(code, i + 1, raw)
            })
            .collect()
    }

    fn extract(text: &str) -> (Result<EntryFields, ExtractError>, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let result = extract_fields(45, &lines_from(text), &mut diagnostics);
        (result, diagnostics)
    }

    const MINIMAL: &str = "%I\n%S 1,1,2,3,5\n%N Fibonacci numbers.\n%K nonn\n%O 1,5\n%A Somebody";

    #[test]
    fn test_minimal_entry_extracts() {
        let (result, diagnostics) = extract(MINIMAL);
        let fields = result.unwrap();

        assert_eq!(fields.identification, None);
        assert_eq!(fields.stu_values, vec![1, 1, 2, 3, 5]);
        assert_eq!(fields.name, "Fibonacci numbers.");
        assert_eq!(fields.offset, Some(Offset::new(1, 5)));
        assert_eq!(fields.raw_keywords, vec!["nonn".to_string()]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_bare_identification_accepted_silently() {
        let (result, diagnostics) = extract(MINIMAL);
        assert_eq!(result.unwrap().identification, None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_prefixless_identification_is_fatal() {
        // "%Igarbage" is neither bare nor prefixed; same treatment as
        // every other prefix-less directive line
        let text = MINIMAL.replace("%I", "%Igarbage");
        let (result, diagnostics) = extract(&text);

        assert_matches!(result, Err(ExtractError::MalformedDirectiveLine { ref line }) if line == "%Igarbage");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_identification_shapes() {
        for good in ["N0256", "M0692", "M0692 N0256", "M0692 N0256 N1234"] {
            assert!(identification_shape_is_valid(good), "{good}");
        }
        for bad in ["X0001", "N25", "N0256 M0692", "M0692  N0256", "hello"] {
            assert!(!identification_shape_is_valid(bad), "{bad}");
        }
    }

    #[test]
    fn test_ill_formed_identification_warns() {
        let text = MINIMAL.replace("%I", "%I garbage here");
        let (result, diagnostics) = extract(&text);

        let fields = result.unwrap();
        assert_eq!(fields.identification, Some("garbage here".to_string()));
        assert_matches!(
            &diagnostics[0].kind,
            DiagnosticKind::IllFormedIdentification { payload } if payload == "garbage here"
        );
    }

    #[test]
    fn test_continuation_lines_concatenate() {
        let text =
            "%I\n%S 1,1,2,\n%T 3,5,8,\n%U 13,21\n%N Fib.\n%K nonn\n%O 1,5\n%A Somebody";
        let (result, _) = extract(text);
        assert_eq!(result.unwrap().stu_values, vec![1, 1, 2, 3, 5, 8, 13, 21]);
    }

    #[test]
    fn test_continuation_without_comma_is_fatal() {
        let text = "%I\n%S 1,1,2\n%T 3,5\n%N Fib.\n%K nonn\n%O 1,5\n%A Somebody";
        let (result, _) = extract(text);
        assert_matches!(result, Err(ExtractError::InconsistentContinuation { .. }));

        let text = "%I\n%S 1,1,2,\n%T 3,5\n%U 8\n%N Fib.\n%K nonn\n%O 1,5\n%A Somebody";
        let (result, _) = extract(text);
        assert_matches!(result, Err(ExtractError::InconsistentContinuation { .. }));
    }

    #[test]
    fn test_bare_sequence_line_warns_and_yields_no_values() {
        let text = "%I\n%S\n%N Empty.\n%K nonn\n%O 1,1\n%A Somebody";
        let (result, diagnostics) = extract(text);

        assert_eq!(result.unwrap().stu_values, Vec::<i64>::new());
        assert_matches!(
            &diagnostics[0].kind,
            DiagnosticKind::UnusualLine { line } if line == "%S"
        );
    }

    #[test]
    fn test_corrupt_digits_are_fatal() {
        let text = MINIMAL.replace("1,1,2,3,5", "1,1,x2,3");
        let (result, _) = extract(&text);
        assert_matches!(result, Err(ExtractError::DigitSequenceCorrupt { .. }));
    }

    #[test]
    fn test_round_trip_guard_catches_leading_zeros() {
        // "05" parses as 5 but does not rejoin to "05"
        let text = MINIMAL.replace("1,1,2,3,5", "1,05,2");
        let (result, _) = extract(&text);
        assert_matches!(result, Err(ExtractError::DigitSequenceCorrupt { .. }));
    }

    #[test]
    fn test_negative_values_round_trip() {
        let text = MINIMAL.replace("1,1,2,3,5", "-1,2,-3");
        let (result, _) = extract(&text);
        assert_eq!(result.unwrap().stu_values, vec![-1, 2, -3]);
    }

    #[test]
    fn test_missing_offset_warns() {
        let text = "%I\n%S 1,2\n%N Name.\n%K nonn\n%A Somebody";
        let (result, diagnostics) = extract(text);

        assert_eq!(result.unwrap().offset, None);
        assert!(diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::MissingOffset));
    }

    #[test]
    fn test_ill_formed_offset_yields_none() {
        for bad in ["%O 1", "%O 1,2,3", "%O one,two"] {
            let text = MINIMAL.replace("%O 1,5", bad);
            let (result, diagnostics) = extract(&text);

            assert_eq!(result.unwrap().offset, None, "{bad}");
            assert!(
                diagnostics
                    .iter()
                    .any(|d| matches!(d.kind, DiagnosticKind::IllFormedOffset { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_missing_author_warns() {
        let text = "%I\n%S 1,2\n%N Name.\n%K nonn\n%O 1,1";
        let (result, diagnostics) = extract(text);

        assert!(result.is_ok());
        assert!(diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::MissingAuthor));
    }

    #[test]
    fn test_keyword_fragments_retain_empties() {
        let text = MINIMAL.replace("%K nonn", "%K nonn,,core");
        let (result, _) = extract(&text);
        assert_eq!(
            result.unwrap().raw_keywords,
            vec!["nonn".to_string(), String::new(), "core".to_string()]
        );
    }

    #[test]
    fn test_body_lines_collected_in_order() {
        let text = "%I\n%S 1,2\n%N Name.\n%C first\n%C second\n%D a ref\n%H a link\n%K nonn\n%O 1,1\n%A Somebody";
        let (result, _) = extract(text);
        let fields = result.unwrap();

        assert_eq!(fields.comments, vec!["first", "second"]);
        assert_eq!(fields.references, vec!["a ref"]);
        assert_eq!(fields.links, vec!["a link"]);
    }

    #[test]
    fn test_prefixless_body_line_is_fatal() {
        let text = MINIMAL.replace("%N Fibonacci numbers.", "%NFibonacci");
        let (result, _) = extract(&text);
        assert_matches!(result, Err(ExtractError::MalformedDirectiveLine { .. }));

        let text = "%I\n%S 1,2\n%N Name.\n%Cno prefix\n%K nonn\n%O 1,1\n%A Somebody";
        let (result, _) = extract(text);
        assert_matches!(result, Err(ExtractError::MalformedDirectiveLine { .. }));
    }
}
