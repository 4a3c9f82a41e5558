//! Keyword vocabulary and canonicalization
//!
//! The OEIS keyword vocabulary is closed. Canonicalization drops empty
//! fragments and duplicates and sorts the rest; unknown keywords are
//! reported but kept, since they still describe the entry.

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use std::collections::{BTreeMap, BTreeSet};

/// The known keyword vocabulary, sorted. All but `allocated` are
/// documented in the OEIS help pages; `allocated` occurs in practice on
/// reserved-but-unfilled entries.
pub const KNOWN_KEYWORDS: &[&str] = &[
    "allocated",
    "base",
    "bref",
    "changed",
    "cofr",
    "cons",
    "core",
    "dead",
    "dumb",
    "dupe",
    "easy",
    "eigen",
    "fini",
    "frac",
    "full",
    "hard",
    "hear",
    "less",
    "look",
    "more",
    "mult",
    "new",
    "nice",
    "nonn",
    "obsc",
    "sign",
    "tabf",
    "tabl",
    "uned",
    "unkn",
    "walk",
    "word",
];

/// Check membership in the closed vocabulary.
pub fn is_known_keyword(keyword: &str) -> bool {
    KNOWN_KEYWORDS.binary_search(&keyword).is_ok()
}

/// Canonicalize raw comma-split keyword fragments.
///
/// Output: the non-empty fragments, deduplicated and lexicographically
/// sorted. Unknown, empty, and duplicated fragments each produce a
/// diagnostic; so does `full` without `fini` in the canonical set.
pub fn canonicalize(
    sequence_id: u32,
    fragments: &[String],
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<String> {
    let unexpected: BTreeSet<&str> = fragments
        .iter()
        .map(String::as_str)
        .filter(|fragment| !is_known_keyword(fragment))
        .collect();
    for fragment in unexpected {
        if fragment.is_empty() {
            diagnostics.push(Diagnostic::new(sequence_id, DiagnosticKind::EmptyKeyword));
        } else {
            diagnostics.push(Diagnostic::new(
                sequence_id,
                DiagnosticKind::UnknownKeyword {
                    keyword: fragment.to_string(),
                },
            ));
        }
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for fragment in fragments {
        *counts.entry(fragment.as_str()).or_default() += 1;
    }
    for (keyword, count) in counts {
        if count > 1 {
            diagnostics.push(Diagnostic::new(
                sequence_id,
                DiagnosticKind::DuplicateKeyword {
                    keyword: keyword.to_string(),
                    count,
                },
            ));
        }
    }

    let canonical: Vec<String> = fragments
        .iter()
        .filter(|fragment| !fragment.is_empty())
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    if canonical.iter().any(|k| k == "full") && !canonical.iter().any(|k| k == "fini") {
        diagnostics.push(Diagnostic::new(
            sequence_id,
            DiagnosticKind::FullWithoutFini,
        ));
    }

    canonical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(fragments: &[&str]) -> Vec<String> {
        fragments.iter().map(|s| s.to_string()).collect()
    }

    fn run(fragments: &[&str]) -> (Vec<String>, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let canonical = canonicalize(45, &strings(fragments), &mut diagnostics);
        (canonical, diagnostics)
    }

    #[test]
    fn test_vocabulary_is_sorted_for_binary_search() {
        let mut sorted = KNOWN_KEYWORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, KNOWN_KEYWORDS);
        assert_eq!(KNOWN_KEYWORDS.len(), 32);
    }

    #[test]
    fn test_membership() {
        assert!(is_known_keyword("nonn"));
        assert!(is_known_keyword("allocated"));
        assert!(!is_known_keyword("bogus"));
        assert!(!is_known_keyword(""));
    }

    #[test]
    fn test_clean_keywords_pass() {
        let (canonical, diagnostics) = run(&["nonn", "core", "nice"]);
        assert_eq!(canonical, strings(&["core", "nice", "nonn"]));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_duplicate_empty_and_unknown_each_flagged() {
        let (canonical, diagnostics) = run(&["nonn", "nonn", "", "bogus"]);

        assert_eq!(canonical, strings(&["bogus", "nonn"]));
        assert!(diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::EmptyKeyword));
        assert!(diagnostics
            .iter()
            .any(|d| matches!(&d.kind, DiagnosticKind::UnknownKeyword { keyword } if keyword == "bogus")));
        assert!(diagnostics.iter().any(|d| matches!(
            &d.kind,
            DiagnosticKind::DuplicateKeyword { keyword, count: 2 } if keyword == "nonn"
        )));
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_full_without_fini_flagged() {
        let (_, diagnostics) = run(&["nonn", "full"]);
        assert!(diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::FullWithoutFini));

        let (_, diagnostics) = run(&["nonn", "full", "fini"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_repeated_empty_fragments() {
        // ",," splits to three empties: one EmptyKeyword plus one
        // DuplicateKeyword for the empty fragment
        let (canonical, diagnostics) = run(&["", "", ""]);

        assert!(canonical.is_empty());
        assert_eq!(
            diagnostics
                .iter()
                .filter(|d| d.kind == DiagnosticKind::EmptyKeyword)
                .count(),
            1
        );
        assert!(diagnostics
            .iter()
            .any(|d| matches!(&d.kind, DiagnosticKind::DuplicateKeyword { count: 3, .. })));
    }
}
