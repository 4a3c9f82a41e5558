//! Per-directive permitted-character policies
//!
//! Machine-readable directives (`%I`, `%S`, `%T`, `%U`, `%K`, `%O`) draw
//! from small closed alphabets; free-text directives have no policy at
//! all. The splitter runs these checks and reports violations as
//! non-fatal diagnostics.
//!
//! The built-in table can be overridden per directive with a TOML file:
//!
//! ```toml
//! "%S" = "%S 0123456789-,"
//! ```

use crate::directives::DirectiveCode;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

/// Errors raised while loading a character-policy override file.
#[derive(Debug, thiserror::Error)]
pub enum CharmapError {
    #[error("invalid charmap file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("charmap key {key:?} is not a known directive marker")]
    UnknownDirective { key: String },
}

/// Permitted-character sets keyed by directive code.
#[derive(Debug, Clone)]
pub struct CharacterPolicies {
    permitted: HashMap<DirectiveCode, BTreeSet<char>>,
}

impl CharacterPolicies {
    /// Check a full raw line against the policy for its directive.
    ///
    /// Returns the offending characters, sorted and deduplicated, or
    /// `None` when the line is clean or the directive has no policy.
    pub fn check(&self, code: DirectiveCode, line: &str) -> Option<String> {
        let permitted = self.permitted.get(&code)?;

        let offending: BTreeSet<char> = line.chars().filter(|c| !permitted.contains(c)).collect();
        if offending.is_empty() {
            None
        } else {
            Some(offending.into_iter().collect())
        }
    }

    /// Whether any directive has a policy configured.
    pub fn is_empty(&self) -> bool {
        self.permitted.is_empty()
    }

    /// Build policies from a TOML override document, merged over the
    /// defaults. Keys are directive markers (`"%S"`); values are the
    /// full permitted-character string for that directive.
    pub fn from_toml_str(toml_text: &str) -> Result<Self, CharmapError> {
        let overrides: HashMap<String, String> = toml::from_str(toml_text)?;

        let mut policies = Self::default();
        for (key, permitted) in overrides {
            let code = key
                .strip_prefix('%')
                .and_then(|rest| {
                    let mut chars = rest.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => DirectiveCode::from_char(c),
                        _ => None,
                    }
                })
                .ok_or(CharmapError::UnknownDirective { key })?;

            policies
                .permitted
                .insert(code, permitted.chars().collect());
        }
        Ok(policies)
    }
}

impl Default for CharacterPolicies {
    fn default() -> Self {
        let table: [(DirectiveCode, &str); 6] = [
            (DirectiveCode::Identification, "%I MN0123456789"),
            (DirectiveCode::SequenceStart, "%S 0123456789-,"),
            (DirectiveCode::SequenceSecond, "%T 0123456789-,"),
            (DirectiveCode::SequenceThird, "%U 0123456789-,"),
            (
                DirectiveCode::Keywords,
                "%K ,abcdefghijklmnopqrstuvwxyz",
            ),
            (DirectiveCode::Offset, "%O 0123456789-,"),
        ];

        Self {
            permitted: table
                .into_iter()
                .map(|(code, chars)| (code, chars.chars().collect()))
                .collect(),
        }
    }
}

/// Shared default policy table.
pub fn default_policies() -> &'static CharacterPolicies {
    static DEFAULTS: OnceLock<CharacterPolicies> = OnceLock::new();
    DEFAULTS.get_or_init(CharacterPolicies::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_clean_lines_pass() {
        let policies = CharacterPolicies::default();
        assert_eq!(
            policies.check(DirectiveCode::SequenceStart, "%S 1,1,2,3,5,-8"),
            None
        );
        assert_eq!(
            policies.check(DirectiveCode::Keywords, "%K nonn,core,nice"),
            None
        );
        assert_eq!(policies.check(DirectiveCode::Offset, "%O 0,4"), None);
    }

    #[test]
    fn test_offending_characters_sorted_and_deduplicated() {
        let policies = CharacterPolicies::default();
        let offending = policies
            .check(DirectiveCode::SequenceStart, "%S 1,zx2,x3")
            .unwrap();
        assert_eq!(offending, "xz");
    }

    #[test]
    fn test_free_text_directives_have_no_policy() {
        let policies = CharacterPolicies::default();
        assert_eq!(
            policies.check(DirectiveCode::Name, "%N Anything at all! äöü"),
            None
        );
        assert_eq!(
            policies.check(DirectiveCode::Comment, "%C Arbitrary commentary."),
            None
        );
    }

    #[test]
    fn test_toml_override_replaces_single_directive() {
        let policies =
            CharacterPolicies::from_toml_str("\"%K\" = \"%K ,abcdefghijklmnopqrstuvwxyz_\"\n")
                .unwrap();

        // the override admits underscores in keywords
        assert_eq!(
            policies.check(DirectiveCode::Keywords, "%K some_flag"),
            None
        );
        // untouched directives keep their defaults
        assert!(policies
            .check(DirectiveCode::SequenceStart, "%S 1,a")
            .is_some());
    }

    #[test]
    fn test_toml_override_rejects_unknown_marker() {
        let result = CharacterPolicies::from_toml_str("\"%Z\" = \"anything\"\n");
        assert_matches!(result, Err(CharmapError::UnknownDirective { ref key }) if key == "%Z");
    }

    #[test]
    fn test_invalid_toml_reported() {
        let result = CharacterPolicies::from_toml_str("not = [valid");
        assert_matches!(result, Err(CharmapError::Toml(_)));
    }
}
