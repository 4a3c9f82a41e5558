//! Directive-line model for OEIS flat-file entries
//!
//! An entry's main text is a block of lines, each starting with a
//! two-character directive code (`%I`, `%S`, `%N`, ...). This module owns
//! the closed code set and the validated per-line representation; the
//! submodules split raw text into lines and enforce the entry grammar.

mod error;
pub mod order;
pub mod splitter;

use crate::config::compile_time::entry::PAYLOAD_PREFIX_LEN;

pub use error::StructureError;
pub use order::validate_order;
pub use splitter::split_directives;

/// The closed set of directive codes an entry may carry.
///
/// Codes are case-sensitive: `%e` (examples) and `%E` (extensions) are
/// different directives, as are `%o`/`%O` and `%t`/`%T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectiveCode {
    /// `%I` - identification line
    Identification,
    /// `%S` - first sequence-data line
    SequenceStart,
    /// `%T` - second sequence-data line
    SequenceSecond,
    /// `%U` - third sequence-data line
    SequenceThird,
    /// `%N` - name of the sequence
    Name,
    /// `%C` - comments
    Comment,
    /// `%D` - detailed references
    Reference,
    /// `%H` - links related to the sequence
    Link,
    /// `%F` - formulas
    Formula,
    /// `%e` - examples
    Example,
    /// `%p` - Maple program
    MapleProgram,
    /// `%t` - Mathematica program
    MathematicaProgram,
    /// `%o` - program in another language
    OtherProgram,
    /// `%Y` - cross-references to other sequences
    CrossReference,
    /// `%K` - keywords
    Keywords,
    /// `%O` - offset pair
    Offset,
    /// `%A` - author, submitter, or other authority
    Author,
    /// `%E` - extensions and errors
    Extension,
}

impl DirectiveCode {
    /// The single character following `%` in the raw line.
    pub const fn as_char(self) -> char {
        match self {
            Self::Identification => 'I',
            Self::SequenceStart => 'S',
            Self::SequenceSecond => 'T',
            Self::SequenceThird => 'U',
            Self::Name => 'N',
            Self::Comment => 'C',
            Self::Reference => 'D',
            Self::Link => 'H',
            Self::Formula => 'F',
            Self::Example => 'e',
            Self::MapleProgram => 'p',
            Self::MathematicaProgram => 't',
            Self::OtherProgram => 'o',
            Self::CrossReference => 'Y',
            Self::Keywords => 'K',
            Self::Offset => 'O',
            Self::Author => 'A',
            Self::Extension => 'E',
        }
    }

    /// The two-character directive marker as written in entry text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identification => "%I",
            Self::SequenceStart => "%S",
            Self::SequenceSecond => "%T",
            Self::SequenceThird => "%U",
            Self::Name => "%N",
            Self::Comment => "%C",
            Self::Reference => "%D",
            Self::Link => "%H",
            Self::Formula => "%F",
            Self::Example => "%e",
            Self::MapleProgram => "%p",
            Self::MathematicaProgram => "%t",
            Self::OtherProgram => "%o",
            Self::CrossReference => "%Y",
            Self::Keywords => "%K",
            Self::Offset => "%O",
            Self::Author => "%A",
            Self::Extension => "%E",
        }
    }

    /// Parse a directive code from the character following `%`.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Self::Identification),
            'S' => Some(Self::SequenceStart),
            'T' => Some(Self::SequenceSecond),
            'U' => Some(Self::SequenceThird),
            'N' => Some(Self::Name),
            'C' => Some(Self::Comment),
            'D' => Some(Self::Reference),
            'H' => Some(Self::Link),
            'F' => Some(Self::Formula),
            'e' => Some(Self::Example),
            'p' => Some(Self::MapleProgram),
            't' => Some(Self::MathematicaProgram),
            'o' => Some(Self::OtherProgram),
            'Y' => Some(Self::CrossReference),
            'K' => Some(Self::Keywords),
            'O' => Some(Self::Offset),
            'A' => Some(Self::Author),
            'E' => Some(Self::Extension),
            _ => None,
        }
    }

    /// Check if exactly one occurrence of this directive is required per entry.
    pub const fn is_mandatory(self) -> bool {
        matches!(
            self,
            Self::Identification | Self::SequenceStart | Self::Name | Self::Keywords
        )
    }

    /// All directive codes, in grammar order.
    pub const fn all() -> &'static [DirectiveCode] {
        &[
            Self::Identification,
            Self::SequenceStart,
            Self::SequenceSecond,
            Self::SequenceThird,
            Self::Name,
            Self::Comment,
            Self::Reference,
            Self::Link,
            Self::Formula,
            Self::Example,
            Self::MapleProgram,
            Self::MathematicaProgram,
            Self::OtherProgram,
            Self::CrossReference,
            Self::Keywords,
            Self::Offset,
            Self::Author,
            Self::Extension,
        ]
    }
}

impl std::fmt::Display for DirectiveCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One validated line of an entry's main text.
///
/// Produced by the splitter, consumed by the order validator and the field
/// extractors within the same entry parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveLine {
    pub code: DirectiveCode,
    /// 1-based position within the entry's main text.
    pub line_number: usize,
    /// The full raw line, including the directive marker.
    pub text: String,
}

impl DirectiveLine {
    pub fn new(code: DirectiveCode, line_number: usize, text: &str) -> Self {
        Self {
            code,
            line_number,
            text: text.to_string(),
        }
    }

    /// Check whether the line carries the payload prefix (`%X` followed
    /// by a single space).
    pub fn has_payload_prefix(&self) -> bool {
        self.text.len() >= PAYLOAD_PREFIX_LEN
            && self.text.as_bytes()[PAYLOAD_PREFIX_LEN - 1] == b' '
    }

    /// The payload after the prefix, if the prefix is present.
    pub fn payload(&self) -> Option<&str> {
        if self.has_payload_prefix() {
            Some(&self.text[PAYLOAD_PREFIX_LEN..])
        } else {
            None
        }
    }

    /// Check whether the line is exactly the bare two-character marker.
    pub fn is_bare(&self) -> bool {
        self.text.len() == 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for &code in DirectiveCode::all() {
            assert_eq!(DirectiveCode::from_char(code.as_char()), Some(code));
            assert_eq!(code.as_str().len(), 2);
            assert!(code.as_str().starts_with('%'));
        }
    }

    #[test]
    fn test_case_sensitivity() {
        assert_eq!(DirectiveCode::from_char('E'), Some(DirectiveCode::Extension));
        assert_eq!(DirectiveCode::from_char('e'), Some(DirectiveCode::Example));
        assert_eq!(DirectiveCode::from_char('O'), Some(DirectiveCode::Offset));
        assert_eq!(
            DirectiveCode::from_char('o'),
            Some(DirectiveCode::OtherProgram)
        );
        assert_eq!(DirectiveCode::from_char('Z'), None);
        assert_eq!(DirectiveCode::from_char('%'), None);
    }

    #[test]
    fn test_mandatory_codes() {
        let mandatory: Vec<_> = DirectiveCode::all()
            .iter()
            .filter(|c| c.is_mandatory())
            .collect();
        assert_eq!(mandatory.len(), 4);
        assert!(DirectiveCode::Keywords.is_mandatory());
        assert!(!DirectiveCode::Offset.is_mandatory());
    }

    #[test]
    fn test_directive_line_payload() {
        let line = DirectiveLine::new(DirectiveCode::Name, 3, "%N Fibonacci numbers.");
        assert!(line.has_payload_prefix());
        assert_eq!(line.payload(), Some("Fibonacci numbers."));
        assert!(!line.is_bare());

        let bare = DirectiveLine::new(DirectiveCode::SequenceStart, 2, "%S");
        assert!(!bare.has_payload_prefix());
        assert_eq!(bare.payload(), None);
        assert!(bare.is_bare());
    }
}
