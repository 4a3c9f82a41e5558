//! Fatal parse errors for the entry pipeline

use crate::directives::StructureError;
use crate::entry::a_number;
use crate::fields::ExtractError;
use crate::logging::Code;

/// The stage-specific cause of a fatal parse failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl ParseErrorKind {
    pub fn code(&self) -> Code {
        match self {
            Self::Structure(err) => err.code(),
            Self::Extract(err) => err.code(),
        }
    }
}

/// A fatal parse failure, tied to the entry that produced it.
///
/// Fatal means this one entry cannot be represented; it carries no
/// implication for the rest of a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{}] {kind}", a_number(*.sequence_id))]
pub struct ParseError {
    pub sequence_id: u32,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(sequence_id: u32, kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            sequence_id,
            kind: kind.into(),
        }
    }

    /// Error code for the global logging system.
    pub fn code(&self) -> Code {
        self.kind.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_structure_errors() {
        let err = ParseError::new(45, StructureError::unknown_directive(2, 'Z'));
        assert_eq!(err.code().as_str(), "E021");
        assert!(err.to_string().contains("[A000045]"));
        assert!(err.to_string().contains("%Z"));
    }

    #[test]
    fn test_wraps_extract_errors() {
        let err = ParseError::new(7, ExtractError::corrupt("1,x"));
        assert_eq!(err.code().as_str(), "E033");
        assert!(err.to_string().contains("[A000007]"));
    }
}
