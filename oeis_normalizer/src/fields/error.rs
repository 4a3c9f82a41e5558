//! Fatal errors for field extraction

use crate::logging::{codes, Code};

/// Errors that make an entry's fields unextractable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("mandatory directive {directive} is missing")]
    MissingMandatoryDirective { directive: &'static str },

    #[error("directive line lacks its payload prefix: {line:?}")]
    MalformedDirectiveLine { line: String },

    #[error("inconsistent sequence continuation: {detail}")]
    InconsistentContinuation { detail: String },

    #[error("sequence data is corrupt: {payload:?}")]
    DigitSequenceCorrupt { payload: String },
}

impl ExtractError {
    pub fn missing_mandatory(directive: &'static str) -> Self {
        Self::MissingMandatoryDirective { directive }
    }

    pub fn malformed_line(line: &str) -> Self {
        Self::MalformedDirectiveLine {
            line: line.to_string(),
        }
    }

    pub fn inconsistent_continuation(detail: impl Into<String>) -> Self {
        Self::InconsistentContinuation {
            detail: detail.into(),
        }
    }

    pub fn corrupt(payload: impl Into<String>) -> Self {
        Self::DigitSequenceCorrupt {
            payload: payload.into(),
        }
    }

    /// Error code for the global logging system.
    pub fn code(&self) -> Code {
        match self {
            Self::MissingMandatoryDirective { .. } => codes::fields::MISSING_MANDATORY_DIRECTIVE,
            Self::MalformedDirectiveLine { .. } => codes::fields::MALFORMED_DIRECTIVE_LINE,
            Self::InconsistentContinuation { .. } => codes::fields::INCONSISTENT_CONTINUATION,
            Self::DigitSequenceCorrupt { .. } => codes::fields::DIGIT_SEQUENCE_CORRUPT,
        }
    }
}
