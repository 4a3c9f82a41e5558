//! Fatal structural errors for the splitter and order validator

use crate::logging::{codes, Code};

/// Errors that make an entry's main text unrepresentable.
///
/// Any of these aborts parsing of the one entry that produced it; the
/// batch driver decides whether to continue with the next entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("line {line_number} is not a directive line: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error("line {line_number} carries an unrecognized directive code '%{code}'")]
    UnknownDirective { line_number: usize, code: char },

    #[error("directive order {order:?} violates the entry grammar at position {position}")]
    OutOfOrderDirectives { order: String, position: usize },
}

impl StructureError {
    pub fn malformed_line(line_number: usize, line: &str) -> Self {
        Self::MalformedLine {
            line_number,
            line: line.to_string(),
        }
    }

    pub fn unknown_directive(line_number: usize, code: char) -> Self {
        Self::UnknownDirective { line_number, code }
    }

    pub fn out_of_order(order: String, position: usize) -> Self {
        Self::OutOfOrderDirectives { order, position }
    }

    /// Error code for the global logging system.
    pub fn code(&self) -> Code {
        match self {
            Self::MalformedLine { .. } => codes::structure::MALFORMED_LINE,
            Self::UnknownDirective { .. } => codes::structure::UNKNOWN_DIRECTIVE,
            Self::OutOfOrderDirectives { .. } => codes::structure::OUT_OF_ORDER_DIRECTIVES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            StructureError::malformed_line(1, "garbage").code().as_str(),
            "E020"
        );
        assert_eq!(
            StructureError::unknown_directive(2, 'Z').code().as_str(),
            "E021"
        );
        assert_eq!(
            StructureError::out_of_order("IKN".to_string(), 1)
                .code()
                .as_str(),
            "E022"
        );
    }

    #[test]
    fn test_display_names_offending_input() {
        let err = StructureError::unknown_directive(4, 'Z');
        assert!(err.to_string().contains("%Z"));
        assert!(err.to_string().contains("line 4"));
    }
}
