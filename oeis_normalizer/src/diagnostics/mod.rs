//! Non-fatal data-quality diagnostics
//!
//! A diagnostic records a problem with an entry's content that does not
//! prevent a normalized entry from being produced. The pipeline returns
//! diagnostics alongside its result; it never logs them itself. Whether
//! and how they are surfaced is the caller's decision.

use crate::entry::a_number;
use crate::logging::{codes, Code, LogEvent};

/// One data-quality finding, tied to the entry that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub sequence_id: u32,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(sequence_id: u32, kind: DiagnosticKind) -> Self {
        Self { sequence_id, kind }
    }

    pub fn code(&self) -> Code {
        self.kind.code()
    }

    /// Convert into a warning event for the global logging system.
    pub fn to_log_event(&self) -> LogEvent {
        LogEvent::warning_with_code(self.code(), &self.kind.to_string())
            .with_sequence_id(self.sequence_id)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", a_number(self.sequence_id), self.kind)
    }
}

/// The closed set of data-quality findings the pipeline can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiagnosticKind {
    #[error("identification payload {payload:?} has an unexpected shape")]
    IllFormedIdentification { payload: String },

    #[error("entry has no author directive")]
    MissingAuthor,

    #[error("entry has no offset directive")]
    MissingOffset,

    #[error("offset payload {payload:?} is not a pair of integers")]
    IllFormedOffset { payload: String },

    #[error("b-file carries {bfile_len} values but the entry itself carries {inline_len}")]
    BfileShorterThanInline { inline_len: usize, bfile_len: usize },

    #[error(
        "value disagreement at position {position}: entry has {inline_value}, b-file has {bfile_value}"
    )]
    ValuesMismatch {
        position: usize,
        inline_value: i64,
        bfile_value: i64,
    },

    #[error("declared first index {declared} disagrees with b-file start {actual:?}")]
    OffsetIndexMismatch { declared: i64, actual: Option<i64> },

    #[error(
        "declared first-large-term position {declared} disagrees with computed position {computed}"
    )]
    OffsetMagnitudeMismatch { declared: i64, computed: i64 },

    #[error("unrecognized keyword {keyword:?}")]
    UnknownKeyword { keyword: String },

    #[error("keyword list contains an empty fragment")]
    EmptyKeyword,

    #[error("keyword {keyword:?} appears {count} times")]
    DuplicateKeyword { keyword: String, count: usize },

    #[error("keyword 'full' without 'fini'")]
    FullWithoutFini,

    #[error("{directive} line carries characters outside its permitted set: {characters:?}")]
    UnacceptableCharacters {
        directive: &'static str,
        characters: String,
    },

    #[error("unusual bare directive line {line:?}")]
    UnusualLine { line: String },

    #[error("b-file line {line_number} could not be parsed: {line:?}")]
    BfileLineUnparsed { line_number: usize, line: String },

    #[error("b-file line {line_number} has index {index}, expected {} after {previous}", .previous + 1)]
    BfileNonSequentialIndex {
        line_number: usize,
        index: i64,
        previous: i64,
    },
}

impl DiagnosticKind {
    /// Diagnostic code for the global logging system.
    pub fn code(&self) -> Code {
        match self {
            Self::IllFormedIdentification { .. } => codes::quality::ILL_FORMED_IDENTIFICATION,
            Self::MissingAuthor => codes::quality::MISSING_AUTHOR,
            Self::MissingOffset => codes::quality::MISSING_OFFSET,
            Self::IllFormedOffset { .. } => codes::quality::ILL_FORMED_OFFSET,
            Self::BfileShorterThanInline { .. } => codes::quality::BFILE_SHORTER_THAN_INLINE,
            Self::ValuesMismatch { .. } => codes::quality::VALUES_MISMATCH,
            Self::OffsetIndexMismatch { .. } => codes::quality::OFFSET_INDEX_MISMATCH,
            Self::OffsetMagnitudeMismatch { .. } => codes::quality::OFFSET_MAGNITUDE_MISMATCH,
            Self::UnknownKeyword { .. } => codes::quality::UNKNOWN_KEYWORD,
            Self::EmptyKeyword => codes::quality::EMPTY_KEYWORD,
            Self::DuplicateKeyword { .. } => codes::quality::DUPLICATE_KEYWORD,
            Self::FullWithoutFini => codes::quality::FULL_WITHOUT_FINI,
            Self::UnacceptableCharacters { .. } => codes::quality::UNACCEPTABLE_CHARACTERS,
            Self::UnusualLine { .. } => codes::quality::UNUSUAL_LINE,
            Self::BfileLineUnparsed { .. } => codes::quality::BFILE_LINE_UNPARSED,
            Self::BfileNonSequentialIndex { .. } => codes::quality::BFILE_NON_SEQUENTIAL_INDEX,
        }
    }
}
