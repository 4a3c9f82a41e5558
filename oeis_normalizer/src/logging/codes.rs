//! Consolidated error and diagnostic codes
//!
//! Single source of truth for all codes, their metadata, and classification
//! functions. Fatal parse errors carry `E` codes, data-quality diagnostics
//! carry `W` codes, and success/progress events carry `I` codes.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning, and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

/// Severity levels for codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Metadata attached to each code
#[derive(Debug, Clone)]
pub struct CodeMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub fatal: bool,
    pub description: &'static str,
}

impl CodeMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        fatal: bool,
        description: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            fatal,
            description,
        }
    }
}

// ============================================================================
// FATAL ERROR CODES
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Database and artifact error codes
pub mod io {
    use super::Code;

    pub const DATABASE_OPEN_FAILED: Code = Code::new("E005");
    pub const DATABASE_QUERY_FAILED: Code = Code::new("E006");
    pub const ARTIFACT_WRITE_FAILED: Code = Code::new("E007");
}

/// Entry structure error codes (splitter and order validator)
pub mod structure {
    use super::Code;

    pub const MALFORMED_LINE: Code = Code::new("E020");
    pub const UNKNOWN_DIRECTIVE: Code = Code::new("E021");
    pub const OUT_OF_ORDER_DIRECTIVES: Code = Code::new("E022");
}

/// Field extraction error codes
pub mod fields {
    use super::Code;

    pub const MISSING_MANDATORY_DIRECTIVE: Code = Code::new("E030");
    pub const MALFORMED_DIRECTIVE_LINE: Code = Code::new("E031");
    pub const INCONSISTENT_CONTINUATION: Code = Code::new("E032");
    pub const DIGIT_SEQUENCE_CORRUPT: Code = Code::new("E033");
}

// ============================================================================
// DATA-QUALITY DIAGNOSTIC CODES
// ============================================================================

/// Non-fatal data-quality codes
pub mod quality {
    use super::Code;

    pub const ILL_FORMED_IDENTIFICATION: Code = Code::new("W010");
    pub const MISSING_AUTHOR: Code = Code::new("W011");
    pub const MISSING_OFFSET: Code = Code::new("W012");
    pub const ILL_FORMED_OFFSET: Code = Code::new("W013");
    pub const BFILE_SHORTER_THAN_INLINE: Code = Code::new("W014");
    pub const VALUES_MISMATCH: Code = Code::new("W015");
    pub const OFFSET_INDEX_MISMATCH: Code = Code::new("W016");
    pub const OFFSET_MAGNITUDE_MISMATCH: Code = Code::new("W017");
    pub const UNKNOWN_KEYWORD: Code = Code::new("W018");
    pub const EMPTY_KEYWORD: Code = Code::new("W019");
    pub const DUPLICATE_KEYWORD: Code = Code::new("W020");
    pub const FULL_WITHOUT_FINI: Code = Code::new("W021");
    pub const UNACCEPTABLE_CHARACTERS: Code = Code::new("W022");
    pub const UNUSUAL_LINE: Code = Code::new("W023");
    pub const BFILE_LINE_UNPARSED: Code = Code::new("W024");
    pub const BFILE_NON_SEQUENTIAL_INDEX: Code = Code::new("W025");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const ENTRY_PARSED: Code = Code::new("I010");
    pub const BATCH_COMPLETED: Code = Code::new("I011");
    pub const ARTIFACTS_WRITTEN: Code = Code::new("I012");
}

// ============================================================================
// CODE METADATA REGISTRY
// ============================================================================

static CODE_REGISTRY: OnceLock<HashMap<&'static str, CodeMetadata>> = OnceLock::new();

fn get_code_registry() -> &'static HashMap<&'static str, CodeMetadata> {
    CODE_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();
        let entries = [
            CodeMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                true,
                "Critical internal error",
            ),
            CodeMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                true,
                "System initialization failure",
            ),
            CodeMetadata::new(
                "E005",
                "Io",
                Severity::High,
                true,
                "Failed to open the entry database",
            ),
            CodeMetadata::new(
                "E006",
                "Io",
                Severity::High,
                true,
                "Database query failed",
            ),
            CodeMetadata::new(
                "E007",
                "Io",
                Severity::High,
                true,
                "Failed to write an output artifact",
            ),
            CodeMetadata::new(
                "E020",
                "Structure",
                Severity::High,
                true,
                "Line is not a directive line",
            ),
            CodeMetadata::new(
                "E021",
                "Structure",
                Severity::High,
                true,
                "Unrecognized directive code",
            ),
            CodeMetadata::new(
                "E022",
                "Structure",
                Severity::High,
                true,
                "Directives violate the entry grammar order",
            ),
            CodeMetadata::new(
                "E030",
                "Fields",
                Severity::High,
                true,
                "Mandatory directive is missing",
            ),
            CodeMetadata::new(
                "E031",
                "Fields",
                Severity::High,
                true,
                "Directive line lacks its payload prefix",
            ),
            CodeMetadata::new(
                "E032",
                "Fields",
                Severity::High,
                true,
                "Sequence continuation lines are inconsistent",
            ),
            CodeMetadata::new(
                "E033",
                "Fields",
                Severity::High,
                true,
                "Inline sequence data is corrupt",
            ),
            CodeMetadata::new(
                "W010",
                "Quality",
                Severity::Medium,
                false,
                "Identification payload has an unexpected shape",
            ),
            CodeMetadata::new(
                "W011",
                "Quality",
                Severity::Medium,
                false,
                "Entry has no author directive",
            ),
            CodeMetadata::new(
                "W012",
                "Quality",
                Severity::Medium,
                false,
                "Entry has no offset directive",
            ),
            CodeMetadata::new(
                "W013",
                "Quality",
                Severity::Medium,
                false,
                "Offset payload is not a pair of integers",
            ),
            CodeMetadata::new(
                "W014",
                "Quality",
                Severity::Medium,
                false,
                "B-file carries fewer values than the entry itself",
            ),
            CodeMetadata::new(
                "W015",
                "Quality",
                Severity::High,
                false,
                "Inline values and b-file values disagree",
            ),
            CodeMetadata::new(
                "W016",
                "Quality",
                Severity::High,
                false,
                "Declared first index disagrees with the b-file",
            ),
            CodeMetadata::new(
                "W017",
                "Quality",
                Severity::High,
                false,
                "Declared first-large-term position disagrees with the values",
            ),
            CodeMetadata::new(
                "W018",
                "Quality",
                Severity::Medium,
                false,
                "Keyword is not in the known vocabulary",
            ),
            CodeMetadata::new(
                "W019",
                "Quality",
                Severity::Medium,
                false,
                "Keyword list contains an empty fragment",
            ),
            CodeMetadata::new(
                "W020",
                "Quality",
                Severity::Medium,
                false,
                "Keyword appears more than once",
            ),
            CodeMetadata::new(
                "W021",
                "Quality",
                Severity::Medium,
                false,
                "Keyword 'full' without 'fini'",
            ),
            CodeMetadata::new(
                "W022",
                "Quality",
                Severity::Medium,
                false,
                "Directive line carries characters outside its permitted set",
            ),
            CodeMetadata::new(
                "W023",
                "Quality",
                Severity::Medium,
                false,
                "Directive line has an unusual bare form",
            ),
            CodeMetadata::new(
                "W024",
                "Quality",
                Severity::Medium,
                false,
                "B-file line could not be parsed",
            ),
            CodeMetadata::new(
                "W025",
                "Quality",
                Severity::Medium,
                false,
                "B-file indices are not consecutive",
            ),
            CodeMetadata::new(
                "I004",
                "System",
                Severity::Low,
                false,
                "System initialization completed",
            ),
            CodeMetadata::new(
                "I010",
                "Pipeline",
                Severity::Low,
                false,
                "Entry parsed successfully",
            ),
            CodeMetadata::new(
                "I011",
                "Batch",
                Severity::Low,
                false,
                "Batch run completed",
            ),
            CodeMetadata::new(
                "I012",
                "Output",
                Severity::Low,
                false,
                "Output artifacts written",
            ),
        ];

        for metadata in entries {
            registry.insert(metadata.code, metadata);
        }
        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_code_metadata(code: &str) -> Option<&'static CodeMetadata> {
    get_code_registry().get(code)
}

/// Get severity from a code
pub fn get_severity(code: &str) -> Severity {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if a code marks a fatal condition
pub fn is_fatal(code: &str) -> bool {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.fatal)
        .unwrap_or(false)
}

/// Get human-readable description for a code
pub fn get_description(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown code")
}

/// Get category from a code
pub fn get_category(code: &str) -> &'static str {
    get_code_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
