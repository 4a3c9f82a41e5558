//! OEIS entry normalizer
//!
//! Parses crawled OEIS flat-file entries (`%` directive lines plus
//! b-files) into normalized [`entry::OeisEntry`] values. Parsing is a
//! pure per-entry pipeline with a strict fatal/non-fatal split: a fatal
//! [`pipeline::ParseError`] abandons one entry, while data-quality
//! findings accumulate as [`diagnostics::Diagnostic`] values alongside
//! whatever result the entry still produced.
//!
//! The surrounding layers read the crawler's SQLite database
//! ([`storage`]), drive the pipeline over a whole batch ([`batch`]),
//! and serialize the results ([`output`]).

pub mod batch;
pub mod bfile;
pub mod config;
pub mod diagnostics;
pub mod directives;
pub mod entry;
pub mod fields;
pub mod keywords;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod reconcile;
pub mod storage;

pub use batch::{process_entries, BatchConfig, BatchResults};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use entry::{a_number, OeisEntry, Offset};
pub use pipeline::{parse_entry, parse_entry_with_policies, ParseError, ParseOutcome};
