//! Batch processing of raw entries
//!
//! The driver loop around the per-entry pipeline: parses each raw entry
//! in ascending id order, records diagnostics against the global
//! collector, and accumulates the normalized entries and per-entry
//! failures. One failing entry never stops the batch unless fail-fast
//! is requested.

use crate::config::charmap::CharacterPolicies;
use crate::config::compile_time::batch::PROGRESS_LOG_INTERVAL;
use crate::entry::{a_number, OeisEntry};
use crate::logging::{self, codes};
use crate::pipeline::{self, ParseError};
use crate::storage::RawEntry;
use crate::{log_error, log_info, log_success};
use std::time::{Duration, Instant};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Parse at most this many entries (applied before parsing).
    pub limit: Option<usize>,
    /// Emit periodic progress lines while processing.
    pub progress_reporting: bool,
    /// Stop at the first fatal per-entry failure.
    pub fail_fast: bool,
    /// Character policies applied to directive payloads.
    pub charmap: CharacterPolicies,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            limit: None,
            progress_reporting: true,
            fail_fast: false,
            charmap: CharacterPolicies::default(),
        }
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Everything a batch run produced.
#[derive(Debug)]
pub struct BatchResults {
    /// Successfully normalized entries, in input order.
    pub entries: Vec<OeisEntry>,
    /// Entries that could not be represented, with their fatal errors.
    pub failures: Vec<(u32, ParseError)>,
    /// Count of successful entries that produced at least one diagnostic.
    pub entries_with_diagnostics: usize,
    /// Total diagnostics across the whole batch.
    pub diagnostic_count: usize,
    /// Wall-clock time spent in the processing loop.
    pub duration: Duration,
}

impl BatchResults {
    pub fn total_processed(&self) -> usize {
        self.entries.len() + self.failures.len()
    }

    pub fn clean_entries(&self) -> usize {
        self.entries.len() - self.entries_with_diagnostics.min(self.entries.len())
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

// ============================================================================
// PROCESSING LOOP
// ============================================================================

/// Process raw entries through the parsing pipeline.
///
/// Entries arrive in the order the storage layer yields them (ascending
/// id). Each entry is parsed under its own logging context so every
/// event it produces carries the sequence id.
pub fn process_entries(
    raw_entries: impl IntoIterator<Item = RawEntry>,
    config: &BatchConfig,
) -> BatchResults {
    let start = Instant::now();

    let mut entries = Vec::new();
    let mut failures = Vec::new();
    let mut entries_with_diagnostics = 0;
    let mut diagnostic_count = 0;

    let limited = raw_entries
        .into_iter()
        .take(config.limit.unwrap_or(usize::MAX));

    for raw in limited {
        let outcome = logging::with_entry_context(raw.sequence_id, || {
            if config.progress_reporting && raw.sequence_id % PROGRESS_LOG_INTERVAL == 0 {
                log_info!("Processing entry", "sequence" => a_number(raw.sequence_id));
            }

            let outcome = pipeline::parse_entry_with_policies(
                raw.sequence_id,
                &raw.main_text,
                &raw.bfile_text,
                &config.charmap,
            );
            logging::record_diagnostics(&outcome.diagnostics);
            outcome
        });

        diagnostic_count += outcome.diagnostics.len();
        let had_diagnostics = !outcome.diagnostics.is_empty();

        match outcome.result {
            Ok(entry) => {
                if had_diagnostics {
                    entries_with_diagnostics += 1;
                }
                entries.push(entry);
            }
            Err(err) => {
                log_error!(err.code(), &err.to_string(),
                    "sequence" => a_number(raw.sequence_id)
                );
                failures.push((raw.sequence_id, err));
                if config.fail_fast {
                    break;
                }
            }
        }
    }

    let results = BatchResults {
        entries,
        failures,
        entries_with_diagnostics,
        diagnostic_count,
        duration: start.elapsed(),
    };

    log_success!(codes::success::BATCH_COMPLETED, "Batch processing complete",
        "parsed" => results.entries.len(),
        "failed" => results.failures.len(),
        "diagnostics" => results.diagnostic_count,
        "elapsed_ms" => results.duration.as_millis()
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ParseErrorKind;
    use assert_matches::assert_matches;

    fn raw(sequence_id: u32, main_text: &str) -> RawEntry {
        RawEntry {
            sequence_id,
            main_text: main_text.to_string(),
            bfile_text: String::new(),
        }
    }

    fn valid(sequence_id: u32) -> RawEntry {
        RawEntry {
            sequence_id,
            main_text: "%I\n%S 1,2,3\n%N Naturals.\n%K nonn\n%O 1,2\n%A Somebody".to_string(),
            bfile_text: "1 1\n2 2\n3 3\n".to_string(),
        }
    }

    fn broken(sequence_id: u32) -> RawEntry {
        // %K precedes %N, a fatal ordering violation
        raw(sequence_id, "%I\n%S 1,2\n%K nonn\n%N Name.")
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let config = BatchConfig {
            progress_reporting: false,
            ..BatchConfig::default()
        };
        let results = process_entries([valid(1), broken(2), valid(3)], &config);

        assert_eq!(results.entries.len(), 2);
        assert_eq!(results.failures.len(), 1);
        assert_eq!(results.failures[0].0, 2);
        assert_matches!(results.failures[0].1.kind, ParseErrorKind::Structure(_));
        assert_eq!(results.total_processed(), 3);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let config = BatchConfig {
            progress_reporting: false,
            fail_fast: true,
            ..BatchConfig::default()
        };
        let results = process_entries([valid(1), broken(2), valid(3)], &config);

        assert_eq!(results.entries.len(), 1);
        assert_eq!(results.failures.len(), 1);
        assert_eq!(results.total_processed(), 2);
    }

    #[test]
    fn test_limit_is_applied_before_parsing() {
        let config = BatchConfig {
            limit: Some(2),
            progress_reporting: false,
            ..BatchConfig::default()
        };
        let results = process_entries([valid(1), valid(2), valid(3)], &config);

        assert_eq!(results.entries.len(), 2);
        assert!(!results.has_failures());
    }

    #[test]
    fn test_diagnostic_counts() {
        // missing %O and %A yield two diagnostics on an otherwise good entry
        let noisy = raw(5, "%I\n%S 1,2\n%N Name.\n%K nonn");
        let config = BatchConfig {
            progress_reporting: false,
            ..BatchConfig::default()
        };
        let results = process_entries([valid(1), noisy], &config);

        assert_eq!(results.entries.len(), 2);
        assert_eq!(results.entries_with_diagnostics, 1);
        assert_eq!(results.diagnostic_count, 2);
        assert_eq!(results.clean_entries(), 1);
    }
}
