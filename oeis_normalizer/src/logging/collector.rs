//! Diagnostic collector for batch entry processing with cargo-style output
//!
//! Collects log events keyed by OEIS sequence id so a batch run can report
//! per-entry problems grouped together at the end.

use super::events::LogEvent;
use crate::config::compile_time::logging::MAX_EVENTS_PER_SEQUENCE;
use crate::entry::a_number;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

// ============================================================================
// ENTRY PROCESSING CONTEXT
// ============================================================================

/// Context for the entry currently being processed
#[derive(Debug, Clone)]
pub struct EntryProcessingContext {
    pub sequence_id: u32,
    pub start_time: Instant,
}

impl EntryProcessingContext {
    pub fn new(sequence_id: u32) -> Self {
        Self {
            sequence_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of a batch processing run
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_entries: usize,
    pub clean_entries: usize,
    pub failed_entries: usize,
    pub entries_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn success_rate(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            (self.total_entries - self.failed_entries) as f64 / self.total_entries as f64
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Thread-safe collector of per-entry log events
pub struct DiagnosticCollector {
    /// Events organized by sequence id for grouped output
    entry_events: Mutex<BTreeMap<u32, Vec<LogEvent>>>,

    /// Global processing start time
    processing_start: Instant,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self {
            entry_events: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event against a sequence id.
    ///
    /// Each entry is capped at [`MAX_EVENTS_PER_SEQUENCE`] events; one
    /// summary warning is appended when the cap is hit.
    pub fn record_event(&self, sequence_id: u32, event: LogEvent) {
        let mut events = self.entry_events.lock().unwrap();
        let entry_events = events.entry(sequence_id).or_default();

        if entry_events.len() < MAX_EVENTS_PER_SEQUENCE {
            entry_events.push(event);
        } else if entry_events.len() == MAX_EVENTS_PER_SEQUENCE {
            entry_events.push(LogEvent::warning(&format!(
                "Too many events for entry (limit: {})",
                MAX_EVENTS_PER_SEQUENCE
            )));
        }
    }

    /// Get all events recorded for one entry
    pub fn get_entry_events(&self, sequence_id: u32) -> Vec<LogEvent> {
        let events = self.entry_events.lock().unwrap();
        events.get(&sequence_id).cloned().unwrap_or_default()
    }

    /// Get only the errors recorded for one entry
    pub fn get_entry_errors(&self, sequence_id: u32) -> Vec<LogEvent> {
        self.get_entry_events(sequence_id)
            .into_iter()
            .filter(|e| e.is_error())
            .collect()
    }

    pub fn entry_has_errors(&self, sequence_id: u32) -> bool {
        !self.get_entry_errors(sequence_id).is_empty()
    }

    /// Get all events keyed by sequence id
    pub fn get_all_entry_events(&self) -> BTreeMap<u32, Vec<LogEvent>> {
        self.entry_events.lock().unwrap().clone()
    }

    /// Get sequence ids that recorded at least one error
    pub fn get_entries_with_errors(&self) -> Vec<u32> {
        let events = self.entry_events.lock().unwrap();
        events
            .iter()
            .filter(|(_, events)| events.iter().any(|e| e.is_error()))
            .map(|(&id, _)| id)
            .collect()
    }

    /// Compute a processing summary across all entries
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.entry_events.lock().unwrap();

        let mut summary = ProcessingSummary {
            total_entries: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..ProcessingSummary::default()
        };

        for entry_events in events.values() {
            let has_errors = entry_events.iter().any(|e| e.is_error());
            let has_warnings = entry_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_entries += 1;
            } else if has_warnings {
                summary.entries_with_warnings += 1;
            } else {
                summary.clean_entries += 1;
            }

            summary.total_errors += entry_events.iter().filter(|e| e.is_error()).count();
            summary.total_warnings += entry_events.iter().filter(|e| e.is_warning()).count();
        }

        summary
    }

    /// Total event count across all entries
    pub fn total_event_count(&self) -> usize {
        let events = self.entry_events.lock().unwrap();
        events.values().map(|v| v.len()).sum()
    }

    /// Clear all collected data
    pub fn clear(&self) {
        self.entry_events.lock().unwrap().clear();
    }
}

impl Default for DiagnosticCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

/// Format collected events grouped by entry, cargo-style
pub fn format_cargo_style_report(collector: &DiagnosticCollector) -> String {
    let mut output = String::new();
    let all_events = collector.get_all_entry_events();

    for (&sequence_id, events) in &all_events {
        let errors: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warnings: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if errors.is_empty() && warnings.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", a_number(sequence_id)));

        for event in errors {
            output.push_str(&format!(
                "error[{}]: {}\n",
                event.code.as_str(),
                event.message
            ));
            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));
            for (key, value) in &event.context {
                output.push_str(&format!("  = {}: {}\n", key, value));
            }
        }

        for event in warnings {
            output.push_str(&format!(
                "warning[{}]: {}\n",
                event.code.as_str(),
                event.message
            ));
            for (key, value) in &event.context {
                output.push_str(&format!("  = {}: {}\n", key, value));
            }
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_collector_basic() {
        let collector = DiagnosticCollector::new();

        collector.record_event(
            45,
            LogEvent::error(codes::structure::MALFORMED_LINE, "bad line"),
        );

        assert_eq!(collector.get_entry_events(45).len(), 1);
        assert!(collector.entry_has_errors(45));
        assert!(!collector.entry_has_errors(7));
    }

    #[test]
    fn test_processing_summary() {
        let collector = DiagnosticCollector::new();

        collector.record_event(
            45,
            LogEvent::error(codes::structure::UNKNOWN_DIRECTIVE, "unknown"),
        );
        collector.record_event(
            142,
            LogEvent::warning_with_code(codes::quality::MISSING_OFFSET, "no offset"),
        );
        collector.record_event(7, LogEvent::info("clean"));

        let summary = collector.get_summary();
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.failed_entries, 1);
        assert_eq!(summary.entries_with_warnings, 1);
        assert_eq!(summary.clean_entries, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
    }

    #[test]
    fn test_event_cap_per_entry() {
        let collector = DiagnosticCollector::new();

        for i in 0..(MAX_EVENTS_PER_SEQUENCE + 50) {
            collector.record_event(
                1,
                LogEvent::warning_with_code(
                    codes::quality::UNKNOWN_KEYWORD,
                    &format!("keyword {}", i),
                ),
            );
        }

        // cap plus one summary warning
        assert_eq!(
            collector.get_entry_events(1).len(),
            MAX_EVENTS_PER_SEQUENCE + 1
        );
    }

    #[test]
    fn test_cargo_style_report() {
        let collector = DiagnosticCollector::new();

        collector.record_event(
            45,
            LogEvent::warning_with_code(codes::quality::VALUES_MISMATCH, "values disagree"),
        );

        let report = format_cargo_style_report(&collector);
        assert!(report.contains("Checking A000045..."));
        assert!(report.contains("warning[W015]: values disagree"));
        assert!(report.contains("Total warnings: 1"));
    }
}
