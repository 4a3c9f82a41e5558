//! Global logging module for the OEIS normalizer
//!
//! Provides thread-safe global logging with entry-aware batch processing,
//! cargo-style reporting, and a clean macro interface. Data-quality
//! diagnostics produced by the parsing pipeline are recorded here by the
//! batch driver; the pipeline itself never touches global state.

pub mod codes;
pub mod collector;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

// Re-export main types
pub use codes::Code;
pub use collector::{DiagnosticCollector, EntryProcessingContext, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

use crate::diagnostics::Diagnostic;

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_COLLECTOR: OnceLock<Arc<DiagnosticCollector>> = OnceLock::new();

thread_local! {
    static ENTRY_CONTEXT: RefCell<Option<EntryProcessingContext>> = RefCell::new(None);
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging with a console logger at the given level
pub fn init_global_logging(min_level: LogLevel) -> Result<(), String> {
    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new(min_level));
    init_global_logging_with_service(Arc::new(LoggingService::new(logger, min_level)))
}

/// Initialize with a custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())?;

    GLOBAL_COLLECTOR
        .set(Arc::new(DiagnosticCollector::new()))
        .map_err(|_| "Global diagnostic collector already initialized".to_string())?;

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Global logging system initialized",
        ));
    }

    Ok(())
}

/// Check if global logging is initialized
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some() && GLOBAL_COLLECTOR.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// Safe access to the global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Safe access to the global diagnostic collector
pub fn try_get_global_collector() -> Option<&'static DiagnosticCollector> {
    GLOBAL_COLLECTOR.get().map(|collector| collector.as_ref())
}

// ============================================================================
// ENTRY CONTEXT MANAGEMENT
// ============================================================================

/// Set the entry context for the current thread
pub fn set_entry_context(sequence_id: u32) {
    ENTRY_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(EntryProcessingContext::new(sequence_id));
    });
}

/// Clear the entry context for the current thread
pub fn clear_entry_context() {
    ENTRY_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute a function with an entry context in place
pub fn with_entry_context<F, R>(sequence_id: u32, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_entry_context(sequence_id);
    let result = f();
    clear_entry_context();
    result
}

/// Get current entry context (used by macros)
pub fn get_current_entry_context() -> Option<EntryProcessingContext> {
    ENTRY_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn finish_event(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    if let Some(entry_ctx) = get_current_entry_context() {
        event = event.with_sequence_id(entry_ctx.sequence_id);
    }
    event
}

fn dispatch_event(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event.clone());
    }
    if event.level <= LogLevel::Warning {
        if let Some(sequence_id) = event.sequence_id {
            if let Some(collector) = try_get_global_collector() {
                collector.record_event(sequence_id, event);
            }
        }
    }
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(finish_event(LogEvent::error(code, message), context));
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(finish_event(
        LogEvent::warning_with_code(code, message),
        context,
    ));
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let event = finish_event(LogEvent::success(code, message), context);
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let event = finish_event(LogEvent::info(message), context);
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Record a batch of pipeline diagnostics against the global collector
/// and the global logger.
pub fn record_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        dispatch_event(diagnostic.to_log_event());
    }
}

/// Get the current batch processing summary
pub fn get_processing_summary() -> ProcessingSummary {
    try_get_global_collector()
        .map(|collector| collector.get_summary())
        .unwrap_or_default()
}

/// Print the cargo-style per-entry report
pub fn print_cargo_style_summary() {
    if let Some(collector) = try_get_global_collector() {
        println!("{}", collector::format_cargo_style_report(collector));
    }
}

/// Clear all collected diagnostics
pub fn clear_diagnostic_collection() {
    if let Some(collector) = try_get_global_collector() {
        collector.clear();
    }
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
