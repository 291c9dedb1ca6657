use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// A non-fatal event recorded while a table is processed.
///
/// Diagnostics are the pipeline's only failure signal for per-cell and
/// per-country problems: the affected cell becomes
/// [`crate::types::Value::Missing`] and processing continues.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A cell could not be parsed (or coerced) under its column's role.
    CellParseFailure {
        /// Column name at the time of cleaning.
        column: String,
        /// Zero-based row index within the table.
        row: usize,
        /// The cell's original text form.
        raw: String,
    },
    /// A country-statistics lookup failed for one entity.
    LookupFailure {
        /// The country identifier the lookup was keyed by.
        entity: String,
        /// The enrichment field that failed (e.g. `country_population`).
        field: String,
        /// Collaborator-supplied failure description.
        message: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::CellParseFailure { column, row, raw } => {
                write!(f, "failed to parse row {row} column '{column}' (raw='{raw}')")
            }
            Diagnostic::LookupFailure {
                entity,
                field,
                message,
            } => {
                write!(f, "lookup for '{entity}' field '{field}' failed: {message}")
            }
        }
    }
}

/// Sink interface for pipeline diagnostics.
///
/// Implementors can record metrics, logs, or forward to telemetry.
pub trait DiagnosticSink: Send + Sync {
    /// Called once per diagnostic, in table order.
    fn report(&self, diagnostic: &Diagnostic);
}

/// A sink that fans out diagnostics to a list of sinks.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn DiagnosticSink>>,
}

impl CompositeSink {
    /// Create a new composite sink from a list of sinks.
    pub fn new(sinks: Vec<Arc<dyn DiagnosticSink>>) -> Self {
        Self { sinks }
    }
}

impl fmt::Debug for CompositeSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeSink")
            .field("sinks_len", &self.sinks.len())
            .finish()
    }
}

impl DiagnosticSink for CompositeSink {
    fn report(&self, diagnostic: &Diagnostic) {
        for sink in &self.sinks {
            sink.report(diagnostic);
        }
    }
}

/// Logs diagnostics to stderr.
#[derive(Debug, Default)]
pub struct StdErrSink;

impl DiagnosticSink for StdErrSink {
    fn report(&self, diagnostic: &Diagnostic) {
        eprintln!("[pipeline][warn] {diagnostic}");
    }
}

/// Appends diagnostics to a local log file.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSink {
    /// Create a file sink that appends diagnostics to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl DiagnosticSink for FileSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.append_line(&format!("{} warn {diagnostic}", unix_ts()));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
