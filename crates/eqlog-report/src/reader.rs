//! Reading combat events out of a log file
//!
//! Lines without the `[timestamp] narration` shape are skipped silently.
//! Lines that have the shape but carry an unparseable timestamp either abort
//! the read or are skipped with a warning, depending on `ReadOptions`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use eqlog_core::{is_log_line, parse_line, CombatEvent};
use tracing::{debug, info, warn};

use crate::error::ReportError;

/// Options controlling how a log is read
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Abort on a bracketed line whose timestamp does not parse
    pub strict_timestamps: bool,
    /// Stop after this many log lines (None reads everything)
    pub max_lines: Option<usize>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            strict_timestamps: true,
            max_lines: None,
        }
    }
}

/// Result of reading a whole log
#[derive(Debug, Clone, Default)]
pub struct ReadOutcome {
    /// Parsed records in file order
    pub events: Vec<CombatEvent>,
    /// Physical lines consumed
    pub lines_read: usize,
    /// Lines that had the bracket/timestamp shape
    pub log_lines: usize,
    /// Log lines dropped because their timestamp did not parse
    pub skipped: usize,
}

/// Line-by-line combat log reader over any buffered source
pub struct LogReader<R> {
    inner: R,
    options: ReadOptions,
}

impl LogReader<BufReader<File>> {
    /// Open a log file on disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!("Opened combat log {:?}", path);
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LogReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            options: ReadOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    /// Read every remaining line and classify the log lines among them
    pub fn read_events(mut self) -> Result<ReadOutcome, ReportError> {
        let mut outcome = ReadOutcome::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if self.inner.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            outcome.lines_read += 1;
            let line_number = outcome.lines_read;

            // Logs are not guaranteed to be valid UTF-8.
            let text = String::from_utf8_lossy(&buf);
            let raw = text.trim_end_matches(['\n', '\r']);
            if !is_log_line(raw) {
                continue;
            }

            if let Some(max) = self.options.max_lines {
                if outcome.log_lines >= max {
                    debug!("Reached line limit of {}", max);
                    break;
                }
            }
            outcome.log_lines += 1;

            match parse_line(raw) {
                Ok(event) => outcome.events.push(event),
                Err(source) if self.options.strict_timestamps => {
                    return Err(ReportError::Line {
                        line_number,
                        source,
                    });
                }
                Err(source) => {
                    warn!("Skipping line {}: {}", line_number, source);
                    outcome.skipped += 1;
                }
            }
        }

        info!(
            "Read {} lines, {} log lines, {} events",
            outcome.lines_read,
            outcome.log_lines,
            outcome.events.len()
        );
        Ok(outcome)
    }
}
