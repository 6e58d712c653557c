use eqlog_core::LineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse line {line_number}")]
    Line {
        line_number: usize,
        #[source]
        source: LineError,
    },
}
