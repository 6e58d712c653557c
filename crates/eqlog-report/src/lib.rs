//! eqlog report - reading combat logs and exporting tables
//!
//! Drives `eqlog-core` over whole files and writes the resulting records as
//! CSV, either one row per event or aggregated per damage source.

mod error;
mod export;
mod reader;
mod summary;

pub use error::ReportError;
pub use export::{write_report, REPORT_TIME_FORMAT};
pub use reader::{LogReader, ReadOptions, ReadOutcome};
pub use summary::{DamageSummary, SummaryKey, SummaryTotals};
