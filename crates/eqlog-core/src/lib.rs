//! eqlog core - combat log line splitting and classification
//!
//! This crate turns one raw log line into one `CombatEvent`:
//! - `split_line` separates the bracketed timestamp from the narration
//! - `classify` applies the ordered combat rules to the narration

pub mod classify;
pub mod error;
pub mod event;
pub mod line;

pub use classify::classify;
pub use error::LineError;
pub use event::{CombatCategory, CombatEvent, DEFAULT_SOURCE, OBSERVER};
pub use line::{is_log_line, parse_line, parse_timestamp, split_line, TIMESTAMP_FORMAT};
