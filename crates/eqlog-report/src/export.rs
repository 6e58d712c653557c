//! CSV export of combat events
//!
//! One row per record, prefixed by its position in the log.

use std::io::Write;

use eqlog_core::CombatEvent;
use serde::Serialize;
use tracing::debug;

use crate::error::ReportError;

/// Timestamp rendering used in reports
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct ReportRow<'a> {
    index: usize,
    timestamp: String,
    category: &'static str,
    actor: &'a str,
    verb: &'a str,
    target: &'a str,
    amount: u64,
    skill_tag: &'a str,
    source_label: &'a str,
}

impl<'a> ReportRow<'a> {
    fn new(index: usize, event: &'a CombatEvent) -> Self {
        Self {
            index,
            timestamp: event.timestamp.format(REPORT_TIME_FORMAT).to_string(),
            category: event.category.label(),
            actor: &event.actor,
            verb: &event.verb,
            target: &event.target,
            amount: event.amount,
            skill_tag: &event.skill_tag,
            source_label: &event.source_label,
        }
    }
}

/// Write events as CSV, returning the number of rows written.
///
/// The index is the event's position in `events`, so it stays stable when
/// `Unknown` rows are left out.
pub fn write_report<W: Write>(
    writer: W,
    events: &[CombatEvent],
    include_unknown: bool,
) -> Result<usize, ReportError> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for (index, event) in events.iter().enumerate() {
        if !include_unknown && !event.is_known() {
            continue;
        }
        csv.serialize(ReportRow::new(index, event))?;
        rows += 1;
    }

    if rows == 0 {
        // serde only emits headers alongside the first row
        csv.write_record([
            "index",
            "timestamp",
            "category",
            "actor",
            "verb",
            "target",
            "amount",
            "skill_tag",
            "source_label",
        ])?;
    }

    csv.flush()?;
    debug!("Wrote {} report rows", rows);
    Ok(rows)
}
