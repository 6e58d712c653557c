//! Damage totals grouped by category, actor and source

use std::collections::BTreeMap;
use std::io::Write;

use eqlog_core::{CombatCategory, CombatEvent};
use serde::Serialize;

use crate::error::ReportError;

/// Grouping key for a summary row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SummaryKey {
    pub category: CombatCategory,
    pub actor: String,
    pub source_label: String,
}

/// Accumulated totals for one key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTotals {
    pub hits: u64,
    pub total_amount: u64,
    pub max_amount: u64,
}

impl SummaryTotals {
    fn record(&mut self, amount: u64) {
        self.hits += 1;
        self.total_amount = self.total_amount.saturating_add(amount);
        self.max_amount = self.max_amount.max(amount);
    }
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    category: &'static str,
    actor: &'a str,
    source_label: &'a str,
    hits: u64,
    total_amount: u64,
    max_amount: u64,
}

/// Per-source damage summary; `Unknown` records are not counted.
///
/// For `Damage` records the attacker is used as the source.
#[derive(Debug, Clone, Default)]
pub struct DamageSummary {
    totals: BTreeMap<SummaryKey, SummaryTotals>,
}

impl DamageSummary {
    pub fn from_events(events: &[CombatEvent]) -> Self {
        let mut summary = Self::default();
        for event in events.iter().filter(|e| e.is_known()) {
            // Incoming melee names its attacker in `target`.
            let source = match event.category {
                CombatCategory::Damage => &event.target,
                _ => &event.source_label,
            };
            let key = SummaryKey {
                category: event.category,
                actor: event.actor.clone(),
                source_label: source.clone(),
            };
            summary.totals.entry(key).or_default().record(event.amount);
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn get(&self, key: &SummaryKey) -> Option<&SummaryTotals> {
        self.totals.get(key)
    }

    /// Rows sorted by total descending, ties broken by key
    pub fn rows(&self) -> Vec<(&SummaryKey, &SummaryTotals)> {
        let mut rows: Vec<_> = self.totals.iter().collect();
        // stable sort keeps BTreeMap key order among equal totals
        rows.sort_by(|a, b| b.1.total_amount.cmp(&a.1.total_amount));
        rows
    }

    /// Sum of all counted amounts
    pub fn grand_total(&self) -> u64 {
        self.totals
            .values()
            .fold(0u64, |acc, t| acc.saturating_add(t.total_amount))
    }

    /// Write the summary as CSV, returning the number of rows written
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize, ReportError> {
        let mut csv = csv::Writer::from_writer(writer);
        let rows = self.rows();

        if rows.is_empty() {
            csv.write_record([
                "category",
                "actor",
                "source_label",
                "hits",
                "total_amount",
                "max_amount",
            ])?;
        }

        for (key, totals) in &rows {
            csv.serialize(SummaryRow {
                category: key.category.label(),
                actor: &key.actor,
                source_label: &key.source_label,
                hits: totals.hits,
                total_amount: totals.total_amount,
                max_amount: totals.max_amount,
            })?;
        }

        csv.flush()?;
        Ok(rows.len())
    }
}
