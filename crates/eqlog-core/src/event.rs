//! Combat event records
//!
//! One `CombatEvent` is produced for every classified log line.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Actor recorded when the observer is the one acting.
pub const OBSERVER: &str = "You";

/// Source label used for combat actions that name no weapon or spell.
pub const DEFAULT_SOURCE: &str = "melee";

/// Kind of combat event a narration line describes
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CombatCategory {
    /// Narration that matched no combat rule (heals, chat, system text)
    #[default]
    Unknown,
    /// An actor's action against a target with a named verb
    Combat,
    /// Damage reflected by the observer's own damage shield
    CombatDamageShield,
    /// A creature hitting the observer directly
    Damage,
}

impl CombatCategory {
    /// Variant name as written to reports
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Combat => "Combat",
            Self::CombatDamageShield => "CombatDamageShield",
            Self::Damage => "Damage",
        }
    }
}

/// A single parsed combat record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// When the line was logged
    pub timestamp: NaiveDateTime,
    pub category: CombatCategory,
    /// Entity performing the action
    pub actor: String,
    /// Action word, e.g. "hit" or "pierced"
    pub verb: String,
    /// Entity receiving the action
    pub target: String,
    /// Magnitude of the effect
    pub amount: u64,
    /// Parenthesized annotation such as "Critical"
    pub skill_tag: String,
    /// Weapon, spell or effect that caused the damage
    pub source_label: String,
}

impl CombatEvent {
    /// Record for narration that matched nothing
    pub fn unknown(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            category: CombatCategory::Unknown,
            actor: String::new(),
            verb: String::new(),
            target: String::new(),
            amount: 0,
            skill_tag: String::new(),
            source_label: String::new(),
        }
    }

    /// Whether any combat rule matched this line
    pub fn is_known(&self) -> bool {
        self.category != CombatCategory::Unknown
    }
}
