//! Combat narration classification
//!
//! Rules are applied in a fixed order and every rule is evaluated. When more
//! than one rule matches, the record from the last matching rule is kept:
//! combat action < damage shield < incoming melee.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::{Captures, Regex};

use crate::event::{CombatCategory, CombatEvent, DEFAULT_SOURCE, OBSERVER};

static COMBAT_ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<actor>\w+?) (?P<verb>\w+?) (?P<target>.+?) for (?P<amount>[0-9]+) (?:points?|damage)\b.*$",
    )
    .expect("combat action pattern is valid")
});

static HIT_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)damage by (?P<source>.+)\.").expect("hit source pattern is valid")
});

static COMBAT_SKILL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?P<tag>.+)\)").expect("skill tag pattern is valid"));

static DAMAGE_SHIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<target>.+?) is (?P<verb>.+?) by YOUR (?P<source>.+?) for (?P<amount>[0-9]+) points?\b",
    )
    .expect("damage shield pattern is valid")
});

static MELEE_DAMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^a (?P<source>.+?) hits YOU for (?P<amount>[0-9]+).*$")
        .expect("melee damage pattern is valid")
});

/// A classification rule: returns a record when its pattern matches.
type Rule = fn(NaiveDateTime, &str) -> Option<CombatEvent>;

/// Lowest precedence first.
const RULES: [Rule; 3] = [combat_action, damage_shield, incoming_melee];

/// Classify one narration string.
///
/// Never fails: narration matching no rule yields a `CombatCategory::Unknown`
/// record with empty text fields and a zero amount.
pub fn classify(timestamp: NaiveDateTime, narration: &str) -> CombatEvent {
    let mut event = CombatEvent::unknown(timestamp);
    for rule in RULES {
        if let Some(matched) = rule(timestamp, narration) {
            event = matched;
        }
    }
    event
}

fn group(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// `None` when the digits overflow, which makes the rule not match.
fn amount(caps: &Captures<'_>) -> Option<u64> {
    caps.name("amount")?.as_str().parse().ok()
}

/// `<actor> <verb> <target> for <amount> point(s)|damage ...`
fn combat_action(timestamp: NaiveDateTime, narration: &str) -> Option<CombatEvent> {
    let caps = COMBAT_ACTION.captures(narration)?;
    let amount = amount(&caps)?;

    // Refinements look at the whole narration, not the captured groups.
    let source_label = HIT_SOURCE
        .captures(narration)
        .map(|c| group(&c, "source"))
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    let skill_tag = COMBAT_SKILL
        .captures(narration)
        .map(|c| group(&c, "tag"))
        .unwrap_or_default();

    Some(CombatEvent {
        timestamp,
        category: CombatCategory::Combat,
        actor: group(&caps, "actor"),
        verb: group(&caps, "verb"),
        target: group(&caps, "target"),
        amount,
        skill_tag,
        source_label,
    })
}

/// `<target> is <verb> by YOUR <source> for <amount> points ...`
fn damage_shield(timestamp: NaiveDateTime, narration: &str) -> Option<CombatEvent> {
    let caps = DAMAGE_SHIELD.captures(narration)?;
    let amount = amount(&caps)?;

    Some(CombatEvent {
        timestamp,
        category: CombatCategory::CombatDamageShield,
        actor: OBSERVER.to_string(),
        verb: group(&caps, "verb"),
        target: group(&caps, "target"),
        amount,
        skill_tag: String::new(),
        source_label: group(&caps, "source"),
    })
}

/// `a <source> hits YOU for <amount> ...`
///
/// The attacking creature lands in `target`; downstream reports rely on it.
fn incoming_melee(timestamp: NaiveDateTime, narration: &str) -> Option<CombatEvent> {
    let caps = MELEE_DAMAGE.captures(narration)?;
    let amount = amount(&caps)?;

    Some(CombatEvent {
        timestamp,
        category: CombatCategory::Damage,
        actor: OBSERVER.to_string(),
        verb: String::new(),
        target: group(&caps, "source"),
        amount,
        skill_tag: String::new(),
        source_label: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 4, 12)
            .and_then(|d| d.and_hms_opt(13, 9, 4))
            .unwrap()
    }

    #[test]
    fn test_combat_with_skills() {
        let event = classify(
            ts(),
            "You hit a defender of fire for 1110 points of disease damage by Strike of Disease II. (Critical)",
        );
        assert_eq!(event.category, CombatCategory::Combat);
        assert_eq!(event.actor, "You");
        assert_eq!(event.verb, "hit");
        assert_eq!(event.target, "a defender of fire");
        assert_eq!(event.amount, 1110);
        assert_eq!(event.skill_tag, "Critical");
        assert_eq!(event.source_label, "Strike of Disease II");
        assert_eq!(event.timestamp, ts());
    }

    #[test]
    fn test_combat_defaults_to_melee() {
        let event = classify(ts(), "You hit a defender of fire for 1110 points of damage.");
        assert_eq!(event.category, CombatCategory::Combat);
        assert_eq!(event.verb, "hit");
        assert_eq!(event.target, "a defender of fire");
        assert_eq!(event.amount, 1110);
        assert_eq!(event.skill_tag, "");
        assert_eq!(event.source_label, "melee");
    }

    #[test]
    fn test_damage_shield() {
        let event = classify(
            ts(),
            "Halon of Marr is pierced by YOUR thorns for 60 points of non-melee damage.",
        );
        assert_eq!(event.category, CombatCategory::CombatDamageShield);
        assert_eq!(event.actor, "You");
        assert_eq!(event.verb, "pierced");
        assert_eq!(event.target, "Halon of Marr");
        assert_eq!(event.amount, 60);
        assert_eq!(event.source_label, "thorns");
        assert_eq!(event.skill_tag, "");
    }

    #[test]
    fn test_damage_shield_overrides_combat_match() {
        let narration = "Halon of Marr is pierced by YOUR thorns for 60 points of non-melee damage.";
        // Both rules match this line; the later one wins.
        assert!(combat_action(ts(), narration).is_some());
        let event = classify(ts(), narration);
        assert_eq!(event.category, CombatCategory::CombatDamageShield);
    }

    #[test]
    fn test_incoming_melee() {
        let event = classify(ts(), "a gnoll pup hits YOU for 15 points of damage.");
        assert_eq!(event.category, CombatCategory::Damage);
        assert_eq!(event.actor, "You");
        assert_eq!(event.target, "gnoll pup");
        assert_eq!(event.amount, 15);
        assert_eq!(event.verb, "");
        assert_eq!(event.skill_tag, "");
        assert_eq!(event.source_label, "");
    }

    #[test]
    fn test_incoming_melee_is_case_insensitive() {
        let event = classify(ts(), "A Gnoll Pup HITS you for 7 points of damage.");
        assert_eq!(event.category, CombatCategory::Damage);
        assert_eq!(event.target, "Gnoll Pup");
        assert_eq!(event.amount, 7);
    }

    #[test]
    fn test_combat_singular_point() {
        let event = classify(ts(), "You hit a rat for 1 point of damage.");
        assert_eq!(event.category, CombatCategory::Combat);
        assert_eq!(event.target, "a rat");
        assert_eq!(event.amount, 1);
        assert_eq!(event.source_label, "melee");
    }

    #[test]
    fn test_combat_without_points() {
        let event = classify(ts(), "You hit a rat for 25 damage.");
        assert_eq!(event.category, CombatCategory::Combat);
        assert_eq!(event.verb, "hit");
        assert_eq!(event.target, "a rat");
        assert_eq!(event.amount, 25);
    }

    #[test]
    fn test_incoming_melee_singular_point() {
        let event = classify(ts(), "a rat hits YOU for 1 point of damage.");
        assert_eq!(event.category, CombatCategory::Damage);
        assert_eq!(event.target, "rat");
        assert_eq!(event.amount, 1);
    }

    #[test]
    fn test_combat_is_case_insensitive() {
        let event = classify(ts(), "YOU HIT a rat FOR 5 POINTS of damage.");
        assert_eq!(event.category, CombatCategory::Combat);
        assert_eq!(event.actor, "YOU");
        assert_eq!(event.verb, "HIT");
        assert_eq!(event.target, "a rat");
        assert_eq!(event.amount, 5);
    }

    #[test]
    fn test_damage_shield_is_case_insensitive() {
        let event = classify(
            ts(),
            "halon IS pierced BY your thorns FOR 60 POINTS of non-melee damage.",
        );
        assert_eq!(event.category, CombatCategory::CombatDamageShield);
        assert_eq!(event.target, "halon");
        assert_eq!(event.verb, "pierced");
        assert_eq!(event.source_label, "thorns");
        assert_eq!(event.amount, 60);
    }

    #[test]
    fn test_heal_is_unknown() {
        let event = classify(
            ts(),
            "You have been healed for 273 hit points by Aura of Rodcet Effect Rk.III.",
        );
        assert_eq!(event, CombatEvent::unknown(ts()));
    }

    #[test]
    fn test_chat_is_unknown() {
        let event = classify(ts(), "Halon tells the group, 'inc'");
        assert_eq!(event.category, CombatCategory::Unknown);
        assert_eq!(event.amount, 0);
    }

    #[test]
    fn test_amount_overflow_does_not_match() {
        let event = classify(
            ts(),
            "You hit a rat for 99999999999999999999999 points of damage.",
        );
        assert_eq!(event.category, CombatCategory::Unknown);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let narration =
            "You hit a defender of fire for 1110 points of disease damage by Strike of Disease II. (Critical)";
        let first = classify(ts(), narration);
        let second = classify(ts(), narration);
        assert_eq!(first, second);
    }
}
