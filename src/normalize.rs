//! Upstream club records to canonical [`Standing`]s.
//!
//! Upstream payloads are loosely typed: counts arrive as strings, numbers or
//! `null`, and fields go missing for older seasons. Nothing here fails; every
//! field that cannot be read is replaced by its default and reported once at
//! `warn` level.

use serde_json::Value;
use tracing::warn;

use crate::model::{MatchResult, Standing};

pub const UNKNOWN_CLUB: &str = "Unknown club";

const KEY_RANK: &str = "intRank";
const KEY_TEAM: &str = "strTeam";
const KEY_BADGE: &str = "strBadge";
const KEY_POINTS: &str = "intPoints";
const KEY_FORM: &str = "strForm";
const KEY_PLAYED: &str = "intPlayed";
const KEY_WON: &str = "intWin";
const KEY_DRAWN: &str = "intDraw";
const KEY_LOST: &str = "intLoss";
const KEY_GOALS_FOR: &str = "intGoalsFor";
const KEY_GOALS_AGAINST: &str = "intGoalsAgainst";

/// Reads an integer out of a loosely typed JSON value.
///
/// Integers pass through, finite floats truncate toward zero and strings are
/// parsed after trimming. Anything else yields `default` and a warning.
pub fn parse_int(value: Option<&Value>, default: i64, field: &str) -> i64 {
    match read_int(value) {
        Some(n) => n,
        None => {
            warn!(
                field,
                value = %describe(value),
                default,
                "failed to convert value to int, using default"
            );
            default
        }
    }
}

fn read_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (f.is_finite() && f.abs() < i64::MAX as f64).then(|| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "<missing>".to_string(),
        Some(v) => v.to_string(),
    }
}

/// Converts one raw upstream record. Never fails.
pub fn normalize_record(record: &Value) -> Standing {
    let club = match record.get(KEY_TEAM).and_then(Value::as_str) {
        Some(name) => name.to_string(),
        None => {
            warn!(field = KEY_TEAM, default = UNKNOWN_CLUB, "club name missing");
            UNKNOWN_CLUB.to_string()
        }
    };
    let badge_url = record
        .get(KEY_BADGE)
        .and_then(Value::as_str)
        .map(str::to_string);
    let form = parse_form(record.get(KEY_FORM), &club);

    Standing {
        rank: parse_int(record.get(KEY_RANK), 0, KEY_RANK),
        points: parse_int(record.get(KEY_POINTS), 0, KEY_POINTS),
        played: parse_int(record.get(KEY_PLAYED), 0, KEY_PLAYED),
        won: parse_int(record.get(KEY_WON), 0, KEY_WON),
        drawn: parse_int(record.get(KEY_DRAWN), 0, KEY_DRAWN),
        lost: parse_int(record.get(KEY_LOST), 0, KEY_LOST),
        goals_for: parse_int(record.get(KEY_GOALS_FOR), 0, KEY_GOALS_FOR),
        goals_against: parse_int(record.get(KEY_GOALS_AGAINST), 0, KEY_GOALS_AGAINST),
        club,
        badge_url,
        form,
    }
}

fn parse_form(value: Option<&Value>, club: &str) -> Vec<MatchResult> {
    let Some(raw) = value.and_then(Value::as_str) else {
        warn!(field = KEY_FORM, club, "form missing, using empty sequence");
        return Vec::new();
    };
    let form: Vec<MatchResult> = raw.chars().filter_map(MatchResult::from_char).collect();
    if form.len() != raw.chars().count() {
        warn!(field = KEY_FORM, club, raw, "dropped unrecognised form characters");
    }
    form
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_int_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_int(Some(&json!(38)), 0, "x"), 38);
        assert_eq!(parse_int(Some(&json!("38")), 0, "x"), 38);
        assert_eq!(parse_int(Some(&json!(" -4 ")), 0, "x"), -4);
        assert_eq!(parse_int(Some(&json!(12.9)), 0, "x"), 12);
        assert_eq!(parse_int(Some(&json!(-12.9)), 0, "x"), -12);
    }

    #[test]
    fn parse_int_defaults_on_bad_input() {
        assert_eq!(parse_int(None, 0, "x"), 0);
        assert_eq!(parse_int(Some(&Value::Null), 7, "x"), 7);
        assert_eq!(parse_int(Some(&json!("abc")), 0, "x"), 0);
        assert_eq!(parse_int(Some(&json!("12.5")), 0, "x"), 0);
        assert_eq!(parse_int(Some(&json!(true)), 0, "x"), 0);
        assert_eq!(parse_int(Some(&json!([1])), 0, "x"), 0);
    }

    #[test]
    fn form_keeps_order_and_drops_unknown() {
        let form = parse_form(Some(&json!("WL?D")), "A");
        assert_eq!(form, vec![MatchResult::Win, MatchResult::Loss, MatchResult::Draw]);
        assert!(parse_form(Some(&Value::Null), "A").is_empty());
    }

    #[test]
    fn badge_passes_through_without_default() {
        let s = normalize_record(&json!({"strTeam": "A", "strForm": ""}));
        assert_eq!(s.badge_url, None);
        let s = normalize_record(&json!({"strTeam": "A", "strBadge": "https://x/a.png"}));
        assert_eq!(s.badge_url.as_deref(), Some("https://x/a.png"));
    }
}
