//! Frequency and dispense-quantity derivation.
//!
//! Turns a total dose into a single administration and a total supply for
//! the course, given doses per day and days of supply.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DoseError;
use crate::models::FrequencyMode;

/// One administration.
///
/// `PerDay`: `total` is the daily amount and is split across `doses_per_day`.
/// `PerDose`: `total` already is one administration.
pub fn single_dose(total: f64, doses_per_day: f64, mode: FrequencyMode) -> Result<f64, DoseError> {
    match mode {
        FrequencyMode::PerDose => Ok(total),
        FrequencyMode::PerDay => {
            if doses_per_day == 0.0 {
                return Err(DoseError::DivisionByZero {
                    divisor: "doses per day".into(),
                });
            }
            Ok(total / doses_per_day)
        }
    }
}

/// Full course supply: `single × days_supply × doses_per_day`.
pub fn total_quantity(single: f64, days_supply: f64, doses_per_day: f64) -> f64 {
    single * days_supply * doses_per_day
}

// ═══════════════════════════════════════════════════════════
// Frequency phrases
// ═══════════════════════════════════════════════════════════

static RE_EVERY_HOURS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:q|every)\s*(\d+(?:\.\d+)?)\s*(?:h|hrs?|hours?)$").unwrap()
});
static RE_TIMES_DAILY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(?:x|times)\s*(?:a|per|/)?\s*(?:day|daily)$").unwrap()
});

/// Doses per day for a prescription frequency phrase.
///
/// Handles Latin abbreviations (QD, BID, TID, QID), "twice daily" style
/// phrases, "3x/day", and interval forms ("q6h", "every 8 hours").
/// Returns `None` for as-needed or unrecognized frequencies.
pub fn doses_per_day_from_phrase(phrase: &str) -> Option<f64> {
    let lower = phrase.trim().to_lowercase();
    let lower = lower.trim_end_matches('.');
    let abbreviated = lower.replace('.', "");

    let fixed = match abbreviated.as_str() {
        "qd" | "od" | "daily" | "once daily" | "once a day" | "every day" => Some(1.0),
        "bid" | "twice daily" | "twice a day" | "two times a day" => Some(2.0),
        "tid" | "three times daily" | "three times a day" => Some(3.0),
        "qid" | "four times daily" | "four times a day" => Some(4.0),
        "prn" | "as needed" | "when required" => return None,
        _ => None,
    };
    if fixed.is_some() {
        return fixed;
    }

    if let Some(caps) = RE_EVERY_HOURS.captures(lower) {
        let hours = caps.get(1)?.as_str().parse::<f64>().ok()?;
        if hours <= 0.0 {
            return None;
        }
        return Some(24.0 / hours);
    }
    if let Some(caps) = RE_TIMES_DAILY.captures(lower) {
        let count = caps.get(1)?.as_str().parse::<f64>().ok()?;
        if count <= 0.0 {
            return None;
        }
        return Some(count);
    }

    None
}
