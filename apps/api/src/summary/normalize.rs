//! Response normalizer — coerces whatever the model returned into a complete `Summary`.
//!
//! Total by construction: every field has a documented default and no input shape
//! (null, arrays of objects, numbers where strings belong) can make it fail.
//! Normalizing the serialized form of a normalized summary returns the same summary.

use serde_json::Value;

use crate::summary::models::{MoneyAndDates, Obligations, Summary};

/// Used when the model omits confidence or sends something non-numeric.
pub const DEFAULT_CONFIDENCE: f64 = 70.0;

pub fn normalize_summary(raw: &Value) -> Summary {
    let obligations = raw.get("obligations");
    let money_and_dates = raw.get("moneyAndDates");

    Summary {
        tldr: text_of(raw.get("tldr")),
        parties_purpose: text_of(raw.get("partiesPurpose")),
        obligations: Obligations {
            you: list_of(group_field(obligations, "you")),
            them: list_of(group_field(obligations, "them")),
        },
        money_and_dates: MoneyAndDates {
            payments: list_of(group_field(money_and_dates, "payments")),
            dates: list_of(group_field(money_and_dates, "dates")),
        },
        risk_flags: list_of(raw.get("riskFlags")),
        actions: list_of(raw.get("actions")),
        unknowns: list_of(raw.get("unknowns")),
        excerpt: text_of(raw.get("excerpt")),
        confidence: confidence_of(raw.get("confidence")),
    }
}

/// Nested lists only count when their parent is an object.
fn group_field<'a>(group: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    group.and_then(Value::as_object).and_then(|g| g.get(key))
}

/// Strings are trimmed, numbers and booleans are printed, everything else is "".
fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn list_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| text_of(Some(item)))
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Accepts 0–100 percentages and 0–1 fractions.
///
/// Only a value written in fractional form (`0.42`, `1.0`, `"0.9"`) is scaled; an integer
/// `1` stays 1%. This keeps normalization idempotent, since the output is always an integer.
fn confidence_of(value: Option<&Value>) -> u8 {
    let (number, fractional) = match value {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => (f, n.is_f64()),
            None => (DEFAULT_CONFIDENCE, false),
        },
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(f) => (f, s.contains('.')),
            Err(_) => (DEFAULT_CONFIDENCE, false),
        },
        _ => (DEFAULT_CONFIDENCE, false),
    };

    let number = if number.is_finite() {
        number
    } else {
        DEFAULT_CONFIDENCE
    };
    let percent = if fractional && (0.0..=1.0).contains(&number) {
        number * 100.0
    } else {
        number
    };

    percent.clamp(0.0, 100.0).round() as u8
}
