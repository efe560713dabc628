use serde::Serialize;
use serde_json::Value;

/// Top-level field names of a `Summary` on the wire.
/// An extracted object containing none of these is treated as a failed extraction.
pub const SUMMARY_FIELDS: &[&str] = &[
    "tldr",
    "partiesPurpose",
    "obligations",
    "moneyAndDates",
    "riskFlags",
    "actions",
    "unknowns",
    "excerpt",
    "confidence",
];

/// What each side of the agreement has to do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Obligations {
    pub you: Vec<String>,
    pub them: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoneyAndDates {
    pub payments: Vec<String>,
    pub dates: Vec<String>,
}

/// The structured, plain-English brief returned to the caller.
///
/// Only ever built through `normalize_summary`, which guarantees every list holds
/// non-empty strings and `confidence` is within 0–100.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub tldr: String,
    pub parties_purpose: String,
    pub obligations: Obligations,
    pub money_and_dates: MoneyAndDates,
    pub risk_flags: Vec<String>,
    pub actions: Vec<String>,
    pub unknowns: Vec<String>,
    pub excerpt: String,
    pub confidence: u8,
}

#[cfg(test)]
impl Summary {
    /// True when no list field carries anything.
    pub fn lists_empty(&self) -> bool {
        self.obligations.you.is_empty()
            && self.obligations.them.is_empty()
            && self.money_and_dates.payments.is_empty()
            && self.money_and_dates.dates.is_empty()
            && self.risk_flags.is_empty()
            && self.actions.is_empty()
            && self.unknowns.is_empty()
    }
}

/// Writing style of the generated prose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    /// Explains terms for a non-lawyer. Longer sentences, defines jargon.
    #[default]
    Educational,
    /// Executive brief. Short fragments, no definitions.
    Compact,
}

impl Tone {
    /// Maps the request's optional tone label. Only "compact" is recognised;
    /// anything else falls back to the educational default.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(l) if l.eq_ignore_ascii_case("compact") => Tone::Compact,
            _ => Tone::Educational,
        }
    }
}

/// Request body for `POST /api/simplify`, read leniently from any JSON value:
/// a `text` or `tone` that is not a string counts as absent.
#[derive(Debug, Clone, Default)]
pub struct SummarizeRequest {
    pub text: Option<String>,
    pub tone: Option<String>,
}

impl SummarizeRequest {
    pub fn from_json(body: &Value) -> Self {
        let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        SummarizeRequest {
            text: field("text"),
            tone: field("tone"),
        }
    }
}
