// All LLM prompt constants for the summary module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{
    join_sections, FENCED_JSON_FALLBACK_INSTRUCTION, JSON_ONLY_INSTRUCTION,
};
use crate::summary::models::Tone;

const ROLE_INSTRUCTION: &str = "\
You are a contract and policy simplifier. \
You write plain-English briefs of legal documents for people who are not lawyers. \
Identify the parties and purpose, what each side must do, money and dates, \
risk flags (penalties, auto-renewal, indemnity, termination, IP, jurisdiction), \
concrete next steps, and anything the document leaves unclear. \
Never invent terms that are not in the document; list missing information under \"unknowns\".";

/// Exact output schema. Field names here must match `SUMMARY_FIELDS`.
const SCHEMA_INSTRUCTION: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "tldr": "string — 1-3 sentence synopsis",
  "partiesPurpose": "string — who is involved and what the agreement is for",
  "obligations": {
    "you": ["string — what the reader must do"],
    "them": ["string — what the other party must do"]
  },
  "moneyAndDates": {
    "payments": ["string — amounts, fees, penalties"],
    "dates": ["string — deadlines, terms, renewal and notice dates"]
  },
  "riskFlags": ["string"],
  "actions": ["string — recommended next step"],
  "unknowns": ["string — information the document does not provide"],
  "excerpt": "string — short verbatim quote of the most important clause, or empty",
  "confidence": 0
}
"confidence" is an integer from 0 to 100 describing how sure you are the brief is accurate.
Use empty lists rather than omitting a field."#;

const EDUCATIONAL_STYLE: &str = "\
STYLE: educational. Write full sentences a first-time reader can follow. \
Briefly explain legal terms the first time they appear (e.g. what indemnity means in practice). \
Keep the whole brief around 250 words.";

const COMPACT_STYLE: &str = "\
STYLE: compact executive brief. Use terse fragments, no definitions, no filler. \
At most 5 items per list and at most 12 words per item. \
Keep the whole brief under 150 words.";

fn style_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Educational => EDUCATIONAL_STYLE,
        Tone::Compact => COMPACT_STYLE,
    }
}

/// System prompt for the first, strict-JSON attempt.
pub fn build_system_prompt(tone: Tone) -> String {
    join_sections(&[
        ROLE_INSTRUCTION,
        SCHEMA_INSTRUCTION,
        style_instruction(tone),
        JSON_ONLY_INSTRUCTION,
    ])
}

/// System prompt for the fallback attempt: same schema and style, relaxed formatting.
pub fn build_fallback_system_prompt(tone: Tone) -> String {
    join_sections(&[
        ROLE_INSTRUCTION,
        SCHEMA_INSTRUCTION,
        style_instruction(tone),
        FENCED_JSON_FALLBACK_INSTRUCTION,
    ])
}

/// Wraps the (already clipped) document text as the user message.
pub fn build_user_prompt(text: &str) -> String {
    format!("--- CONTRACT / POLICY TEXT ---\n{text}\n--- END ---")
}
