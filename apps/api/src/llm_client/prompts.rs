// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to the first, strict attempt.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to the fallback attempt when the strict attempt produced nothing usable.
pub const FENCED_JSON_FALLBACK_INSTRUCTION: &str = "\
    Respond with the JSON object described above. \
    If you cannot produce raw JSON, wrap the JSON object in a fenced block that starts \
    with ```json and ends with ```. \
    Never answer in prose only.";

/// Joins prompt sections with a blank line between them, skipping empty ones.
pub fn join_sections(sections: &[&str]) -> String {
    sections
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_sections_skips_blank() {
        let joined = join_sections(&["  first ", "", "second"]);
        assert_eq!(joined, "first\n\nsecond");
    }
}
