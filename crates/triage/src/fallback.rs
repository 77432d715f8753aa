//! Deterministic, non-AI reframe synthesis.
//!
//! The reframe pipeline's correctness backstop: a pure function of the
//! input text with no failure mode, so the merge step always has a value
//! for every field.

use shared::{Category, Reframe};

/// Fixed affirmation used whenever the model does not supply one.
pub const FALLBACK_AFFIRMATION: &str = "I am learning and growing";

/// Maximum characters of the source text quoted back to the user.
pub const TRUNCATE_AT: usize = 180;

/// Synthesize all reframe fields from fixed templates quoting the
/// (possibly truncated) thought back to the user.
pub fn local_fallback_reframe(thought: &str) -> Reframe {
    let truncated = truncate_chars(thought, TRUNCATE_AT);
    Reframe {
        original_thought: truncated.clone(),
        compassionate_reframe: format!(
            "I hear how heavy this feels. One kinder way to say it might be: \"{}\" while also asking what else could be true.",
            truncated
        ),
        evidence_for: "This thought is likely based on recent feelings or events that felt significant."
            .to_string(),
        evidence_against: "There are probably moments or facts that do not fully support the absolute version of this thought."
            .to_string(),
        small_action_step: "Spend 5 minutes writing one clear fact that contradicts the thought."
            .to_string(),
        short_affirmation: FALLBACK_AFFIRMATION.to_string(),
        title: truncated
            .split_whitespace()
            .take(6)
            .collect::<Vec<_>>()
            .join(" "),
        derived_quote: truncated.chars().take(60).collect(),
        ai_summary: truncated
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string(),
        category: Category::Growth,
    }
}

/// Char-safe truncation with an ellipsis marker when text was dropped.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_input() {
        let a = local_fallback_reframe("I always mess things up");
        let b = local_fallback_reframe("I always mess things up");
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::to_value(&b).unwrap());
    }

    #[test]
    fn all_required_fields_populated() {
        let reframe = local_fallback_reframe("I'm such a failure");
        assert!(!reframe.original_thought.is_empty());
        assert!(!reframe.compassionate_reframe.is_empty());
        assert!(!reframe.evidence_for.is_empty());
        assert!(!reframe.evidence_against.is_empty());
        assert!(!reframe.small_action_step.is_empty());
        assert_eq!(reframe.short_affirmation, FALLBACK_AFFIRMATION);
        assert_eq!(reframe.category, Category::Growth);
        assert!(reframe.compassionate_reframe.contains("I'm such a failure"));
    }

    #[test]
    fn truncation_boundary() {
        let exactly = "x".repeat(180);
        assert_eq!(local_fallback_reframe(&exactly).original_thought, exactly);

        let long = "y".repeat(181);
        let truncated = local_fallback_reframe(&long).original_thought;
        assert_eq!(truncated.chars().count(), 180);
        assert!(truncated.ends_with("..."));
        assert!(truncated.starts_with(&"y".repeat(177)));
    }

    #[test]
    fn truncation_is_char_safe() {
        let long = "ü".repeat(200);
        let truncated = local_fallback_reframe(&long).original_thought;
        assert_eq!(truncated.chars().count(), 180);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn handles_empty_input() {
        let reframe = local_fallback_reframe("");
        assert_eq!(reframe.original_thought, "");
        assert_eq!(reframe.title, "");
        assert_eq!(reframe.short_affirmation, FALLBACK_AFFIRMATION);
    }

    #[test]
    fn title_takes_first_six_words() {
        let reframe = local_fallback_reframe("one two three four five six seven eight");
        assert_eq!(reframe.title, "one two three four five six");
    }
}
