//! Single-thought reframe pipeline with per-field local fallback.

use crate::extract::{as_trimmed_string, extract_json};
use crate::fallback::local_fallback_reframe;
use crate::prompts;
use chrono::Utc;
use providers::Generator;
use serde_json::Value;
use shared::api::{ReframeRequest, ReframeResponse};
use shared::{Category, Error, Reframe, Thought};

/// Produce a compassionate reframing of one thought.
///
/// The central resilience property: the merge in [`merge_reframe`] is
/// per-field, not per-record. A response supplying four of six required
/// fields still yields a fully populated record with exactly two fallback
/// fields; a failed call or unparseable response yields the full local
/// fallback. Only validation failures surface as errors.
pub async fn reframe_thought(
    generator: &dyn Generator,
    request: &ReframeRequest,
) -> Result<ReframeResponse, Error> {
    let thought_text = request.thought.trim();
    if thought_text.is_empty() {
        return Err(Error::Validation("No thought provided".to_string()));
    }

    let prompt = prompts::reframe_prompt(thought_text);
    let parsed = match generator.generate(&prompt).await {
        Ok(raw) => extract_json(&raw).unwrap_or(Value::Null),
        Err(e) => {
            // Invisible to the caller: the local fallback covers it.
            tracing::debug!("reframe generation failed, using local fallback: {e:#}");
            Value::Null
        }
    };

    let reframe = merge_reframe(&parsed, thought_text);
    let thought = project_thought(&reframe, request.id.as_deref());

    Ok(ReframeResponse { reframe, thought })
}

/// Field-by-field fallback merge over the local fallback record.
fn merge_reframe(parsed: &Value, thought_text: &str) -> Reframe {
    let fallback = local_fallback_reframe(thought_text);
    let field = |key: &str, fallback_value: String| -> String {
        as_trimmed_string(parsed.get(key)).unwrap_or(fallback_value)
    };

    let raw_category = as_trimmed_string(parsed.get("category"));

    Reframe {
        original_thought: field("originalThought", fallback.original_thought),
        compassionate_reframe: field("compassionateReframe", fallback.compassionate_reframe),
        evidence_for: field("evidenceFor", fallback.evidence_for),
        evidence_against: field("evidenceAgainst", fallback.evidence_against),
        small_action_step: field("smallActionStep", fallback.small_action_step),
        short_affirmation: field("shortAffirmation", fallback.short_affirmation),
        title: field("title", fallback.title),
        derived_quote: field("derivedQuote", fallback.derived_quote),
        ai_summary: field("aiSummary", fallback.ai_summary),
        category: Category::normalize(raw_category.as_deref(), Category::Growth),
    }
}

/// Display-ready thought projection the caller can store directly.
fn project_thought(reframe: &Reframe, existing_id: Option<&str>) -> Thought {
    let id = existing_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("thought-{}", Utc::now().timestamp_millis()));

    let title = if reframe.title.is_empty() {
        reframe
            .original_thought
            .split_whitespace()
            .take(6)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        reframe.title.clone()
    };
    let derived_quote = if reframe.derived_quote.is_empty() {
        reframe.compassionate_reframe.chars().take(60).collect()
    } else {
        reframe.derived_quote.clone()
    };
    let ai_summary = if reframe.ai_summary.is_empty() {
        reframe.compassionate_reframe.clone()
    } else {
        reframe.ai_summary.clone()
    };

    Thought {
        id,
        text: reframe.original_thought.clone(),
        title,
        derived_quote,
        ai_summary,
        category: reframe.category,
        created_at: Utc::now(),
        time_ago: "just now".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FALLBACK_AFFIRMATION;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    struct Canned(String);

    #[async_trait]
    impl Generator for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl Generator for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("transport failure"))
        }
    }

    fn request(thought: &str) -> ReframeRequest {
        ReframeRequest {
            thought: thought.to_string(),
            id: None,
        }
    }

    fn assert_fully_populated(reframe: &Reframe) {
        assert!(!reframe.original_thought.is_empty());
        assert!(!reframe.compassionate_reframe.is_empty());
        assert!(!reframe.evidence_for.is_empty());
        assert!(!reframe.evidence_against.is_empty());
        assert!(!reframe.small_action_step.is_empty());
        assert!(!reframe.short_affirmation.is_empty());
    }

    #[tokio::test]
    async fn empty_thought_is_rejected() {
        let err = reframe_thought(&Failing, &request("  ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.status(), 400);
    }

    #[tokio::test]
    async fn total_generation_failure_still_succeeds_with_local_fallback() {
        let response = reframe_thought(&Failing, &request("I'm such a failure"))
            .await
            .unwrap();
        let expected = local_fallback_reframe("I'm such a failure");

        assert_fully_populated(&response.reframe);
        assert_eq!(response.reframe.short_affirmation, FALLBACK_AFFIRMATION);
        assert!(response
            .reframe
            .compassionate_reframe
            .contains("I'm such a failure"));
        assert_eq!(response.reframe.evidence_for, expected.evidence_for);
        assert_eq!(response.reframe.category, Category::Growth);
        assert_eq!(response.thought.time_ago, "just now");
    }

    #[tokio::test]
    async fn partial_response_merges_per_field() {
        let generator = Canned(r#"{"compassionateReframe":"You are doing your best."}"#.into());
        let response = reframe_thought(&generator, &request("I'm such a failure"))
            .await
            .unwrap();
        let expected = local_fallback_reframe("I'm such a failure");

        assert_eq!(
            response.reframe.compassionate_reframe,
            "You are doing your best."
        );
        // The other five required fields equal the local fallback's output.
        assert_eq!(response.reframe.original_thought, expected.original_thought);
        assert_eq!(response.reframe.evidence_for, expected.evidence_for);
        assert_eq!(response.reframe.evidence_against, expected.evidence_against);
        assert_eq!(response.reframe.small_action_step, expected.small_action_step);
        assert_eq!(response.reframe.short_affirmation, expected.short_affirmation);
    }

    #[tokio::test]
    async fn full_response_passes_through() {
        let body = r#"{
          "originalThought": "I'm such a failure",
          "compassionateReframe": "One setback does not define you.",
          "evidenceFor": "A project slipped this week.",
          "evidenceAgainst": "You have delivered many times before.",
          "smallActionStep": "List one thing that went well today.",
          "shortAffirmation": "Setbacks are not verdicts",
          "title": "Feeling like a failure",
          "derivedQuote": "such a failure",
          "aiSummary": "A harsh global judgment from one event.",
          "category": "emotional-weight"
        }"#;
        let response = reframe_thought(&Canned(body.into()), &request("I'm such a failure"))
            .await
            .unwrap();

        assert_eq!(
            response.reframe.compassionate_reframe,
            "One setback does not define you."
        );
        assert_eq!(response.reframe.category, Category::EmotionalWeight);
        assert_eq!(response.thought.category, Category::EmotionalWeight);
        assert_eq!(response.thought.title, "Feeling like a failure");
        assert_eq!(response.thought.text, "I'm such a failure");
    }

    #[tokio::test]
    async fn invalid_category_coerces_to_growth() {
        let generator = Canned(r#"{"category":"doom-spiral"}"#.into());
        let response = reframe_thought(&generator, &request("everything is ruined"))
            .await
            .unwrap();
        assert_eq!(response.reframe.category, Category::Growth);
    }

    #[tokio::test]
    async fn supplied_id_is_preserved_in_the_projection() {
        let req = ReframeRequest {
            thought: "I never finish anything".to_string(),
            id: Some("ai-1700000000-3".to_string()),
        };
        let response = reframe_thought(&Failing, &req).await.unwrap();
        assert_eq!(response.thought.id, "ai-1700000000-3");

        let response = reframe_thought(&Failing, &request("I never finish anything"))
            .await
            .unwrap();
        assert!(response.thought.id.starts_with("thought-"));
    }

    #[tokio::test]
    async fn long_input_is_quoted_back_truncated() {
        let long = "a".repeat(400);
        let response = reframe_thought(&Failing, &request(&long)).await.unwrap();
        assert_eq!(response.reframe.original_thought.chars().count(), 180);
        assert!(response.reframe.original_thought.ends_with("..."));
    }
}
