//! Batch sort pipeline: one free-text dump in, N categorized thoughts out.

use crate::extract::{as_trimmed_string, extract_json};
use crate::prompts;
use chrono::Utc;
use providers::Generator;
use serde_json::Value;
use shared::api::{SortRequest, SortResponse};
use shared::{Category, Error, Thought};

/// Split the request text into categorized thought records in one model
/// call.
///
/// Empty input is rejected before any generation is attempted. A failed
/// generation call surfaces as a retryable pipeline error; a response
/// that yields no JSON array degrades to an empty batch - fabricating
/// thoughts the user never had is worse than sorting nothing.
pub async fn sort_thoughts(
    generator: &dyn Generator,
    request: &SortRequest,
) -> Result<SortResponse, Error> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(Error::Validation("No text provided".to_string()));
    }

    let prompt = prompts::sort_prompt(text);
    let raw = generator.generate(&prompt).await.map_err(|e| {
        tracing::warn!("sort generation failed: {e:#}");
        Error::Generation("Failed to sort thoughts. Please try again.".to_string())
    })?;

    let items = match extract_json(&raw) {
        Some(Value::Array(items)) => items,
        _ => {
            tracing::debug!("sort response yielded no JSON array; returning empty batch");
            Vec::new()
        }
    };

    let batch_millis = Utc::now().timestamp_millis();
    let now = Utc::now();
    let thoughts = items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_item(item, index, batch_millis, now))
        .collect();

    Ok(SortResponse { thoughts })
}

/// Coerce one raw array element into a well-formed thought, defaulting
/// every missing or malformed field.
fn validate_item(
    item: &Value,
    index: usize,
    batch_millis: i64,
    now: chrono::DateTime<Utc>,
) -> Thought {
    let derived_quote = as_trimmed_string(item.get("derivedQuote")).unwrap_or_default();
    let text = if derived_quote.is_empty() {
        "Untitled thought".to_string()
    } else {
        derived_quote.clone()
    };
    let raw_category = as_trimmed_string(item.get("category"));

    Thought {
        // Batch timestamp plus position keeps ids unique within a batch.
        id: format!("ai-{}-{}", batch_millis, index),
        text,
        title: as_trimmed_string(item.get("title")).unwrap_or_else(|| "Untitled".to_string()),
        derived_quote,
        ai_summary: as_trimmed_string(item.get("aiSummary"))
            .unwrap_or_else(|| "Take a moment to reflect on this thought.".to_string()),
        category: Category::normalize(raw_category.as_deref(), Category::MentalLoad),
        created_at: now,
        time_ago: "just now".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
            Err(anyhow!("quota exceeded"))
        }
    }

    fn request(text: &str) -> SortRequest {
        SortRequest {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_generation() {
        let err = sort_thoughts(&Failing, &request("   \n"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.status(), 400);
    }

    #[tokio::test]
    async fn generation_failure_is_a_retryable_pipeline_error() {
        let err = sort_thoughts(&Failing, &request("some worries"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
        assert_eq!(err.status(), 500);
        assert!(err.to_string().contains("try again"));
    }

    #[tokio::test]
    async fn valid_two_element_array_yields_two_thoughts() {
        let body = r#"[
          {"title":"Reply to Jamie","derivedQuote":"I need to reply to Jamie before they think I'm ignoring them","category":"urgent","aiSummary":"You care about this relationship."},
          {"title":"Finals prep","derivedQuote":"I should really start studying for finals","category":"mental-load","aiSummary":"This task keeps circling."}
        ]"#;
        let generator = Canned(body.to_string());
        let response = sort_thoughts(
            &generator,
            &request(
                "I need to reply to Jamie before they think I'm ignoring them. Also I should really start studying for finals.",
            ),
        )
        .await
        .unwrap();

        assert_eq!(response.thoughts.len(), 2);
        assert_ne!(response.thoughts[0].id, response.thoughts[1].id);
        assert_eq!(response.thoughts[0].category, Category::Urgent);
        assert_eq!(response.thoughts[1].category, Category::MentalLoad);
        for thought in &response.thoughts {
            assert_eq!(thought.time_ago, "just now");
            assert!(Category::all().contains(&thought.category));
        }
    }

    #[tokio::test]
    async fn fenced_output_parses_like_plain_output() {
        let body = "```json\n[{\"title\":\"Rest\",\"derivedQuote\":\"so tired\",\"category\":\"emotional-weight\",\"aiSummary\":\"Rest matters.\"}]\n```";
        let response = sort_thoughts(&Canned(body.to_string()), &request("so tired"))
            .await
            .unwrap();
        assert_eq!(response.thoughts.len(), 1);
        assert_eq!(response.thoughts[0].category, Category::EmotionalWeight);
    }

    #[tokio::test]
    async fn unparseable_output_degrades_to_empty_batch() {
        let response = sort_thoughts(
            &Canned("I couldn't structure that, sorry!".to_string()),
            &request("thoughts"),
        )
        .await
        .unwrap();
        assert!(response.thoughts.is_empty());

        // An object instead of an array also sorts nothing.
        let response = sort_thoughts(&Canned("{\"title\":\"x\"}".to_string()), &request("t"))
            .await
            .unwrap();
        assert!(response.thoughts.is_empty());
    }

    #[tokio::test]
    async fn missing_fields_default_and_categories_coerce() {
        let body = r#"[{"category":"anxiety-spiral"},{"derivedQuote":"walk the dog"}]"#;
        let response = sort_thoughts(&Canned(body.to_string()), &request("stuff"))
            .await
            .unwrap();

        let first = &response.thoughts[0];
        assert_eq!(first.text, "Untitled thought");
        assert_eq!(first.title, "Untitled");
        assert_eq!(first.ai_summary, "Take a moment to reflect on this thought.");
        assert_eq!(first.category, Category::MentalLoad);

        let second = &response.thoughts[1];
        assert_eq!(second.text, "walk the dog");
        assert_eq!(second.derived_quote, "walk the dog");
        assert_eq!(second.category, Category::MentalLoad);
    }
}
