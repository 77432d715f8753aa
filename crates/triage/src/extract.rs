//! Recovery of structured JSON from raw model text.
//!
//! Generation output is not contractually pure JSON: models wrap it in
//! prose preambles, trailing commentary, or markdown fences. Extraction
//! is total - any input yields either a value or `None`, never a panic.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static OPEN_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_-]*\n?").expect("fence regex"));
static CLOSE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n?```$").expect("fence regex"));

/// Two-stage extraction: strict parse of the (unfenced) text, then a
/// strict parse of the first top-level `{...}` or `[...]` span, matched
/// greedily to the last closer.
pub fn extract_json(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    let unfenced = strip_fences(trimmed);

    if let Ok(value) = serde_json::from_str(&unfenced) {
        return Some(value);
    }

    let span = first_span(&unfenced)?;
    serde_json::from_str(span).ok()
}

/// Coerce a JSON value into a trimmed, non-empty string.
///
/// Strings must trim to something non-empty; numbers and booleans coerce
/// to their display form. Everything else (null, arrays, objects,
/// missing) is treated as absent so the caller falls back per field.
pub fn as_trimmed_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn strip_fences(text: &str) -> String {
    if !text.starts_with("```") {
        return text.to_string();
    }
    let opened = OPEN_FENCE.replace(text, "");
    CLOSE_FENCE.replace(&opened, "").trim().to_string()
}

/// First top-level object or array span, whichever opens first.
fn first_span(text: &str) -> Option<&str> {
    let (open, close) = match (text.find('{'), text.find('[')) {
        (Some(obj), Some(arr)) if arr < obj => (arr, ']'),
        (Some(obj), _) => (obj, '}'),
        (None, Some(arr)) => (arr, ']'),
        (None, None) => return None,
    };
    let end = text.rfind(close)?;
    if end <= open {
        return None;
    }
    Some(&text[open..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_plain_json() {
        assert_eq!(extract_json(r#"{"a":1}"#), Some(json!({"a":1})));
        assert_eq!(extract_json("[1,2]"), Some(json!([1, 2])));
    }

    #[test]
    fn fenced_and_plain_parse_identically() {
        let plain = r#"{"title":"Rest","category":"growth"}"#;
        let fenced = format!("```json\n{}\n```", plain);
        let bare_fence = format!("```\n{}\n```", plain);
        assert_eq!(extract_json(plain), extract_json(&fenced));
        assert_eq!(extract_json(plain), extract_json(&bare_fence));
        assert_eq!(
            extract_json(plain),
            Some(json!({"title":"Rest","category":"growth"}))
        );
    }

    #[test]
    fn recovers_json_wrapped_in_prose() {
        let raw = "Sure! Here is the result:\n{\"a\": [1, 2]}\nHope that helps.";
        assert_eq!(extract_json(raw), Some(json!({"a":[1,2]})));

        let raw = "The thoughts are: [{\"title\":\"x\"}] as requested";
        assert_eq!(extract_json(raw), Some(json!([{"title":"x"}])));
    }

    #[test]
    fn picks_the_span_that_opens_first() {
        let raw = "noise [1,2] trailing {\"a\":1}";
        // The array opens first; the greedy close is the last ']', which
        // here is the array's own closer.
        assert_eq!(extract_json(raw), Some(json!([1, 2])));
    }

    #[test]
    fn total_on_garbage() {
        assert_eq!(extract_json(""), None);
        assert_eq!(extract_json("   \n\t "), None);
        assert_eq!(extract_json("no structure here"), None);
        assert_eq!(extract_json("{broken"), None);
        assert_eq!(extract_json("}{"), None);
        assert_eq!(extract_json("```json\nnot json\n```"), None);
    }

    #[test]
    fn coerces_strings_and_numbers() {
        assert_eq!(
            as_trimmed_string(Some(&json!("  hi  "))),
            Some("hi".to_string())
        );
        assert_eq!(as_trimmed_string(Some(&json!(42))), Some("42".to_string()));
        assert_eq!(as_trimmed_string(Some(&json!("   "))), None);
        assert_eq!(as_trimmed_string(Some(&json!(null))), None);
        assert_eq!(as_trimmed_string(Some(&json!(["x"]))), None);
        assert_eq!(as_trimmed_string(None), None);
    }
}
