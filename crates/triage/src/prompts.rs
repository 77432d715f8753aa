//! Prompt builders for the two generation tasks.
//!
//! Both prompts embed the current date so "urgent" framing has temporal
//! grounding, and spell out the exact output schema because the response
//! extractor still has to defend against whatever comes back.

use chrono::Local;

fn today() -> String {
    Local::now().format("%d/%m/%Y").to_string()
}

/// Prompt for splitting a brain dump into categorized thoughts.
pub fn sort_prompt(text: &str) -> String {
    format!(
        r#"You are a compassionate mental health assistant that helps users organize their thoughts. The user has written the following text as a brain dump:

"""
{text}
"""

Today's date is {today}.

Your job is to identify each distinct thought from the text and categorize each one into EXACTLY one of these categories:
- "urgent": Time-sensitive or action-triggering thoughts
- "mental-load": Cognitive tasks and recurring mental loops
- "emotional-weight": Emotionally charged or unresolved experiences
- "growth": Reflective or future-oriented thinking
- "let-go": Low-value or repetitive cognitive noise

For each thought, provide:
1. "title": A short 2-4 word title summarizing the thought
2. "derivedQuote": The exact quote or close paraphrase from the user's text that this thought is derived from
3. "category": One of the five categories above
4. "aiSummary": A warm, empathetic 1-2 sentence explanation of why the user might be having this thought and what it reveals about their inner state. Be compassionate, non-judgmental, and insightful.

Respond ONLY with a valid JSON array. No markdown, no code fences, no explanation. Just the raw JSON array.

Example format:
[
  {{
    "title": "Response pressure",
    "derivedQuote": "I need to respond before they think I'm ignoring them",
    "category": "urgent",
    "aiSummary": "This thought is driven by concern about how you're being perceived. When something feels important, it can create pressure to respond quickly."
  }}
]"#,
        text = text,
        today = today(),
    )
}

/// Prompt for compassionately reframing a single thought.
pub fn reframe_prompt(thought: &str) -> String {
    format!(
        r#"You are a compassionate mental health assistant. Today's date is {today}.
User thought:
"""
{thought}
"""
Return a JSON object only, with these exact fields:
- originalThought: the original thought text
- compassionateReframe: a warm 1-2 sentence reframe that validates feelings and offers a kinder alternative perspective
- evidenceFor: one short sentence listing realistic evidence that might support the original thought
- evidenceAgainst: one short sentence listing realistic evidence that weakens or contradicts the original thought
- smallActionStep: one small, concrete action the user can take in the next 24 hours to test or soothe the thought
- shortAffirmation: a short positive affirmation, 6 words or fewer
- title: a short title for the thought, 6 words or fewer
- derivedQuote: a short quoted phrase the user might pull out, max 40 characters
- aiSummary: one-sentence summary of the thought
- category: exactly one of these strings: "urgent", "mental-load", "emotional-weight", "growth", "let-go"

Be empathetic, non-judgmental, and avoid diagnoses, medical instructions, or promises. Output only valid JSON with these fields."#,
        today = today(),
        thought = thought,
    )
}
