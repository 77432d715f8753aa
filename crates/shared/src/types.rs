//! Core schema: the category taxonomy and the Thought, Task, and Reframe
//! records shared by the pipelines, the store, and the boundary types.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed taxonomy of emotional/cognitive categories.
///
/// Every thought and task carries exactly one. Values observed from an
/// external source (model output, persisted files) go through
/// [`Category::normalize`] so nothing outside this set is ever stored or
/// displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Urgent,
    MentalLoad,
    EmotionalWeight,
    Growth,
    LetGo,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Urgent,
            Category::MentalLoad,
            Category::EmotionalWeight,
            Category::Growth,
            Category::LetGo,
        ]
    }

    /// Wire name, as emitted to and expected from the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Urgent => "urgent",
            Category::MentalLoad => "mental-load",
            Category::EmotionalWeight => "emotional-weight",
            Category::Growth => "growth",
            Category::LetGo => "let-go",
        }
    }

    /// Strict lookup of a wire name.
    pub fn from_raw(raw: &str) -> Option<Category> {
        match raw {
            "urgent" => Some(Category::Urgent),
            "mental-load" => Some(Category::MentalLoad),
            "emotional-weight" => Some(Category::EmotionalWeight),
            "growth" => Some(Category::Growth),
            "let-go" => Some(Category::LetGo),
            _ => None,
        }
    }

    /// Coerce an untrusted value into the closed set.
    ///
    /// Both pipelines route every external category through here: the sort
    /// pipeline falls back to `mental-load`, the reframe pipeline to
    /// `growth`.
    pub fn normalize(raw: Option<&str>, fallback: Category) -> Category {
        raw.map(str::trim)
            .and_then(Category::from_raw)
            .unwrap_or(fallback)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Urgent => "Urgent",
            Category::MentalLoad => "Mental Load",
            Category::EmotionalWeight => "Emotional Weight",
            Category::Growth => "Growth",
            Category::LetGo => "Let Go",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Urgent => "Time-sensitive or action-triggering thoughts",
            Category::MentalLoad => "Cognitive tasks and recurring mental loops",
            Category::EmotionalWeight => "Emotionally charged or unresolved experiences",
            Category::Growth => "Reflective or future-oriented thinking",
            Category::LetGo => "Low-value or repetitive cognitive noise",
        }
    }

    /// Pastel accent color used by presentation, never mutated.
    pub fn color_hex(&self) -> &'static str {
        match self {
            Category::Urgent => "#F6B6C1",
            Category::MentalLoad => "#F7D27C",
            Category::EmotionalWeight => "#A7C7E7",
            Category::Growth => "#B7E4C7",
            Category::LetGo => "#D8D4F2",
        }
    }

    /// Fixed reflective insight shown alongside thoughts of this category.
    pub fn insight(&self) -> &'static str {
        match self {
            Category::Urgent => {
                "This thought feels time-sensitive and is creating pressure. It might help to \
                 identify the actual deadline and separate urgency from anxiety."
            }
            Category::MentalLoad => {
                "This is a task that keeps circling in your mind. Writing it down and creating \
                 a concrete action can help release the mental loop."
            }
            Category::EmotionalWeight => {
                "This feeling is valid and significant. Acknowledging it is the first step - \
                 you don't have to resolve it right now."
            }
            Category::Growth => {
                "This is a forward-looking thought. Consider what small first step could move \
                 you toward this aspiration."
            }
            Category::LetGo => {
                "This thought may not serve you anymore. Recognizing it as repetitive cognitive \
                 noise can help you gently release it."
            }
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::MentalLoad
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Unknown wire values coerce to the default rather than failing the whole
// record, so persisted data survives taxonomy drift.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::normalize(Some(&raw), Category::default()))
    }
}

/// One triaged unit of the user's input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thought {
    pub id: String,
    /// The fragment of the user's original input this thought derives from.
    pub text: String,
    /// Short label, roughly six words or fewer.
    pub title: String,
    /// Short excerpt or paraphrase used as display evidence.
    #[serde(default)]
    pub derived_quote: String,
    /// 1-2 sentence empathetic explanation.
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default)]
    pub category: Category,
    pub created_at: DateTime<Utc>,
    /// Display-only relative label; `created_at` is authoritative.
    #[serde(default)]
    pub time_ago: String,
}

/// An actionable commitment derived from a thought.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: Category,
    /// The originating thought's derived quote, kept for provenance.
    /// No live reference back: the thought may be deleted later.
    #[serde(default)]
    pub derived_from: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    /// Display-formatted creation date.
    #[serde(default)]
    pub created_at: String,
    /// True iff `due_date` falls on the current calendar day. Recomputed
    /// whenever `due_date` changes.
    #[serde(default)]
    pub is_today: bool,
}

impl Task {
    /// Calendar-day comparison in the user's local time zone.
    pub fn compute_is_today(due_date: DateTime<Utc>) -> bool {
        due_date.with_timezone(&Local).date_naive() == Local::now().date_naive()
    }
}

/// A compassionate restructuring of a single distressing thought.
///
/// After the pipeline's per-field fallback merge every field is populated,
/// even when the model returned nothing usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reframe {
    pub original_thought: String,
    pub compassionate_reframe: String,
    pub evidence_for: String,
    pub evidence_against: String,
    pub small_action_step: String,
    pub short_affirmation: String,
    pub title: String,
    pub derived_quote: String,
    pub ai_summary: String,
    pub category: Category,
}

/// Recompute a display label from a creation timestamp.
pub fn time_ago(created_at: DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(created_at);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 60 * 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}
