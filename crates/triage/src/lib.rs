//! Thought triage and reframing pipelines.
//!
//! Two boundary operations, both taking the generation client as an
//! explicit dependency:
//! - [`sort_thoughts`] splits a free-text dump into categorized thought
//!   records in one model call;
//! - [`reframe_thought`] produces a compassionate reframing of a single
//!   thought, with a per-field local fallback so the caller always gets a
//!   fully populated record.

pub mod extract;
pub mod fallback;
pub mod prompts;
pub mod reframe;
pub mod sort;

pub use reframe::reframe_thought;
pub use sort::sort_thoughts;
