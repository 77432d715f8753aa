pub mod api;
pub mod error;
pub mod settings;
pub mod types;

pub use error::Error;
pub use types::{Category, Reframe, Task, Thought};
