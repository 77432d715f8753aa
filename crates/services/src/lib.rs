//! Client-side state: the thought/task store and its storage locations.

pub mod paths;
pub mod store;

pub use store::Store;
