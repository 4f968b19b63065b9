//! HTTP request handlers.

pub mod convert;
pub mod effects;
pub mod health;
pub mod jobs;

pub use convert::convert;
pub use effects::list_effects;
pub use health::{health, ready};
pub use jobs::{download, get_progress};
