//! Category entity.

pub mod model;

pub use model::{Category, DEFAULT_CATEGORY_COLOR};
