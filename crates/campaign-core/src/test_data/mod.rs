//! Free-form test-data renderer
//!
//! Pure functions only: classify a JSON value, then display the result.

mod classify;
mod render;

pub use classify::{classify, Field, Link, TestCard, TestDataView};
pub use render::render;
