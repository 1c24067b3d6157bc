//! Rendering module for change reports.

mod json;
mod result;
mod text;

pub use json::{to_json, JsonFormat};
pub use result::{ComparisonMetadata, ComparisonResult};
pub use text::{describe, to_text};
