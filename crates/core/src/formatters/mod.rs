pub mod json;
pub mod markdown;

pub use json::{JsonConfig, JsonFormatter, SerializedNode, ThreadHierarchy, convert_to_json, serialize_node};
pub use markdown::{MarkdownConfig, MarkdownFormatter, render_forest};
