pub mod clean;
pub mod error;
pub mod extract;
pub mod filter;
pub mod formatters;
pub mod mapping;
pub mod reply;
pub mod thread;
pub mod tree;

#[doc(hidden)]
pub use clean::{CleanConfig, ContentCleaner};
pub use error::{Result, ThreadError};
#[doc(hidden)]
pub use extract::{ExtractConfig, RecordExtractor};
pub use filter::{LOW_VALUE_PATTERNS, LowValueFilter, meets_min_length};
pub use formatters::{JsonConfig, JsonFormatter, MarkdownConfig, MarkdownFormatter, SerializedNode, ThreadHierarchy};
pub use formatters::{convert_to_json, render_forest, serialize_node};
#[doc(hidden)]
pub use mapping::{ParentChildMapping, QuoteMap, Resolution, map_parent_children, resolve_truncated_quotes};
pub use reply::{RawReply, ReplyRecord};
pub use thread::{
    ResolutionStats, Thread, ThreadBuilder, ThreadConfig, ThreadConfigBuilder, build_thread, build_thread_from_values,
};
pub use tree::{AttachError, BuildStats, ReplyForest, ReplyNode, build_forest};
