//! Main thread reconstruction API.
//!
//! This module wires the pipeline together: raw replies are normalized into
//! records, quotes are grouped and resolved against reply contents, and the
//! result is assembled into a [`ReplyForest`]. The main entry point is
//! [`ThreadBuilder`], along with the convenience functions [`build_thread`]
//! and [`build_thread_from_values`].
//!
//! # Example
//!
//! ```rust
//! use quotetree_core::{RawReply, build_thread};
//!
//! let replies = vec![
//!     RawReply::new("Original post about interview format"),
//!     RawReply::with_quote(
//!         "A wrote at t1\nOriginal post about interview format\nWas it onsite?",
//!         "A wrote at t1 Original post about interview format",
//!     ),
//!     RawReply::with_quote("B wrote at t2\nWas it onsite?\nYes, onsite.", "B wrote at t2 Was it onsite? ..."),
//! ];
//!
//! let thread = build_thread(&replies)?;
//! let hierarchy = thread.to_hierarchy();
//! assert_eq!(hierarchy.roots.len(), 1);
//! assert_eq!(hierarchy.roots[0].children()[0].content, "Yes, onsite.");
//! # Ok::<(), quotetree_core::ThreadError>(())
//! ```

use crate::clean::CleanConfig;
use crate::extract::{ExtractConfig, RecordExtractor};
use crate::formatters::json::{JsonConfig, ThreadHierarchy, convert_to_json};
use crate::formatters::markdown::{MarkdownConfig, render_forest};
use crate::mapping::{map_parent_children, resolve_truncated_quotes};
use crate::reply::{RawReply, ReplyRecord};
use crate::tree::{ReplyForest, build_forest};
use crate::{Result, ThreadError};
use serde::Serialize;
use serde_json::Value;

/// Configuration for thread reconstruction.
///
/// # Example
///
/// ```rust
/// use quotetree_core::ThreadConfig;
///
/// let config = ThreadConfig::builder()
///     .watermark("example.com")
///     .partial_match_floor(8)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ThreadConfig {
    /// Site watermark stripped from the front of replies (default: `1point3acres`).
    pub watermark: String,

    /// Maximum boilerplate strip passes per reply (default: 32).
    pub max_clean_passes: usize,

    /// Truncated quote echoes must agree on more than this many characters (default: 10).
    pub partial_match_floor: usize,
}

impl Default for ThreadConfig {
    fn default() -> Self {
        let clean = CleanConfig::default();
        Self {
            watermark: clean.watermark,
            max_clean_passes: clean.max_passes,
            partial_match_floor: ExtractConfig::default().partial_match_floor,
        }
    }
}

impl ThreadConfig {
    /// Creates a new builder for ThreadConfig.
    pub fn builder() -> ThreadConfigBuilder {
        ThreadConfigBuilder::new()
    }

    fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            clean: CleanConfig { watermark: self.watermark.clone(), max_passes: self.max_clean_passes },
            partial_match_floor: self.partial_match_floor,
        }
    }
}

/// Builder for ThreadConfig.
pub struct ThreadConfigBuilder {
    config: ThreadConfig,
}

impl ThreadConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ThreadConfig::default() }
    }

    /// Sets the site watermark token.
    pub fn watermark(mut self, value: impl Into<String>) -> Self {
        self.config.watermark = value.into();
        self
    }

    /// Sets the maximum number of boilerplate strip passes.
    pub fn max_clean_passes(mut self, value: usize) -> Self {
        self.config.max_clean_passes = value;
        self
    }

    /// Sets the partial quote match floor.
    pub fn partial_match_floor(mut self, value: usize) -> Self {
        self.config.partial_match_floor = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ThreadConfig {
        self.config
    }
}

impl Default for ThreadConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// How well the quotes in a thread could be matched.
///
/// Purely informational: a high `unresolved_quotes` count means a flatter
/// tree than the conversation really had, not a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionStats {
    /// Well-formed records, including the main content.
    pub records: usize,
    /// Raw entries dropped as malformed.
    pub dropped_records: usize,
    /// Parent/child links in the final forest.
    pub edges: usize,
    /// Quote keys resolved through prefix matching.
    pub truncated_resolved: usize,
    /// Quote keys that matched no reply.
    pub unresolved_quotes: usize,
    /// Replies whose cleaned content duplicated an earlier reply.
    pub duplicate_contents: usize,
    /// Links refused to keep the forest acyclic.
    pub rejected_links: usize,
}

/// The reconstructed thread: main post plus the reply forest.
#[derive(Debug, Clone, Default)]
pub struct Thread {
    /// Cleaned text of the thread-starting post.
    pub main_content: String,

    /// Replies arranged by who answered whom.
    pub forest: ReplyForest,

    /// Match quality counters.
    pub stats: ResolutionStats,
}

impl Thread {
    /// Converts the forest to its wire form.
    pub fn to_hierarchy(&self) -> ThreadHierarchy {
        ThreadHierarchy::new(self.main_content.clone(), &self.forest)
    }

    /// Gets the hierarchy as structured JSON.
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_hierarchy())?)
    }

    /// Gets the hierarchy as a JSON string.
    pub fn to_json_string(&self, config: &JsonConfig) -> Result<String> {
        convert_to_json(&self.to_hierarchy(), config)
    }

    /// Renders replies as nested Markdown bullets with default settings.
    pub fn render_replies(&self) -> Vec<String> {
        render_forest(&self.forest, &MarkdownConfig::default())
    }

    /// Renders replies as nested Markdown bullets.
    pub fn render_replies_with_config(&self, config: &MarkdownConfig) -> Vec<String> {
        render_forest(&self.forest, config)
    }
}

/// Main entry point for thread reconstruction.
///
/// Holds only compiled patterns; every call to [`ThreadBuilder::build`] works
/// on its own local state, so one builder can be shared across threads.
#[derive(Debug, Clone)]
pub struct ThreadBuilder {
    extractor: RecordExtractor,
}

impl ThreadBuilder {
    /// Creates a builder with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ThreadConfig::default())
    }

    /// Creates a builder with custom configuration.
    pub fn with_config(config: ThreadConfig) -> Result<Self> {
        if config.max_clean_passes == 0 {
            return Err(ThreadError::ConfigError("max_clean_passes must be at least 1".to_string()));
        }
        Ok(Self { extractor: RecordExtractor::new(&config.extract_config())? })
    }

    /// Normalizes one raw reply.
    pub fn extract(&self, reply: &RawReply) -> ReplyRecord {
        self.extractor.extract(reply)
    }

    /// Reconstructs the reply tree of one thread.
    ///
    /// `replies[0]` is the main post; it is returned as `main_content` and
    /// never becomes a node. Empty input yields an empty thread.
    pub fn build(&self, replies: &[RawReply]) -> Thread {
        let records: Vec<ReplyRecord> = replies.iter().map(|r| self.extractor.extract(r)).collect();
        self.build_from_records(&records)
    }

    /// Reconstructs a thread from scraped JSON, dropping malformed entries.
    ///
    /// The first well-formed entry is the main post.
    pub fn build_from_values(&self, values: &[Value]) -> Thread {
        let replies: Vec<RawReply> = values.iter().filter_map(RawReply::from_value).collect();
        let dropped = values.len() - replies.len();
        if dropped > 0 {
            tracing::debug!(dropped, "dropped malformed reply records");
        }

        let mut thread = self.build(&replies);
        thread.stats.dropped_records = dropped;
        thread
    }

    /// Reconstructs a thread from already normalized records.
    pub fn build_from_records(&self, records: &[ReplyRecord]) -> Thread {
        let Some((main, replies)) = records.split_first() else {
            return Thread::default();
        };

        let mut mapping = map_parent_children(replies);
        let resolution = resolve_truncated_quotes(&mut mapping.map, &mapping.contents);
        let (forest, build_stats) = build_forest(replies, &mapping.map);

        let stats = ResolutionStats {
            records: records.len(),
            dropped_records: 0,
            edges: build_stats.edges,
            truncated_resolved: resolution.resolved.len(),
            unresolved_quotes: build_stats.unresolved_quotes,
            duplicate_contents: build_stats.duplicate_contents,
            rejected_links: build_stats.rejected_links,
        };
        tracing::debug!(
            records = stats.records,
            nodes = forest.len(),
            edges = stats.edges,
            unresolved = stats.unresolved_quotes,
            "reconstructed thread"
        );

        Thread { main_content: main.cleaned_content.clone(), forest, stats }
    }
}

/// Reconstructs a thread with default configuration.
pub fn build_thread(replies: &[RawReply]) -> Result<Thread> {
    Ok(ThreadBuilder::new()?.build(replies))
}

/// Reconstructs a thread from scraped JSON with default configuration.
pub fn build_thread_from_values(values: &[Value]) -> Result<Thread> {
    Ok(ThreadBuilder::new()?.build_from_values(values))
}
