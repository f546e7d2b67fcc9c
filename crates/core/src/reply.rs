//! Raw scraped replies and the normalized records derived from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One forum post or reply exactly as a site parser scraped it.
///
/// Only `content` and the first entry of `quotes` take part in threading.
/// The remaining fields are carried through untouched for callers that want
/// to join results back onto their own data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawReply {
    /// Full visible text of the reply, including any echoed quote.
    pub content: String,
    /// Quote snippets embedded in the reply, in page order.
    pub quotes: Vec<String>,
    pub post_id: Option<Value>,
    pub timestamp: Option<Value>,
    pub user: Option<Value>,
    pub reactions: Option<Value>,
    pub url: Option<Value>,
}

impl RawReply {
    /// Creates a reply with content and no quote.
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), ..Default::default() }
    }

    /// Creates a reply that embeds a single quote snippet.
    pub fn with_quote(content: impl Into<String>, quote: impl Into<String>) -> Self {
        Self { content: content.into(), quotes: vec![quote.into()], ..Default::default() }
    }

    /// Decodes a reply from scraped JSON.
    ///
    /// Returns `None` when the value is not a well-formed record: anything
    /// other than an object, or an object whose `content` or `quotes` have the
    /// wrong JSON type. Callers drop such entries instead of failing the thread.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }

    /// The quote consulted for threading, or `""` when there is none.
    pub fn primary_quote(&self) -> &str {
        self.quotes.first().map(String::as_str).unwrap_or("")
    }
}

/// A reply after quote normalization and boilerplate removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplyRecord {
    /// Original text of the reply.
    pub content: String,
    /// Quoted text with attribution and trailing ellipsis removed; empty if absent.
    pub quote: String,
    /// Reply text with the echoed quote and leading boilerplate removed.
    pub cleaned_content: String,
}

impl ReplyRecord {
    pub fn has_quote(&self) -> bool {
        !self.quote.is_empty()
    }

    pub fn has_content(&self) -> bool {
        !self.cleaned_content.is_empty()
    }
}
