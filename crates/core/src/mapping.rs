//! Quote-to-children mapping and truncated-quote resolution.
//!
//! Replies reference their parent only by text, so the mapping is keyed by
//! quote text and its values are the cleaned contents of the quoting replies.
//! Because quotes are frequently cut short by the forum UI, a second pass
//! ([`resolve_truncated_quotes`]) moves each truncated key onto the full
//! reply content it is a prefix of.

use crate::reply::ReplyRecord;
use std::collections::HashMap;

/// Insertion-ordered map from parent text to the ordered child contents quoting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteMap {
    keys: Vec<String>,
    children: HashMap<String, Vec<String>>,
}

impl QuoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `child` under `parent`, registering `parent` if it is new.
    pub fn push(&mut self, parent: &str, child: &str) {
        self.entry(parent).push(child.to_string());
    }

    fn entry(&mut self, parent: &str) -> &mut Vec<String> {
        if !self.children.contains_key(parent) {
            self.keys.push(parent.to_string());
        }
        self.children.entry(parent.to_string()).or_default()
    }

    pub fn get(&self, parent: &str) -> Option<&[String]> {
        self.children.get(parent).map(Vec::as_slice)
    }

    pub fn contains_key(&self, parent: &str) -> bool {
        self.children.contains_key(parent)
    }

    pub fn remove(&mut self, parent: &str) -> Option<Vec<String>> {
        let removed = self.children.remove(parent)?;
        self.keys.retain(|k| k != parent);
        Some(removed)
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// `(parent, children)` pairs in first-seen key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.keys
            .iter()
            .filter_map(|k| self.children.get(k).map(|children| (k.as_str(), children.as_slice())))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Output of [`map_parent_children`].
#[derive(Debug, Clone, Default)]
pub struct ParentChildMapping {
    /// Quote text to the cleaned contents of the replies quoting it.
    pub map: QuoteMap,
    /// Every reply's cleaned content in input order, used for truncation resolution.
    pub contents: Vec<String>,
}

/// Group replies by the quote they carry.
///
/// `replies` must exclude the main-content record. A reply contributes an
/// edge only when both its quote and cleaned content are non-empty.
pub fn map_parent_children(replies: &[ReplyRecord]) -> ParentChildMapping {
    let mut mapping = ParentChildMapping::default();

    for record in replies {
        if record.has_quote() && record.has_content() {
            mapping.map.push(&record.quote, &record.cleaned_content);
        }
        mapping.contents.push(record.cleaned_content.clone());
    }

    mapping
}

/// Result of [`resolve_truncated_quotes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Truncated keys moved onto the full content they prefix.
    pub resolved: Vec<(String, String)>,
}

/// Collapse truncated quote keys onto the full content they refer to.
///
/// Each key, in first-seen order, is matched against the first content that
/// starts with it without being equal to it. Its children are appended to
/// that content's entry. Matched keys are removed only after every key has
/// been scanned, so a later key can still read an earlier one's children.
///
/// When several contents share the prefix, the first in input order wins.
pub fn resolve_truncated_quotes(map: &mut QuoteMap, contents: &[String]) -> Resolution {
    let mut resolution = Resolution::default();
    let mut to_delete = Vec::new();
    let quotes: Vec<String> = map.keys().map(str::to_string).collect();

    for quote in &quotes {
        if quote.is_empty() {
            continue;
        }

        let Some(target) = contents.iter().find(|c| *c != quote && c.starts_with(quote.as_str())) else {
            continue;
        };

        let children = map.get(quote).map(<[String]>::to_vec).unwrap_or_default();
        map.entry(target).extend(children);
        to_delete.push(quote.clone());
        tracing::debug!(quote = %quote, target = %target, "resolved truncated quote");
        resolution.resolved.push((quote.clone(), target.clone()));
    }

    for quote in &to_delete {
        map.remove(quote);
    }

    resolution
}
