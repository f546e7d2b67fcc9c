//! Leading boilerplate removal for reply text.
//!
//! Forum replies often start with lines the site injects rather than the
//! author writes: an anti-scraping watermark, an "edited by" notice, or the
//! attribution line of an echoed quote. [`ContentCleaner`] strips these from
//! the front of the text until none remain.

use crate::{Result, ThreadError};
use regex::Regex;

/// Words that introduce a quote attribution, e.g. `alice wrote at 2025-01-02 10:00`.
pub(crate) const ATTRIBUTION_MARKER: &str = r"(?:wrote at|发表于)";

/// `<name> <marker> <timestamp>[ <hh:mm[:ss]>]`, anchored at the start.
pub(crate) fn attribution_head() -> String {
    format!(r"^.+?\s+{}\s+\S+(?:\s+\d{{1,2}}:\d{{2}}(?::\d{{2}})?)?", ATTRIBUTION_MARKER)
}

/// Configuration for boilerplate stripping
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// Site watermark token injected into post bodies
    pub watermark: String,
    /// Maximum strip passes before giving up on adversarial input
    pub max_passes: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self { watermark: "1point3acres".to_string(), max_passes: 32 }
    }
}

/// Strips leading watermark, edit-notice and attribution lines.
#[derive(Debug, Clone)]
pub struct ContentCleaner {
    watermark: Regex,
    edit_notice: Regex,
    attribution: Regex,
    max_passes: usize,
}

impl ContentCleaner {
    pub fn new(config: &CleanConfig) -> Result<Self> {
        let token = config.watermark.trim();
        if token.is_empty() {
            return Err(ThreadError::ConfigError("watermark must not be empty".to_string()));
        }

        let watermark = Regex::new(&format!(r"^\.?\s*{}\s*\n?", regex::escape(token)))?;
        let edit_notice = Regex::new(
            r"^(?:(?i:(?:last\s+)?edited\s+by)\s+.+?\s+(?i:at)\s+[\d\-/]+\s+[\d:]+|本帖最后由\s+.+?\s+于\s+[\d\-]+\s+[\d:]+\s*编辑)\s*\.?[ \t]*\n?",
        )?;
        let attribution = Regex::new(&format!(r"^.+?\s+{}\s+[\d\-/]+\s+[\d:]+[^\n]*\n?", ATTRIBUTION_MARKER))?;

        Ok(Self { watermark, edit_notice, attribution, max_passes: config.max_passes })
    }

    /// Remove all leading boilerplate from `text`.
    ///
    /// At most one pattern is applied per pass and leading whitespace is
    /// trimmed after each strip. Text that matches nothing is returned as is.
    pub fn clean(&self, text: &str) -> String {
        let mut result = text;

        for pass in 0..self.max_passes {
            let Some(end) = self.match_prefix(result) else {
                return result.to_string();
            };
            tracing::trace!(pass, stripped = &result[..end], "stripped leading boilerplate");
            result = result[end..].trim_start();
        }

        if self.match_prefix(result).is_some() {
            tracing::warn!(max_passes = self.max_passes, "boilerplate strip pass limit reached");
        }
        result.to_string()
    }

    /// End offset of the first boilerplate pattern matching the front of `text`.
    fn match_prefix(&self, text: &str) -> Option<usize> {
        [&self.watermark, &self.edit_notice, &self.attribution]
            .into_iter()
            .find_map(|re| re.find(text))
            .map(|m| m.end())
            .filter(|&end| end > 0)
    }
}
