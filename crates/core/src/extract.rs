//! Turning raw replies into normalized [`ReplyRecord`]s.
//!
//! A quoting reply on the target forums looks like this:
//!
//! ```text
//! alice wrote at 2025-12-7 08:39
//! <the quoted text, frequently cut short by the UI>
//! <the actual reply>
//! ```
//!
//! while its `quotes` entry carries the same attribution and quoted text on a
//! single line, usually ending in ` ...`. Extraction removes the echoed quote
//! from the content and reduces the quote to the bare quoted text, which is
//! what later gets matched against other replies.

use crate::clean::{CleanConfig, ContentCleaner, attribution_head};
use crate::reply::{RawReply, ReplyRecord};
use crate::Result;
use regex::Regex;

/// Configuration for record extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Boilerplate stripping applied to every record
    pub clean: CleanConfig,
    /// Shortest truncated-quote prefix tried is `partial_match_floor + 1` characters
    pub partial_match_floor: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { clean: CleanConfig::default(), partial_match_floor: 10 }
    }
}

/// Normalizes one raw reply at a time.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    cleaner: ContentCleaner,
    /// Attribution occupying the whole first line of reply content.
    attribution_line: Regex,
    /// Attribution at the front of a flattened quote snippet.
    attribution_prefix: Regex,
    partial_match_floor: usize,
}

impl RecordExtractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let head = attribution_head();
        Ok(Self {
            cleaner: ContentCleaner::new(&config.clean)?,
            attribution_line: Regex::new(&format!(r"{}[ \t]*\r?\n", head))?,
            attribution_prefix: Regex::new(&format!(r"{}\s*", head))?,
            partial_match_floor: config.partial_match_floor,
        })
    }

    pub fn cleaner(&self) -> &ContentCleaner {
        &self.cleaner
    }

    /// Build the normalized record for `reply`.
    pub fn extract(&self, reply: &RawReply) -> ReplyRecord {
        let quote = reply.primary_quote();

        let without_echo = if quote.is_empty() || reply.content.is_empty() {
            reply.content.clone()
        } else {
            self.strip_quote_echo(&reply.content, quote)
        };

        ReplyRecord {
            content: reply.content.clone(),
            quote: self.normalize_quote(quote),
            cleaned_content: self.cleaner.clean(&without_echo),
        }
    }

    /// Bare quoted text: attribution removed, one trailing ellipsis trimmed.
    pub fn normalize_quote(&self, quote: &str) -> String {
        if quote.is_empty() {
            return String::new();
        }

        let body = self.strip_attribution(quote).trim();
        let body = body
            .strip_suffix(" ...")
            .or_else(|| body.strip_suffix("..."))
            .unwrap_or(body);
        body.to_string()
    }

    fn strip_attribution<'a>(&self, quote: &'a str) -> &'a str {
        match self.attribution_prefix.find(quote) {
            Some(m) => &quote[m.end()..],
            None => quote,
        }
    }

    /// Remove the attribution line and the echoed quote from the front of `content`.
    fn strip_quote_echo(&self, content: &str, quote: &str) -> String {
        let Some(line) = self.attribution_line.find(content) else {
            return content.to_string();
        };
        let after = &content[line.end()..];

        let quoted = self.strip_attribution(quote).trim_end_matches([' ', '.']);
        if !quoted.is_empty() {
            if let Some(rest) = after.strip_prefix(quoted) {
                return rest.trim().to_string();
            }
            if let Some(rest) = self.strip_truncated_echo(after, quoted) {
                return rest;
            }
        }

        match after.split_once('\n') {
            Some((_, rest)) => rest.trim().to_string(),
            None => after.trim().to_string(),
        }
    }

    /// Match a shrinking prefix of `quoted` against `after`, then cut at the
    /// next line break. The echo in the content is often truncated at a
    /// different point than the quote snippet, so exact matching is not enough.
    fn strip_truncated_echo(&self, after: &str, quoted: &str) -> Option<String> {
        let char_ends: Vec<usize> = quoted.char_indices().map(|(i, c)| i + c.len_utf8()).collect();

        for len in (self.partial_match_floor + 1..=char_ends.len()).rev() {
            let prefix = &quoted[..char_ends[len - 1]];
            if let Some(rest) = after.strip_prefix(prefix) {
                let rest = match rest.find('\n') {
                    Some(pos) => &rest[pos..],
                    None => rest,
                };
                return Some(rest.trim().to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn extractor() -> RecordExtractor {
        RecordExtractor::new(&ExtractConfig::default()).unwrap()
    }

    #[rstest]
    #[case("A wrote at t1 Original post about interview format", "Original post about interview format")]
    #[case("B wrote at t2 Was it onsite? ...", "Was it onsite?")]
    #[case("B wrote at t2 Was it onsite?...", "Was it onsite?")]
    #[case("B wrote at t2 Was it... onsite? ... ...", "Was it... onsite? ...")]
    #[case("littlehardy 发表于 2025-12-7 08:39\n同问，收到一个75分钟的prompt ...", "同问，收到一个75分钟的prompt")]
    #[case("no attribution here ...", "no attribution here")]
    #[case("", "")]
    fn test_normalize_quote(#[case] quote: &str, #[case] expected: &str) {
        assert_eq!(extractor().normalize_quote(quote), expected);
    }

    #[test]
    fn test_exact_echo_removed() {
        let reply = RawReply::with_quote(
            "A wrote at t1\nOriginal post about interview format\nWas it onsite?",
            "A wrote at t1 Original post about interview format",
        );
        let record = extractor().extract(&reply);
        assert_eq!(record.cleaned_content, "Was it onsite?");
        assert_eq!(record.quote, "Original post about interview format");
        assert_eq!(record.content, reply.content);
    }

    #[test]
    fn test_ellipsis_quote_echo_removed() {
        let reply = RawReply::with_quote("B wrote at t2\nWas it onsite?\nYes, onsite.", "B wrote at t2 Was it onsite? ...");
        let record = extractor().extract(&reply);
        assert_eq!(record.cleaned_content, "Yes, onsite.");
        assert_eq!(record.quote, "Was it onsite?");
    }

    #[test]
    fn test_truncated_echo_cut_at_line_break() {
        // The content echo breaks off at a different point than the snippet.
        let reply = RawReply::with_quote(
            "carol wrote at 2025-12-07 09:00\nThe coding round was a 75 minute prompt, fo ...\nWhich problem did you get?",
            "carol wrote at 2025-12-07 09:00 The coding round was a 75 minute prompt, focused on APIs ...",
        );
        let record = extractor().extract(&reply);
        assert_eq!(record.cleaned_content, "Which problem did you get?");
    }

    #[test]
    fn test_short_partial_match_falls_back_to_first_line() {
        // Only 4 characters agree, below the partial match floor.
        let reply = RawReply::with_quote(
            "dave wrote at t3\nSame thing happened to me\nActual answer",
            "dave wrote at t3 Same question from another thread",
        );
        let record = extractor().extract(&reply);
        assert_eq!(record.cleaned_content, "Actual answer");
    }

    #[test]
    fn test_single_line_after_attribution_is_kept() {
        let reply = RawReply::with_quote("erin wrote at t4\nOnly line", "erin wrote at t4 Something else entirely");
        assert_eq!(extractor().extract(&reply).cleaned_content, "Only line");
    }

    #[test]
    fn test_missing_attribution_keeps_content() {
        let reply = RawReply::with_quote("Just a reply without the echo", "frank wrote at t5 Something");
        let record = extractor().extract(&reply);
        assert_eq!(record.cleaned_content, "Just a reply without the echo");
        assert_eq!(record.quote, "Something");
    }

    #[test]
    fn test_no_quote_still_cleaned() {
        let reply = RawReply::new("1point3acres\nedited by g at 2025-01-01 10:00\nReal reply");
        let record = extractor().extract(&reply);
        assert_eq!(record.cleaned_content, "Real reply");
        assert_eq!(record.quote, "");
    }

    #[test]
    fn test_multibyte_truncated_echo() {
        let reply = RawReply::with_quote(
            "littlehardy 发表于 2025-12-7 08:39\n同问，收到一个75分钟的prompt，这是一个七十五分钟的编程面试\n求问最后面到的是哪题？",
            "littlehardy 发表于 2025-12-7 08:39 同问，收到一个75分钟的prompt，这是一个七十五分钟的编程测 ...",
        );
        let record = extractor().extract(&reply);
        assert_eq!(record.cleaned_content, "求问最后面到的是哪题？");
        assert_eq!(record.quote, "同问，收到一个75分钟的prompt，这是一个七十五分钟的编程测");
    }

    #[test]
    fn test_quote_only_reply_becomes_empty() {
        let reply = RawReply::with_quote("A wrote at t1\nWas it onsite?", "A wrote at t1 Was it onsite?");
        assert_eq!(extractor().extract(&reply).cleaned_content, "");
    }
}
