/// Default phrases marking a reply as non-substantive ("thanks OP", "bump",
/// "sent you a DM", ...).
pub const LOW_VALUE_PATTERNS: [&str; 7] = ["感谢楼主", "已加米", "求加米", "顶", "mark", "已私信", "已dm"];

/// Classifies replies that add nothing to a thread.
///
/// Only used to hide a reply's own line when rendering; it never changes the
/// tree structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowValueFilter {
    /// Replies shorter than this many characters are low value
    pub min_length: usize,
    /// Lowercase-insensitive phrases that open a low-value reply
    pub patterns: Vec<String>,
    /// A reply opening with a pattern still counts when it runs more than
    /// this many characters past the pattern
    pub slack: usize,
}

impl Default for LowValueFilter {
    fn default() -> Self {
        Self { min_length: 10, patterns: LOW_VALUE_PATTERNS.iter().map(|p| p.to_string()).collect(), slack: 20 }
    }
}

impl LowValueFilter {
    pub fn new(min_length: usize, patterns: Vec<String>) -> Self {
        Self { min_length, patterns, ..Default::default() }
    }

    pub fn is_low_value(&self, content: &str) -> bool {
        let normalized = content.trim().to_lowercase();
        let length = normalized.chars().count();

        if length == 0 || length < self.min_length {
            return true;
        }

        self.patterns
            .iter()
            .map(|pattern| pattern.to_lowercase())
            .find(|pattern| normalized.starts_with(pattern.as_str()))
            .is_some_and(|pattern| length <= pattern.chars().count() + self.slack)
    }
}

/// Whether `main_content` is long enough to be worth keeping.
pub fn meets_min_length(main_content: &str, min_content_length: Option<usize>) -> bool {
    match min_content_length {
        Some(min) => main_content.chars().count() >= min,
        None => true,
    }
}
