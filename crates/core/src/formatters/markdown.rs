use crate::filter::{LowValueFilter, meets_min_length};
use crate::thread::Thread;
use crate::tree::ReplyForest;

/// Configuration for Markdown reply rendering
#[derive(Debug, Clone)]
pub struct MarkdownConfig {
    /// Hide the bullet line of replies this filter rejects
    pub low_value: Option<LowValueFilter>,
    /// Skip the whole thread when the main content is shorter than this
    pub min_content_length: Option<usize>,
    /// Spaces of indentation per nesting level
    pub indent_width: usize,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { low_value: Some(LowValueFilter::default()), min_content_length: None, indent_width: 2 }
    }
}

/// Render every root of `forest` as nested Markdown bullets.
///
/// Each reply becomes a `- ` bullet holding its first non-empty line, with
/// the remaining lines as continuation lines one level deeper. A low-value
/// reply loses only its own bullet; its answers are still rendered.
pub fn render_forest(forest: &ReplyForest, config: &MarkdownConfig) -> Vec<String> {
    let mut lines = Vec::new();
    for id in forest.root_ids() {
        render_node(forest, id, 0, config, &mut lines);
    }
    lines
}

fn render_node(forest: &ReplyForest, id: usize, depth: usize, config: &MarkdownConfig, lines: &mut Vec<String>) {
    let Some(node) = forest.get_node(id) else {
        return;
    };

    let suppressed = config.low_value.as_ref().is_some_and(|filter| filter.is_low_value(&node.content));
    if !suppressed {
        let indent = " ".repeat(config.indent_width * depth);
        let continuation = " ".repeat(config.indent_width * (depth + 1));
        let mut content_lines = node.content.lines().map(str::trim).filter(|line| !line.is_empty());

        if let Some(first) = content_lines.next() {
            lines.push(format!("{}- {}", indent, first));
            lines.extend(content_lines.map(|line| format!("{}{}", continuation, line)));
        }
    }

    for &child in &node.child_ids {
        render_node(forest, child, depth + 1, config, lines);
    }
}

/// Markdown formatter with configurable options
pub struct MarkdownFormatter {
    config: MarkdownConfig,
}

impl MarkdownFormatter {
    pub fn new(config: MarkdownConfig) -> Self {
        Self { config }
    }

    /// Reply lines for `thread`, or `None` when its main content is below
    /// the configured minimum length and the thread should be skipped.
    pub fn render(&self, thread: &Thread) -> Option<Vec<String>> {
        if !meets_min_length(&thread.main_content, self.config.min_content_length) {
            return None;
        }
        Some(render_forest(&thread.forest, &self.config))
    }

    pub fn render_forest(&self, forest: &ReplyForest) -> Vec<String> {
        render_forest(forest, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> MarkdownConfig {
        MarkdownConfig { low_value: None, ..Default::default() }
    }

    #[test]
    fn test_nested_bullets() {
        let mut forest = ReplyForest::new();
        let q = forest.insert("Was it onsite?");
        let a = forest.insert("Yes, onsite.\n\n  Two rounds of coding.  ");
        let b = forest.insert("Thanks!");
        forest.attach(q, a).unwrap();
        forest.attach(a, b).unwrap();

        let lines = render_forest(&forest, &plain());
        assert_eq!(lines, vec!["- Was it onsite?", "  - Yes, onsite.", "    Two rounds of coding.", "    - Thanks!"]);
    }

    #[test]
    fn test_low_value_parent_keeps_children() {
        let mut forest = ReplyForest::new();
        let thanks = forest.insert("mark");
        let answer = forest.insert("The second round was system design");
        forest.attach(thanks, answer).unwrap();

        let lines = render_forest(&forest, &MarkdownConfig::default());
        assert_eq!(lines, vec!["  - The second round was system design"]);
    }

    #[test]
    fn test_whitespace_only_content_emits_nothing() {
        let mut forest = ReplyForest::new();
        forest.insert(" \n \n");
        assert!(render_forest(&forest, &plain()).is_empty());
    }

    #[test]
    fn test_custom_indent_width() {
        let mut forest = ReplyForest::new();
        let a = forest.insert("parent reply");
        let b = forest.insert("child reply\nsecond line");
        forest.attach(a, b).unwrap();

        let config = MarkdownConfig { indent_width: 4, ..plain() };
        assert_eq!(
            render_forest(&forest, &config),
            vec!["- parent reply", "    - child reply", "        second line"]
        );
    }
}
