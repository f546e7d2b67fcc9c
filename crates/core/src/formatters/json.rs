use crate::Result;
use crate::tree::ReplyForest;
use serde::{Deserialize, Serialize};

/// A reply and its nested answers in wire form.
///
/// `children` is omitted from JSON, not written as `[]`, when the reply has
/// no answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedNode {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SerializedNode>>,
}

impl SerializedNode {
    /// Children, treating an absent field as empty.
    pub fn children(&self) -> &[SerializedNode] {
        self.children.as_deref().unwrap_or_default()
    }
}

/// Complete JSON output structure for one thread
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadHierarchy {
    /// Cleaned text of the thread-starting post
    pub main_content: String,
    /// Top-level replies in input order
    pub roots: Vec<SerializedNode>,
}

impl ThreadHierarchy {
    pub fn new(main_content: String, forest: &ReplyForest) -> Self {
        let roots = forest.root_ids().into_iter().filter_map(|id| serialize_node(forest, id)).collect();
        Self { main_content, roots }
    }

    /// `(parent content, child content)` links recovered from the serialized form.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        let mut stack: Vec<&SerializedNode> = self.roots.iter().rev().collect();

        while let Some(node) = stack.pop() {
            for child in node.children() {
                edges.push((node.content.clone(), child.content.clone()));
            }
            stack.extend(node.children().iter().rev());
        }

        edges
    }

    /// Number of replies in the hierarchy, excluding the main content
    pub fn reply_count(&self) -> usize {
        fn count(node: &SerializedNode) -> usize {
            1 + node.children().iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Serialize the subtree rooted at `id`.
pub fn serialize_node(forest: &ReplyForest, id: usize) -> Option<SerializedNode> {
    let node = forest.get_node(id)?;
    let children: Vec<SerializedNode> =
        node.child_ids.iter().filter_map(|&child| serialize_node(forest, child)).collect();

    let children = if children.is_empty() { None } else { Some(children) };

    Some(SerializedNode { content: node.content.clone(), children })
}

/// Convert a thread hierarchy to a JSON string
pub fn convert_to_json(hierarchy: &ThreadHierarchy, config: &JsonConfig) -> Result<String> {
    if config.pretty {
        Ok(serde_json::to_string_pretty(hierarchy)?)
    } else {
        Ok(serde_json::to_string(hierarchy)?)
    }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, hierarchy: &ThreadHierarchy) -> Result<String> {
        convert_to_json(hierarchy, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_forest() -> ReplyForest {
        let mut forest = ReplyForest::new();
        let q = forest.insert("Was it onsite?");
        let a = forest.insert("Yes, onsite.");
        forest.insert("Unrelated root");
        forest.attach(q, a).unwrap();
        forest
    }

    #[test]
    fn test_children_omitted_when_empty() {
        let hierarchy = ThreadHierarchy::new("Main".to_string(), &sample_forest());
        let value = serde_json::to_value(&hierarchy).unwrap();

        assert_eq!(
            value,
            json!({
                "main_content": "Main",
                "roots": [
                    {"content": "Was it onsite?", "children": [{"content": "Yes, onsite."}]},
                    {"content": "Unrelated root"}
                ]
            })
        );
    }

    #[test]
    fn test_empty_hierarchy() {
        let hierarchy = ThreadHierarchy::new(String::new(), &ReplyForest::new());
        let json = convert_to_json(&hierarchy, &JsonConfig::default()).unwrap();
        assert_eq!(json, r#"{"main_content":"","roots":[]}"#);
    }

    #[test]
    fn test_edges_match_forest() {
        let forest = sample_forest();
        let hierarchy = ThreadHierarchy::new("Main".to_string(), &forest);
        assert_eq!(hierarchy.edges(), forest.edges());
        assert_eq!(hierarchy.reply_count(), 3);
    }

    #[test]
    fn test_deserialize_without_children_field() {
        let hierarchy: ThreadHierarchy =
            serde_json::from_str(r#"{"main_content":"m","roots":[{"content":"a"}]}"#).unwrap();
        assert_eq!(hierarchy.roots[0].children, None);
        assert!(hierarchy.roots[0].children().is_empty());
    }

    #[test]
    fn test_pretty_output() {
        let hierarchy = ThreadHierarchy::new("Main".to_string(), &sample_forest());
        let formatter = JsonFormatter::new(JsonConfig { pretty: true });
        let json = formatter.convert(&hierarchy).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"children\""));
    }
}
