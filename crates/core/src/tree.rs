use crate::mapping::QuoteMap;
use crate::reply::ReplyRecord;

use std::collections::HashMap;

/// A reply in the reconstructed thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyNode {
    /// Cleaned content of the reply
    pub content: String,
    /// Parent node ID (if any)
    pub parent_id: Option<usize>,
    /// Child node IDs in attachment order
    pub child_ids: Vec<usize>,
}

impl ReplyNode {
    fn new(content: &str) -> Self {
        Self { content: content.to_string(), parent_id: None, child_ids: Vec::new() }
    }
}

/// Why an attachment was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// Child and parent are the same node
    SelfLink,
    /// Child was already attached elsewhere
    AlreadyParented,
    /// Parent sits inside the child's subtree
    Cycle,
    /// One of the IDs does not exist
    UnknownNode,
}

/// Arena of reply nodes keyed by their content.
///
/// Replies carry no usable parent identifier, so nodes are looked up by
/// text. Parent links are indices into the arena rather than references.
#[derive(Debug, Clone, Default)]
pub struct ReplyForest {
    /// All nodes in creation order
    nodes: Vec<ReplyNode>,
    /// Map from content to node ID
    content_index: HashMap<String, usize>,
}

impl ReplyForest {
    /// Create a new empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node for `content`, returning its ID.
    ///
    /// Content is the identity: inserting the same text twice replaces the
    /// earlier node in place, so the later record wins but keeps the
    /// earlier position.
    pub fn insert(&mut self, content: &str) -> usize {
        if let Some(&id) = self.content_index.get(content) {
            self.nodes[id] = ReplyNode::new(content);
            return id;
        }

        let id = self.nodes.len();
        self.content_index.insert(content.to_string(), id);
        self.nodes.push(ReplyNode::new(content));
        id
    }

    /// Get a node by ID
    pub fn get_node(&self, id: usize) -> Option<&ReplyNode> {
        self.nodes.get(id)
    }

    /// Get a node ID by its content
    pub fn find_by_content(&self, content: &str) -> Option<usize> {
        self.content_index.get(content).copied()
    }

    /// Get the parent of a node
    pub fn get_parent(&self, id: usize) -> Option<&ReplyNode> {
        let parent_id = self.nodes.get(id)?.parent_id?;
        self.nodes.get(parent_id)
    }

    /// Children of a node in attachment order
    pub fn children(&self, id: usize) -> impl Iterator<Item = &ReplyNode> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|node| node.child_ids.iter())
            .filter_map(|&child| self.nodes.get(child))
    }

    /// Attach `child` under `parent`.
    ///
    /// A node is attached at most once and never beneath its own subtree,
    /// which keeps the arena a forest whatever the input looks like.
    pub fn attach(&mut self, parent: usize, child: usize) -> Result<(), AttachError> {
        if parent >= self.nodes.len() || child >= self.nodes.len() {
            return Err(AttachError::UnknownNode);
        }
        if parent == child {
            return Err(AttachError::SelfLink);
        }
        if self.nodes[child].parent_id.is_some() {
            return Err(AttachError::AlreadyParented);
        }
        if self.is_ancestor(child, parent) {
            return Err(AttachError::Cycle);
        }

        self.nodes[child].parent_id = Some(parent);
        self.nodes[parent].child_ids.push(child);
        Ok(())
    }

    /// Whether `ancestor` lies on the parent chain of `id`.
    fn is_ancestor(&self, ancestor: usize, id: usize) -> bool {
        let mut current = self.nodes.get(id).and_then(|n| n.parent_id);
        while let Some(next) = current {
            if next == ancestor {
                return true;
            }
            current = self.nodes[next].parent_id;
        }
        false
    }

    /// IDs of nodes without a parent, in creation order
    pub fn root_ids(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent_id.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Nodes without a parent, in creation order
    pub fn roots(&self) -> impl Iterator<Item = &ReplyNode> {
        self.nodes.iter().filter(|node| node.parent_id.is_none())
    }

    /// All `(parent content, child content)` links, parents in creation order
    pub fn edges(&self) -> Vec<(String, String)> {
        self.nodes
            .iter()
            .flat_map(|parent| {
                parent
                    .child_ids
                    .iter()
                    .map(move |&child| (parent.content.clone(), self.nodes[child].content.clone()))
            })
            .collect()
    }

    /// Get the total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the forest is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Counters collected while assembling a forest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Links successfully attached
    pub edges: usize,
    /// Records whose content collided with an earlier record
    pub duplicate_contents: usize,
    /// Mapping keys with no node to attach to
    pub unresolved_quotes: usize,
    /// Attachments refused to keep the forest acyclic
    pub rejected_links: usize,
}

/// Build a forest from reply records and a resolved quote mapping.
///
/// `replies` must exclude the main-content record. Records with empty
/// cleaned content never become nodes.
pub fn build_forest(replies: &[ReplyRecord], map: &QuoteMap) -> (ReplyForest, BuildStats) {
    let mut forest = ReplyForest::new();
    let mut stats = BuildStats::default();

    for record in replies.iter().filter(|r| r.has_content()) {
        if forest.find_by_content(&record.cleaned_content).is_some() {
            stats.duplicate_contents += 1;
            tracing::debug!(content = %record.cleaned_content, "duplicate reply content replaces earlier node");
        }
        forest.insert(&record.cleaned_content);
    }

    for (parent_content, children) in map.iter() {
        let Some(parent) = forest.find_by_content(parent_content) else {
            stats.unresolved_quotes += 1;
            tracing::debug!(quote = %parent_content, orphans = children.len(), "quote matches no reply");
            continue;
        };

        for child_content in children {
            let Some(child) = forest.find_by_content(child_content) else {
                continue;
            };
            match forest.attach(parent, child) {
                Ok(()) => stats.edges += 1,
                Err(reason) => {
                    stats.rejected_links += 1;
                    tracing::debug!(?reason, parent = %parent_content, child = %child_content, "attachment rejected");
                }
            }
        }
    }

    (forest, stats)
}
