//! Document - High-level document API

use crate::{DomTree, Node, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an html/head/body skeleton
    pub fn new() -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh detached nodes: linking cannot fail
        tree.link_last(tree.root(), html);
        tree.link_last(html, head);
        tree.link_last(html, body);

        Self {
            tree,
            body_element: body,
        }
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// First attached element whose id matches, in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).into_iter().find(|&node| {
            self.tree
                .get(node)
                .and_then(Node::as_element)
                .is_some_and(|e| e.id.as_deref() == Some(id))
        })
    }

    /// Attached elements carrying `class`, in document order
    pub fn get_elements_by_class_name(&self, class: &str) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|&node| self.tree.has_class(node, class))
            .collect()
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
