//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: removing a node only unlinks it, so every
//! `NodeId` handed out stays valid for the life of the tree.

use crate::{DomError, DomResult, ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Root (document) node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.insert_element(ElementData::new(tag))
    }

    /// Move prepared element data into the arena as a detached node
    pub fn insert_element(&mut self, data: ElementData) -> NodeId {
        self.push(Node::element(data))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over direct children in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        Children { tree: self, next }
    }

    /// All descendants of a node in document (pre-)order, excluding the node
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mark = stack.len();
            stack.extend(self.children(current).map(|(c, _)| c));
            stack[mark..].reverse();
        }
        out
    }

    /// Check whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        if parent_node.is_text() {
            return Err(DomError::HierarchyRequest);
        }
        let child_node = self.get(child).ok_or(DomError::NotFound)?;
        if child_node.is_document() || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        self.detach(child);
        self.link_last(parent, child);
        Ok(child)
    }

    /// Remove `child` from `parent`. The node stays in the arena, detached.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound)?;
        if node.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    pub(crate) fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let n = &self.nodes[id.index()];
            (n.parent, n.prev_sibling, n.next_sibling)
        };
        if !parent.is_valid() {
            return;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    fn element(&self, id: NodeId) -> DomResult<&ElementData> {
        self.get(id)
            .ok_or(DomError::NotFound)?
            .as_element()
            .ok_or(DomError::InvalidNodeType)
    }

    fn element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        self.get_mut(id)
            .ok_or(DomError::NotFound)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)
    }

    /// Class list of an element (empty for other nodes)
    pub fn classes(&self, id: NodeId) -> &[String] {
        self.element(id).map(|e| e.classes.as_slice()).unwrap_or(&[])
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).map(|e| e.has_class(class)).unwrap_or(false)
    }

    /// Add a class to an element; `Ok(false)` if it was already there
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<bool> {
        Ok(self.element_mut(id)?.add_class(class))
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok()?.get_attr(name)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Replace all children with a single text node (none if `text` is empty)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        let node = self.get_mut(id).ok_or(DomError::NotFound)?;
        match &mut node.data {
            NodeData::Text(content) => {
                *content = text.to_string();
                return Ok(());
            }
            NodeData::Document => return Err(DomError::InvalidNodeType),
            NodeData::Element(_) => {}
        }

        let old: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        for child in old {
            self.detach(child);
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.link_last(id, node);
        }
        Ok(())
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_ids(tree: &DomTree, id: NodeId) -> Vec<NodeId> {
        tree.children(id).map(|(c, _)| c).collect()
    }

    #[test]
    fn test_append_keeps_order() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("div");
        let a = tree.create_element("span");
        let b = tree.create_element("span");
        let c = tree.create_element("span");
        for child in [a, b, c] {
            tree.append_child(parent, child).unwrap();
        }

        assert_eq!(child_ids(&tree, parent), vec![a, b, c]);
        assert_eq!(tree.parent(b), Some(parent));
        assert_eq!(tree.get(parent).unwrap().last_child, c);
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut tree = DomTree::new();
        let first = tree.create_element("div");
        let second = tree.create_element("div");
        let item = tree.create_element("p");
        tree.append_child(first, item).unwrap();
        tree.append_child(second, item).unwrap();

        assert!(child_ids(&tree, first).is_empty());
        assert_eq!(child_ids(&tree, second), vec![item]);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(tree.append_child(inner, outer), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(outer, outer), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(outer, tree.root()), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_remove_child() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, b).unwrap();

        assert_eq!(tree.remove_child(b, a), Err(DomError::NotAChild));
        tree.remove_child(parent, a).unwrap();
        assert_eq!(child_ids(&tree, parent), vec![b]);
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_text_content_replaces_children() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(div, span).unwrap();
        tree.set_text_content(span, "inner").unwrap();
        assert_eq!(tree.text_content(div), "inner");

        tree.set_text_content(div, "#FF0000").unwrap();
        assert_eq!(tree.text_content(div), "#FF0000");
        assert_eq!(tree.children(div).count(), 1);

        tree.set_text_content(div, "").unwrap();
        assert_eq!(tree.children(div).count(), 0);
        assert_eq!(tree.text_content(div), "");
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");
        let d = tree.create_element("d");
        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(a, b).unwrap();
        tree.append_child(b, c).unwrap();
        tree.append_child(a, d).unwrap();

        assert_eq!(tree.descendants(tree.root()), vec![a, b, c, d]);
    }

    #[test]
    fn test_class_helpers_on_text_node() {
        let mut tree = DomTree::new();
        let text = tree.create_text("hi");
        assert!(tree.classes(text).is_empty());
        assert_eq!(tree.add_class(text, "x"), Err(DomError::InvalidNodeType));
    }
}
