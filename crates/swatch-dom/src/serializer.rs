//! HTML Serialization (innerHTML/outerHTML)

use crate::{DomTree, NodeData, NodeId};

/// HTML serializer
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Whether to format output with indentation
    pub pretty_print: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            ..Self::default()
        }
    }

    /// Serialize innerHTML of a node (children only)
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_children(tree, node_id, &mut output, 0);
        output
    }

    /// Serialize outerHTML of a node (including the node itself)
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut output = String::new();
        self.serialize_node(tree, node_id, &mut output, 0);
        output
    }

    fn newline(&self, output: &mut String, depth: usize) {
        if !output.is_empty() {
            output.push('\n');
        }
        for _ in 0..depth {
            output.push_str(&self.indent);
        }
    }

    fn serialize_node(&self, tree: &DomTree, node_id: NodeId, output: &mut String, depth: usize) {
        let Some(node) = tree.get(node_id) else {
            return;
        };

        match &node.data {
            NodeData::Document => {
                self.serialize_children(tree, node_id, output, depth);
            }
            NodeData::Element(elem) => {
                if self.pretty_print {
                    self.newline(output, depth);
                }

                output.push('<');
                output.push_str(&elem.tag);
                for attr in &elem.attrs {
                    output.push(' ');
                    output.push_str(&attr.name);
                    if !attr.value.is_empty() {
                        output.push_str("=\"");
                        escape_attribute(&attr.value, output);
                        output.push('"');
                    }
                }
                output.push('>');

                // Text-only elements stay on one line
                let block_children = node.first_child.is_valid()
                    && tree.children(node_id).any(|(_, c)| c.is_element());

                self.serialize_children(tree, node_id, output, depth + 1);

                if self.pretty_print && block_children {
                    self.newline(output, depth);
                }
                output.push_str("</");
                output.push_str(&elem.tag);
                output.push('>');
            }
            NodeData::Text(text) => {
                escape_text(text, output);
            }
        }
    }

    fn serialize_children(&self, tree: &DomTree, parent_id: NodeId, output: &mut String, depth: usize) {
        for (child_id, _) in tree.children(parent_id) {
            self.serialize_node(tree, child_id, output, depth);
        }
    }
}

/// Escape text content for HTML
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value
fn escape_attribute(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}
