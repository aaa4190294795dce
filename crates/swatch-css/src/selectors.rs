//! CSS Selectors
//!
//! Compound selectors (type, `*`, `.class`, `#id`) joined by descendant and
//! child combinators, matched right-to-left against the DOM tree.

use crate::Specificity;
use swatch_dom::{DomTree, ElementData, Node, NodeId};

/// A single component of a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    /// Universal selector `*`
    Universal,
    /// Type selector (`div`)
    Type(String),
    /// Class selector (`.box`)
    Class(String),
    /// ID selector (`#app`)
    Id(String),
}

/// Relationship between a compound and the one to its left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Compound selector, e.g. `div.box#main`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub parts: Vec<SelectorPart>,
    /// How this compound relates to the previous one (None for the first)
    pub combinator: Option<Combinator>,
}

impl Compound {
    fn matches(&self, elem: &ElementData) -> bool {
        self.parts.iter().all(|part| match part {
            SelectorPart::Universal => true,
            SelectorPart::Type(tag) => elem.tag == *tag,
            SelectorPart::Class(class) => elem.has_class(class),
            SelectorPart::Id(id) => elem.id.as_deref() == Some(id.as_str()),
        })
    }
}

/// CSS selector (complex selector without selector-list commas)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub text: String,
    pub specificity: Specificity,
    /// Compounds in source order (left to right)
    pub compounds: Vec<Compound>,
}

impl Selector {
    /// Parse a selector. Returns None for anything outside the supported
    /// subset (attributes, pseudo-classes, sibling combinators, escapes).
    pub fn parse(text: &str) -> Option<Self> {
        let spaced = text.replace('>', " > ");
        let mut compounds: Vec<Compound> = Vec::new();
        let mut pending_child = false;

        for token in spaced.split_whitespace() {
            if token == ">" {
                if compounds.is_empty() || pending_child {
                    return None;
                }
                pending_child = true;
                continue;
            }
            let parts = parse_compound(token)?;
            let combinator = if compounds.is_empty() {
                None
            } else if pending_child {
                Some(Combinator::Child)
            } else {
                Some(Combinator::Descendant)
            };
            pending_child = false;
            compounds.push(Compound { parts, combinator });
        }

        if compounds.is_empty() || pending_child {
            return None;
        }

        let specificity = specificity_of(&compounds);
        Some(Self {
            text: text.trim().to_string(),
            specificity,
            compounds,
        })
    }

    /// Check if the selector matches an element in the tree
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.matches_from(tree, node, self.compounds.len())
    }

    /// Match `compounds[..end]` with the last one anchored at `node`
    fn matches_from(&self, tree: &DomTree, node: NodeId, end: usize) -> bool {
        let Some(compound) = end.checked_sub(1).and_then(|i| self.compounds.get(i)) else {
            return true;
        };
        let Some(elem) = tree.get(node).and_then(Node::as_element) else {
            return false;
        };
        if !compound.matches(elem) {
            return false;
        }

        match compound.combinator {
            None => true,
            Some(Combinator::Child) => tree
                .parent(node)
                .is_some_and(|parent| self.matches_from(tree, parent, end - 1)),
            Some(Combinator::Descendant) => {
                let mut ancestor = tree.parent(node);
                while let Some(current) = ancestor {
                    if self.matches_from(tree, current, end - 1) {
                        return true;
                    }
                    ancestor = tree.parent(current);
                }
                false
            }
        }
    }
}

fn ident_len(s: &str) -> usize {
    s.char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn parse_compound(token: &str) -> Option<Vec<SelectorPart>> {
    let mut parts = Vec::new();
    let mut rest = token;

    if let Some(after) = rest.strip_prefix('*') {
        parts.push(SelectorPart::Universal);
        rest = after;
    } else {
        let len = ident_len(rest);
        if len > 0 {
            parts.push(SelectorPart::Type(rest[..len].to_ascii_lowercase()));
            rest = &rest[len..];
        }
    }

    while let Some(marker) = rest.chars().next() {
        let name_start = &rest[marker.len_utf8()..];
        let len = ident_len(name_start);
        if len == 0 {
            return None;
        }
        let name = name_start[..len].to_string();
        match marker {
            '.' => parts.push(SelectorPart::Class(name)),
            '#' => parts.push(SelectorPart::Id(name)),
            _ => return None,
        }
        rest = &name_start[len..];
    }

    if parts.is_empty() { None } else { Some(parts) }
}

fn specificity_of(compounds: &[Compound]) -> Specificity {
    let mut specificity = Specificity::default();
    for part in compounds.iter().flat_map(|c| c.parts.iter()) {
        match part {
            SelectorPart::Id(_) => specificity.0 += 1,
            SelectorPart::Class(_) => specificity.1 += 1,
            SelectorPart::Type(_) => specificity.2 += 1,
            SelectorPart::Universal => {}
        }
    }
    specificity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("div.box#main").unwrap();
        assert_eq!(sel.compounds.len(), 1);
        assert_eq!(
            sel.compounds[0].parts,
            vec![
                SelectorPart::Type("div".into()),
                SelectorPart::Class("box".into()),
                SelectorPart::Id("main".into()),
            ]
        );
        assert_eq!(sel.specificity, Specificity(1, 1, 1));
    }

    #[test]
    fn test_parse_combinators() {
        let sel = Selector::parse("#app>.box span").unwrap();
        let combinators: Vec<_> = sel.compounds.iter().map(|c| c.combinator).collect();
        assert_eq!(
            combinators,
            vec![None, Some(Combinator::Child), Some(Combinator::Descendant)]
        );
        assert_eq!(sel.specificity, Specificity(1, 1, 1));
    }

    #[test]
    fn test_parse_rejects_unsupported() {
        assert!(Selector::parse("a:hover").is_none());
        assert!(Selector::parse("input[type=text]").is_none());
        assert!(Selector::parse("h1 + p").is_none());
        assert!(Selector::parse("> div").is_none());
        assert!(Selector::parse("div >").is_none());
        assert!(Selector::parse(".").is_none());
        assert!(Selector::parse("").is_none());
    }

    #[test]
    fn test_matching() {
        let mut tree = DomTree::new();
        let app = tree.create_element("section");
        tree.set_attribute(app, "id", "app").unwrap();
        let row = tree.create_element("div");
        let cell = tree.create_element("div");
        tree.add_class(cell, "box").unwrap();
        tree.append_child(tree.root(), app).unwrap();
        tree.append_child(app, row).unwrap();
        tree.append_child(row, cell).unwrap();

        assert!(Selector::parse(".box").unwrap().matches(&tree, cell));
        assert!(Selector::parse("div.box").unwrap().matches(&tree, cell));
        assert!(Selector::parse("#app .box").unwrap().matches(&tree, cell));
        assert!(!Selector::parse("#app > .box").unwrap().matches(&tree, cell));
        assert!(Selector::parse("#app > div > .box").unwrap().matches(&tree, cell));
        assert!(Selector::parse("*").unwrap().matches(&tree, row));
        assert!(!Selector::parse(".box").unwrap().matches(&tree, row));
        assert!(!Selector::parse("*").unwrap().matches(&tree, tree.root()));
    }
}
