//! Style Cascade & Resolver
//!
//! Computes the final styles for DOM elements by:
//! 1. Matching selectors against elements
//! 2. Sorting by importance, origin, specificity and source order
//! 3. Inheriting from the parent's computed style

use crate::computed::{CascadedValues, ComputedStyle};
use crate::properties::{Color, PropertyId, PropertyValue};
use crate::{CssParser, Declaration, Rule, Selector, Specificity, Stylesheet};
use swatch_dom::{DomTree, Node, NodeId};

/// Where a declaration came from; later origins win at equal importance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Origin {
    UserAgent,
    Author,
    Inline,
}

/// Sort key for a matched declaration
type CascadeKey = (bool, Origin, Specificity, usize);

/// Style resolver - computes styles for DOM elements
#[derive(Debug)]
pub struct StyleResolver {
    /// User agent stylesheet (defaults)
    ua_styles: Stylesheet,
    /// Author stylesheets, in load order
    author_styles: Vec<Stylesheet>,
}

impl StyleResolver {
    pub fn new() -> Self {
        Self {
            ua_styles: Self::default_ua_styles(),
            author_styles: Vec::new(),
        }
    }

    /// Add an author stylesheet
    pub fn add_stylesheet(&mut self, stylesheet: Stylesheet) {
        tracing::debug!("Author stylesheet added ({} rules)", stylesheet.len());
        self.author_styles.push(stylesheet);
    }

    /// Number of author stylesheets
    pub fn stylesheet_count(&self) -> usize {
        self.author_styles.len()
    }

    /// Compute styles for a node. Non-element nodes get initial values.
    pub fn compute_style(&self, tree: &DomTree, node_id: NodeId) -> ComputedStyle {
        // Ancestor chain, outermost first
        let mut chain = vec![node_id];
        let mut current = node_id;
        while let Some(parent) = tree.parent(current) {
            chain.push(parent);
            current = parent;
        }

        let mut style = ComputedStyle::default();
        for &id in chain.iter().rev() {
            if tree.get(id).is_some_and(Node::is_element) {
                let cascaded = self.cascade(tree, id);
                style = ComputedStyle::resolve(&cascaded, &style);
            }
        }
        style
    }

    /// Computed value of a single color property
    pub fn computed_value(&self, tree: &DomTree, node_id: NodeId, property: PropertyId) -> Color {
        self.compute_style(tree, node_id).get(property)
    }

    fn cascade(&self, tree: &DomTree, node_id: NodeId) -> CascadedValues {
        let mut matches: Vec<(CascadeKey, &Declaration)> = Vec::new();
        let mut order = 0usize;

        self.collect_matches(tree, node_id, &self.ua_styles, Origin::UserAgent, &mut order, &mut matches);
        for stylesheet in &self.author_styles {
            self.collect_matches(tree, node_id, stylesheet, Origin::Author, &mut order, &mut matches);
        }

        let inline = self.inline_declarations(tree, node_id);
        for decl in &inline {
            matches.push(((decl.important, Origin::Inline, Specificity::default(), order), decl));
            order += 1;
        }

        matches.sort_by_key(|(key, _)| *key);

        let mut cascaded = CascadedValues::default();
        for (_, decl) in matches {
            cascaded.apply_declaration(decl);
        }
        cascaded
    }

    fn collect_matches<'a>(
        &self,
        tree: &DomTree,
        node_id: NodeId,
        stylesheet: &'a Stylesheet,
        origin: Origin,
        order: &mut usize,
        matches: &mut Vec<(CascadeKey, &'a Declaration)>,
    ) {
        for rule in &stylesheet.rules {
            // A rule applies once, with its most specific matching selector
            let specificity = rule
                .selectors
                .iter()
                .filter(|s| s.matches(tree, node_id))
                .map(|s| s.specificity)
                .max();
            if let Some(specificity) = specificity {
                for decl in &rule.declarations {
                    matches.push(((decl.important, origin, specificity, *order), decl));
                    *order += 1;
                }
            }
        }
    }

    fn inline_declarations(&self, tree: &DomTree, node_id: NodeId) -> Vec<Declaration> {
        let Some(style) = tree.get_attribute(node_id, "style") else {
            return Vec::new();
        };
        match CssParser::new().parse_inline(style) {
            Ok(decls) => decls,
            Err(e) => {
                tracing::debug!("Ignoring invalid style attribute on {:?}: {}", node_id, e);
                Vec::new()
            }
        }
    }

    /// Default user-agent styles
    fn default_ua_styles() -> Stylesheet {
        let selectors = Selector::parse("html").into_iter().collect();
        Stylesheet {
            rules: vec![Rule {
                selectors,
                declarations: vec![Declaration {
                    property: PropertyId::Color,
                    value: PropertyValue::Color(Color::BLACK),
                    important: false,
                }],
            }],
        }
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::new()
    }
}
