//! Swatch CSS Parser & Style System
//!
//! Stylesheet parsing, selector matching and the cascade that answers
//! computed-style queries for elements of a `swatch_dom::DomTree`.

mod parser;
mod cascade;
mod computed;
mod selectors;
pub mod properties;

pub use parser::CssParser;
pub use cascade::StyleResolver;
pub use computed::ComputedStyle;
pub use selectors::{Selector, Compound, SelectorPart, Combinator};

use properties::{PropertyId, PropertyValue};

/// Parse a CSS stylesheet
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet, CssError> {
    CssParser::new().parse(css)
}

/// Parsed stylesheet
#[derive(Debug, Default, Clone)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// CSS rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

/// Selector specificity (ids, classes, types)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: PropertyId,
    pub value: PropertyValue,
    pub important: bool,
}

/// CSS parsing error
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: u32, message: String },
}
