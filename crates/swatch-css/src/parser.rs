//! CSS Parser using lightningcss
//!
//! Parses CSS stylesheets into our internal representation.

use crate::properties::{Color, PropertyId, PropertyValue};
use crate::{CssError, Declaration, Rule, Selector, Stylesheet};
use lightningcss::declaration::DeclarationBlock;
use lightningcss::error::{Error, ParserError};
use lightningcss::properties::Property;
use lightningcss::rules::CssRule;
use lightningcss::selector::SelectorList;
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleAttribute, StyleSheet};
use lightningcss::traits::ToCss;
use lightningcss::values::color::CssColor;

/// CSS Parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a CSS stylesheet
    pub fn parse(&self, css: &str) -> Result<Stylesheet, CssError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default()).map_err(to_css_error)?;

        let mut result = Stylesheet::new();
        for rule in stylesheet.rules.0.iter() {
            if let Some(converted) = self.convert_rule(rule) {
                result.rules.push(converted);
            }
        }

        tracing::debug!("Parsed stylesheet: {} rules", result.len());
        Ok(result)
    }

    /// Parse the body of a `style` attribute
    pub fn parse_inline(&self, css: &str) -> Result<Vec<Declaration>, CssError> {
        let attribute = StyleAttribute::parse(css, ParserOptions::default()).map_err(to_css_error)?;
        Ok(self.convert_declarations(&attribute.declarations))
    }

    fn convert_rule(&self, rule: &CssRule) -> Option<Rule> {
        match rule {
            CssRule::Style(style_rule) => {
                let selectors = self.convert_selectors(&style_rule.selectors);
                if selectors.is_empty() {
                    return None;
                }
                let declarations = self.convert_declarations(&style_rule.declarations);
                if declarations.is_empty() {
                    return None;
                }
                Some(Rule { selectors, declarations })
            }
            // Media queries, keyframes, imports etc. are not evaluated
            _ => None,
        }
    }

    fn convert_selectors(&self, selectors: &SelectorList) -> Vec<Selector> {
        let text = match selectors.to_css_string(PrinterOptions::default()) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Could not serialize selector list: {}", e);
                return Vec::new();
            }
        };

        text.split(',')
            .filter_map(|part| {
                let parsed = Selector::parse(part);
                if parsed.is_none() {
                    tracing::debug!("Skipping unsupported selector {:?}", part.trim());
                }
                parsed
            })
            .collect()
    }

    fn convert_declarations(&self, block: &DeclarationBlock) -> Vec<Declaration> {
        let normal = block.declarations.iter().map(|d| (d, false));
        let important = block.important_declarations.iter().map(|d| (d, true));
        normal
            .chain(important)
            .filter_map(|(decl, important)| self.convert_declaration(decl, important))
            .collect()
    }

    fn convert_declaration(&self, decl: &Property, important: bool) -> Option<Declaration> {
        let (property, color) = match decl {
            Property::Color(color) => (PropertyId::Color, color),
            Property::BackgroundColor(color) => (PropertyId::BackgroundColor, color),
            // Only the color component of the shorthand is tracked; it
            // lives on the final layer
            Property::Background(layers) => (PropertyId::BackgroundColor, &layers.last()?.color),
            _ => return None,
        };

        let value = self.convert_color(color)?;
        Some(Declaration { property, value, important })
    }

    fn convert_color(&self, color: &CssColor) -> Option<PropertyValue> {
        match color {
            CssColor::RGBA(rgba) => Some(PropertyValue::Color(Color::rgba(
                rgba.red, rgba.green, rgba.blue, rgba.alpha,
            ))),
            CssColor::CurrentColor => Some(PropertyValue::CurrentColor),
            other => {
                tracing::debug!("Unsupported color value {:?}", other);
                None
            }
        }
    }
}

fn to_css_error(e: Error<ParserError<'_>>) -> CssError {
    CssError::ParseError {
        line: e.loc.as_ref().map(|loc| loc.line + 1).unwrap_or(0),
        message: e.kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let css = r#"
            .foo { color: red; }
            #bar { background-color: blue; }
        "#;

        let stylesheet = CssParser::new().parse(css).unwrap();
        assert_eq!(stylesheet.len(), 2);
        assert_eq!(
            stylesheet.rules[1].declarations[0],
            Declaration {
                property: PropertyId::BackgroundColor,
                value: PropertyValue::Color(Color::rgb(0, 0, 255)),
                important: false,
            }
        );
    }

    #[test]
    fn test_parse_selector_list() {
        let stylesheet = CssParser::new()
            .parse(".a, div > .b, a:hover { color: #fff; }")
            .unwrap();
        let texts: Vec<_> = stylesheet.rules[0].selectors.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec![".a", "div > .b"]);
    }

    #[test]
    fn test_background_shorthand_and_important() {
        let stylesheet = CssParser::new()
            .parse(".x { background: #1e88e5 !important; }")
            .unwrap();
        let decl = &stylesheet.rules[0].declarations[0];
        assert_eq!(decl.property, PropertyId::BackgroundColor);
        assert_eq!(decl.value, PropertyValue::Color(Color::rgb(0x1e, 0x88, 0xe5)));
        assert!(decl.important);
    }

    #[test]
    fn test_rules_without_color_are_dropped() {
        let stylesheet = CssParser::new()
            .parse(".box { width: 10px; } .fill { background-color: currentcolor; }")
            .unwrap();
        assert_eq!(stylesheet.len(), 1);
        assert_eq!(stylesheet.rules[0].declarations[0].value, PropertyValue::CurrentColor);
    }

    #[test]
    fn test_parse_inline() {
        let decls = CssParser::new().parse_inline("color: black; background-color: rgba(0, 0, 0, 0)").unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[1].value, PropertyValue::Color(Color::TRANSPARENT));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            CssParser::new().parse("..broken { color: red; }"),
            Err(CssError::ParseError { .. })
        ));
    }
}
