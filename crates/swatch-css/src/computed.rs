//! Computed Style
//!
//! Final values after the cascade, inheritance and `currentcolor` resolution.

use crate::Declaration;
use crate::properties::{Color, PropertyId, PropertyValue};

/// Cascaded (winning) values before inheritance is applied
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CascadedValues {
    color: Option<PropertyValue>,
    background_color: Option<PropertyValue>,
}

impl CascadedValues {
    /// Apply a declaration; later calls override earlier ones
    pub(crate) fn apply_declaration(&mut self, decl: &Declaration) {
        match decl.property {
            PropertyId::Color => self.color = Some(decl.value),
            PropertyId::BackgroundColor => self.background_color = Some(decl.value),
        }
    }
}

/// Computed style for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedStyle {
    pub color: Color,
    pub background_color: Color,
}

impl Default for ComputedStyle {
    /// Initial values
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            background_color: Color::TRANSPARENT,
        }
    }
}

impl ComputedStyle {
    /// Resolve cascaded values against the parent's computed style
    pub(crate) fn resolve(cascaded: &CascadedValues, parent: &ComputedStyle) -> Self {
        let color = match cascaded.color {
            Some(PropertyValue::Color(c)) => c,
            // `color: currentcolor` behaves like inherit
            Some(PropertyValue::CurrentColor) | None => parent.color,
        };
        let background_color = match cascaded.background_color {
            Some(PropertyValue::Color(c)) => c,
            Some(PropertyValue::CurrentColor) => color,
            None => Color::TRANSPARENT,
        };
        Self { color, background_color }
    }

    /// Computed value of a property
    pub fn get(&self, property: PropertyId) -> Color {
        match property {
            PropertyId::Color => self.color,
            PropertyId::BackgroundColor => self.background_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(property: PropertyId, value: PropertyValue) -> Declaration {
        Declaration { property, value, important: false }
    }

    #[test]
    fn test_inherits_color_not_background() {
        let parent = ComputedStyle {
            color: Color::WHITE,
            background_color: Color::rgb(1, 2, 3),
        };
        let style = ComputedStyle::resolve(&CascadedValues::default(), &parent);
        assert_eq!(style.color, Color::WHITE);
        assert_eq!(style.background_color, Color::TRANSPARENT);
    }

    #[test]
    fn test_current_color_background() {
        let mut cascaded = CascadedValues::default();
        cascaded.apply_declaration(&decl(PropertyId::Color, PropertyValue::Color(Color::rgb(9, 9, 9))));
        cascaded.apply_declaration(&decl(PropertyId::BackgroundColor, PropertyValue::CurrentColor));

        let style = ComputedStyle::resolve(&cascaded, &ComputedStyle::default());
        assert_eq!(style.get(PropertyId::BackgroundColor), Color::rgb(9, 9, 9));
    }
}
