//! CSS Property Definitions
//!
//! The color properties the cascade tracks and their value types.

use std::fmt;

/// Property identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    /// `color` (inherited)
    Color,
    /// `background-color` (not inherited, initial value transparent)
    BackgroundColor,
}

impl PropertyId {
    /// Parse a property name into a PropertyId
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "color" => Self::Color,
            "background-color" => Self::BackgroundColor,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
        }
    }

    /// Whether the property inherits from the parent element by default
    pub fn inherited(&self) -> bool {
        matches!(self, Self::Color)
    }
}

/// Specified property value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue {
    /// Concrete color
    Color(Color),
    /// `currentcolor`: resolves to the element's computed `color`
    CurrentColor,
}

/// CSS color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse a hex color (#RGB, #RRGGBB, #RRGGBBAA)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::rgb(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Serialize the way a browser reports a computed color:
    /// `rgb(r, g, b)` when opaque, `rgba(r, g, b, alpha)` otherwise.
    pub fn to_css_string(&self) -> String {
        self.to_string()
    }

    /// Alpha as the shortest decimal (2 or 3 places) that maps back to `a`
    fn alpha_decimal(&self) -> f32 {
        let exact = self.a as f32 / 255.0;
        let two = (exact * 100.0).round() / 100.0;
        if (two * 255.0).round() as u8 == self.a {
            two
        } else {
            (exact * 1000.0).round() / 1000.0
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha_decimal())
        }
    }
}
