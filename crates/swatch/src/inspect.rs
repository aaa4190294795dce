//! Computed background color lookup

use swatch_css::StyleResolver;
use swatch_css::properties::{Color, PropertyId};
use swatch_dom::{DomTree, NodeId};

use crate::convert::{HexColor, rgb_to_hex};

/// Reads resolved styles of elements in a tree
#[derive(Clone, Copy)]
pub struct StyleInspector<'a> {
    styles: &'a StyleResolver,
    tree: &'a DomTree,
}

impl<'a> StyleInspector<'a> {
    pub fn new(styles: &'a StyleResolver, tree: &'a DomTree) -> Self {
        Self { styles, tree }
    }

    /// Computed `background-color` after cascade
    pub fn computed_background(&self, element: NodeId) -> Color {
        self.styles
            .computed_value(self.tree, element, PropertyId::BackgroundColor)
    }

    /// Background color as hex, with an explicit invalid result
    pub fn background_hex(&self, element: NodeId) -> HexColor {
        rgb_to_hex(&self.computed_background(element).to_css_string())
    }

    /// Background color as a label: hex (`""` if it cannot be converted) when
    /// `hex` is set, otherwise the raw `rgb(...)` string
    pub fn background_color(&self, element: NodeId, hex: bool) -> String {
        if hex {
            self.background_hex(element).into_string()
        } else {
            self.computed_background(element).to_css_string()
        }
    }
}
