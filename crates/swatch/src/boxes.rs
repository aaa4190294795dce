//! Box construction
//!
//! A box is a `div` tagged with palette classes: `fill_primary__<code>` for
//! its fill, and a `color_primary__<weight>` foreground picked for contrast.

use swatch_dom::{DomTree, ElementData, NodeId};

/// Palette color code (weight), e.g. 50, 100, ... 900
pub type ColorCode = i32;

/// Codes at or below this weight are light fills
pub const CONTRAST_THRESHOLD: ColorCode = 400;
/// Foreground weight used on light fills
pub const DARK_FRONT: ColorCode = 900;
/// Foreground weight used on dark fills
pub const LIGHT_FRONT: ColorCode = 200;

/// Base class every box carries
pub const BOX_CLASS: &str = "box";

/// Foreground weight that contrasts with `clr`
pub fn front_weight(clr: ColorCode) -> ColorCode {
    if clr <= CONTRAST_THRESHOLD {
        DARK_FRONT
    } else {
        LIGHT_FRONT
    }
}

pub fn fill_class(clr: ColorCode) -> String {
    format!("fill_primary__{clr}")
}

pub fn front_class(clr: ColorCode) -> String {
    format!("color_primary__{}", front_weight(clr))
}

/// Create a box for `clr` and append it to `container`, if given.
///
/// Always returns the new box. Codes outside the palette are accepted; their
/// classes simply match no rule. If the container cannot take the box it is
/// left detached.
pub fn create_box(tree: &mut DomTree, clr: ColorCode, container: Option<NodeId>) -> NodeId {
    let mut element = ElementData::new("div");
    element.add_class(BOX_CLASS);
    element.add_class(&fill_class(clr));
    element.add_class(&front_class(clr));
    let div = tree.insert_element(element);

    if let Some(container) = container {
        if let Err(e) = tree.append_child(container, div) {
            tracing::warn!("Box for color {} left detached: {}", clr, e);
        }
    }
    div
}
