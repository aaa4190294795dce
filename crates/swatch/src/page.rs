//! Page - document, palette styles and the box pipeline

use std::path::PathBuf;

use swatch_css::{CssError, StyleResolver, parse_stylesheet};
use swatch_dom::{Document, DomError, HtmlSerializer, NodeId};

use crate::boxes::{ColorCode, create_box};
use crate::inspect::StyleInspector;
use crate::Config;

/// Palette shipped with the binary
pub const DEFAULT_PALETTE: &str = include_str!("../assets/palette.css");

/// A page holding one container of color boxes
#[derive(Debug)]
pub struct Page {
    document: Document,
    styles: StyleResolver,
    container: NodeId,
}

impl Page {
    /// Build a page from configuration: load the palette, mount the
    /// container and look it up again by id
    pub fn new(config: &Config) -> Result<Self, PageError> {
        let css = match &config.stylesheet {
            Some(path) => std::fs::read_to_string(path).map_err(|source| PageError::Stylesheet {
                path: path.clone(),
                source,
            })?,
            None => DEFAULT_PALETTE.to_string(),
        };
        Self::with_stylesheet(&css, &config.container_id)
    }

    /// Build a page styled by `css` with an empty container `<div id=..>`
    pub fn with_stylesheet(css: &str, container_id: &str) -> Result<Self, PageError> {
        let mut styles = StyleResolver::new();
        styles.add_stylesheet(parse_stylesheet(css)?);

        let mut document = Document::new();
        let body = document.body();
        let tree = document.tree_mut();
        let mount = tree.create_element("div");
        tree.set_attribute(mount, "id", container_id)?;
        tree.append_child(body, mount)?;

        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| PageError::ContainerNotFound(container_id.to_string()))?;

        tracing::info!("Page ready, container #{}", container_id);
        Ok(Self { document, styles, container })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn styles(&self) -> &StyleResolver {
        &self.styles
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn inspector(&self) -> StyleInspector<'_> {
        StyleInspector::new(&self.styles, self.document.tree())
    }

    /// Create one box per color, appended to the container in order
    pub fn mount_boxes(&mut self, colors: &[ColorCode]) -> Vec<NodeId> {
        let container = self.container;
        let tree = self.document.tree_mut();
        colors
            .iter()
            .map(|&clr| create_box(tree, clr, Some(container)))
            .collect()
    }

    /// Write each box's background color into its text content
    pub fn label_boxes(&mut self, boxes: &[NodeId], hex: bool) -> Result<(), PageError> {
        let labels: Vec<String> = {
            let inspector = self.inspector();
            boxes.iter().map(|&b| inspector.background_color(b, hex)).collect()
        };

        let tree = self.document.tree_mut();
        for (&node, label) in boxes.iter().zip(&labels) {
            tree.set_text_content(node, label)?;
            tracing::debug!("Box {:?} labelled {:?}", node, label);
        }
        Ok(())
    }

    /// Mount and label boxes for `colors`
    pub fn render(&mut self, colors: &[ColorCode], hex: bool) -> Result<Vec<NodeId>, PageError> {
        let boxes = self.mount_boxes(colors);
        self.label_boxes(&boxes, hex)?;
        tracing::info!("Rendered {} boxes", boxes.len());
        Ok(boxes)
    }

    /// Label of a box (its text content)
    pub fn label(&self, node: NodeId) -> String {
        self.document.tree().text_content(node)
    }

    /// Pretty-printed markup of the container
    pub fn to_html(&self) -> String {
        HtmlSerializer::pretty().serialize_outer(self.document.tree(), self.container)
    }
}

/// Page construction error
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("failed to read stylesheet {}: {source}", path.display())]
    Stylesheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stylesheet error: {0}")]
    Css(#[from] CssError),

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("container #{0} not found")]
    ContainerNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_parses() {
        let page = Page::new(&Config::default()).unwrap();
        assert_eq!(page.styles().stylesheet_count(), 1);
        assert_eq!(page.document().get_element_by_id("app"), Some(page.container()));
    }

    #[test]
    fn test_missing_stylesheet_file() {
        let config = Config {
            stylesheet: Some(PathBuf::from("/nonexistent/palette.css")),
            ..Config::default()
        };
        assert!(matches!(Page::new(&config), Err(PageError::Stylesheet { .. })));
    }

    #[test]
    fn test_mount_then_label() {
        let mut page = Page::with_stylesheet(".fill_primary__500 { background-color: #2196f3; }", "row").unwrap();
        let boxes = page.mount_boxes(&[500]);
        assert_eq!(page.label(boxes[0]), "");

        page.label_boxes(&boxes, true).unwrap();
        assert_eq!(page.label(boxes[0]), "#2196F3");

        page.label_boxes(&boxes, false).unwrap();
        assert_eq!(page.label(boxes[0]), "rgb(33, 150, 243)");
    }

    #[test]
    fn test_to_html() {
        let mut page = Page::with_stylesheet(".fill_primary__100 { background: white; }", "app").unwrap();
        page.render(&[100], true).unwrap();
        assert_eq!(
            page.to_html(),
            "<div id=\"app\">\n  <div class=\"box fill_primary__100 color_primary__900\">#FFFFFF</div>\n</div>"
        );
    }
}
