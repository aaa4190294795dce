//! Swatch
//!
//! Renders a row of palette boxes into a document and labels each box with
//! its computed background color in hexadecimal.
//!
//! # Example
//! ```rust
//! use swatch::{Config, Page};
//!
//! let mut page = Page::new(&Config::default()).unwrap();
//! let boxes = page.render(&[100, 900], true).unwrap();
//! assert_eq!(page.label(boxes[1]), "#0D47A1");
//! ```

pub mod boxes;
pub mod convert;
mod config;
mod inspect;
mod page;

pub use boxes::{ColorCode, create_box};
pub use config::{Config, ConfigError};
pub use convert::{ColorError, HexColor, Rgb, parse_rgb, rgb_to_hex};
pub use inspect::StyleInspector;
pub use page::{DEFAULT_PALETTE, Page, PageError};

// Re-export sub-crates for advanced usage
pub use swatch_css as css;
pub use swatch_dom as dom;

/// Swatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
