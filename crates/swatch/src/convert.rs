//! RGB to hexadecimal color conversion
//!
//! Input is whatever a computed-style query reports, e.g. `rgb(30, 136, 229)`.
//! Exactly three integer components in 0..=255 are accepted; everything else
//! (wrong count, negative or oversized numbers, an alpha channel) is invalid.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Signed ASCII integer runs; the sign is kept so `-1` is rejected as out of range
static COMPONENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?[0-9]+").unwrap());

/// Validated RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `#RRGGBB`, uppercase
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Malformed color input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("expected 3 color components, found {0}")]
    ComponentCount(usize),
    #[error("color component {0} is outside 0..=255")]
    OutOfRange(String),
}

/// Parse an `rgb(r, g, b)` string into its components
pub fn parse_rgb(rgb: &str) -> Result<Rgb, ColorError> {
    let groups: Vec<&str> = COMPONENT.find_iter(rgb).map(|m| m.as_str()).collect();
    let [r, g, b] = groups[..] else {
        return Err(ColorError::ComponentCount(groups.len()));
    };

    let component = |text: &str| {
        text.parse::<i64>()
            .ok()
            .and_then(|value| u8::try_from(value).ok())
            .ok_or_else(|| ColorError::OutOfRange(text.to_string()))
    };
    Ok(Rgb {
        r: component(r)?,
        g: component(g)?,
        b: component(b)?,
    })
}

/// Result of a fail-soft conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexColor {
    /// `#RRGGBB`
    Hex(String),
    /// The input was malformed. Displays as an empty label.
    Invalid,
}

impl HexColor {
    /// The hex string, or `""` when invalid
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hex(hex) => hex,
            Self::Invalid => "",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Hex(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Hex(hex) => hex,
            Self::Invalid => String::new(),
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert an RGB color string to `#RRGGBB`.
///
/// Never fails: malformed input is reported on the error log and yields
/// [`HexColor::Invalid`].
pub fn rgb_to_hex(rgb: &str) -> HexColor {
    match parse_rgb(rgb) {
        Ok(color) => HexColor::Hex(color.to_hex()),
        Err(e) => {
            tracing::error!("Invalid RGB format {:?}: {}", rgb, e);
            HexColor::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// In-memory log sink shared with a scoped subscriber
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    #[test]
    fn test_known_colors() {
        assert_eq!(rgb_to_hex("rgb(255, 0, 0)").as_str(), "#FF0000");
        assert_eq!(rgb_to_hex("rgb(30, 136, 229)").as_str(), "#1E88E5");
        assert_eq!(rgb_to_hex("rgb(0,0,0)").as_str(), "#000000");
        assert_eq!(rgb_to_hex("rgb(13, 71, 161)").into_string(), "#0D47A1");
    }

    #[test]
    fn test_every_component_value() {
        for v in 0..=255u8 {
            let hex = rgb_to_hex(&format!("rgb({v},{v},{v})"));
            let expected = format!("{v:02X}");
            assert_eq!(hex.as_str().len(), 7);
            assert_eq!(hex.as_str(), format!("#{expected}{expected}{expected}"));
        }
    }

    #[test]
    fn test_component_order() {
        assert_eq!(rgb_to_hex("rgb(1, 2, 3)").as_str(), "#010203");
        assert_eq!(rgb_to_hex("rgb(171, 205, 239)").as_str(), "#ABCDEF");
    }

    #[test]
    fn test_wrong_component_count() {
        assert_eq!(rgb_to_hex("rgb(1,2)"), HexColor::Invalid);
        assert_eq!(rgb_to_hex("rgb(1,2,3,4)"), HexColor::Invalid);
        assert_eq!(rgb_to_hex("rgba(0, 0, 0, 0)").as_str(), "");
        assert_eq!(rgb_to_hex("transparent").as_str(), "");
        assert_eq!(parse_rgb(""), Err(ColorError::ComponentCount(0)));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(rgb_to_hex("rgb(256,0,0)"), HexColor::Invalid);
        assert_eq!(rgb_to_hex("rgb(-1,0,0)"), HexColor::Invalid);
        assert_eq!(
            parse_rgb("rgb(0, 99999999999999999999, 0)"),
            Err(ColorError::OutOfRange("99999999999999999999".into()))
        );
    }

    #[test]
    fn test_ascii_digits_only() {
        // Non-ASCII digits are not components
        assert_eq!(rgb_to_hex("rgb(\u{663}, 1, 2, 3)").as_str(), "#010203");
        assert_eq!(parse_rgb("rgb(\u{663}, 1, 2)"), Err(ColorError::ComponentCount(2)));
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(rgb_to_hex("rgb(-0, 0, 0)").as_str(), "#000000");
    }

    #[test]
    fn test_invalid_input_is_logged() {
        let (hex, logs) = with_captured_logs(|| rgb_to_hex("rgb(30, 136, 229)"));
        assert!(hex.is_valid());
        assert!(!logs.contains("Invalid RGB format"), "unexpected log: {logs}");

        let (hex, logs) = with_captured_logs(|| rgb_to_hex("rgb(1,2)"));
        assert_eq!(hex, HexColor::Invalid);
        assert!(logs.contains("ERROR"), "{logs}");
        assert!(logs.contains("Invalid RGB format"), "{logs}");
        assert!(logs.contains("rgb(1,2)"), "{logs}");

        let (hex, logs) = with_captured_logs(|| rgb_to_hex("rgb(256,0,0)"));
        assert_eq!(hex, HexColor::Invalid);
        assert!(logs.contains("Invalid RGB format"), "{logs}");
        assert!(logs.contains("256"), "{logs}");
    }

    #[test]
    fn test_repeatable() {
        let first = rgb_to_hex("rgb(66, 165, 245)");
        let second = rgb_to_hex("rgb(66, 165, 245)");
        assert_eq!(first, second);
        assert!(first.is_valid());
        assert!(!HexColor::Invalid.is_valid());
    }
}
