//! Color tag attached to every node.
//!
//! # Responsibility
//! - Carry the persisted color string unchanged through load/save.
//! - Validate user-chosen colors before they reach the tree.
//!
//! # Invariants
//! - Deserialization never rejects a color string; persisted values are opaque.
//! - `Color::parse` only accepts color names (letters first, digits allowed,
//!   as in `gray50`) or `#rgb` / `#rrggbb` hex codes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Color assigned to freshly created nodes and to documents that omit one.
pub const DEFAULT_COLOR: &str = "white";

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex regex"));
static NAMED_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*(?: [A-Za-z0-9]+)*$").expect("valid color name regex"));

/// Rejected color input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColor(pub String);

impl Display for InvalidColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid color `{}`; expected a color name or #rgb/#rrggbb",
            self.0
        )
    }
}

impl Error for InvalidColor {}

/// Node color stored as its string encoding (`"white"`, `"#ffcc00"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parses user input into a color.
    ///
    /// Surrounding whitespace is ignored and hex codes are lowercased.
    pub fn parse(value: &str) -> Result<Self, InvalidColor> {
        let trimmed = value.trim();
        if HEX_COLOR_RE.is_match(trimmed) {
            return Ok(Self(trimmed.to_ascii_lowercase()));
        }
        if NAMED_COLOR_RE.is_match(trimmed) {
            return Ok(Self(trimmed.to_string()));
        }
        Err(InvalidColor(value.to_string()))
    }

    /// Returns the string encoding.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this color uses hex notation.
    pub fn is_hex(&self) -> bool {
        HEX_COLOR_RE.is_match(self.0.as_str())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(DEFAULT_COLOR.to_string())
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, DEFAULT_COLOR};

    #[test]
    fn default_is_white() {
        assert_eq!(Color::default().as_str(), DEFAULT_COLOR);
    }

    #[test]
    fn parse_accepts_names_and_hex() {
        assert_eq!(Color::parse(" light blue ").unwrap().as_str(), "light blue");
        assert_eq!(Color::parse("#FFCC00").unwrap().as_str(), "#ffcc00");
        assert!(Color::parse("#abc").unwrap().is_hex());
    }

    #[test]
    fn parse_accepts_numbered_color_names() {
        assert_eq!(Color::parse("gray50").unwrap().as_str(), "gray50");
        assert_eq!(Color::parse("LightBlue1").unwrap().as_str(), "LightBlue1");
        assert!(Color::parse("grey90").is_ok());
        assert!(Color::parse("50gray").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Color::parse("").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("red;drop").is_err());
    }

    #[test]
    fn deserialize_keeps_unvalidated_values() {
        let color: Color = serde_json::from_str("\"SystemButtonFace#1\"").unwrap();
        assert_eq!(color.as_str(), "SystemButtonFace#1");
    }
}
