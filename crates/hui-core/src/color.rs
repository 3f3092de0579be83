//! # Colors
//!
//! Line, fill, and label colors are strings in a small CSS-like grammar:
//!
//! - `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (hex, either case)
//! - `rgb(255, 255, 255)`
//! - `rgba(255, 255, 255, 0.5)`; the alpha may be written `1`, `.5` or `0.5`
//!
//! Whitespace is allowed after commas only, matching the host's color
//! pattern exactly so the typed model and the schema agree.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated color string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Create a color from a string, validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidColor`] if the string is not one of
    /// the accepted forms.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Self::is_valid(&s) {
            return Err(ValidationError::InvalidColor(s));
        }
        Ok(Self(s))
    }

    /// Check the color format without constructing.
    pub fn is_valid(s: &str) -> bool {
        if let Some(hex) = s.strip_prefix('#') {
            return matches!(hex.len(), 3 | 4 | 6 | 8)
                && hex.chars().all(|c| c.is_ascii_hexdigit());
        }
        if let Some(body) = s.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return parse_channels(body, true);
        }
        if let Some(body) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return parse_channels(body, false);
        }
        false
    }

    /// Access the color string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parse `d+, d+, d+` and, with `alpha`, a trailing `, <alpha>`.
fn parse_channels(body: &str, alpha: bool) -> bool {
    let parts: Vec<&str> = body.split(',').collect();
    let expected = if alpha { 4 } else { 3 };
    if parts.len() != expected {
        return false;
    }
    for (i, part) in parts.iter().enumerate() {
        // Only the separator side may carry whitespace.
        let part = if i == 0 {
            *part
        } else {
            part.trim_start()
        };
        let ok = if alpha && i == 3 {
            is_alpha(part)
        } else {
            is_digits(part)
        };
        if !ok {
            return false;
        }
    }
    true
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `(\d?\.)?\d+`
fn is_alpha(s: &str) -> bool {
    let bytes = s.as_bytes();
    let fraction_start = match bytes {
        [d, b'.', ..] if d.is_ascii_digit() => 2,
        [b'.', ..] => 1,
        _ => 0,
    };
    is_digits(&s[fraction_start..])
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
