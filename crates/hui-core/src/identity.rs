//! # Element Identifiers
//!
//! Newtype wrapper for annotation element identifiers. The host stores
//! elements under database object ids: 24 lowercase hex characters.
//! Validated at construction, so an `ElementId` in hand is always
//! well-formed.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of hex characters in an element id.
pub const ELEMENT_ID_LEN: usize = 24;

/// Identifier of a single annotation element.
///
/// # Validation
///
/// - Exactly 24 characters
/// - Only `0-9` and `a-f` (uppercase hex is rejected)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementId(String);

impl ElementId {
    /// Create an element id from a string, validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidElementId`] if the string is not
    /// 24 lowercase hex characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Self::is_valid(&s) {
            return Err(ValidationError::InvalidElementId(s));
        }
        Ok(Self(s))
    }

    /// Check the id format without constructing.
    pub fn is_valid(s: &str) -> bool {
        s.len() == ELEMENT_ID_LEN
            && s.chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    /// Access the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ElementId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
