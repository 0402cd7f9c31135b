//! Core domain types.

use crate::constants::CARD_ID_LENGTH;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated proximity-card identifier.
///
/// Exactly [`CARD_ID_LENGTH`] uppercase hexadecimal characters. Construction
/// goes through [`CardId::parse`], which trims surrounding whitespace and
/// upper-cases the input before validating, so a `CardId` held anywhere in
/// the system is always in canonical form.
///
/// # Examples
///
/// ```
/// use vport_core::CardId;
///
/// let id = CardId::parse("abcdef78").unwrap();
/// assert_eq!(id.as_str(), "ABCDEF78");
///
/// assert!(CardId::parse("ABCDEF7").is_err());   // too short
/// assert!(CardId::parse("ABCDEFGH").is_err());  // not hex
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    /// Parse and canonicalize a card identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCardId`] if the trimmed input is not exactly
    /// 8 characters or contains anything outside `0-9A-F` (case-insensitive).
    pub fn parse(raw: &str) -> Result<Self> {
        let candidate = raw.trim().to_ascii_uppercase();

        if candidate.len() != CARD_ID_LENGTH {
            return Err(Error::InvalidCardId(format!(
                "expected {} characters, got {} in {:?}",
                CARD_ID_LENGTH,
                candidate.len(),
                raw
            )));
        }

        if !candidate.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidCardId(format!(
                "non-hex character in {:?}",
                candidate
            )));
        }

        Ok(Self(candidate))
    }

    /// The canonical uppercase-hex form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CardId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.0
    }
}
