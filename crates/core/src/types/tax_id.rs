//! National tax identifier (CPF for individuals, CNPJ for organizations).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TaxId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxIdError {
    /// The input string is empty.
    #[error("tax id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("tax id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A tax document number, unique within its specialization table.
///
/// The value is kept exactly as typed (minus surrounding whitespace) because
/// it is echoed back as the client's displayed document. Check-digit
/// validation is deliberately not performed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    /// Longest accepted document, with room for CNPJ punctuation.
    pub const MAX_LENGTH: usize = 32;

    /// Parse a `TaxId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or too long.
    pub fn parse(s: &str) -> Result<Self, TaxIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TaxIdError::Empty);
        }
        if s.chars().count() > Self::MAX_LENGTH {
            return Err(TaxIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the tax id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
