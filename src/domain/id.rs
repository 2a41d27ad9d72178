use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Number of base62 characters in a textual catalog id.
pub const ID_LENGTH: usize = 22;

const BASE62: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Represents the stable catalog id of a track, album, artist or playlist.
///
/// The id is a 128-bit value. Its textual form is always exactly
/// [`ID_LENGTH`] base62 characters, most significant digit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct CatalogId(pub u128);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("catalog id must be 22 characters long, got {0}")]
    Length(usize),

    #[error("invalid base62 character {0:?} in catalog id")]
    Character(char),

    #[error("catalog id does not fit in 128 bits")]
    Overflow,
}

impl CatalogId {
    /// Derives a stable id from arbitrary bytes.
    ///
    /// Used for fixture entries that don't carry an explicit id.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let hash = blake3::hash(bytes);
        let mut head = [0u8; 16];
        head.copy_from_slice(&hash.as_bytes()[..16]);
        Self(u128::from_be_bytes(head))
    }

    pub fn from_base62(s: &str) -> Result<Self, IdError> {
        let length = s.chars().count();
        if length != ID_LENGTH {
            return Err(IdError::Length(length));
        }

        s.chars()
            .try_fold(0u128, |acc, c| {
                let digit = base62_digit(c).ok_or(IdError::Character(c))?;
                acc.checked_mul(62)
                    .and_then(|acc| acc.checked_add(u128::from(digit)))
                    .ok_or(IdError::Overflow)
            })
            .map(Self)
    }

    /// Base62 digits of the id, zero padded to [`ID_LENGTH`].
    pub fn base62_digits(&self) -> [u8; ID_LENGTH] {
        let mut digits = [b'0'; ID_LENGTH];
        let mut value = self.0;
        // 62^22 > 2^128, so the value is always exhausted within ID_LENGTH digits
        for slot in digits.iter_mut().rev() {
            *slot = BASE62[(value % 62) as usize];
            value /= 62;
        }
        digits
    }

    pub fn to_base62(&self) -> String {
        self.base62_digits().iter().map(|&b| char::from(b)).collect()
    }
}

fn base62_digit(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'a'..='z' => Some(c as u8 - b'a' + 10),
        'A'..='Z' => Some(c as u8 - b'A' + 36),
        _ => None,
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base62())
    }
}

impl FromStr for CatalogId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base62(s)
    }
}

impl TryFrom<String> for CatalogId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_base62(&s)
    }
}
