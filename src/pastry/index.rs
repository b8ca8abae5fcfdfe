//! # Index Resolution
//!
//! Snippets are addressed by position, and clients send positions as loose
//! tokens on the command port. This module turns such a token into a concrete
//! position in the current collection, or rejects it.
//!
//! ## Token Forms
//!
//! | Token      | Meaning                                  |
//! |------------|------------------------------------------|
//! | (none)     | the newest snippet (`len - 1`)           |
//! | `3`, `+3`  | absolute position, must be `< len`       |
//! | `-1`, `-2` | offset from the end (`len + v`)          |
//! | `0`, `-0`  | both rules apply and both give the same  |
//!
//! Anything else (words, overflowing numbers) is out of bounds.
//!
//! Positions are never clamped: a client holding a stale index after a drop
//! gets an error instead of a neighbouring snippet.

use crate::error::{PastryError, Result};
use std::str::FromStr;

/// A parsed, not yet bounds-checked, index token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexArg {
    Newest,
    Offset(i64),
}

impl FromStr for IndexArg {
    type Err = PastryError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<i64>()
            .map(IndexArg::Offset)
            .map_err(|_| PastryError::OutOfBounds(s.to_string()))
    }
}

impl IndexArg {
    /// Parses an optional token; a missing token means the newest snippet.
    pub fn parse(token: Option<&str>) -> Result<Self> {
        match token {
            None => Ok(IndexArg::Newest),
            Some(raw) => raw.parse(),
        }
    }

    /// Maps the argument onto a collection of `len` snippets.
    pub fn resolve(self, len: usize) -> Result<usize> {
        let resolved = match self {
            IndexArg::Newest => len.checked_sub(1),
            IndexArg::Offset(v) => {
                let len_i = i64::try_from(len).unwrap_or(i64::MAX);
                if v >= 0 && v < len_i {
                    Some(v as usize)
                } else if v <= 0 && len_i.checked_add(v).is_some_and(|i| i >= 0) {
                    Some((len_i + v) as usize)
                } else {
                    None
                }
            }
        };

        // `0` satisfies the offset rule on an empty collection, so re-check.
        resolved
            .filter(|&i| i < len)
            .ok_or_else(|| PastryError::OutOfBounds(self.to_string()))
    }
}

impl std::fmt::Display for IndexArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexArg::Newest => write!(f, "<newest>"),
            IndexArg::Offset(v) => write!(f, "{}", v),
        }
    }
}

/// Resolves a raw client token against a collection of `len` snippets.
pub fn resolve_index(token: Option<&str>, len: usize) -> Result<usize> {
    IndexArg::parse(token)?.resolve(len)
}
