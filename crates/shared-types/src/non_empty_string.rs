// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation utilities
//!
//! This module provides [`NonEmptyString`], a wrapper type that guarantees string validity
//! through Rust's type system. Swap detail attributes such as `brand` and `channel` are
//! stored as `NonEmptyString`, so a record can never hold a blank value once constructed.
//!
//! # Examples
//!
//! ```rust
//! use shared_types::NonEmptyString;
//!
//! let channel = NonEmptyString::new("offline").expect("valid channel");
//! assert_eq!(channel.as_str(), "offline");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new("   \t\n  ").is_err());
//! ```
//!
//! # Serialization
//!
//! `NonEmptyString` serializes as a plain JSON string. Deserialization applies the same
//! validation as [`NonEmptyString::new`], so blank strings are rejected at the boundary.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A non-empty string wrapper that ensures validity at construction
///
/// This type guarantees that the contained string:
/// - Is not empty (length > 0)
/// - Contains at least one non-whitespace character
/// - Is immutable after construction
///
/// Uses `Box<str>` internally for memory efficiency and immutability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Create a new `NonEmptyString` from any string-like input
    ///
    /// # Validation Rules
    ///
    /// - Empty strings (`""`) are rejected
    /// - Whitespace-only strings (`"   "`, `"\t\n"`) are rejected
    /// - Strings with leading/trailing whitespace are accepted as-is
    ///
    /// # Errors
    ///
    /// Returns a descriptive message if the string is empty or whitespace-only.
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(s.into_boxed_str()))
        }
    }

    /// Create a `NonEmptyString` from the trimmed form of the input
    ///
    /// # Errors
    ///
    /// Returns a descriptive message if nothing is left after trimming.
    pub fn trimmed(s: &str) -> Result<Self, String> {
        Self::new(s.trim())
    }

    /// Get a string slice of the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for NonEmptyString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_input() {
        assert!(NonEmptyString::new("").is_err());
        assert!(NonEmptyString::new("  ").is_err());
        assert!(NonEmptyString::trimmed("\t\n").is_err());
    }

    #[test]
    fn trimmed_strips_surrounding_whitespace() {
        let value = NonEmptyString::trimmed("  offline ").unwrap();
        assert_eq!(value.as_str(), "offline");

        let untouched = NonEmptyString::new("  offline ").unwrap();
        assert_eq!(untouched.as_str(), "  offline ");
    }

    #[test]
    fn serde_round_trip_validates() {
        let value: NonEmptyString = serde_json::from_str("\"online\"").unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"online\"");

        let blank: Result<NonEmptyString, _> = serde_json::from_str("\"   \"");
        assert!(blank.is_err());
    }
}
