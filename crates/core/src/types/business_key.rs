//! Business key type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`BusinessKey`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum BusinessKeyError {
    /// The input string is empty or whitespace.
    #[error("business key cannot be empty")]
    Empty,
}

/// A human-readable identifier combining customer and style number.
///
/// Derived as `"{customer}-{style_number}"` when both parts are known, or
/// the style number alone when the customer is not. All versions of one cost
/// sheet share a business key.
///
/// ## Examples
///
/// ```
/// use garment_costing_core::BusinessKey;
///
/// let key = BusinessKey::derive(Some("ABC"), Some("123")).unwrap();
/// assert_eq!(key.as_str(), "ABC-123");
///
/// let key = BusinessKey::derive(None, Some("123")).unwrap();
/// assert_eq!(key.as_str(), "123");
///
/// assert!(BusinessKey::derive(Some("ABC"), None).is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BusinessKey(String);

impl BusinessKey {
    /// Derive the key from its parts.
    ///
    /// Blank parts count as absent. Returns `None` when there is no style
    /// number.
    #[must_use]
    pub fn derive(customer: Option<&str>, style_number: Option<&str>) -> Option<Self> {
        let customer = customer.filter(|s| !s.trim().is_empty());
        let style_number = style_number.filter(|s| !s.trim().is_empty())?;

        Some(customer.map_or_else(
            || Self(style_number.to_owned()),
            |customer| Self(format!("{customer}-{style_number}")),
        ))
    }

    /// Parse a `BusinessKey` from a string entered manually.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessKeyError::Empty`] if the input is empty or whitespace.
    pub fn parse(s: &str) -> Result<Self, BusinessKeyError> {
        if s.trim().is_empty() {
            return Err(BusinessKeyError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BusinessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BusinessKey {
    type Err = BusinessKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for BusinessKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
