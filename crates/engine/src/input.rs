//! Interpretation of zero-valued numeric inputs.
//!
//! Absent inputs always skip a computation. What a literal zero means is a
//! policy decision: a zero unit price is a real price under
//! [`InputPolicy::Presence`], but is skipped like an empty field under
//! [`InputPolicy::Truthy`], which reproduces the legacy form behaviour.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How zero-valued numeric inputs are treated by the derivation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Zero is a present value and takes part in arithmetic.
    #[default]
    Presence,
    /// Zero is treated as absent (legacy falsy checks).
    Truthy,
}

impl InputPolicy {
    /// Filter an input through the policy.
    ///
    /// Returns `None` when the input must be treated as absent.
    #[must_use]
    pub fn accept(self, value: Option<Decimal>) -> Option<Decimal> {
        match self {
            Self::Presence => value,
            Self::Truthy => value.filter(|v| !v.is_zero()),
        }
    }
}

impl std::fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Presence => write!(f, "presence"),
            Self::Truthy => write!(f, "truthy"),
        }
    }
}

impl std::str::FromStr for InputPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "presence" => Ok(Self::Presence),
            "truthy" | "legacy" => Ok(Self::Truthy),
            _ => Err(format!("invalid input policy: {s} (expected presence or truthy)")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_presence_keeps_zero() {
        assert_eq!(InputPolicy::Presence.accept(Some(dec!(0))), Some(dec!(0)));
        assert_eq!(InputPolicy::Presence.accept(None), None);
    }

    #[test]
    fn test_truthy_drops_zero() {
        assert_eq!(InputPolicy::Truthy.accept(Some(dec!(0))), None);
        assert_eq!(InputPolicy::Truthy.accept(Some(dec!(0.00))), None);
        assert_eq!(InputPolicy::Truthy.accept(Some(dec!(2))), Some(dec!(2)));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Presence".parse::<InputPolicy>().unwrap(), InputPolicy::Presence);
        assert_eq!("legacy".parse::<InputPolicy>().unwrap(), InputPolicy::Truthy);
        assert!("maybe".parse::<InputPolicy>().is_err());
    }
}
