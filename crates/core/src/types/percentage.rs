//! Percentage values using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A percentage expressed in percent units (`15` means 15%).
///
/// Used for profit margins and loss rates. Values are not clamped: a loss
/// rate above 100% or a negative margin is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// The profit margin applied when a cost sheet leaves it unset.
    pub const DEFAULT_PROFIT: Self = Self(Decimal::from_parts(15, 0, 0, false, 0));

    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new percentage from percent units.
    #[must_use]
    pub const fn new(percent: Decimal) -> Self {
        Self(percent)
    }

    /// The value in percent units.
    #[must_use]
    pub const fn percent(self) -> Decimal {
        self.0
    }

    /// The value as a fraction (`15%` -> `0.15`).
    #[must_use]
    pub fn fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// `amount × percent / 100`, or `None` if the result overflows.
    #[must_use]
    pub fn of(self, amount: Decimal) -> Option<Decimal> {
        amount.checked_mul(self.fraction())
    }

    /// `amount × (1 + percent / 100)`, or `None` if the result overflows.
    #[must_use]
    pub fn grow(self, amount: Decimal) -> Option<Decimal> {
        Decimal::ONE
            .checked_add(self.fraction())?
            .checked_mul(amount)
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Percentage {
    fn from(percent: Decimal) -> Self {
        Self(percent)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl std::str::FromStr for Percentage {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        trimmed.parse::<Decimal>().map(Self)
    }
}
