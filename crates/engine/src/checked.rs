//! Overflow-checked decimal arithmetic.
//!
//! Derived values that would overflow `Decimal` are not written; the
//! previous value stays in place, the same as for incomplete inputs.

use rust_decimal::Decimal;
use tracing::debug;

/// Sum of `values`, or `None` if any partial sum overflows.
pub(crate) fn sum<I>(values: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Log when a derived value overflowed.
pub(crate) fn or_skip(value: Option<Decimal>, field: &'static str) -> Option<Decimal> {
    if value.is_none() {
        debug!(field, "Decimal overflow, value left unchanged");
    }
    value
}
