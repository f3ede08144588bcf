//! Type-safe price representation using decimal arithmetic.
//!
//! Shopify returns every amount as a decimal string with no guaranteed
//! precision ("12", "12.5", "12.50"). Arithmetic such as cart subtotals is
//! done in [`Decimal`] and display always rounds to two places.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of decimal places used for display.
const DISPLAY_SCALE: u32 = 2;

/// Error parsing an upstream decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid price amount: {0:?}")]
pub struct PriceError(pub String);

/// A monetary amount in the shop's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse an upstream decimal string.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the string is not a decimal number.
    pub fn parse(amount: &str) -> Result<Self, PriceError> {
        amount
            .trim()
            .parse::<Decimal>()
            .map(Self)
            .map_err(|_| PriceError(amount.to_owned()))
    }

    /// Parse an upstream decimal string, treating garbage as zero.
    #[must_use]
    pub fn parse_or_zero(amount: &str) -> Self {
        Self::parse(amount).unwrap_or(Self::ZERO)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line quantity, saturating at the decimal range.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map_or_else(|| self.saturated(), Self)
    }

    /// Round to display precision (half away from zero).
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// The range bound on this amount's side of zero.
    const fn saturated(self) -> Self {
        if self.0.is_sign_negative() {
            Self(Decimal::MIN)
        } else {
            Self(Decimal::MAX)
        }
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    /// Saturates at the decimal range; overflow only happens when both
    /// operands share a sign.
    fn add(self, rhs: Self) -> Self {
        self.0
            .checked_add(rhs.0)
            .map_or_else(|| self.saturated(), Self)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

/// Formats as `$12.50`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.rounded().0;
        rounded.rescale(DISPLAY_SCALE);
        write!(f, "${rounded}")
    }
}

/// Format an upstream decimal string for display.
///
/// Unparseable amounts are shown verbatim with a `$` prefix.
#[must_use]
pub fn format_price(amount: &str) -> String {
    Price::parse(amount).map_or_else(|_| format!("${amount}"), |p| p.to_string())
}
