//! Fuel unit prices held as whole cents.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors returned when parsing or converting a [`UnitPrice`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The text was not a non-negative decimal number.
    #[error("expected a non-negative decimal price, found {input:?}")]
    Malformed {
        /// The rejected input.
        input: String,
    },
    /// The amount was negative, NaN or infinite.
    #[error("price must be a finite, non-negative amount")]
    OutOfRange,
}

/// Price of one fuel unit, stored as an integer number of cents.
///
/// Ordering compares the exact cent amount, which keeps price-based
/// tie-breaking free of floating-point noise.
///
/// # Examples
///
/// ```
/// use fuelroute_core::UnitPrice;
///
/// # fn main() -> Result<(), fuelroute_core::PriceError> {
/// let price: UnitPrice = "3.459".parse()?;
/// assert_eq!(price.cents(), 346);
/// assert_eq!(price.to_string(), "3.46");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct UnitPrice(u32);

impl UnitPrice {
    /// Construct a price from whole cents.
    #[must_use]
    pub const fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    /// The price in whole cents.
    #[must_use]
    pub const fn cents(self) -> u32 {
        self.0
    }

    /// The price in currency units.
    #[must_use]
    pub fn amount(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for UnitPrice {
    type Err = PriceError;

    /// Parse decimal text, rounding half-up to two decimal places.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PriceError::Malformed {
            input: s.to_owned(),
        };
        let trimmed = s.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction)
        {
            return Err(malformed());
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| malformed())?
        };
        let mut digits = fraction.bytes().map(|b| u64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + u64::from(round_up)))
            .ok_or(PriceError::OutOfRange)?;
        u32::try_from(cents)
            .map(Self)
            .map_err(|_| PriceError::OutOfRange)
    }
}

impl TryFrom<f64> for UnitPrice {
    type Error = PriceError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents < 0.0 || cents > f64::from(u32::MAX) {
            return Err(PriceError::OutOfRange);
        }
        // Whole number within u32 range, checked above.
        Ok(Self(cents as u32))
    }
}

impl From<UnitPrice> for f64 {
    fn from(price: UnitPrice) -> Self {
        price.amount()
    }
}
