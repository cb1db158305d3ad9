//! Fixed-point currency value type
//!
//! Money is stored as a signed count of cents. Values are constructed from a
//! dollars part and a cents part; the cents part must lie in 0..=99 and the
//! sign of the dollars part determines the sign of the combined value.

use crate::types::error::MoneyError;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// An amount of currency, held as a signed number of cents
///
/// Money is `Copy`: handing a value across an interface boundary always hands
/// an independent copy, so a caller can never mutate another party's balance
/// through a returned amount.
///
/// Equality and ordering compare the signed cent count. Arithmetic operates
/// on the cent count directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Zero dollars, zero cents.
    pub const ZERO: Money = Money { cents: 0 };

    /// Create a Money value from whole dollars
    ///
    /// Infallible counterpart to [`Money::from_parts`] for amounts with no
    /// cents component. Saturates at the representable extremes.
    pub fn from_dollars(dollars: i64) -> Self {
        Money {
            cents: dollars.saturating_mul(100),
        }
    }

    /// Create a Money value from a dollars part and a cents part
    ///
    /// A negative amount is expressed with a negative dollars part; the cents
    /// part is always the non-negative minor-unit count. For example,
    /// `from_parts(-5, 25)` represents -5.25.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidCents`] if `cents` is outside 0..=99, or
    /// [`MoneyError::Overflow`] if the combined amount does not fit in the
    /// signed cent count. The dollars field of a parsed command has no digit
    /// limit, so overflow is an ordinary per-command input error here.
    pub fn from_parts(dollars: i64, cents: i64) -> Result<Self, MoneyError> {
        if !(0..=99).contains(&cents) {
            return Err(MoneyError::InvalidCents { cents });
        }

        let whole = dollars.checked_mul(100).ok_or(MoneyError::Overflow)?;
        let cents = if dollars < 0 {
            whole.checked_sub(cents)
        } else {
            whole.checked_add(cents)
        }
        .ok_or(MoneyError::Overflow)?;
        Ok(Money { cents })
    }

    /// Parse a Money value from its two textual fields
    ///
    /// `dollars` is an optionally signed integer, `cents` a 1-2 digit
    /// minor-unit count, as they appear as separate command tokens.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Malformed`] if either field fails to parse as an
    /// integer, [`MoneyError::InvalidCents`] if the cents field is out of
    /// range, or [`MoneyError::Overflow`] if the amount does not fit.
    pub fn from_strs(dollars: &str, cents: &str) -> Result<Self, MoneyError> {
        let malformed = || MoneyError::Malformed {
            text: format!("{dollars}.{cents}"),
        };
        let dollars: i64 = dollars.parse().map_err(|_| malformed())?;
        let cents: i64 = cents.parse().map_err(|_| malformed())?;
        Money::from_parts(dollars, cents)
    }

    /// The dollars part; negative for negative amounts.
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// The cents part; negative for negative amounts.
    pub fn cents(&self) -> i64 {
        self.cents % 100
    }

    /// The full amount as a signed cent count.
    pub fn total_cents(&self) -> i64 {
        self.cents
    }

    /// True if this value represents a negative amount of money.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }
}

// Balance arithmetic saturates rather than wrapping or panicking: amounts
// large enough to overflow are rejected at construction, so saturation is
// only reachable by accumulating near the representable extremes.
impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money {
            cents: self.cents.saturating_add(other.cents),
        }
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money {
            cents: self.cents.saturating_sub(other.cents),
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.cents = self.cents.saturating_add(other.cents);
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.cents = self.cents.saturating_sub(other.cents);
    }
}

impl fmt::Display for Money {
    /// Renders the amount as `dollars.cc`, e.g. `100.50` or `-5.25`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents().abs()
        )
    }
}
