use bigdecimal::{BigDecimal, ParseBigDecimalError, RoundingMode, ToPrimitive};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Number of minor units in one major unit (paise per rupee, cents per dollar).
const MINOR_UNITS: i64 = 100;
const DECIMAL_PLACES: i64 = 2;

/// A monetary amount held as a whole number of minor units.
///
/// Credit and payment amounts are compared and summed constantly when a
/// customer's outstanding balance is recomputed, so they are kept as integers
/// rather than floats. Text input goes through [`BigDecimal`] and is rounded
/// half-up to two decimal places (`"1.005"` is `1.01`). Parsed amounts are
/// bounded by [`Money::MAX`].
///
/// # Examples
/// ```
/// use credit_ledger::common::money::Money;
///
/// let amount: Money = "499.5".parse().unwrap();
/// assert_eq!(amount.as_minor(), 49_950);
/// assert_eq!(amount.to_string(), "499.50");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    /// Largest single amount accepted from text: `99999999999.99`.
    pub const MAX: Money = Money(9_999_999_999_999);

    pub fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Whole major units, e.g. `Money::from_major(500)` is `500.00`.
    pub fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(MINOR_UNITS))
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn as_minor(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn to_string_2dp(&self) -> String {
        let bd = (BigDecimal::from(self.0) / BigDecimal::from(MINOR_UNITS)).with_scale(DECIMAL_PLACES);
        bd.to_string()
    }
}

impl FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;
        let scaled = (bd * BigDecimal::from(MINOR_UNITS)).with_scale_round(0, RoundingMode::HalfUp);
        let minor = scaled
            .to_i64()
            .filter(|m| m.unsigned_abs() <= Money::MAX.0.unsigned_abs())
            .ok_or_else(|| {
                ParseBigDecimalError::Other(format!("amount out of range (max {})", Money::MAX))
            })?;

        Ok(Money(minor))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}
