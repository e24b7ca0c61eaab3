use crate::error::WaterfallError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Number of decimal places every reported amount is rounded to.
pub const CENTS_DP: u32 = 2;

/// Rounds to whole cents, half-up (midpoint away from zero).
///
/// The result always carries exactly two decimal places so that serialized
/// amounts read `1200.00` rather than `1200`.
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CENTS_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CENTS_DP);
    rounded
}

/// A currency amount held at cent precision.
///
/// Every constructor rounds through [`round2`], so two `Money` values can be
/// added or subtracted without ever carrying sub-cent fractions into a
/// reported field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::from_parts(0, 0, 0, false, CENTS_DP));

    /// Rounds `value` to cents. Negative values are kept; use
    /// [`Money::non_negative`] where the sign is part of the contract.
    pub fn new(value: Decimal) -> Self {
        Self(round2(value))
    }

    /// Rounds `value` to cents and rejects anything below zero.
    pub fn non_negative(value: Decimal) -> Result<Self, WaterfallError> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(WaterfallError::InvalidInput(format!(
                "amount must be non-negative, got {value}"
            )))
        } else {
            Ok(Self::new(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Subtraction floored at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        if rhs >= self { Self::ZERO } else { self - rhs }
    }

    /// `self * numerator / denominator`, rounded once at the end.
    ///
    /// When the intermediate product would overflow, the ratio is taken
    /// first instead; results beyond the representable range saturate.
    pub fn scale(self, numerator: Decimal, denominator: Decimal) -> Self {
        if denominator.is_zero() {
            return Self::ZERO;
        }
        let value = self
            .0
            .checked_mul(numerator)
            .and_then(|product| product.checked_div(denominator))
            .unwrap_or_else(|| match numerator.checked_div(denominator) {
                Some(ratio) => self.0.saturating_mul(ratio),
                None => Decimal::MAX,
            });
        Self::new(value)
    }

    /// `count` copies of this amount, saturating at the largest `Decimal`.
    pub fn times(self, count: u32) -> Self {
        Self::new(self.0.saturating_mul(Decimal::from(count)))
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Money {
    type Error = WaterfallError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::non_negative(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::non_negative(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
