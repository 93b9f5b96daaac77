use ::std::fmt;
use ::std::ops::{Add, Div, Mul, Neg, Sub};
use common_types::Generate::Rendering;
use num_rational::Ratio;
use num_traits::{CheckedDiv, Signed, Zero};
use serde::{Deserialize, Serialize};

/// Exact rational number. `Ratio` keeps it in lowest terms with a positive
/// denominator, this layer adds checked construction and the two rendering
/// conventions.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Fraction(Ratio<i64>);

impl Fraction {
    pub const ZERO: Fraction = Fraction(Ratio::new_raw(0, 1));
    pub const ONE: Fraction = Fraction(Ratio::new_raw(1, 1));

    /// Reduces `numerator / denominator`. Panics when `denominator` is zero,
    /// use [`Fraction::checked_new`] when the denominator comes from a draw.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self(Ratio::new(numerator, denominator))
    }

    pub fn checked_new(numerator: i64, denominator: i64) -> Option<Self> {
        (denominator != 0).then(|| Self::new(numerator, denominator))
    }

    pub fn from_integer(value: i64) -> Self {
        Self(Ratio::from_integer(value))
    }

    pub fn numerator(&self) -> i64 {
        *self.0.numer()
    }
    pub fn denominator(&self) -> i64 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn to_integer(&self) -> Option<i64> {
        self.is_integer().then(|| self.0.to_integer())
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn recip(self) -> Option<Self> {
        (!self.is_zero()).then(|| Self(self.0.recip()))
    }

    pub fn checked_div(self, other: Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        CheckedDiv::checked_div(&self.0, &other.0).map(Self)
    }

    /// Raises to an integer power, `None` on overflow or `0^-k`.
    pub fn pow(self, exponent: i64) -> Option<Self> {
        let magnitude = usize::try_from(exponent.unsigned_abs()).ok()?;
        let raised = Self(num_traits::checked_pow(self.0, magnitude)?);
        if exponent < 0 {
            raised.recip()
        } else {
            Some(raised)
        }
    }

    pub fn to_latex(&self) -> String {
        if self.is_integer() {
            return self.numerator().to_string();
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!(r#"{sign}\frac{{{}}}{{{}}}"#, self.numerator().abs(), self.denominator())
    }

    pub fn to_plain(&self) -> String {
        if self.is_integer() {
            return self.numerator().to_string();
        }
        format!("{}/{}", self.numerator(), self.denominator())
    }

    pub fn render(&self, rendering: Rendering) -> String {
        match rendering {
            Rendering::Plain => self.to_plain(),
            Rendering::Math => self.to_latex(),
        }
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_plain())
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Self) -> Self::Output {
        Fraction(self.0 + rhs.0)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Self) -> Self::Output {
        Fraction(self.0 - rhs.0)
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Self) -> Self::Output {
        Fraction(self.0 * rhs.0)
    }
}

impl Div for Fraction {
    type Output = Fraction;

    // Panics on division by zero, like integer division does.
    fn div(self, rhs: Self) -> Self::Output {
        Fraction(self.0 / rhs.0)
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Self::Output {
        Fraction(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_and_moves_sign_to_numerator() {
        let f = Fraction::new(6, -8);
        assert_eq!((f.numerator(), f.denominator()), (-3, 4));
        assert_eq!(Fraction::new(0, -5), Fraction::ZERO);
        assert!(Fraction::checked_new(1, 0).is_none());
    }

    #[test]
    fn arithmetic_stays_in_lowest_terms() {
        let half = Fraction::new(1, 2);
        let third = Fraction::new(1, 3);
        assert_eq!(half + third, Fraction::new(5, 6));
        assert_eq!(half - third, Fraction::new(1, 6));
        assert_eq!(half * Fraction::new(2, 3), third);
        assert_eq!(half / Fraction::new(1, 4), Fraction::from_integer(2));
        assert!(half.checked_div(Fraction::ZERO).is_none());
    }

    #[test]
    fn pow_handles_negative_exponents() {
        assert_eq!(Fraction::from_integer(2).pow(3), Some(Fraction::from_integer(8)));
        assert_eq!(Fraction::from_integer(2).pow(-3), Some(Fraction::new(1, 8)));
        assert_eq!(Fraction::new(3, 2).pow(2), Some(Fraction::new(9, 4)));
        assert_eq!(Fraction::ZERO.pow(-1), None);
    }

    #[test]
    fn pow_reports_overflow() {
        assert_eq!(Fraction::from_integer(10).pow(30), None);
        assert_eq!(Fraction::new(1, 3).pow(-50), None);
    }

    #[test]
    fn ordering_and_integer_views() {
        assert!(Fraction::new(-1, 2) < Fraction::new(1, 3));
        assert!(Fraction::new(2, 3) > Fraction::new(3, 5));
        assert_eq!(Fraction::new(7, 2).to_integer(), None);
        assert_eq!(Fraction::new(-8, 4).to_integer(), Some(-2));
    }

    #[test]
    fn renders_per_convention() {
        assert_eq!(Fraction::new(-1, 8).to_latex(), r#"-\frac{1}{8}"#);
        assert_eq!(Fraction::new(3, 4).to_plain(), "3/4");
        assert_eq!(Fraction::new(4, 2).to_latex(), "2");
    }
}
