use serde::{Deserialize, Serialize};

use super::fraction::Fraction;

/// A monomial `coefficient * x^exponent`. Integrands are drawn with integer
/// coefficients, results of integration may carry rational ones.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    pub coefficient: Fraction,
    pub exponent: Fraction,
}

impl Term {
    pub fn new(coefficient: i64, exponent: Fraction) -> Self {
        Self { coefficient: Fraction::from_integer(coefficient), exponent }
    }
    pub fn power(coefficient: i64, exponent: i64) -> Self {
        Self::new(coefficient, Fraction::from_integer(exponent))
    }
    pub fn constant(value: i64) -> Self {
        Self::power(value, 0)
    }

    pub fn is_constant(&self) -> bool {
        self.exponent.is_zero()
    }

    pub fn negated(self) -> Self {
        Self { coefficient: -self.coefficient, exponent: self.exponent }
    }

    /// `None` when the term vanishes.
    pub fn differentiate(&self) -> Option<Term> {
        if self.is_constant() || self.coefficient.is_zero() {
            return None;
        }
        Some(Term {
            coefficient: self.coefficient * self.exponent,
            exponent: self.exponent - Fraction::ONE,
        })
    }

    /// `None` for `x^-1`, whose antiderivative is not a monomial.
    pub fn integrate(&self) -> Option<Term> {
        let raised = self.exponent + Fraction::ONE;
        if raised.is_zero() {
            return None;
        }
        Some(Term {
            coefficient: self.coefficient.checked_div(raised)?,
            exponent: raised,
        })
    }

    /// Only terms with a non-negative integer exponent evaluate to an exact
    /// value at an arbitrary integer.
    pub fn evaluate(&self, x: i64) -> Option<Fraction> {
        let exponent = self.exponent.to_integer().filter(|e| *e >= 0)?;
        Some(self.coefficient * Fraction::from_integer(x).pow(exponent)?)
    }
}

pub fn differentiate_all(terms: &[Term]) -> Vec<Term> {
    terms.iter().filter_map(Term::differentiate).collect()
}

pub fn integrate_all(terms: &[Term]) -> Option<Vec<Term>> {
    terms.iter().map(Term::integrate).collect()
}

pub fn evaluate_all(terms: &[Term], x: i64) -> Option<Fraction> {
    terms
        .iter()
        .try_fold(Fraction::ZERO, |sum, term| Some(sum + term.evaluate(x)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_rule_both_directions() {
        let cubic = Term::power(1, 3);
        assert_eq!(cubic.differentiate(), Some(Term::power(3, 2)));
        assert_eq!(Term::power(3, 2).integrate(), Some(cubic));
        assert_eq!(Term::constant(7).differentiate(), None);
    }

    #[test]
    fn integrate_rejects_reciprocal() {
        assert_eq!(Term::power(2, -1).integrate(), None);
        let root = Term::new(3, Fraction::new(1, 2));
        let integrated = root.integrate().unwrap();
        assert_eq!(integrated.coefficient, Fraction::from_integer(2));
        assert_eq!(integrated.exponent, Fraction::new(3, 2));
    }

    #[test]
    fn evaluates_polynomials_exactly() {
        let terms = [Term::power(1, 2), Term::power(-3, 1), Term::constant(2)];
        assert_eq!(evaluate_all(&terms, 4), Some(Fraction::from_integer(6)));
        assert_eq!(evaluate_all(&[Term::power(1, -1)], 2), None);
    }
}
