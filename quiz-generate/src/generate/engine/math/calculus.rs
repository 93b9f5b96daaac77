use crate::generate::{
    engine::{ensure, Rejection},
    fraction::Fraction,
    term::Term,
};

pub mod definite_integral;
pub mod derivative;
pub mod integral;

/// Bound on the numerator and denominator of every coefficient a calculus
/// question shows.
pub const MAX_COEFFICIENT: i64 = 1000;

/// Terms ordered by falling exponent, as they are shown.
pub fn sorted(mut terms: Vec<Term>) -> Vec<Term> {
    terms.sort_by(|a, b| b.exponent.cmp(&a.exponent));
    terms
}

pub fn within_coefficient_bound(terms: &[Term]) -> bool {
    terms.iter().all(|term| {
        term.coefficient.numerator().abs() <= MAX_COEFFICIENT && term.coefficient.denominator() <= MAX_COEFFICIENT
    })
}

/// Non-empty, no zero coefficients, no repeated exponents.
pub fn validate_terms(terms: &[Term]) -> Result<(), Rejection> {
    ensure(!terms.is_empty(), Rejection::Degenerate)?;
    ensure(terms.iter().all(|term| !term.coefficient.is_zero()), Rejection::Degenerate)?;
    for (i, term) in terms.iter().enumerate() {
        ensure(terms[..i].iter().all(|other| other.exponent != term.exponent), Rejection::Degenerate)?;
    }
    ensure(within_coefficient_bound(terms), Rejection::OutOfBounds)
}

/// Shifts the coefficient of the leading term by `k`.
pub fn shift_leading(terms: &[Term], k: i64) -> Vec<Term> {
    let mut terms = terms.to_vec();
    if let Some(first) = terms.first_mut() {
        first.coefficient = first.coefficient + Fraction::from_integer(k);
    }
    terms
}

pub fn negate_all(terms: &[Term]) -> Vec<Term> {
    terms.iter().map(|term| term.negated()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_exponents_are_degenerate() {
        let terms = [Term::power(2, 2), Term::power(3, 2)];
        assert_eq!(validate_terms(&terms), Err(Rejection::Degenerate));
        assert_eq!(validate_terms(&[Term::power(0, 2)]), Err(Rejection::Degenerate));
        assert!(validate_terms(&[Term::power(2, 2), Term::constant(3)]).is_ok());
    }

    #[test]
    fn sorts_by_falling_exponent() {
        let terms = sorted(vec![Term::constant(1), Term::power(1, -2), Term::power(4, 3)]);
        let exponents: Vec<_> = terms.iter().map(|term| term.exponent).collect();
        assert_eq!(exponents, vec![Fraction::from_integer(3), Fraction::ZERO, Fraction::from_integer(-2)]);
    }
}
