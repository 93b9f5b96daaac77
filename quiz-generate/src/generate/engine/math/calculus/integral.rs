/*
 *
 * DES: Indefinite integral of a sum of monomials. Easy keeps antiderivative coefficients whole, medium and hard
 *      bring in negative and fractional exponents with exact rational results.
 * ASK: ∫ f(x) dx
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::{negate_all, shift_leading, validate_terms, within_coefficient_bound};
use crate::generate::{
    distractor::{Candidate, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter::{self, LABEL_DX},
    fraction::Fraction,
    helper,
    term::{self, Term},
};

const NEGATIVE_EXPONENTS: [i64; 3] = [-2, -3, -4];
const NEGATIVE_COEFFICIENTS: [i64; 12] = [1, 2, 3, 4, 5, 6, -1, -2, -3, -4, -5, -6];
const SMALL_COEFFICIENTS: [i64; 6] = [1, 2, 3, -1, -2, -3];
const CONSTANTS: [i64; 5] = [1, 2, 3, -1, -2];

/// Fractional exponents with the coefficients that keep the antiderivative
/// readable.
const FRACTIONAL: [((i64, i64), &[i64]); 6] = [
    ((1, 2), &[3, 6, 9, -3, -6]),
    ((-1, 2), &[1, 2, 3, 4, -1, -2]),
    ((1, 3), &[4, 8, -4, -8]),
    ((3, 2), &[5, 10, -5]),
    ((2, 3), &[5, 10, -5]),
    ((3, 4), &[7, -7, 14]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegralParams {
    pub terms: Vec<Term>,
}

impl IntegralParams {
    fn antiderivative(&self) -> Vec<Term> {
        term::integrate_all(&self.terms).unwrap_or_default()
    }
}

fn validate(terms: Vec<Term>, whole: bool) -> Result<IntegralParams, Rejection> {
    validate_terms(&terms)?;
    let antiderivative = term::integrate_all(&terms).ok_or(Rejection::Degenerate)?;
    ensure(within_coefficient_bound(&antiderivative), Rejection::OutOfBounds)?;
    if whole {
        ensure(
            antiderivative.iter().all(|term| term.coefficient.is_integer()),
            Rejection::NonIntegerAnswer,
        )?;
    }
    Ok(IntegralParams { terms })
}

fn fractional_exponent((numerator, denominator): (i64, i64)) -> Fraction {
    Fraction::new(numerator, denominator)
}

/// The medium families, one list per subtype.
fn medium_families() -> Vec<Vec<Vec<Term>>> {
    let mut negative_power = Vec::new();
    let mut fractional_power = Vec::new();
    let mut negative_with_constant = Vec::new();
    let mut fractional_with_constant = Vec::new();
    let mut negative_with_power = Vec::new();

    for exponent in NEGATIVE_EXPONENTS {
        for coefficient in NEGATIVE_COEFFICIENTS {
            negative_power.push(vec![Term::power(coefficient, exponent)]);
        }
        for coefficient in SMALL_COEFFICIENTS {
            for constant in CONSTANTS {
                negative_with_constant.push(vec![Term::power(coefficient, exponent), Term::constant(constant)]);
            }
        }
    }
    for (exponent, coefficients) in FRACTIONAL {
        for coefficient in coefficients {
            fractional_power.push(vec![Term::new(*coefficient, fractional_exponent(exponent))]);
        }
    }
    for (exponent, coefficients) in FRACTIONAL.iter().take(3) {
        for coefficient in coefficients.iter().take(3) {
            for constant in CONSTANTS {
                fractional_with_constant.push(vec![
                    Term::new(*coefficient, fractional_exponent(*exponent)),
                    Term::constant(constant),
                ]);
            }
        }
    }
    for exponent in [-2, -3] {
        for coefficient in [1, 2, 3, -1, -2] {
            for power in [1, 2] {
                for multiple in [1, 2] {
                    negative_with_power.push(vec![
                        Term::power(coefficient, exponent),
                        Term::power(multiple * (power + 1), power),
                    ]);
                }
            }
        }
    }
    vec![negative_power, fractional_power, negative_with_constant, fractional_with_constant, negative_with_power]
}

/// `(e+1)k·x^e`, whose antiderivative is `k·x^(e+1)`.
fn whole_polynomials(max_exponent: i64, multiples: &[i64]) -> Vec<Vec<Term>> {
    let mut candidates = Vec::new();
    for exponent in 1..=max_exponent {
        for multiple in multiples {
            let leading = Term::power((exponent + 1) * multiple, exponent);
            candidates.push(vec![leading]);
            for constant in [2, 5, -3] {
                candidates.push(vec![leading, Term::constant(constant)]);
            }
            for lower in 1..exponent {
                candidates.push(vec![leading, Term::power(lower + 1, lower)]);
            }
        }
    }
    candidates
}

fn mixed_polynomials() -> Vec<Vec<Term>> {
    let mut candidates = Vec::new();
    for negative in [-2, -3] {
        for (exponent, coefficients) in FRACTIONAL.iter().take(2) {
            for coefficient in coefficients.iter().take(2) {
                for constant in [0, 4, -1] {
                    let mut terms = vec![
                        Term::new(*coefficient, fractional_exponent(*exponent)),
                        Term::power(-negative - 1, negative),
                    ];
                    if constant != 0 {
                        terms.push(Term::constant(constant));
                    }
                    candidates.push(terms);
                }
            }
        }
    }
    candidates
}

pub struct Integral;

impl Generator for Integral {
    type Params = IntegralParams;
    const TOPIC: Topic = Topic::Integral;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<IntegralParams, Rejection> {
        match options.difficulty {
            Difficulty::Easy => {
                let exponent = helper::gen_range_i64(rng, 1, 4);
                let multiple = helper::gen_range_i64(rng, 1, 4);
                let mut terms = vec![Term::power((exponent + 1) * multiple, exponent)];
                if helper::coin_flip(rng) {
                    terms.push(Term::constant(helper::gen_range_i64_except(rng, -6, 6, 0)));
                }
                validate(terms, true)
            },
            Difficulty::Medium => {
                let families = medium_families();
                let family = &families[rng.gen_range(0..families.len())];
                let terms = family[rng.gen_range(0..family.len())].clone();
                validate(terms, false)
            },
            Difficulty::Hard => {
                let families = [medium_families().concat(), mixed_polynomials()];
                let family = &families[usize::from(helper::coin_flip(rng))];
                let terms = family[rng.gen_range(0..family.len())].clone();
                validate(terms, false)
            },
        }
    }

    fn fallback(_options: &GenerationParameters) -> IntegralParams {
        IntegralParams { terms: vec![Term::power(3, 2)] }
    }

    fn pool(options: &GenerationParameters) -> Vec<IntegralParams> {
        let (candidates, whole) = match options.difficulty {
            Difficulty::Easy => (whole_polynomials(4, &[1, 2, 3, 4]), true),
            Difficulty::Medium => (medium_families().concat(), false),
            Difficulty::Hard => {
                let mut candidates = medium_families().concat();
                candidates.extend(mixed_polynomials());
                (candidates, false)
            },
        };
        candidates.into_iter().filter_map(|terms| validate(terms, whole).ok()).collect()
    }

    fn subtype(params: &IntegralParams) -> &'static str {
        let negative = params.terms.iter().filter(|term| term.exponent.is_negative()).count();
        let fractional = params.terms.iter().filter(|term| !term.exponent.is_integer()).count();
        let constant = params.terms.iter().filter(|term| term.is_constant()).count();
        let unusual = params.terms.iter().filter(|term| term.exponent.is_negative() || !term.exponent.is_integer()).count();
        match (params.terms.len(), unusual, negative, fractional, constant) {
            (_, 0, _, _, _) => "polynomial",
            (1, 1, _, 0, _) => "negative_power",
            (1, 1, _, _, _) => "fractional_power",
            (2, 1, _, 0, 1) => "negative_with_constant",
            (2, 1, _, _, 1) => "fractional_with_constant",
            (2, 1, 1, 0, 0) => "negative_with_power",
            _ => "mixed",
        }
    }

    fn expression(params: &IntegralParams) -> String {
        format!(r#"\int {}{LABEL_DX}"#, formatter::format_integrand(&params.terms))
    }

    fn answer(params: &IntegralParams) -> Value {
        Value::Expr(formatter::format_antiderivative(&params.antiderivative()))
    }

    fn templates(params: &IntegralParams) -> Vec<Candidate> {
        let divided_only: Option<Vec<Term>> = params
            .terms
            .iter()
            .map(|term| {
                Some(Term {
                    coefficient: term.coefficient.checked_div(term.exponent + Fraction::ONE)?,
                    exponent: term.exponent,
                })
            })
            .collect();
        let raised_only: Vec<Term> = params
            .terms
            .iter()
            .map(|term| Term { coefficient: term.coefficient, exponent: term.exponent + Fraction::ONE })
            .collect();
        let antiderivative = params.antiderivative();

        let mut templates = Vec::new();
        if let Some(divided_only) = divided_only {
            templates.push(Candidate::new(ErrorMode::ForgotExponentStep, formatter::format_antiderivative(&divided_only)));
        }
        templates.push(Candidate::new(ErrorMode::ForgotDivision, formatter::format_antiderivative(&raised_only)));
        templates.push(Candidate::new(
            ErrorMode::SwappedDirection,
            formatter::format_antiderivative(&term::differentiate_all(&params.terms)),
        ));
        templates.push(Candidate::new(ErrorMode::SignFlip, formatter::format_antiderivative(&negate_all(&antiderivative))));
        templates.push(Candidate::new(ErrorMode::DroppedConstant, formatter::format_monomial_sum(&antiderivative)));
        templates
    }

    fn perturb(params: &IntegralParams, k: i64) -> Option<Value> {
        Some(Value::Expr(formatter::format_antiderivative(&shift_leading(&params.antiderivative(), k))))
    }

    fn spread(_params: &IntegralParams) -> i64 {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_x_squared_integrates_to_x_cubed() {
        let params = validate(vec![Term::power(3, 2)], true).unwrap();
        assert_eq!(Integral::expression(&params), r#"\int 3x^{2}\,dx"#);
        assert_eq!(Integral::answer(&params), Value::Expr("x^{3} + C".to_owned()));
        let dropped = Integral::templates(&params)
            .into_iter()
            .find(|t| t.mode == ErrorMode::DroppedConstant)
            .unwrap();
        assert_eq!(dropped.value, Value::Expr("x^{3}".to_owned()));
    }

    #[test]
    fn negative_power_with_constant() {
        let params = validate(vec![Term::power(2, -3), Term::constant(-1)], false).unwrap();
        assert_eq!(Integral::expression(&params), r#"\int (2x^{-3} - 1)\,dx"#);
        assert_eq!(Integral::answer(&params), Value::Expr("-x^{-2} - x + C".to_owned()));
        assert_eq!(Integral::subtype(&params), "negative_with_constant");
    }

    #[test]
    fn square_root_gets_rational_coefficient() {
        let params = validate(vec![Term::new(3, Fraction::new(1, 2))], false).unwrap();
        assert_eq!(Integral::answer(&params), Value::Expr(r#"2x^{\frac{3}{2}} + C"#.to_owned()));
        assert_eq!(Integral::subtype(&params), "fractional_power");
    }

    #[test]
    fn reciprocal_is_rejected() {
        assert_eq!(validate(vec![Term::power(1, -1)], false).unwrap_err(), Rejection::Degenerate);
    }

    #[test]
    fn medium_pool_spans_five_families() {
        let options = GenerationParameters::new(Topic::Integral, Difficulty::Medium);
        let mut subtypes: Vec<_> = Integral::pool(&options).iter().map(Integral::subtype).collect();
        subtypes.sort();
        subtypes.dedup();
        assert_eq!(
            subtypes,
            vec![
                "fractional_power",
                "fractional_with_constant",
                "negative_power",
                "negative_with_constant",
                "negative_with_power",
            ]
        );
    }

    #[test]
    fn every_pooled_antiderivative_differentiates_back() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::Integral, difficulty);
            for params in Integral::pool(&options) {
                let antiderivative = params.antiderivative();
                assert_eq!(antiderivative.len(), params.terms.len(), "{params:?}");
                assert_eq!(term::differentiate_all(&antiderivative), params.terms, "{params:?}");
                assert_eq!(
                    Integral::answer(&params),
                    Value::Expr(formatter::format_antiderivative(&antiderivative))
                );
            }
        }
    }
}
