/*
 *
 * DES: Power rule on a sum of monomials, including negative and fractional exponents on harder levels.
 * ASK: d/dx of the expression
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::{negate_all, shift_leading, sorted, validate_terms, within_coefficient_bound};
use crate::generate::{
    distractor::{Candidate, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter,
    fraction::Fraction,
    helper,
    term::{self, Term},
};

const FRACTIONAL_EXPONENTS: [(i64, i64); 5] = [(1, 2), (3, 2), (1, 3), (2, 3), (-1, 2)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivativeParams {
    pub terms: Vec<Term>,
}

impl DerivativeParams {
    fn derivative(&self) -> Vec<Term> {
        term::differentiate_all(&self.terms)
    }
}

fn validate(terms: Vec<Term>) -> Result<DerivativeParams, Rejection> {
    validate_terms(&terms)?;
    let params = DerivativeParams { terms };
    let derivative = params.derivative();
    ensure(!derivative.is_empty(), Rejection::Degenerate)?;
    ensure(within_coefficient_bound(&derivative), Rejection::OutOfBounds)?;
    Ok(params)
}

fn polynomial(leading: i64, exponent: i64, linear: i64, constant: i64) -> Vec<Term> {
    [Term::power(leading, exponent), Term::power(linear, 1), Term::constant(constant)]
        .into_iter()
        .filter(|term| !term.coefficient.is_zero())
        .collect()
}

fn fractional(multiple: i64, (numerator, denominator): (i64, i64), constant: i64) -> Vec<Term> {
    let mut terms = vec![Term::new(multiple * denominator, Fraction::new(numerator, denominator))];
    if constant != 0 {
        terms.push(Term::constant(constant));
    }
    terms
}

fn negative(coefficient: i64, exponent: i64, linear: i64) -> Vec<Term> {
    let mut terms = Vec::new();
    if linear != 0 {
        terms.push(Term::power(linear, 1));
    }
    terms.push(Term::power(coefficient, -exponent));
    terms
}

fn draw_polynomial<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Vec<Term> {
    let (max_coefficient, max_exponent) = match difficulty {
        Difficulty::Easy => (5, 4),
        _ => (6, 5),
    };
    let leading = helper::gen_range_i64(rng, 1, max_coefficient);
    let exponent = helper::gen_range_i64(rng, 2, max_exponent);
    let linear = helper::gen_range_i64(rng, -max_coefficient, max_coefficient);
    let constant = if difficulty == Difficulty::Easy && helper::coin_flip(rng) {
        0
    } else {
        helper::gen_range_i64(rng, -9, 9)
    };
    polynomial(leading, exponent, linear, constant)
}

fn draw_negative<R: Rng + ?Sized>(rng: &mut R) -> Vec<Term> {
    let coefficient = helper::gen_range_i64(rng, 1, 4);
    let coefficient = helper::maybe_negate(rng, coefficient, 0.4);
    let exponent = helper::gen_range_i64(rng, 1, 3);
    let linear = helper::pick(rng, &[0, 0, 1, 2, 3]);
    negative(coefficient, exponent, linear)
}

fn draw_fractional<R: Rng + ?Sized>(rng: &mut R) -> Vec<Term> {
    let exponent = helper::pick(rng, &FRACTIONAL_EXPONENTS);
    let multiple = helper::pick(rng, &[1, 2, -1]);
    let constant = helper::pick(rng, &[0, 0, 2, -3, 5]);
    fractional(multiple, exponent, constant)
}

pub struct Derivative;

impl Generator for Derivative {
    type Params = DerivativeParams;
    const TOPIC: Topic = Topic::Derivative;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<DerivativeParams, Rejection> {
        let terms = match options.difficulty {
            Difficulty::Easy => draw_polynomial(rng, options.difficulty),
            Difficulty::Medium => {
                if helper::chance(rng, 0.4) {
                    draw_negative(rng)
                } else {
                    draw_polynomial(rng, options.difficulty)
                }
            },
            Difficulty::Hard => match helper::gen_range_i64(rng, 0, 2) {
                0 => draw_polynomial(rng, options.difficulty),
                1 => draw_negative(rng),
                _ => draw_fractional(rng),
            },
        };
        validate(terms)
    }

    fn fallback(_options: &GenerationParameters) -> DerivativeParams {
        DerivativeParams { terms: vec![Term::power(1, 3)] }
    }

    fn pool(options: &GenerationParameters) -> Vec<DerivativeParams> {
        let mut candidates = Vec::new();
        for leading in 1..=5 {
            for exponent in 2..=5 {
                for linear in [-3, -1, 0, 2] {
                    for constant in [0, 4, -7] {
                        candidates.push(sorted(polynomial(leading, exponent, linear, constant)));
                    }
                }
            }
        }
        if options.difficulty != Difficulty::Easy {
            for coefficient in [-4, -3, -2, -1, 1, 2, 3, 4] {
                for exponent in 1..=3 {
                    for linear in [0, 1, 3] {
                        candidates.push(negative(coefficient, exponent, linear));
                    }
                }
            }
        }
        if options.difficulty == Difficulty::Hard {
            for exponent in FRACTIONAL_EXPONENTS {
                for multiple in [1, 2, 3, -1, -2] {
                    for constant in [0, 2, -3, 5] {
                        candidates.push(fractional(multiple, exponent, constant));
                    }
                }
            }
        }
        candidates.into_iter().filter_map(|terms| validate(terms).ok()).collect()
    }

    fn subtype(params: &DerivativeParams) -> &'static str {
        if params.terms.iter().any(|term| !term.exponent.is_integer()) {
            "fractional_power"
        } else if params.terms.iter().any(|term| term.exponent.is_negative()) {
            "negative_power"
        } else {
            "polynomial"
        }
    }

    fn expression(params: &DerivativeParams) -> String {
        format!(r#"\frac{{d}}{{dx}}\left({}\right)"#, formatter::format_monomial_sum(&params.terms))
    }

    fn answer(params: &DerivativeParams) -> Value {
        Value::Expr(formatter::format_monomial_sum(&params.derivative()))
    }

    fn templates(params: &DerivativeParams) -> Vec<Candidate> {
        let varying: Vec<&Term> = params.terms.iter().filter(|term| !term.is_constant()).collect();
        let kept_exponent: Vec<Term> = varying
            .iter()
            .map(|term| Term { coefficient: term.coefficient * term.exponent, exponent: term.exponent })
            .collect();
        let kept_coefficient: Vec<Term> = varying
            .iter()
            .map(|term| Term { coefficient: term.coefficient, exponent: term.exponent - Fraction::ONE })
            .collect();
        let derivative = params.derivative();

        let mut templates = vec![
            Candidate::new(ErrorMode::ForgotExponentStep, formatter::format_monomial_sum(&kept_exponent)),
            Candidate::new(ErrorMode::ForgotCoefficient, formatter::format_monomial_sum(&kept_coefficient)),
        ];
        if let Some(integrated) = term::integrate_all(&params.terms) {
            templates.push(Candidate::new(ErrorMode::SwappedDirection, formatter::format_monomial_sum(&integrated)));
        }
        if let Some(constant) = params.terms.iter().find(|term| term.is_constant()) {
            let mut kept = derivative.clone();
            kept.push(*constant);
            templates.push(Candidate::new(ErrorMode::KeptConstant, formatter::format_monomial_sum(&kept)));
        }
        templates.push(Candidate::new(ErrorMode::SignFlip, formatter::format_monomial_sum(&negate_all(&derivative))));
        templates
    }

    fn perturb(params: &DerivativeParams, k: i64) -> Option<Value> {
        Some(Value::Expr(formatter::format_monomial_sum(&shift_leading(&params.derivative(), k))))
    }

    fn spread(_params: &DerivativeParams) -> i64 {
        5
    }
}
