/*
 *
 * DES: F(b) - F(a) for a polynomial with integer bounds. Only draws with an integer value are kept, easy and
 *      medium additionally stay non-negative.
 * ASK: ∫_a^b f(x) dx
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::validate_terms;
use crate::generate::{
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter::{self, LABEL_DX},
    fraction::Fraction,
    helper,
    term::{self, Term},
};

const MAX_VALUE: i64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefiniteIntegralParams {
    pub terms: Vec<Term>,
    pub lower: i64,
    pub upper: i64,
}

impl DefiniteIntegralParams {
    fn antiderivative(&self) -> Vec<Term> {
        term::integrate_all(&self.terms).unwrap_or_default()
    }

    fn difference(terms: &[Term], lower: i64, upper: i64) -> Option<Fraction> {
        Some(term::evaluate_all(terms, upper)? - term::evaluate_all(terms, lower)?)
    }

    fn value(&self) -> Option<Fraction> {
        Self::difference(&self.antiderivative(), self.lower, self.upper)
    }
}

fn validate(params: DefiniteIntegralParams, non_negative: bool) -> Result<DefiniteIntegralParams, Rejection> {
    validate_terms(&params.terms)?;
    ensure(params.lower < params.upper, Rejection::Degenerate)?;
    ensure(
        params.terms.iter().all(|term| term.exponent.to_integer().is_some_and(|e| e >= 0)),
        Rejection::Degenerate,
    )?;
    let value = params.value().ok_or(Rejection::OutOfBounds)?;
    let value = value.to_integer().ok_or(Rejection::NonIntegerAnswer)?;
    ensure(value.abs() <= MAX_VALUE, Rejection::OutOfBounds)?;
    ensure(!non_negative || value >= 0, Rejection::OutOfBounds)?;
    Ok(params)
}

fn draw_bounds<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64, max_width: i64) -> (i64, i64) {
    let lower = helper::gen_range_i64(rng, min, max - 1);
    let width = helper::gen_range_i64(rng, 1, max_width);
    (lower, (lower + width).min(max))
}

/// `(e+1)k·x^e` over a choice of exponents, so the antiderivative keeps
/// integer coefficients.
fn whole_terms(exponents: &[i64], multiples: &[i64]) -> Vec<Term> {
    exponents
        .iter()
        .zip(multiples)
        .map(|(exponent, multiple)| Term::power((exponent + 1) * multiple, *exponent))
        .collect()
}

fn draw_easy<R: Rng + ?Sized>(rng: &mut R) -> Vec<Term> {
    match helper::gen_range_i64(rng, 0, 3) {
        0 => vec![Term::constant(helper::gen_range_i64(rng, 1, 6))],
        1 => vec![Term::power(2 * helper::gen_range_i64(rng, 1, 4), 1)],
        2 => vec![Term::power(3 * helper::gen_range_i64(rng, 1, 3), 2)],
        _ => {
            let linear = 2 * helper::gen_range_i64(rng, 1, 3);
            let constant = helper::gen_range_i64(rng, 1, 5);
            vec![Term::power(linear, 1), Term::constant(constant)]
        },
    }
}

fn draw_medium<R: Rng + ?Sized>(rng: &mut R) -> Vec<Term> {
    match helper::gen_range_i64(rng, 0, 3) {
        0 => vec![Term::power(4 * helper::gen_range_i64(rng, 1, 2), 3)],
        1 => {
            let quadratic = helper::gen_range_i64(rng, 1, 6);
            let constant = helper::gen_range_i64_except(rng, -4, 5, 0);
            vec![Term::power(quadratic, 2), Term::constant(constant)]
        },
        2 => {
            let linear = 2 * helper::gen_range_i64(rng, 1, 4);
            let constant = helper::gen_range_i64_except(rng, -5, 5, 0);
            vec![Term::power(linear, 1), Term::constant(constant)]
        },
        _ => {
            let quadratic = helper::gen_range_i64(rng, 1, 6);
            let linear = helper::gen_range_i64_except(rng, -6, 6, 0);
            vec![Term::power(quadratic, 2), Term::power(linear, 1)]
        },
    }
}

/// Every exponent choice `draw_hard` can make, highest first.
const HARD_EXPONENTS: [&[i64]; 10] = [
    &[3, 2],
    &[3, 1],
    &[3, 0],
    &[2, 1],
    &[2, 0],
    &[1, 0],
    &[3, 2, 1],
    &[3, 2, 0],
    &[3, 1, 0],
    &[2, 1, 0],
];
const HARD_MULTIPLES: [i64; 4] = [-2, -1, 1, 3];

/// All `len`-long picks from `HARD_MULTIPLES`.
fn multiple_grid(len: usize) -> Vec<Vec<i64>> {
    let mut grid = vec![Vec::new()];
    for _ in 0..len {
        let mut next = Vec::with_capacity(grid.len() * HARD_MULTIPLES.len());
        for prefix in grid.iter() {
            for multiple in HARD_MULTIPLES {
                let mut picks = prefix.clone();
                picks.push(multiple);
                next.push(picks);
            }
        }
        grid = next;
    }
    grid
}

fn draw_hard<R: Rng + ?Sized>(rng: &mut R) -> Vec<Term> {
    let mut exponents: Vec<i64> = (0..=3).collect();
    helper::shuffle(rng, &mut exponents);
    let count = usize::try_from(helper::gen_range_i64(rng, 2, 3)).unwrap_or(2);
    let mut exponents = exponents[..count].to_vec();
    exponents.sort_by(|a, b| b.cmp(a));
    let multiples: Vec<i64> = exponents
        .iter()
        .map(|_| helper::gen_range_i64_except(rng, -3, 3, 0))
        .collect();
    whole_terms(&exponents, &multiples)
}

pub struct DefiniteIntegral;

impl Generator for DefiniteIntegral {
    type Params = DefiniteIntegralParams;
    const TOPIC: Topic = Topic::DefiniteIntegral;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<DefiniteIntegralParams, Rejection> {
        let (terms, (lower, upper)) = match options.difficulty {
            Difficulty::Easy => {
                let terms = draw_easy(rng);
                (terms, draw_bounds(rng, 0, 4, 3))
            },
            Difficulty::Medium => {
                let terms = draw_medium(rng);
                (terms, draw_bounds(rng, -2, 4, 3))
            },
            Difficulty::Hard => {
                let terms = draw_hard(rng);
                (terms, draw_bounds(rng, -3, 4, 4))
            },
        };
        validate(DefiniteIntegralParams { terms, lower, upper }, options.difficulty != Difficulty::Hard)
    }

    fn fallback(_options: &GenerationParameters) -> DefiniteIntegralParams {
        DefiniteIntegralParams { terms: vec![Term::power(2, 1)], lower: 1, upper: 3 }
    }

    fn pool(options: &GenerationParameters) -> Vec<DefiniteIntegralParams> {
        let (shapes, bounds): (Vec<Vec<Term>>, (i64, i64)) = match options.difficulty {
            Difficulty::Easy => {
                let mut shapes = Vec::new();
                for k in 1..=6 {
                    shapes.push(vec![Term::constant(k)]);
                }
                for k in 1..=4 {
                    shapes.push(vec![Term::power(2 * k, 1)]);
                }
                for k in 1..=3 {
                    shapes.push(vec![Term::power(3 * k, 2)]);
                    for constant in 1..=5 {
                        shapes.push(vec![Term::power(2 * k, 1), Term::constant(constant)]);
                    }
                }
                (shapes, (0, 4))
            },
            Difficulty::Medium => {
                let mut shapes = Vec::new();
                for k in 1..=2 {
                    shapes.push(vec![Term::power(4 * k, 3)]);
                }
                for quadratic in 1..=6 {
                    for constant in [-3, -1, 2, 5] {
                        shapes.push(vec![Term::power(quadratic, 2), Term::constant(constant)]);
                    }
                    for linear in [-4, -2, 2, 6] {
                        shapes.push(vec![Term::power(quadratic, 2), Term::power(linear, 1)]);
                    }
                }
                for k in 1..=4 {
                    for constant in [-5, -2, 1, 3, 5] {
                        shapes.push(vec![Term::power(2 * k, 1), Term::constant(constant)]);
                    }
                }
                (shapes, (-2, 4))
            },
            Difficulty::Hard => {
                let mut shapes = Vec::new();
                for exponents in HARD_EXPONENTS {
                    for multiples in multiple_grid(exponents.len()) {
                        shapes.push(whole_terms(exponents, &multiples));
                    }
                }
                (shapes, (-3, 4))
            },
        };

        let non_negative = options.difficulty != Difficulty::Hard;
        let mut pool = Vec::new();
        for terms in shapes {
            for lower in bounds.0..bounds.1 {
                for upper in lower + 1..=bounds.1 {
                    let params = DefiniteIntegralParams { terms: terms.clone(), lower, upper };
                    if let Ok(params) = validate(params, non_negative) {
                        pool.push(params);
                    }
                }
            }
        }
        pool
    }

    fn subtype(params: &DefiniteIntegralParams) -> &'static str {
        let exponents: Vec<i64> = params.terms.iter().filter_map(|term| term.exponent.to_integer()).collect();
        match exponents.as_slice() {
            [0] => "constant",
            [1] => "linear",
            [2] => "quadratic",
            [3] => "cubic",
            [1, 0] => "linear_plus_constant",
            [2, 0] => "quadratic_plus_constant",
            _ => "polynomial",
        }
    }

    fn expression(params: &DefiniteIntegralParams) -> String {
        format!(
            r#"\int_{{{}}}^{{{}}} {}{LABEL_DX}"#,
            params.lower,
            params.upper,
            formatter::format_integrand(&params.terms)
        )
    }

    fn answer(params: &DefiniteIntegralParams) -> Value {
        Value::from(params.value().unwrap_or(Fraction::ZERO))
    }

    fn templates(params: &DefiniteIntegralParams) -> Vec<Candidate> {
        let (lower, upper) = (params.lower, params.upper);
        let Some(value) = params.value() else {
            return Vec::new();
        };
        let raised_only: Vec<Term> = params
            .terms
            .iter()
            .map(|term| Term { coefficient: term.coefficient, exponent: term.exponent + Fraction::ONE })
            .collect();

        let mut templates = vec![Candidate::new(ErrorMode::SwappedBounds, -value)];
        templates.extend(Candidate::maybe(ErrorMode::UpperBoundOnly, term::evaluate_all(&params.antiderivative(), upper)));
        templates.extend(Candidate::maybe(
            ErrorMode::ForgotDivision,
            DefiniteIntegralParams::difference(&raised_only, lower, upper),
        ));
        templates.extend(Candidate::maybe(
            ErrorMode::WrongOperation,
            DefiniteIntegralParams::difference(&params.terms, lower, upper),
        ));
        templates.push(Candidate::new(ErrorMode::OffByOne, value + Fraction::ONE));
        templates.push(Candidate::new(ErrorMode::OffByOne, value - Fraction::ONE));
        templates.push(Candidate::new(ErrorMode::Doubled, value + value));
        templates
    }

    fn perturb(params: &DefiniteIntegralParams, k: i64) -> Option<Value> {
        Some(Value::from(params.value()? + Fraction::from_integer(k)))
    }

    fn domain(_params: &DefiniteIntegralParams) -> Domain {
        Domain::integers()
    }

    fn spread(_params: &DefiniteIntegralParams) -> i64 {
        6
    }
}
