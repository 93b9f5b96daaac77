/*
 *
 * DES: Evaluate a polynomial or a two-piece linear function at an integer.
 * ASK: f(x) = 2x+3, f(2) = ?
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use crate::generate::{
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter,
    helper,
};

/// `coefficient·x + constant`.
pub type Piece = (i64, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionParams {
    /// `f(x) = ax² + bx + c`, linear when `a` is zero.
    Polynomial { a: i64, b: i64, c: i64, x: i64 },
    /// `below` for `x < split`, `above` otherwise.
    Piecewise { split: i64, below: Piece, above: Piece, x: i64 },
}

fn evaluate_piece((coefficient, constant): Piece, x: i64) -> i64 {
    coefficient * x + constant
}

impl FunctionParams {
    fn at(&self, x: i64) -> i64 {
        match *self {
            FunctionParams::Polynomial { a, b, c, .. } => a * x * x + b * x + c,
            FunctionParams::Piecewise { split, below, above, .. } => {
                if x < split {
                    evaluate_piece(below, x)
                } else {
                    evaluate_piece(above, x)
                }
            },
        }
    }

    fn input(&self) -> i64 {
        match *self {
            FunctionParams::Polynomial { x, .. } | FunctionParams::Piecewise { x, .. } => x,
        }
    }

    fn value(&self) -> i64 {
        self.at(self.input())
    }
}

fn validate(params: FunctionParams) -> Result<FunctionParams, Rejection> {
    match params {
        FunctionParams::Polynomial { a, b, .. } => ensure(a != 0 || b != 0, Rejection::Degenerate)?,
        FunctionParams::Piecewise { below, above, .. } => {
            ensure(below != above, Rejection::Degenerate)?;
            ensure(below.0 != 0 && above.0 != 0, Rejection::Degenerate)?;
        },
    }
    Ok(params)
}

fn draw_piecewise<R: Rng + ?Sized>(rng: &mut R, max_constant: i64) -> FunctionParams {
    let split = helper::gen_range_i64(rng, 0, 3);
    let below = (helper::gen_range_i64(rng, 1, 4), helper::gen_range_i64(rng, -max_constant, max_constant));
    let above_coefficient = helper::gen_range_i64(rng, 1, 4);
    let above_coefficient = helper::maybe_negate(rng, above_coefficient, 0.3);
    let above = (above_coefficient, helper::gen_range_i64(rng, -max_constant, max_constant));
    let x = helper::gen_range_i64(rng, split - 3, split + 3);
    FunctionParams::Piecewise { split, below, above, x }
}

fn piecewise_pool(splits: &[i64], pool: &mut Vec<FunctionParams>) {
    let pieces: Vec<Piece> = [1, 2, 3]
        .iter()
        .flat_map(|coefficient| [-2, 0, 2].map(|constant| (*coefficient, constant)))
        .collect();
    for split in splits {
        for below in pieces.iter() {
            for above in pieces.iter() {
                for x in [split - 1, *split, split + 1] {
                    pool.push(FunctionParams::Piecewise { split: *split, below: *below, above: *above, x });
                }
            }
        }
    }
}

fn format_piecewise(split: i64, below: Piece, above: Piece) -> String {
    format!(
        "f(x) = {{ {} if x < {split}; {} if x ≥ {split} }}",
        formatter::format_linear(below.0, below.1),
        formatter::format_linear(above.0, above.1),
    )
}

pub struct FunctionEvaluation;

impl Generator for FunctionEvaluation {
    type Params = FunctionParams;
    const TOPIC: Topic = Topic::FunctionEvaluation;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<FunctionParams, Rejection> {
        let params = match options.difficulty {
            Difficulty::Easy => FunctionParams::Polynomial {
                a: 0,
                b: helper::gen_range_i64(rng, 1, 5),
                c: helper::gen_range_i64(rng, -5, 4),
                x: helper::gen_range_i64(rng, 1, 5),
            },
            Difficulty::Medium => {
                if helper::chance(rng, 0.3) {
                    draw_piecewise(rng, 3)
                } else {
                    FunctionParams::Polynomial {
                        a: helper::gen_range_i64(rng, 1, 3),
                        b: 0,
                        c: helper::gen_range_i64(rng, -5, 4),
                        x: helper::gen_range_i64(rng, 1, 4),
                    }
                }
            },
            Difficulty::Hard => {
                if helper::chance(rng, 0.4) {
                    draw_piecewise(rng, 6)
                } else {
                    FunctionParams::Polynomial {
                        a: helper::gen_range_i64(rng, 1, 3),
                        b: helper::gen_range_i64(rng, -3, 2),
                        c: helper::gen_range_i64(rng, -3, 2),
                        x: helper::gen_range_i64(rng, -3, 3),
                    }
                }
            },
        };
        validate(params)
    }

    fn fallback(_options: &GenerationParameters) -> FunctionParams {
        FunctionParams::Polynomial { a: 0, b: 2, c: 3, x: 2 }
    }

    fn pool(options: &GenerationParameters) -> Vec<FunctionParams> {
        let mut pool = Vec::new();
        match options.difficulty {
            Difficulty::Easy => {
                for b in 1..=5 {
                    for c in -5..=4 {
                        for x in 1..=5 {
                            pool.push(FunctionParams::Polynomial { a: 0, b, c, x });
                        }
                    }
                }
            },
            Difficulty::Medium => {
                for a in 1..=3 {
                    for c in -5..=4 {
                        for x in 1..=4 {
                            pool.push(FunctionParams::Polynomial { a, b: 0, c, x });
                        }
                    }
                }
                piecewise_pool(&[0, 1, 2], &mut pool);
            },
            Difficulty::Hard => {
                for a in 1..=3 {
                    for b in -3..=2 {
                        for c in -3..=2 {
                            for x in -3..=3 {
                                pool.push(FunctionParams::Polynomial { a, b, c, x });
                            }
                        }
                    }
                }
                piecewise_pool(&[-1, 0, 1, 2, 3], &mut pool);
            },
        }
        pool.into_iter().filter_map(|params| validate(params).ok()).collect()
    }

    fn subtype(params: &FunctionParams) -> &'static str {
        match params {
            FunctionParams::Polynomial { a: 0, .. } => "linear",
            FunctionParams::Polynomial { .. } => "quadratic",
            FunctionParams::Piecewise { .. } => "piecewise",
        }
    }

    fn expression(params: &FunctionParams) -> String {
        let definition = match *params {
            FunctionParams::Polynomial { a, b, c, .. } => format!("f(x) = {}", formatter::format_polynomial_raw(a, b, c)),
            FunctionParams::Piecewise { split, below, above, .. } => format_piecewise(split, below, above),
        };
        format!("{definition}, f({}) = ?", params.input())
    }

    fn answer(params: &FunctionParams) -> Value {
        Value::Int(params.value())
    }

    fn templates(params: &FunctionParams) -> Vec<Candidate> {
        let (x, value) = (params.input(), params.value());
        let mut templates = Vec::new();
        match *params {
            FunctionParams::Polynomial { a, b, c, .. } => {
                if a != 0 {
                    templates.push(Candidate::new(ErrorMode::ForgotExponentStep, a * x + b * x + c));
                }
                templates.push(Candidate::new(ErrorMode::WrongOperation, a + b + c));
            },
            FunctionParams::Piecewise { split, below, above, .. } => {
                let other = if x < split { above } else { below };
                templates.push(Candidate::new(ErrorMode::WrongBranch, evaluate_piece(other, x)));
            },
        }
        templates.push(Candidate::new(ErrorMode::OffByOne, params.at(x + 1)));
        templates.push(Candidate::new(ErrorMode::SignFlip, params.at(-x)));
        templates.push(Candidate::new(ErrorMode::Doubled, value * 2));
        templates.push(Candidate::new(ErrorMode::AddedAcross, value + x));
        templates
    }

    fn perturb(params: &FunctionParams, k: i64) -> Option<Value> {
        Some(Value::Int(params.value() + k))
    }

    fn domain(_params: &FunctionParams) -> Domain {
        Domain::integers()
    }
}
