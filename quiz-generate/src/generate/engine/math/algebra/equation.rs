/*
 *
 * DES: Linear equations with an integer solution, and monic quadratics with two distinct integer roots.
 * ASK: Solve: ax+b = c  /  Solve: x²+bx+c = 0
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::constant_term_bound;
use crate::generate::{
    checker,
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter,
    helper,
    question::AnswerChecker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationParams {
    /// `ax + b = ax₀ + b`, solved by `x₀`.
    Linear { a: i64, b: i64, x: i64 },
    /// `(x - r1)(x - r2) = 0` with `r1 < r2`.
    Quadratic { r1: i64, r2: i64 },
}

impl EquationParams {
    fn constant(&self) -> i64 {
        match *self {
            EquationParams::Linear { a, b, x } => a * x + b,
            EquationParams::Quadratic { r1, r2 } => r1 * r2,
        }
    }
}

struct LinearRange {
    max_a: i64,
    x: (i64, i64),
    b: (i64, i64),
}

fn linear_range(difficulty: Difficulty) -> LinearRange {
    match difficulty {
        Difficulty::Easy => LinearRange { max_a: 9, x: (1, 20), b: (-10, 9) },
        Difficulty::Medium => LinearRange { max_a: 12, x: (-10, 20), b: (-20, 20) },
        Difficulty::Hard => LinearRange { max_a: 15, x: (-20, 20), b: (-30, 30) },
    }
}

fn root_range(difficulty: Difficulty) -> (i64, f64) {
    match difficulty {
        Difficulty::Hard => (9, 0.4),
        _ => (6, 0.3),
    }
}

fn render_roots(r1: i64, r2: i64) -> String {
    format!("x = {}, {}", r1.min(r2), r1.max(r2))
}

fn validate(params: EquationParams, bound: i64) -> Result<EquationParams, Rejection> {
    match params {
        EquationParams::Linear { a, x, .. } => {
            ensure(a > 0, Rejection::Degenerate)?;
            ensure(x != 0, Rejection::Degenerate)?;
            Ok(params)
        },
        EquationParams::Quadratic { r1, r2 } => {
            ensure(r1 != r2, Rejection::DuplicateRoots)?;
            ensure(checker::within_bound(r1 * r2, bound), Rejection::OutOfBounds)?;
            Ok(EquationParams::Quadratic { r1: r1.min(r2), r2: r1.max(r2) })
        },
    }
}

fn draw_linear<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> EquationParams {
    let range = linear_range(difficulty);
    EquationParams::Linear {
        a: helper::gen_range_i64(rng, 1, range.max_a),
        b: helper::gen_range_i64(rng, range.b.0, range.b.1),
        x: helper::gen_range_i64(rng, range.x.0, range.x.1),
    }
}

fn draw_quadratic<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> EquationParams {
    let (max_root, negate) = root_range(difficulty);
    let r1 = helper::gen_range_i64(rng, 1, max_root);
    let r1 = helper::maybe_negate(rng, r1, negate);
    let r2 = helper::gen_range_i64(rng, 1, max_root);
    let r2 = helper::maybe_negate(rng, r2, negate);
    EquationParams::Quadratic { r1, r2 }
}

pub struct Equation;

impl Generator for Equation {
    type Params = EquationParams;
    const TOPIC: Topic = Topic::Equation;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<EquationParams, Rejection> {
        let params = match options.difficulty {
            Difficulty::Easy => draw_linear(rng, options.difficulty),
            difficulty => {
                if helper::coin_flip(rng) {
                    draw_linear(rng, difficulty)
                } else {
                    draw_quadratic(rng, difficulty)
                }
            },
        };
        validate(params, constant_term_bound(options))
    }

    fn fallback(_options: &GenerationParameters) -> EquationParams {
        EquationParams::Linear { a: 2, b: 3, x: 4 }
    }

    fn pool(options: &GenerationParameters) -> Vec<EquationParams> {
        let bound = constant_term_bound(options);
        let range = linear_range(options.difficulty);
        let mut candidates = Vec::new();
        for a in 1..=range.max_a {
            for x in range.x.0..=range.x.1 {
                for b in (range.b.0..=range.b.1).step_by(3) {
                    candidates.push(EquationParams::Linear { a, b, x });
                }
            }
        }
        if options.difficulty != Difficulty::Easy {
            let (max_root, _) = root_range(options.difficulty);
            for r1 in -max_root..=max_root {
                for r2 in (r1 + 1)..=max_root {
                    if r1 != 0 && r2 != 0 {
                        candidates.push(EquationParams::Quadratic { r1, r2 });
                    }
                }
            }
        }
        candidates.into_iter().filter_map(|params| validate(params, bound).ok()).collect()
    }

    fn subtype(params: &EquationParams) -> &'static str {
        match params {
            EquationParams::Linear { .. } => "linear",
            EquationParams::Quadratic { .. } => "quadratic",
        }
    }

    fn expression(params: &EquationParams) -> String {
        match *params {
            EquationParams::Linear { a, b, .. } => {
                format!("Solve: {} = {}", formatter::format_linear(a, b), params.constant())
            },
            EquationParams::Quadratic { r1, r2 } => {
                format!("Solve: {} = 0", formatter::format_quadratic(1, -(r1 + r2), params.constant()))
            },
        }
    }

    fn answer(params: &EquationParams) -> Value {
        match *params {
            EquationParams::Linear { x, .. } => Value::Int(x),
            EquationParams::Quadratic { r1, r2 } => Value::Expr(render_roots(r1, r2)),
        }
    }

    fn templates(params: &EquationParams) -> Vec<Candidate> {
        match *params {
            EquationParams::Linear { a, b, x } => {
                let c = params.constant();
                let mut templates = vec![
                    Candidate::new(ErrorMode::Truncation, -(-c).div_euclid(a)),
                    Candidate::new(ErrorMode::Truncation, c.div_euclid(a)),
                ];
                if (c + b) % a == 0 {
                    templates.push(Candidate::new(ErrorMode::SignFlip, (c + b) / a));
                }
                templates.push(Candidate::new(ErrorMode::ForgotDivision, c - b));
                templates.push(Candidate::new(ErrorMode::OffByOne, x + 1));
                templates.push(Candidate::new(ErrorMode::OffByOne, x - 1));
                templates.push(Candidate::new(ErrorMode::OffByOne, x + 2));
                templates.push(Candidate::new(ErrorMode::OffByOne, x - 2));
                templates.push(Candidate::new(ErrorMode::Doubled, 2 * x));
                templates
            },
            EquationParams::Quadratic { r1, r2 } => vec![
                Candidate::new(ErrorMode::SignFlip, render_roots(-r1, -r2)),
                Candidate::new(ErrorMode::OffByOne, render_roots(r1 + 1, r2 + 1)),
                Candidate::new(ErrorMode::OffByOne, render_roots(r1 - 1, r2 - 1)),
                Candidate::new(ErrorMode::SignFlip, render_roots(r1.abs(), r2.abs())),
                Candidate::new(ErrorMode::RepeatedRoot, render_roots(r1, r1)),
                Candidate::new(ErrorMode::OffByOne, render_roots(r1 + 2, r2 - 1)),
            ],
        }
    }

    fn perturb(params: &EquationParams, k: i64) -> Option<Value> {
        match *params {
            EquationParams::Linear { x, .. } => Some(Value::Int(x + k)),
            EquationParams::Quadratic { r1, r2 } => Some(Value::Expr(render_roots(r1, r2 + k))),
        }
    }

    fn domain(params: &EquationParams) -> Domain {
        match params {
            EquationParams::Linear { x, .. } if *x > 0 => Domain::positive_integers(),
            _ => Domain::integers(),
        }
    }

    fn checker(params: &EquationParams) -> Option<AnswerChecker> {
        match *params {
            EquationParams::Linear { .. } => None,
            EquationParams::Quadratic { r1, r2 } => Some(AnswerChecker::AnyOf(vec![
                render_roots(r1, r2),
                format!("x = {}, {}", r1.max(r2), r1.min(r2)),
            ])),
        }
    }

    fn spread(params: &EquationParams) -> i64 {
        match params {
            EquationParams::Linear { .. } => 5,
            EquationParams::Quadratic { .. } => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::engine::build;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn linear_equation_renders_and_solves() {
        let params = EquationParams::Linear { a: 3, b: -4, x: 5 };
        assert_eq!(Equation::expression(&params), "Solve: 3x-4 = 11");
        assert_eq!(Equation::answer(&params), Value::Int(5));
    }

    #[test]
    fn quadratic_accepts_either_root_order() {
        let params = validate(EquationParams::Quadratic { r1: 3, r2: -2 }, 20).unwrap();
        assert_eq!(Equation::expression(&params), "Solve: x²-x-6 = 0");

        let mut rng = StdRng::seed_from_u64(5);
        let question = build::<Equation, _>(&mut rng, &params);
        assert_eq!(question.correct_answer, "x = -2, 3");
        assert!(question.check_answer("x = 3, -2"));
        assert_eq!(question.choices.len(), 4);
        assert!(question.distractors().all(|choice| !question.check_answer(choice)));
    }

    #[test]
    fn repeated_roots_are_rejected() {
        assert_eq!(validate(EquationParams::Quadratic { r1: 4, r2: 4 }, 20), Err(Rejection::DuplicateRoots));
        assert_eq!(validate(EquationParams::Quadratic { r1: 6, r2: 5 }, 20), Err(Rejection::OutOfBounds));
    }

    #[test]
    fn easy_pool_is_linear_only() {
        let options = GenerationParameters::new(Topic::Equation, Difficulty::Easy);
        assert!(Equation::pool(&options).iter().all(|params| Equation::subtype(params) == "linear"));
    }

    #[test]
    fn every_pooled_solution_satisfies_its_equation() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::Equation, difficulty);
            for params in Equation::pool(&options) {
                let expression = Equation::expression(&params);
                match (params, Equation::answer(&params)) {
                    (EquationParams::Linear { a, b, .. }, Value::Int(x)) => {
                        let (_, rhs) = expression.rsplit_once(" = ").unwrap();
                        assert_eq!(a * x + b, rhs.parse::<i64>().unwrap(), "{expression}");
                    },
                    (EquationParams::Quadratic { r1, r2 }, Value::Expr(roots)) => {
                        let (b, c) = (-(r1 + r2), r1 * r2);
                        assert_eq!(expression, format!("Solve: {} = 0", formatter::format_quadratic(1, b, c)));
                        let roots: Vec<i64> = roots
                            .trim_start_matches("x = ")
                            .split(", ")
                            .map(|root| root.parse().unwrap())
                            .collect();
                        assert_eq!(roots.len(), 2, "{expression}");
                        assert_ne!(roots[0], roots[1], "{expression}");
                        for x in roots {
                            assert_eq!(x * x + b * x + c, 0, "{expression}");
                        }
                    },
                    (params, answer) => panic!("{params:?} answered with {answer:?}"),
                }
            }
        }
    }
}
