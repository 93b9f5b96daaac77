/*
 *
 * DES: An integer base raised to an integer exponent. Negative exponents give exact fractions.
 * ASK: Evaluate b^e
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use crate::generate::{
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    fraction::Fraction,
    helper,
};

const MAX_POWER: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerParams {
    pub base: i64,
    pub exponent: i64,
}

impl PowerParams {
    fn result(&self) -> Option<Fraction> {
        Fraction::from_integer(self.base).pow(self.exponent)
    }
}

fn power_of(base: i64, exponent: i64) -> Option<Fraction> {
    Fraction::from_integer(base).pow(exponent)
}

fn validate(params: PowerParams) -> Result<PowerParams, Rejection> {
    ensure(params.base != 0, Rejection::Degenerate)?;
    let result = params.result().ok_or(Rejection::OutOfBounds)?;
    ensure(
        result.numerator().abs() <= MAX_POWER && result.denominator() <= MAX_POWER,
        Rejection::OutOfBounds,
    )?;
    Ok(params)
}

pub struct Power;

impl Generator for Power {
    type Params = PowerParams;
    const TOPIC: Topic = Topic::Power;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<PowerParams, Rejection> {
        let params = match options.difficulty {
            Difficulty::Easy => PowerParams {
                base: helper::pick(rng, &[2, 3, 4, 5]),
                exponent: helper::pick(rng, &[2, 3]),
            },
            Difficulty::Medium => {
                let base = if helper::chance(rng, 0.3) {
                    -helper::pick(rng, &[2, 3, 4])
                } else {
                    helper::gen_range_i64(rng, 2, 6)
                };
                PowerParams { base, exponent: helper::gen_range_i64(rng, 2, 4) }
            },
            Difficulty::Hard => {
                if helper::chance(rng, 0.4) {
                    PowerParams { base: helper::gen_range_i64(rng, 2, 10), exponent: helper::gen_range_i64(rng, 0, 1) }
                } else if helper::chance(rng, 0.3) {
                    PowerParams { base: helper::gen_range_i64(rng, 2, 10), exponent: helper::gen_range_i64(rng, -3, -1) }
                } else {
                    let base = helper::pick(rng, &[2, 3]);
                    let base = helper::maybe_negate(rng, base, 0.3);
                    PowerParams { base, exponent: helper::gen_range_i64(rng, 4, 6) }
                }
            },
        };
        validate(params)
    }

    fn fallback(_options: &GenerationParameters) -> PowerParams {
        PowerParams { base: 2, exponent: 3 }
    }

    fn pool(options: &GenerationParameters) -> Vec<PowerParams> {
        let mut candidates = Vec::new();
        let (max_base, max_exponent) = match options.difficulty {
            Difficulty::Easy => (10, 3),
            Difficulty::Medium => (20, 6),
            Difficulty::Hard => (31, 9),
        };
        for base in 2..=max_base {
            for exponent in 2..=max_exponent {
                candidates.push(PowerParams { base, exponent });
            }
        }
        if options.difficulty != Difficulty::Easy {
            for base in 2..=5 {
                for exponent in 2..=max_exponent {
                    candidates.push(PowerParams { base: -base, exponent });
                }
            }
        }
        if options.difficulty == Difficulty::Hard {
            for base in 2..=20 {
                candidates.push(PowerParams { base, exponent: 0 });
                candidates.push(PowerParams { base, exponent: 1 });
            }
            for base in 2..=10 {
                for exponent in -3..=-1 {
                    candidates.push(PowerParams { base, exponent });
                }
            }
        }
        candidates.into_iter().filter_map(|params| validate(params).ok()).collect()
    }

    fn subtype(params: &PowerParams) -> &'static str {
        match (params.base, params.exponent) {
            (_, 0) | (_, 1) => "zero_or_one",
            (_, e) if e < 0 => "negative_exponent",
            (b, _) if b < 0 => "negative_base",
            _ => "positive",
        }
    }

    fn expression(params: &PowerParams) -> String {
        if params.base < 0 {
            format!("({})^{{{}}} = ?", params.base, params.exponent)
        } else {
            format!("{}^{{{}}} = ?", params.base, params.exponent)
        }
    }

    fn answer(params: &PowerParams) -> Value {
        params.result().map(Value::from).unwrap_or(Value::Int(0))
    }

    fn templates(params: &PowerParams) -> Vec<Candidate> {
        let (base, exponent) = (params.base, params.exponent);
        let mut templates = Vec::new();
        if exponent >= 0 {
            templates.push(Some(Candidate::new(ErrorMode::WrongOperation, base * exponent)));
            templates.push(Some(Candidate::new(ErrorMode::WrongOperation, base + exponent)));
            templates.push(Candidate::maybe(ErrorMode::OffByOne, power_of(base, exponent + 1)));
            templates.push(Candidate::maybe(ErrorMode::OffByOne, power_of(base, (exponent - 1).max(1))));
            templates.push(Candidate::maybe(ErrorMode::OffByOne, power_of(base + 1, exponent)));
            templates.push(Candidate::maybe(ErrorMode::SwappedOperands, power_of(exponent, base)));
            templates.push(Candidate::maybe(ErrorMode::SignFlip, params.result().map(|result| -result)));
            templates.push(Candidate::maybe(ErrorMode::Doubled, params.result().map(|result| result + result)));
        } else {
            let magnitude = exponent.abs();
            templates.push(Candidate::maybe(ErrorMode::OffByOne, power_of(base, -(magnitude + 1))));
            templates.push(Candidate::maybe(ErrorMode::OffByOne, power_of(base, -(magnitude - 1).max(1))));
            templates.push(Candidate::maybe(ErrorMode::ForgotReciprocal, power_of(base, magnitude)));
            templates.push(Candidate::maybe(ErrorMode::OffByOne, power_of(base + 1, exponent)));
            templates.push(Candidate::maybe(ErrorMode::SignFlip, power_of(base, magnitude).map(|result| -result)));
            templates.push(Some(Candidate::new(ErrorMode::WrongOperation, base * exponent)));
        }
        templates.into_iter().flatten().collect()
    }

    fn perturb(params: &PowerParams, k: i64) -> Option<Value> {
        let result = params.result()?;
        if params.exponent >= 0 {
            return Some(Value::from(result + Fraction::from_integer(k)));
        }
        Fraction::checked_new(result.numerator(), result.denominator() + k).map(Value::from)
    }

    fn domain(params: &PowerParams) -> Domain {
        if params.base > 0 && params.exponent >= 0 {
            Domain::positive_integers()
        } else {
            Domain::ANY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::engine::build;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn two_cubed_is_eight() {
        let mut rng = StdRng::seed_from_u64(3);
        let question = build::<Power, _>(&mut rng, &PowerParams { base: 2, exponent: 3 });
        assert_eq!(question.expression, "2^{3} = ?");
        assert_eq!(question.correct_answer, "8");
        assert!(question.distractors().all(|choice| choice.parse::<i64>().map_or(false, |v| v > 0)));
    }

    #[test]
    fn negative_exponent_gives_exact_fraction() {
        let params = PowerParams { base: 2, exponent: -3 };
        assert_eq!(Power::answer(&params).render(Topic::Power.rendering()), r#"\frac{1}{8}"#);
        assert_eq!(Power::subtype(&params), "negative_exponent");
        assert_eq!(Power::expression(&PowerParams { base: -3, exponent: 3 }), "(-3)^{3} = ?");
    }

    #[test]
    fn oversized_powers_are_rejected() {
        assert_eq!(validate(PowerParams { base: 31, exponent: 3 }), Err(Rejection::OutOfBounds));
        assert_eq!(validate(PowerParams { base: 10, exponent: -4 }), Err(Rejection::OutOfBounds));
    }

    #[test]
    fn every_pooled_power_is_exact() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::Power, difficulty);
            for params in Power::pool(&options) {
                let magnitude = (0..params.exponent.abs()).fold(1_i64, |product, _| product * params.base);
                let expected = if params.exponent < 0 {
                    Fraction::new(1, magnitude)
                } else {
                    Fraction::from_integer(magnitude)
                };
                assert_eq!(Power::answer(&params), Value::from(expected), "{params:?}");
            }
        }
    }

    #[test]
    fn templates_skip_inexact_powers() {
        let templates = Power::templates(&PowerParams { base: 2, exponent: 3 });
        assert_eq!(templates[0], Candidate::new(ErrorMode::WrongOperation, 6));
        assert_eq!(templates[1], Candidate::new(ErrorMode::WrongOperation, 5));
        assert!(templates.iter().any(|t| t.mode == ErrorMode::SwappedOperands && t.value == Value::Int(9)));

        let reciprocal = Power::templates(&PowerParams { base: 2, exponent: -1 });
        assert!(reciprocal.contains(&Candidate::new(ErrorMode::WrongOperation, -2)));
        assert!(reciprocal.contains(&Candidate::new(ErrorMode::ForgotReciprocal, 2)));
    }
}
