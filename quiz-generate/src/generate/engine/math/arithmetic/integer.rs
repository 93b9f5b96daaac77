/*
 *
 * DES: Two integer operands joined by one of the four basic operators. Division is always exact.
 * ASK: Evaluate a + b, a - b, a × b or a ÷ b
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::Operator;
use crate::generate::{
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter,
    helper,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerParams {
    pub left: i64,
    pub right: i64,
    pub operator: Operator,
    pub difficulty: Difficulty,
}

impl IntegerParams {
    fn result(&self) -> i64 {
        self.operator.apply_integer(self.left, self.right).unwrap_or_default()
    }
}

fn operand_limit(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Easy => 20,
        Difficulty::Medium => 100,
        Difficulty::Hard => 500,
    }
}

fn factor_limit(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Hard => operand_limit(difficulty) / 10 + 1,
        _ => operand_limit(difficulty) / 5 + 1,
    }
}

fn validate(params: IntegerParams) -> Result<IntegerParams, Rejection> {
    let result = params.operator.apply_integer(params.left, params.right).ok_or(Rejection::NonIntegerAnswer)?;
    if params.difficulty != Difficulty::Hard {
        ensure(result >= 0, Rejection::OutOfBounds)?;
    }
    Ok(params)
}

pub struct IntegerArithmetic;

impl Generator for IntegerArithmetic {
    type Params = IntegerParams;
    const TOPIC: Topic = Topic::IntegerArithmetic;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<IntegerParams, Rejection> {
        let difficulty = options.difficulty;
        let limit = operand_limit(difficulty);
        let operator = helper::pick(rng, &Operator::ALL);

        let (mut left, mut right) = match operator {
            Operator::Add => (helper::gen_range_i64(rng, 1, limit), helper::gen_range_i64(rng, 1, limit)),
            Operator::Subtract => {
                let (a, b) = (helper::gen_range_i64(rng, 1, limit), helper::gen_range_i64(rng, 1, limit));
                (a.max(b), a.min(b))
            },
            Operator::Multiply => {
                let factors = factor_limit(difficulty);
                (helper::gen_range_i64(rng, 2, factors), helper::gen_range_i64(rng, 2, factors))
            },
            Operator::Divide => {
                let divisor = helper::gen_range_i64(rng, 2, factor_limit(difficulty));
                let quotient = helper::gen_range_i64(rng, 2, 11);
                (divisor * quotient, divisor)
            },
        };
        if difficulty == Difficulty::Hard {
            left = helper::maybe_negate(rng, left, 0.3);
            right = helper::maybe_negate(rng, right, 0.3);
        }

        validate(IntegerParams { left, right, operator, difficulty })
    }

    fn fallback(options: &GenerationParameters) -> IntegerParams {
        IntegerParams { left: 2, right: 3, operator: Operator::Add, difficulty: options.difficulty }
    }

    fn pool(options: &GenerationParameters) -> Vec<IntegerParams> {
        let difficulty = options.difficulty;
        let limit = operand_limit(difficulty);
        let step = (limit / 20).max(1);
        let factors = factor_limit(difficulty);
        let mut pool = Vec::new();

        let mut push = |left: i64, right: i64, operator: Operator| {
            let signs: &[(i64, i64)] = match difficulty {
                Difficulty::Hard => &[(1, 1), (-1, 1), (1, -1), (-1, -1)],
                _ => &[(1, 1)],
            };
            for (left_sign, right_sign) in signs {
                let params = IntegerParams { left: left * left_sign, right: right * right_sign, operator, difficulty };
                if let Ok(params) = validate(params) {
                    pool.push(params);
                }
            }
        };

        for left in (1..=limit).step_by(step as usize) {
            for right in (1..=limit).step_by(step as usize) {
                push(left, right, Operator::Add);
                if left >= right {
                    push(left, right, Operator::Subtract);
                }
            }
        }
        for left in 2..=factors {
            for right in 2..=factors {
                push(left, right, Operator::Multiply);
            }
        }
        for divisor in 2..=factors {
            for quotient in 2..=11 {
                push(divisor * quotient, divisor, Operator::Divide);
            }
        }
        pool
    }

    fn subtype(params: &IntegerParams) -> &'static str {
        params.operator.tag()
    }

    fn expression(params: &IntegerParams) -> String {
        format!(
            "{} {} {} = ?",
            formatter::format_parenthesized(params.left),
            params.operator.symbol_raw(),
            formatter::format_parenthesized(params.right),
        )
    }

    fn answer(params: &IntegerParams) -> Value {
        Value::Int(params.result())
    }

    fn templates(params: &IntegerParams) -> Vec<Candidate> {
        let (left, right) = (params.left, params.right);
        let result = params.result();
        let mut templates = Vec::new();

        if let Some(wrong) = params.operator.confused().apply_integer(left, right) {
            templates.push(Candidate::new(ErrorMode::WrongOperation, wrong));
        }
        match params.operator {
            Operator::Add | Operator::Subtract => {
                templates.push(Candidate::new(ErrorMode::CarryError, result + 10));
                templates.push(Candidate::new(ErrorMode::OffByOne, result + 1));
                templates.push(Candidate::new(ErrorMode::CarryError, result - 10));
                templates.push(Candidate::new(ErrorMode::SwappedOperands, right - left));
            },
            Operator::Multiply => {
                templates.push(Candidate::new(ErrorMode::OffByOne, result + left));
                templates.push(Candidate::new(ErrorMode::OffByOne, result - left));
                templates.push(Candidate::new(ErrorMode::CarryError, result + 10));
            },
            Operator::Divide => {
                templates.push(Candidate::new(ErrorMode::WrongOperation, left - right));
                templates.push(Candidate::new(ErrorMode::OffByOne, result + 1));
                templates.push(Candidate::new(ErrorMode::OffByOne, result - 1));
            },
        }
        templates.push(Candidate::new(ErrorMode::OffByOne, result - 1));
        templates.push(Candidate::new(ErrorMode::SignFlip, -result));
        templates.push(Candidate::new(ErrorMode::Doubled, result * 2));
        templates
    }

    fn perturb(params: &IntegerParams, k: i64) -> Option<Value> {
        Some(Value::Int(params.result() + k))
    }

    fn domain(params: &IntegerParams) -> Domain {
        match params.difficulty {
            Difficulty::Hard => Domain::integers(),
            _ => Domain::non_negative_integers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::engine::build;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn negative_operands_are_parenthesized() {
        let params = IntegerParams { left: -12, right: 4, operator: Operator::Divide, difficulty: Difficulty::Hard };
        assert_eq!(IntegerArithmetic::expression(&params), "(-12) ÷ 4 = ?");
        let mut rng = StdRng::seed_from_u64(1);
        let question = build::<IntegerArithmetic, _>(&mut rng, &params);
        assert_eq!(question.correct_answer, "-3");
    }

    #[test]
    fn easy_draws_stay_non_negative() {
        let mut rng = StdRng::seed_from_u64(2);
        let options = GenerationParameters::new(Topic::IntegerArithmetic, Difficulty::Easy);
        for _ in 0..200 {
            let params = IntegerArithmetic::draw(&mut rng, &options).unwrap();
            assert!(params.result() >= 0);
            assert!(params.left <= 20 || params.operator == Operator::Divide);
        }
    }

    #[test]
    fn every_pooled_result_is_exact() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::IntegerArithmetic, difficulty);
            for params in IntegerArithmetic::pool(&options) {
                let (left, right) = (params.left, params.right);
                let expected = match params.operator {
                    Operator::Add => left + right,
                    Operator::Subtract => left - right,
                    Operator::Multiply => left * right,
                    Operator::Divide => {
                        assert_eq!(left % right, 0, "{params:?}");
                        left / right
                    },
                };
                assert_eq!(IntegerArithmetic::answer(&params), Value::Int(expected), "{params:?}");
            }
        }
    }
}
