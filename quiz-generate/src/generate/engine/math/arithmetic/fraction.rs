/*
 *
 * DES: Two proper fractions in lowest terms combined with one operator, answer is an exact reduced fraction.
 * ASK: Add or subtract fractions over the same denominator
 * ASK: Add or subtract fractions over different denominators
 * ASK: Multiply or divide two fractions
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::Operator;
use crate::generate::{
    checker,
    distractor::{Candidate, Domain, ErrorMode, Sign, Value},
    engine::{ensure, Generator, Rejection},
    fraction::Fraction,
    helper,
};

const SAME_DENOMINATORS: [i64; 6] = [2, 3, 4, 5, 6, 8];
const MIXED_DENOMINATORS: [i64; 9] = [2, 3, 4, 5, 6, 8, 9, 10, 12];
const PRODUCT_DENOMINATORS: [i64; 6] = [2, 3, 4, 5, 6, 8];
const QUOTIENT_DENOMINATORS: [i64; 5] = [2, 3, 4, 5, 6];

/// Operands are kept unreduced so the expression shows exactly what was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionParams {
    pub left: (i64, i64),
    pub right: (i64, i64),
    pub operator: Operator,
}

impl FractionParams {
    fn left(&self) -> Fraction {
        Fraction::new(self.left.0, self.left.1)
    }
    fn right(&self) -> Fraction {
        Fraction::new(self.right.0, self.right.1)
    }
    fn result(&self) -> Fraction {
        self.operator.apply(self.left(), self.right()).unwrap_or(Fraction::ZERO)
    }
}

fn validate(params: FractionParams) -> Result<FractionParams, Rejection> {
    for (numerator, denominator) in [params.left, params.right] {
        ensure(numerator > 0 && numerator < denominator, Rejection::OutOfBounds)?;
        ensure(checker::is_reduced(numerator, denominator), Rejection::CommonFactor)?;
    }
    let result = params.operator.apply(params.left(), params.right()).ok_or(Rejection::Degenerate)?;
    ensure(result.is_positive(), Rejection::Degenerate)?;
    Ok(params)
}

/// Orders the operands of a subtraction so the difference is positive.
fn ordered(left: (i64, i64), right: (i64, i64), operator: Operator) -> FractionParams {
    let smaller = Fraction::new(left.0, left.1) < Fraction::new(right.0, right.1);
    if operator == Operator::Subtract && smaller {
        FractionParams { left: right, right: left, operator }
    } else {
        FractionParams { left, right, operator }
    }
}

fn add_or_subtract<R: Rng + ?Sized>(rng: &mut R) -> Operator {
    if helper::coin_flip(rng) { Operator::Add } else { Operator::Subtract }
}

fn draw_operand<R: Rng + ?Sized>(rng: &mut R, denominators: &[i64]) -> (i64, i64) {
    let denominator = helper::pick(rng, denominators);
    (helper::gen_range_i64(rng, 1, denominator - 1), denominator)
}

pub struct FractionArithmetic;

impl Generator for FractionArithmetic {
    type Params = FractionParams;
    const TOPIC: Topic = Topic::FractionArithmetic;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<FractionParams, Rejection> {
        let params = match options.difficulty {
            Difficulty::Easy => {
                let denominator = helper::pick(rng, &SAME_DENOMINATORS);
                let left = (helper::gen_range_i64(rng, 1, denominator - 1), denominator);
                let right = (helper::gen_range_i64(rng, 1, denominator - 1), denominator);
                let operator = add_or_subtract(rng);
                ordered(left, right, operator)
            },
            Difficulty::Medium => {
                if helper::coin_flip(rng) {
                    let left = draw_operand(rng, &MIXED_DENOMINATORS);
                    let right = draw_operand(rng, &MIXED_DENOMINATORS);
                    ensure(left.1 != right.1, Rejection::Degenerate)?;
                    let operator = add_or_subtract(rng);
                    ordered(left, right, operator)
                } else {
                    let left = draw_operand(rng, &PRODUCT_DENOMINATORS);
                    let right = draw_operand(rng, &PRODUCT_DENOMINATORS);
                    FractionParams { left, right, operator: Operator::Multiply }
                }
            },
            Difficulty::Hard => {
                let left = draw_operand(rng, &QUOTIENT_DENOMINATORS);
                let right = draw_operand(rng, &QUOTIENT_DENOMINATORS);
                FractionParams { left, right, operator: Operator::Divide }
            },
        };
        validate(params)
    }

    fn fallback(_options: &GenerationParameters) -> FractionParams {
        FractionParams { left: (1, 5), right: (2, 5), operator: Operator::Add }
    }

    fn pool(options: &GenerationParameters) -> Vec<FractionParams> {
        let operands = |denominators: &[i64]| -> Vec<(i64, i64)> {
            denominators
                .iter()
                .flat_map(|d| (1..*d).map(move |n| (n, *d)))
                .collect()
        };
        let mut candidates = Vec::new();
        match options.difficulty {
            Difficulty::Easy => {
                for left in operands(&SAME_DENOMINATORS) {
                    for right in operands(&[left.1]) {
                        candidates.push(FractionParams { left, right, operator: Operator::Add });
                        candidates.push(ordered(left, right, Operator::Subtract));
                    }
                }
            },
            Difficulty::Medium => {
                let mixed = operands(&MIXED_DENOMINATORS);
                for left in mixed.iter() {
                    for right in mixed.iter().filter(|right| right.1 != left.1) {
                        candidates.push(FractionParams { left: *left, right: *right, operator: Operator::Add });
                        candidates.push(ordered(*left, *right, Operator::Subtract));
                    }
                }
                let products = operands(&PRODUCT_DENOMINATORS);
                for left in products.iter() {
                    for right in products.iter() {
                        candidates.push(FractionParams { left: *left, right: *right, operator: Operator::Multiply });
                    }
                }
            },
            Difficulty::Hard => {
                let quotients = operands(&QUOTIENT_DENOMINATORS);
                for left in quotients.iter() {
                    for right in quotients.iter() {
                        candidates.push(FractionParams { left: *left, right: *right, operator: Operator::Divide });
                    }
                }
            },
        }
        candidates.into_iter().filter_map(|params| validate(params).ok()).collect()
    }

    fn subtype(params: &FractionParams) -> &'static str {
        match params.operator {
            Operator::Add | Operator::Subtract if params.left.1 == params.right.1 => "same_denominator",
            Operator::Add | Operator::Subtract => "different_denominator",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }

    fn expression(params: &FractionParams) -> String {
        format!(
            r#"\frac{{{}}}{{{}}} {} \frac{{{}}}{{{}}} = ?"#,
            params.left.0, params.left.1,
            params.operator.symbol(),
            params.right.0, params.right.1,
        )
    }

    fn answer(params: &FractionParams) -> Value {
        Value::from(params.result())
    }

    fn templates(params: &FractionParams) -> Vec<Candidate> {
        let ((a, b), (c, d)) = (params.left, params.right);
        let (left, right, result) = (params.left(), params.right(), params.result());
        let mut templates = Vec::new();

        match params.operator {
            Operator::Add => {
                templates.push(Candidate::maybe(ErrorMode::AddedAcross, Fraction::checked_new(a + c, b + d)));
                templates.push(Candidate::maybe(ErrorMode::ForgotDivision, Fraction::checked_new(a + c, b.max(d))));
            },
            Operator::Subtract => {
                templates.push(Candidate::maybe(ErrorMode::AddedAcross, Fraction::checked_new(a - c, b - d)));
                templates.push(Candidate::maybe(ErrorMode::ForgotDivision, Fraction::checked_new(a - c, b.max(d))));
            },
            Operator::Multiply => {
                templates.push(Candidate::maybe(ErrorMode::ForgotReciprocal, left.checked_div(right)));
                templates.push(Candidate::maybe(ErrorMode::AddedAcross, Fraction::checked_new(a * c, b + d)));
            },
            Operator::Divide => {
                templates.push(Some(Candidate::new(ErrorMode::ForgotReciprocal, left * right)));
                templates.push(Candidate::maybe(ErrorMode::SwappedOperands, result.recip()));
            },
        }
        templates.push(Candidate::maybe(ErrorMode::WrongOperation, params.operator.confused().apply(left, right)));
        templates.push(Candidate::maybe(ErrorMode::OffByOne, Fraction::checked_new(result.numerator() + 1, result.denominator())));
        templates.push(Candidate::maybe(ErrorMode::OffByOne, Fraction::checked_new(result.numerator(), result.denominator() + 1)));
        templates.push(Some(Candidate::new(ErrorMode::Doubled, result + result)));
        templates.into_iter().flatten().collect()
    }

    fn perturb(params: &FractionParams, k: i64) -> Option<Value> {
        let result = params.result();
        Fraction::checked_new(result.numerator() + k, result.denominator()).map(Value::from)
    }

    fn domain(_params: &FractionParams) -> Domain {
        Domain::ANY.with_sign(Sign::Positive)
    }

    fn spread(_params: &FractionParams) -> i64 {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_reduced() {
        let params = FractionParams { left: (1, 6), right: (1, 3), operator: Operator::Add };
        assert_eq!(FractionArithmetic::expression(&params), r#"\frac{1}{6} + \frac{1}{3} = ?"#);
        assert_eq!(FractionArithmetic::answer(&params).render(Topic::FractionArithmetic.rendering()), r#"\frac{1}{2}"#);
        assert_eq!(FractionArithmetic::subtype(&params), "different_denominator");
    }

    #[test]
    fn division_inverts_the_divisor() {
        let params = FractionParams { left: (3, 4), right: (1, 2), operator: Operator::Divide };
        assert_eq!(FractionArithmetic::answer(&params), Value::Frac(Fraction::new(3, 2)));
        let templates = FractionArithmetic::templates(&params);
        assert_eq!(templates[0].value, Value::Frac(Fraction::new(3, 8)));
        assert_eq!(templates[1].value, Value::Frac(Fraction::new(2, 3)));
    }

    #[test]
    fn pools_hold_only_valid_instances() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::FractionArithmetic, difficulty);
            let pool = FractionArithmetic::pool(&options);
            assert!(!pool.is_empty());
            assert!(pool.iter().all(|params| validate(*params).is_ok()));
        }
    }
}
