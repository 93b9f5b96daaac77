/*
 *
 * DES: S_n = n(2a_1 + (n-1)d)/2, which is always an integer.
 * ASK: Arithmetic series: a_1 = 3, d = +2, n = 10. Find S_{10}
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use crate::generate::{
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter::format_signed_value,
    fraction::Fraction,
    helper,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticSeriesParams {
    pub a1: i64,
    pub d: i64,
    pub n: i64,
}

impl ArithmeticSeriesParams {
    /// `n(2a_1 + (n-1)d)`, twice the sum.
    fn doubled_sum(&self) -> i64 {
        self.n * (2 * self.a1 + (self.n - 1) * self.d)
    }

    fn sum(&self) -> i64 {
        self.doubled_sum() / 2
    }
}

struct Range {
    a1: (i64, i64),
    d: (i64, i64),
    n: (i64, i64),
}

fn range(difficulty: Difficulty) -> Range {
    match difficulty {
        Difficulty::Easy => Range { a1: (1, 10), d: (1, 5), n: (3, 10) },
        Difficulty::Medium => Range { a1: (1, 20), d: (-5, 4), n: (5, 16) },
        Difficulty::Hard => Range { a1: (1, 30), d: (-10, 9), n: (10, 24) },
    }
}

fn validate(params: ArithmeticSeriesParams) -> Result<ArithmeticSeriesParams, Rejection> {
    ensure(params.n >= 2, Rejection::Degenerate)?;
    ensure(params.doubled_sum() % 2 == 0, Rejection::NonIntegerAnswer)?;
    Ok(params)
}

pub struct ArithmeticSeries;

impl Generator for ArithmeticSeries {
    type Params = ArithmeticSeriesParams;
    const TOPIC: Topic = Topic::ArithmeticSeries;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<ArithmeticSeriesParams, Rejection> {
        let range = range(options.difficulty);
        validate(ArithmeticSeriesParams {
            a1: helper::gen_range_i64(rng, range.a1.0, range.a1.1),
            d: helper::gen_range_i64(rng, range.d.0, range.d.1),
            n: helper::gen_range_i64(rng, range.n.0, range.n.1),
        })
    }

    fn fallback(_options: &GenerationParameters) -> ArithmeticSeriesParams {
        ArithmeticSeriesParams { a1: 1, d: 2, n: 5 }
    }

    fn pool(options: &GenerationParameters) -> Vec<ArithmeticSeriesParams> {
        let range = range(options.difficulty);
        let mut pool = Vec::new();
        for a1 in range.a1.0..=range.a1.1 {
            for d in range.d.0..=range.d.1 {
                for n in range.n.0..=range.n.1 {
                    if let Ok(params) = validate(ArithmeticSeriesParams { a1, d, n }) {
                        pool.push(params);
                    }
                }
            }
        }
        pool
    }

    fn subtype(params: &ArithmeticSeriesParams) -> &'static str {
        match params.d {
            0 => "constant",
            d if d > 0 => "increasing",
            _ => "decreasing",
        }
    }

    fn expression(params: &ArithmeticSeriesParams) -> String {
        let (a1, n) = (params.a1, params.n);
        format!(
            "Arithmetic series: a_1 = {a1}, d = {}, n = {n}. Find S_{{{n}}}",
            format_signed_value(params.d)
        )
    }

    fn answer(params: &ArithmeticSeriesParams) -> Value {
        Value::Int(params.sum())
    }

    fn templates(params: &ArithmeticSeriesParams) -> Vec<Candidate> {
        let (a1, d, n) = (params.a1, params.d, params.n);
        let sum = params.sum();
        let half_n = Fraction::new(n, 2);
        vec![
            Candidate::new(ErrorMode::ForgotDivision, params.doubled_sum()),
            Candidate::new(ErrorMode::ForgotCoefficient, half_n * Fraction::from_integer(a1 + (n - 1) * d)),
            Candidate::new(ErrorMode::IndexOffByOne, half_n * Fraction::from_integer(2 * a1 + n * d)),
            Candidate::new(ErrorMode::WrongOperation, n * a1 + (n - 1) * d),
            Candidate::new(ErrorMode::OffByOne, sum + a1),
            Candidate::new(ErrorMode::OffByOne, sum - d),
        ]
    }

    fn perturb(params: &ArithmeticSeriesParams, k: i64) -> Option<Value> {
        Some(Value::Int(params.sum() + k))
    }

    fn domain(params: &ArithmeticSeriesParams) -> Domain {
        if params.sum() > 0 {
            Domain::positive_integers()
        } else {
            Domain::integers()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_of_first_five_odd_numbers() {
        let params = ArithmeticSeriesParams { a1: 1, d: 2, n: 5 };
        assert_eq!(ArithmeticSeries::answer(&params), Value::Int(25));
        assert_eq!(
            ArithmeticSeries::expression(&params),
            "Arithmetic series: a_1 = 1, d = +2, n = 5. Find S_{5}"
        );
        assert_eq!(ArithmeticSeries::templates(&params)[0].value, Value::Int(50));
    }

    #[test]
    fn subtype_follows_difference_sign() {
        let decreasing = ArithmeticSeriesParams { a1: 20, d: -3, n: 6 };
        assert_eq!(ArithmeticSeries::subtype(&decreasing), "decreasing");
        assert_eq!(ArithmeticSeries::answer(&decreasing), Value::Int(75));
        let constant = ArithmeticSeriesParams { d: 0, ..decreasing };
        assert_eq!(ArithmeticSeries::subtype(&constant), "constant");
    }

    #[test]
    fn every_pooled_sum_matches_adding_the_terms() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::ArithmeticSeries, difficulty);
            for params in ArithmeticSeries::pool(&options) {
                let added: i64 = ::std::iter::successors(Some(params.a1), |term| Some(term + params.d))
                    .take(params.n as usize)
                    .sum();
                assert_eq!(ArithmeticSeries::answer(&params), Value::Int(added), "{params:?}");
            }
        }
    }
}
