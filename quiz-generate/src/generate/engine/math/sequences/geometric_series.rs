/*
 *
 * DES: S_n = a_1(r^n - 1)/(r - 1) with an integer ratio above one.
 * ASK: Geometric series: a_1 = 2, r = 3, n = 5. Find S_{5}
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use crate::generate::{
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    helper,
};

const MAX_SUM: i64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometricSeriesParams {
    pub a1: i64,
    pub r: i64,
    pub n: i64,
}

impl GeometricSeriesParams {
    fn power(&self, exponent: i64) -> Option<i64> {
        self.r.checked_pow(u32::try_from(exponent).ok()?)
    }

    fn sum_with(&self, n: i64) -> Option<i64> {
        Some(self.a1 * (self.power(n)? - 1) / (self.r - 1))
    }

    fn sum(&self) -> i64 {
        self.sum_with(self.n).unwrap_or_default()
    }
}

struct Range {
    a1: &'static [i64],
    r: &'static [i64],
    n: (i64, i64),
}

fn range(difficulty: Difficulty) -> Range {
    match difficulty {
        Difficulty::Easy => Range { a1: &[1, 2], r: &[2, 3], n: (3, 5) },
        Difficulty::Medium => Range { a1: &[1, 2, 3], r: &[2, 3, 4], n: (4, 7) },
        Difficulty::Hard => Range { a1: &[1, 2, 3, 4], r: &[2, 3, 5], n: (5, 9) },
    }
}

fn validate(params: GeometricSeriesParams) -> Result<GeometricSeriesParams, Rejection> {
    ensure(params.r > 1 && params.a1 > 0, Rejection::Degenerate)?;
    let sum = params.sum_with(params.n).ok_or(Rejection::OutOfBounds)?;
    ensure(sum <= MAX_SUM, Rejection::OutOfBounds)?;
    Ok(params)
}

pub struct GeometricSeries;

impl Generator for GeometricSeries {
    type Params = GeometricSeriesParams;
    const TOPIC: Topic = Topic::GeometricSeries;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<GeometricSeriesParams, Rejection> {
        let range = range(options.difficulty);
        validate(GeometricSeriesParams {
            a1: helper::pick(rng, range.a1),
            r: helper::pick(rng, range.r),
            n: helper::gen_range_i64(rng, range.n.0, range.n.1),
        })
    }

    fn fallback(_options: &GenerationParameters) -> GeometricSeriesParams {
        GeometricSeriesParams { a1: 1, r: 2, n: 5 }
    }

    fn pool(options: &GenerationParameters) -> Vec<GeometricSeriesParams> {
        let range = range(options.difficulty);
        let mut pool = Vec::new();
        for a1 in range.a1.iter().copied() {
            for r in range.r.iter().copied() {
                for n in range.n.0..=range.n.1 {
                    if let Ok(params) = validate(GeometricSeriesParams { a1, r, n }) {
                        pool.push(params);
                    }
                }
            }
        }
        pool
    }

    fn subtype(params: &GeometricSeriesParams) -> &'static str {
        match params.r {
            2 => "ratio_two",
            3 => "ratio_three",
            _ => "ratio_large",
        }
    }

    fn expression(params: &GeometricSeriesParams) -> String {
        let (a1, r, n) = (params.a1, params.r, params.n);
        format!("Geometric series: a_1 = {a1}, r = {r}, n = {n}. Find S_{{{n}}}")
    }

    fn answer(params: &GeometricSeriesParams) -> Value {
        Value::Int(params.sum())
    }

    fn templates(params: &GeometricSeriesParams) -> Vec<Candidate> {
        let (a1, r, n) = (params.a1, params.r, params.n);
        let sum = params.sum();
        let Some(power) = params.power(n) else {
            return Vec::new();
        };
        let mut templates = vec![
            Candidate::new(ErrorMode::ForgotDivision, a1 * power),
            Candidate::new(ErrorMode::ForgotDivision, a1 * (power - 1)),
        ];
        if (a1 * (power + 1)) % (r - 1) == 0 {
            templates.push(Candidate::new(ErrorMode::SignFlip, a1 * (power + 1) / (r - 1)));
        }
        templates.push(Candidate::new(ErrorMode::ForgotCoefficient, (power - 1) / (r - 1)));
        templates.push(Candidate::new(ErrorMode::IndexOffByOne, sum * r));
        templates.push(Candidate::new(ErrorMode::OffByOne, sum + a1));
        templates.extend(Candidate::maybe(ErrorMode::IndexOffByOne, params.sum_with(n - 1)));
        templates
    }

    fn perturb(params: &GeometricSeriesParams, k: i64) -> Option<Value> {
        Some(Value::Int(params.sum() + k))
    }

    fn domain(_params: &GeometricSeriesParams) -> Domain {
        Domain::positive_integers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_series() {
        let params = GeometricSeriesParams { a1: 1, r: 2, n: 5 };
        assert_eq!(GeometricSeries::answer(&params), Value::Int(31));
        assert_eq!(GeometricSeries::expression(&params), "Geometric series: a_1 = 1, r = 2, n = 5. Find S_{5}");
        assert_eq!(GeometricSeries::subtype(&params), "ratio_two");
    }

    #[test]
    fn large_sums_are_rejected() {
        assert_eq!(validate(GeometricSeriesParams { a1: 4, r: 5, n: 9 }), Err(Rejection::OutOfBounds));
        assert!(validate(GeometricSeriesParams { a1: 2, r: 3, n: 5 }).is_ok());
    }

    #[test]
    fn easy_pool_keeps_small_ratios() {
        let options = GenerationParameters::new(Topic::GeometricSeries, Difficulty::Easy);
        let pool = GeometricSeries::pool(&options);
        assert_eq!(pool.len(), 12);
        assert!(pool.iter().all(|params| GeometricSeries::subtype(params) != "ratio_large"));
    }

    #[test]
    fn every_sum_is_exact() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::GeometricSeries, difficulty);
            for params in GeometricSeries::pool(&options) {
                let terms: i64 = (0..params.n).map(|k| params.a1 * params.r.pow(k as u32)).sum();
                assert_eq!(params.sum(), terms);
            }
        }
    }
}
