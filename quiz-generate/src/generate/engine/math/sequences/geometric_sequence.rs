/*
 *
 * DES: a_n = a_1·r^(n-1) with an integer or, on hard, a fractional ratio. Every shown term is an integer.
 * ASK: Geometric sequence: a_1 = 2, r = 3. Find a_{4}
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::{format_terms, Ask, MAX_TERM};
use crate::generate::{
    distractor::{Candidate, Domain, ErrorMode, Sign, Value},
    engine::{ensure, Generator, Rejection},
    fraction::Fraction,
    helper,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometricSequenceParams {
    pub a1: i64,
    pub r: Fraction,
    pub n: i64,
    pub ask: Ask,
}

impl GeometricSequenceParams {
    fn exact_term(&self, k: i64) -> Option<Fraction> {
        Some(Fraction::from_integer(self.a1) * self.r.pow(k - 1)?)
    }

    /// Only meaningful after `validate`, which checks every term up to the
    /// ones the question uses is an integer.
    fn term(&self, k: i64) -> i64 {
        self.exact_term(k).and_then(|term| term.to_integer()).unwrap_or_default()
    }

    fn answer(&self) -> Fraction {
        match self.ask {
            Ask::NthTerm => Fraction::from_integer(self.term(self.n)),
            Ask::Step => self.r,
            Ask::NextTerm => Fraction::from_integer(self.term(4)),
            Ask::FirstTerm => Fraction::from_integer(self.a1),
            Ask::TermIndex => Fraction::from_integer(self.n),
        }
    }
}

fn ratios(values: &[(i64, i64)]) -> Vec<Fraction> {
    values.iter().map(|(numerator, denominator)| Fraction::new(*numerator, *denominator)).collect()
}

const HARD_FRACTIONAL_RATIOS: [(i64, i64); 2] = [(1, 2), (3, 2)];
const HARD_INTEGER_RATIOS: [(i64, i64); 3] = [(2, 1), (3, 1), (-2, 1)];

/// Shared by the draw and the pool, so the pool is exactly the set of
/// instances a draw can reach.
struct Range {
    a1: Vec<i64>,
    r: Vec<Fraction>,
    /// Hard only, drawn instead of `r` with probability `FRACTIONAL_CHANCE`.
    fractional: Vec<Fraction>,
    n: (i64, i64),
}

const FRACTIONAL_CHANCE: f64 = 0.3;

fn range(difficulty: Difficulty) -> Range {
    match difficulty {
        Difficulty::Easy => Range {
            a1: (1..=10).collect(),
            r: ratios(&[(2, 1), (3, 1)]),
            fractional: Vec::new(),
            n: (3, 6),
        },
        Difficulty::Medium => Range {
            a1: (1..=6).collect(),
            r: ratios(&[(2, 1), (3, 1), (4, 1), (5, 1)]),
            fractional: Vec::new(),
            n: (4, 8),
        },
        Difficulty::Hard => Range {
            a1: vec![1, 2, 4, 8, 16],
            r: ratios(&HARD_INTEGER_RATIOS),
            fractional: ratios(&HARD_FRACTIONAL_RATIOS),
            n: (4, 9),
        },
    }
}

fn validate(params: GeometricSequenceParams) -> Result<GeometricSequenceParams, Rejection> {
    ensure(params.a1 != 0 && !params.r.is_zero() && params.r != Fraction::ONE, Rejection::Degenerate)?;
    let last = params.ask.terms_needed(params.n).max(params.n);
    for k in 1..=last {
        let term = params.exact_term(k).ok_or(Rejection::OutOfBounds)?;
        let term = term.to_integer().ok_or(Rejection::NonIntegerAnswer)?;
        ensure(term.abs() <= MAX_TERM, Rejection::OutOfBounds)?;
    }
    Ok(params)
}

pub struct GeometricSequence;

impl Generator for GeometricSequence {
    type Params = GeometricSequenceParams;
    const TOPIC: Topic = Topic::GeometricSequence;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<GeometricSequenceParams, Rejection> {
        let range = range(options.difficulty);
        let a1 = helper::pick(rng, &range.a1);
        let r = if !range.fractional.is_empty() && helper::chance(rng, FRACTIONAL_CHANCE) {
            helper::pick(rng, &range.fractional)
        } else {
            helper::pick(rng, &range.r)
        };
        let params = GeometricSequenceParams {
            a1,
            r,
            n: helper::gen_range_i64(rng, range.n.0, range.n.1),
            ask: Ask::draw(rng),
        };
        validate(params)
    }

    fn fallback(_options: &GenerationParameters) -> GeometricSequenceParams {
        GeometricSequenceParams { a1: 2, r: Fraction::from_integer(3), n: 4, ask: Ask::NthTerm }
    }

    fn pool(options: &GenerationParameters) -> Vec<GeometricSequenceParams> {
        let range = range(options.difficulty);
        let mut pool = Vec::new();
        for a1 in range.a1.iter() {
            for r in range.r.iter().chain(range.fractional.iter()) {
                for n in range.n.0..=range.n.1 {
                    for ask in Ask::ALL {
                        if let Ok(params) = validate(GeometricSequenceParams { a1: *a1, r: *r, n, ask }) {
                            pool.push(params);
                        }
                    }
                }
            }
        }
        pool
    }

    fn subtype(params: &GeometricSequenceParams) -> &'static str {
        params.ask.tag("find_r")
    }

    fn expression(params: &GeometricSequenceParams) -> String {
        let (a1, n) = (params.a1, params.n);
        let r = params.r.to_plain();
        let terms = |count: i64| (1..=count).map(|k| params.term(k)).collect::<Vec<_>>();
        match params.ask {
            Ask::NthTerm => format!("Geometric sequence: a_1 = {a1}, r = {r}. Find a_{{{n}}}"),
            Ask::Step => format!("Geometric sequence {} Find r", format_terms(&terms(4))),
            Ask::NextTerm => format!("Geometric sequence {} Find the next term", format_terms(&terms(3))),
            Ask::FirstTerm => format!("Geometric sequence: a_{{{n}}} = {}, r = {r}. Find a_1", params.term(n)),
            Ask::TermIndex => format!("Geometric sequence: a_1 = {a1}, r = {r}, a_n = {}. Find n", params.term(n)),
        }
    }

    fn answer(params: &GeometricSequenceParams) -> Value {
        Value::from(params.answer())
    }

    fn templates(params: &GeometricSequenceParams) -> Vec<Candidate> {
        let (r, n) = (params.r, params.n);
        let a1 = Fraction::from_integer(params.a1);
        let answer = params.answer();
        let int = Fraction::from_integer;
        let templates = match params.ask {
            Ask::NthTerm => vec![
                Candidate::maybe(ErrorMode::IndexOffByOne, params.exact_term(n + 1)),
                Candidate::maybe(ErrorMode::IndexOffByOne, params.exact_term(n - 1)),
                Candidate::maybe(ErrorMode::WrongOperation, r.pow(n - 1).map(|power| a1 + power)),
                Candidate::maybe(ErrorMode::OffByOne, answer.checked_div(r)),
                Some(Candidate::new(ErrorMode::WrongOperation, answer + r)),
            ],
            Ask::Step => vec![
                Some(Candidate::new(ErrorMode::OffByOne, r + int(1))),
                Some(Candidate::new(ErrorMode::OffByOne, r - int(1))),
                Some(Candidate::new(ErrorMode::Doubled, r * int(2))),
                Some(Candidate::new(ErrorMode::OffByOne, r + int(2))),
                Some(Candidate::new(ErrorMode::WrongOperation, a1)),
                Some(Candidate::new(ErrorMode::SignFlip, -r)),
            ],
            Ask::NextTerm => {
                let (second, third) = (int(params.term(2)), int(params.term(3)));
                vec![
                    Some(Candidate::new(ErrorMode::IndexOffByOne, answer * r)),
                    Some(Candidate::new(ErrorMode::WrongOperation, third + (third - second))),
                    Some(Candidate::new(ErrorMode::WrongOperation, third + r)),
                    Some(Candidate::new(ErrorMode::Doubled, answer * int(2))),
                    Some(Candidate::new(ErrorMode::OffByOne, answer + int(1))),
                ]
            },
            Ask::FirstTerm => vec![
                Some(Candidate::new(ErrorMode::WrongOperation, a1 * r)),
                Some(Candidate::new(ErrorMode::OffByOne, a1 + int(1))),
                Some(Candidate::new(ErrorMode::OffByOne, a1 - int(1))),
                Some(Candidate::new(ErrorMode::Doubled, a1 * int(2))),
                Candidate::maybe(
                    ErrorMode::IndexOffByOne,
                    r.pow(n).and_then(|power| int(params.term(n)).checked_div(power)),
                ),
                Some(Candidate::new(ErrorMode::WrongOperation, a1 + r)),
            ],
            Ask::TermIndex => vec![
                Some(Candidate::new(ErrorMode::IndexOffByOne, n - 1)),
                Some(Candidate::new(ErrorMode::IndexOffByOne, n + 1)),
                Some(Candidate::new(ErrorMode::OffByOne, n + 2)),
                Some(Candidate::new(ErrorMode::OffByOne, n - 2)),
                Some(Candidate::new(ErrorMode::Doubled, 2 * n)),
            ],
        };
        templates.into_iter().flatten().collect()
    }

    fn perturb(params: &GeometricSequenceParams, k: i64) -> Option<Value> {
        Some(Value::from(params.answer() + Fraction::from_integer(k)))
    }

    fn domain(params: &GeometricSequenceParams) -> Domain {
        match params.ask {
            Ask::TermIndex => Domain::positive_integers(),
            Ask::Step if !params.r.is_integer() => Domain::ANY.with_sign(Sign::Positive),
            Ask::Step => Domain::integers(),
            _ if params.a1 > 0 && params.r.is_positive() => Domain::positive_integers(),
            _ => Domain::integers(),
        }
    }

    fn spread(params: &GeometricSequenceParams) -> i64 {
        match params.ask {
            Ask::TermIndex | Ask::Step => 4,
            _ => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::engine::build;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn two_times_three_cubed() {
        let params = GeometricSequenceParams { a1: 2, r: Fraction::from_integer(3), n: 4, ask: Ask::NthTerm };
        let mut rng = StdRng::seed_from_u64(9);
        let question = build::<GeometricSequence, _>(&mut rng, &params);
        assert_eq!(question.expression, "Geometric sequence: a_1 = 2, r = 3. Find a_{4}");
        assert_eq!(question.correct_answer, "54");
        assert!(question.distractors().all(|choice| choice.parse::<i64>().map_or(false, |v| v > 0)));
    }

    #[test]
    fn halving_ratio_needs_integer_terms() {
        let half = Fraction::new(1, 2);
        let ok = GeometricSequenceParams { a1: 8, r: half, n: 4, ask: Ask::NthTerm };
        assert_eq!(GeometricSequence::answer(&validate(ok).unwrap()), Value::Int(1));
        let too_long = GeometricSequenceParams { n: 5, ..ok };
        assert_eq!(validate(too_long), Err(Rejection::NonIntegerAnswer));
    }

    #[test]
    fn ratio_question_shows_four_terms() {
        let params = GeometricSequenceParams { a1: 2, r: Fraction::from_integer(3), n: 4, ask: Ask::Step };
        assert_eq!(GeometricSequence::expression(&params), "Geometric sequence 2, 6, 18, 54, ... Find r");
        assert_eq!(GeometricSequence::subtype(&params), "find_r");
    }

    #[test]
    fn every_pooled_answer_matches_repeated_multiplication() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::GeometricSequence, difficulty);
            for params in GeometricSequence::pool(&options) {
                let n = params.n as usize;
                let walked: Vec<Fraction> =
                    ::std::iter::successors(Some(Fraction::from_integer(params.a1)), |term| Some(*term * params.r))
                        .take(n.max(4))
                        .collect();
                assert!(walked[..n].iter().all(Fraction::is_integer), "{params:?}");
                let expected = match params.ask {
                    Ask::NthTerm => walked[n - 1],
                    Ask::Step => walked[1] / walked[0],
                    Ask::NextTerm => walked[3],
                    Ask::FirstTerm => walked[0],
                    Ask::TermIndex => {
                        let index = walked.iter().position(|term| *term == walked[n - 1]).map_or(0, |i| i + 1);
                        Fraction::from_integer(index as i64)
                    },
                };
                assert_eq!(GeometricSequence::answer(&params), Value::from(expected), "{params:?}");
            }
        }
    }

    #[test]
    fn draw_and_pool_share_ratios() {
        let options = GenerationParameters::new(Topic::GeometricSequence, Difficulty::Easy);
        let pool = GeometricSequence::pool(&options);
        assert!(pool.iter().all(|params| params.r == Fraction::from_integer(2) || params.r == Fraction::from_integer(3)));
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            if let Ok(params) = GeometricSequence::draw(&mut rng, &options) {
                assert!(pool.contains(&params), "{params:?}");
            }
        }
    }
}
