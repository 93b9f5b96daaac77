/*
 *
 * DES: a_n = a_1 + (n-1)d, asked from any side: the term, the difference, the next term, a_1 or n.
 * ASK: Arithmetic sequence: a_1 = 3, d = +2. Find a_{10}
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::{format_terms, Ask, MAX_TERM};
use crate::generate::{
    checker,
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter::format_signed_value,
    helper,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticSequenceParams {
    pub a1: i64,
    pub d: i64,
    pub n: i64,
    pub ask: Ask,
}

impl ArithmeticSequenceParams {
    fn term(&self, k: i64) -> i64 {
        self.a1 + (k - 1) * self.d
    }

    fn terms(&self, count: i64) -> Vec<i64> {
        (1..=count).map(|k| self.term(k)).collect()
    }

    fn answer(&self) -> i64 {
        match self.ask {
            Ask::NthTerm => self.term(self.n),
            Ask::Step => self.d,
            Ask::NextTerm => self.term(4),
            Ask::FirstTerm => self.a1,
            Ask::TermIndex => self.n,
        }
    }
}

struct Range {
    a1: (i64, i64),
    d: (i64, i64),
    n: (i64, i64),
    pool_step: usize,
}

fn range(difficulty: Difficulty) -> Range {
    match difficulty {
        Difficulty::Easy => Range { a1: (1, 10), d: (1, 5), n: (3, 10), pool_step: 1 },
        Difficulty::Medium => Range { a1: (1, 20), d: (-5, 4), n: (5, 16), pool_step: 2 },
        Difficulty::Hard => Range { a1: (-10, 50), d: (-10, 9), n: (10, 24), pool_step: 3 },
    }
}

fn validate(params: ArithmeticSequenceParams) -> Result<ArithmeticSequenceParams, Rejection> {
    ensure(params.d != 0, Rejection::Degenerate)?;
    let needed = params.ask.terms_needed(params.n);
    ensure(
        checker::within_bound(params.term(needed), MAX_TERM) && checker::within_bound(params.term(params.n), MAX_TERM),
        Rejection::OutOfBounds,
    )?;
    Ok(params)
}

pub struct ArithmeticSequence;

impl Generator for ArithmeticSequence {
    type Params = ArithmeticSequenceParams;
    const TOPIC: Topic = Topic::ArithmeticSequence;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<ArithmeticSequenceParams, Rejection> {
        let range = range(options.difficulty);
        let params = ArithmeticSequenceParams {
            a1: helper::gen_range_i64(rng, range.a1.0, range.a1.1),
            d: helper::gen_range_i64_except(rng, range.d.0, range.d.1, 0),
            n: helper::gen_range_i64(rng, range.n.0, range.n.1),
            ask: Ask::draw(rng),
        };
        validate(params)
    }

    fn fallback(_options: &GenerationParameters) -> ArithmeticSequenceParams {
        ArithmeticSequenceParams { a1: 3, d: 2, n: 10, ask: Ask::NthTerm }
    }

    fn pool(options: &GenerationParameters) -> Vec<ArithmeticSequenceParams> {
        let range = range(options.difficulty);
        let mut pool = Vec::new();
        for a1 in (range.a1.0..=range.a1.1).step_by(range.pool_step) {
            for d in range.d.0..=range.d.1 {
                for n in range.n.0..=range.n.1 {
                    for ask in Ask::ALL {
                        if let Ok(params) = validate(ArithmeticSequenceParams { a1, d, n, ask }) {
                            pool.push(params);
                        }
                    }
                }
            }
        }
        pool
    }

    fn subtype(params: &ArithmeticSequenceParams) -> &'static str {
        params.ask.tag("find_d")
    }

    fn expression(params: &ArithmeticSequenceParams) -> String {
        let (a1, n) = (params.a1, params.n);
        let d = format_signed_value(params.d);
        match params.ask {
            Ask::NthTerm => format!("Arithmetic sequence: a_1 = {a1}, d = {d}. Find a_{{{n}}}"),
            Ask::Step => format!("Arithmetic sequence {} Find d", format_terms(&params.terms(4))),
            Ask::NextTerm => format!("Arithmetic sequence {} Find the next term", format_terms(&params.terms(3))),
            Ask::FirstTerm => format!("Arithmetic sequence: a_{{{n}}} = {}, d = {d}. Find a_1", params.term(n)),
            Ask::TermIndex => format!("Arithmetic sequence: a_1 = {a1}, d = {d}, a_n = {}. Find n", params.term(n)),
        }
    }

    fn answer(params: &ArithmeticSequenceParams) -> Value {
        Value::Int(params.answer())
    }

    fn templates(params: &ArithmeticSequenceParams) -> Vec<Candidate> {
        let (a1, d, n) = (params.a1, params.d, params.n);
        let answer = params.answer();
        match params.ask {
            Ask::NthTerm => vec![
                Candidate::new(ErrorMode::IndexOffByOne, a1 + n * d),
                Candidate::new(ErrorMode::IndexOffByOne, a1 + (n + 1) * d),
                Candidate::new(ErrorMode::IndexOffByOne, a1 + (n - 2) * d),
                Candidate::new(ErrorMode::OffByOne, answer + d),
                Candidate::new(ErrorMode::OffByOne, answer - d),
                Candidate::new(ErrorMode::WrongOperation, a1 * n + d),
            ],
            Ask::Step => vec![
                Candidate::new(ErrorMode::SignFlip, -d),
                Candidate::new(ErrorMode::OffByOne, d + 1),
                Candidate::new(ErrorMode::OffByOne, d - 1),
                Candidate::new(ErrorMode::Doubled, 2 * d),
                Candidate::new(ErrorMode::WrongOperation, params.term(2)),
            ],
            Ask::NextTerm => vec![
                Candidate::new(ErrorMode::IndexOffByOne, answer + d),
                Candidate::new(ErrorMode::SignFlip, answer - 2 * d),
                Candidate::new(ErrorMode::OffByOne, answer + 1),
                Candidate::new(ErrorMode::OffByOne, answer - 1),
                Candidate::new(ErrorMode::WrongOperation, params.term(3) + a1),
            ],
            Ask::FirstTerm => {
                let an = params.term(n);
                vec![
                    Candidate::new(ErrorMode::IndexOffByOne, an - n * d),
                    Candidate::new(ErrorMode::SignFlip, an + (n - 1) * d),
                    Candidate::new(ErrorMode::OffByOne, a1 + d),
                    Candidate::new(ErrorMode::OffByOne, a1 - d),
                    Candidate::new(ErrorMode::ForgotCoefficient, an - (n - 1)),
                ]
            },
            Ask::TermIndex => vec![
                Candidate::new(ErrorMode::IndexOffByOne, n - 1),
                Candidate::new(ErrorMode::IndexOffByOne, n + 1),
                Candidate::new(ErrorMode::OffByOne, n + 2),
                Candidate::new(ErrorMode::OffByOne, n - 2),
                Candidate::new(ErrorMode::Doubled, 2 * n),
            ],
        }
    }

    fn perturb(params: &ArithmeticSequenceParams, k: i64) -> Option<Value> {
        Some(Value::Int(params.answer() + k))
    }

    fn domain(params: &ArithmeticSequenceParams) -> Domain {
        match params.ask {
            Ask::TermIndex => Domain::positive_integers(),
            _ if params.answer() > 0 && params.d > 0 => Domain::positive_integers(),
            _ => Domain::integers(),
        }
    }

    fn spread(params: &ArithmeticSequenceParams) -> i64 {
        match params.ask {
            Ask::TermIndex | Ask::Step => 4,
            _ => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nth_term_question() {
        let params = ArithmeticSequenceParams { a1: 3, d: 2, n: 10, ask: Ask::NthTerm };
        assert_eq!(ArithmeticSequence::expression(&params), "Arithmetic sequence: a_1 = 3, d = +2. Find a_{10}");
        assert_eq!(ArithmeticSequence::answer(&params), Value::Int(21));
    }

    #[test]
    fn difference_and_next_term_show_leading_terms() {
        let step = ArithmeticSequenceParams { a1: 7, d: -3, n: 5, ask: Ask::Step };
        assert_eq!(ArithmeticSequence::expression(&step), "Arithmetic sequence 7, 4, 1, -2, ... Find d");
        assert_eq!(ArithmeticSequence::answer(&step), Value::Int(-3));

        let next = ArithmeticSequenceParams { ask: Ask::NextTerm, ..step };
        assert_eq!(ArithmeticSequence::answer(&next), Value::Int(-2));
        assert_eq!(ArithmeticSequence::subtype(&next), "find_next");
    }

    #[test]
    fn zero_difference_is_rejected() {
        let params = ArithmeticSequenceParams { a1: 3, d: 0, n: 4, ask: Ask::TermIndex };
        assert_eq!(validate(params), Err(Rejection::Degenerate));
    }

    #[test]
    fn every_pooled_answer_matches_stepping_through_the_terms() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::ArithmeticSequence, difficulty);
            for params in ArithmeticSequence::pool(&options) {
                let n = params.n as usize;
                let walked: Vec<i64> = ::std::iter::successors(Some(params.a1), |term| Some(term + params.d))
                    .take(n.max(4))
                    .collect();
                let expected = match params.ask {
                    Ask::NthTerm => walked[n - 1],
                    Ask::Step => walked[1] - walked[0],
                    Ask::NextTerm => walked[3],
                    Ask::FirstTerm => (1..n).fold(walked[n - 1], |term, _| term - params.d),
                    Ask::TermIndex => walked.iter().position(|term| *term == walked[n - 1]).map_or(0, |i| i as i64 + 1),
                };
                assert_eq!(ArithmeticSequence::answer(&params), Value::Int(expected), "{params:?}");
            }
        }
    }
}
