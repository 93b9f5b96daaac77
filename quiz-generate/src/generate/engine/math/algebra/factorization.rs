/*
 *
 * DES: A quadratic with integer roots built from two linear factors, monic on easy.
 * ASK: Factorize ax²+bx+c
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use super::constant_term_bound;
use crate::generate::{
    checker,
    distractor::{Candidate, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    factorspec::FactorizationSpec,
    formatter,
    helper,
    question::AnswerChecker,
};

/// The monic factorization `(x+p)(x+q)` of `x² + bx + c` with `p <= q`.
pub fn from_monic_quadratic(b: i64, c: i64) -> Option<FactorizationSpec> {
    let (low, high) = checker::integer_roots(1, b, c)?;
    Some(FactorizationSpec::Monic { p: -high, q: -low })
}

fn canonical(spec: FactorizationSpec) -> Result<FactorizationSpec, Rejection> {
    match spec {
        FactorizationSpec::Monic { .. } => {
            let (_, b, c) = spec.expand();
            from_monic_quadratic(b, c).ok_or(Rejection::NonIntegerRoot)
        },
        FactorizationSpec::General { a1, m, a2, n } => {
            if a1 < a2 || (a1 == a2 && m > n) {
                Ok(spec.swapped())
            } else {
                Ok(FactorizationSpec::General { a1, m, a2, n })
            }
        },
    }
}

fn validate(spec: FactorizationSpec, bound: i64) -> Result<FactorizationSpec, Rejection> {
    let (a, b, c) = spec.expand();
    ensure(checker::within_bound(c, bound), Rejection::OutOfBounds)?;
    ensure(!checker::is_zero(c), Rejection::Degenerate)?;
    ensure(checker::is_primitive(a, b, c), Rejection::CommonFactor)?;
    for (coefficient, constant) in spec.factors() {
        ensure(checker::is_reduced(coefficient, constant), Rejection::CommonFactor)?;
    }
    canonical(spec)
}

fn factor_ranges(difficulty: Difficulty) -> (&'static [i64], i64, f64) {
    match difficulty {
        Difficulty::Easy => (&[1], 10, 0.3),
        Difficulty::Medium => (&[1, 2, 3], 6, 0.4),
        Difficulty::Hard => (&[1, 2, 3, 4], 8, 0.5),
    }
}

/// Positive factor pairs `(f1, f2)` of `n` with `f1 <= f2`.
fn factor_pairs(n: i64) -> Vec<(i64, i64)> {
    let n = n.abs();
    (1..)
        .take_while(|i| i * i <= n)
        .filter(|i| n % i == 0)
        .map(|i| (i, n / i))
        .collect()
}

fn render(spec: &FactorizationSpec) -> Value {
    Value::Expr(formatter::format_factor_pair(spec))
}

pub struct Factorization;

impl Generator for Factorization {
    type Params = FactorizationSpec;
    const TOPIC: Topic = Topic::Factorization;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<FactorizationSpec, Rejection> {
        let (leading, max_constant, negate) = factor_ranges(options.difficulty);
        let factor = |rng: &mut R| -> (i64, i64) {
            let coefficient = helper::pick(rng, leading);
            let constant = helper::gen_range_i64(rng, 1, max_constant);
            (coefficient, helper::maybe_negate(rng, constant, negate))
        };
        let first = factor(rng);
        let second = factor(rng);
        validate(FactorizationSpec::from_factors(first, second), constant_term_bound(options))
    }

    fn fallback(_options: &GenerationParameters) -> FactorizationSpec {
        FactorizationSpec::Monic { p: 2, q: 3 }
    }

    fn pool(options: &GenerationParameters) -> Vec<FactorizationSpec> {
        let (leading, max_constant, _) = factor_ranges(options.difficulty);
        let bound = constant_term_bound(options);
        let constants: Vec<i64> = (1..=max_constant).flat_map(|v| [v, -v]).collect();
        let mut pool = Vec::new();
        for a1 in leading {
            for a2 in leading {
                for m in constants.iter() {
                    for n in constants.iter() {
                        let spec = FactorizationSpec::from_factors((*a1, *m), (*a2, *n));
                        if let Ok(spec) = validate(spec, bound) {
                            pool.push(spec);
                        }
                    }
                }
            }
        }
        pool
    }

    fn subtype(spec: &FactorizationSpec) -> &'static str {
        let (_, _, c) = spec.expand();
        match (spec.is_monic(), c > 0) {
            (true, true) => "monic_same_sign",
            (true, false) => "monic_opposite_sign",
            (false, true) => "general_same_sign",
            (false, false) => "general_opposite_sign",
        }
    }

    fn expression(spec: &FactorizationSpec) -> String {
        let (a, b, c) = spec.expand();
        formatter::format_quadratic(a, b, c)
    }

    fn answer(spec: &FactorizationSpec) -> Value {
        render(spec)
    }

    fn templates(spec: &FactorizationSpec) -> Vec<Candidate> {
        let [(a1, m), (a2, n)] = spec.factors();
        let mut templates = Vec::new();

        if m.signum() == n.signum() {
            templates.push(Candidate::new(ErrorMode::SignFlip, render(&spec.map_constants(|m, n| (-m, n)))));
            templates.push(Candidate::new(ErrorMode::SignFlip, render(&spec.map_constants(|m, n| (m, -n)))));
        } else {
            templates.push(Candidate::new(ErrorMode::SignFlip, render(&spec.map_constants(|m, n| (-m, -n)))));
        }

        if spec.is_monic() {
            let c = m * n;
            let sign = if m + n < 0 { -1 } else { 1 };
            for (f1, f2) in factor_pairs(c) {
                if (f1, f2) == (m.abs().min(n.abs()), m.abs().max(n.abs())) {
                    continue;
                }
                let second_sign = if c < 0 { -sign } else { sign };
                let pair = FactorizationSpec::Monic { p: sign * f1, q: second_sign * f2 };
                templates.push(Candidate::new(ErrorMode::WrongFactorPair, render(&pair)));
            }
        } else {
            let swapped_leading = FactorizationSpec::from_factors((a2, m), (a1, n));
            templates.push(Candidate::new(ErrorMode::SwappedOperands, render(&swapped_leading)));
            let a = a1 * a2;
            if a > 1 {
                let pulled = format!(
                    "{a}({})({})",
                    formatter::format_linear_factor(1, checker::round_half_up(m, a1)),
                    formatter::format_linear_factor(1, checker::round_half_up(n, a2)),
                );
                templates.push(Candidate::new(ErrorMode::PulledOutCoefficient, pulled));
            }
            templates.push(Candidate::new(ErrorMode::SwappedOperands, render(&spec.map_constants(|m, n| (n, m)))));
        }
        templates
    }

    fn perturb(spec: &FactorizationSpec, k: i64) -> Option<Value> {
        Some(render(&spec.map_constants(|m, n| (m, n + k))))
    }

    fn checker(spec: &FactorizationSpec) -> Option<AnswerChecker> {
        let forms = [*spec, spec.swapped(), spec.negated(), spec.negated().swapped()];
        Some(AnswerChecker::AnyOf(forms.iter().map(formatter::format_factor_pair).collect()))
    }

    fn spread(_spec: &FactorizationSpec) -> i64 {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::engine::build;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn monic_quadratic_accepts_both_orders() {
        let spec = from_monic_quadratic(5, 6).unwrap();
        assert_eq!(spec, FactorizationSpec::Monic { p: 2, q: 3 });

        let mut rng = StdRng::seed_from_u64(17);
        let question = build::<Factorization, _>(&mut rng, &spec);
        assert_eq!(question.expression, "x²+5x+6");
        assert_eq!(question.correct_answer, "(x+2)(x+3)");
        assert!(question.check_answer("(x+2)(x+3)"));
        assert!(question.check_answer("(x+3)(x+2)"));
        assert!(!question.check_answer("(x+1)(x+6)"));
        assert!(question.distractors().all(|choice| !question.check_answer(choice)));
    }

    #[test]
    fn general_form_is_canonical_and_primitive() {
        let spec = validate(FactorizationSpec::General { a1: 1, m: 3, a2: 2, n: -1 }, 20).unwrap();
        assert_eq!(formatter::format_factor_pair(&spec), "(2x-1)(x+3)");
        assert_eq!(
            validate(FactorizationSpec::General { a1: 2, m: 4, a2: 1, n: 1 }, 20),
            Err(Rejection::CommonFactor)
        );
    }

    #[test]
    fn wrong_factor_pairs_keep_the_product() {
        let templates = Factorization::templates(&FactorizationSpec::Monic { p: 2, q: 3 });
        let pair = templates.iter().find(|t| t.mode == ErrorMode::WrongFactorPair).unwrap();
        assert_eq!(pair.value, Value::Expr("(x+1)(x+6)".to_owned()));
    }

    #[test]
    fn constant_term_respects_bound() {
        let options = GenerationParameters::new(Topic::Factorization, Difficulty::Hard).with_max_constant_term(12);
        for spec in Factorization::pool(&options) {
            let (_, _, c) = spec.expand();
            assert!(c.abs() <= 12);
        }
    }

    #[test]
    fn every_pooled_factor_pair_multiplies_back() {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(Topic::Factorization, difficulty);
            for spec in Factorization::pool(&options) {
                let (a, b, c) = spec.expand();
                let [(a1, m), (a2, n)] = spec.factors();
                for x in -3..=3 {
                    assert_eq!((a1 * x + m) * (a2 * x + n), a * x * x + b * x + c, "{spec:?}");
                }
                assert_eq!(Factorization::expression(&spec), formatter::format_quadratic(a, b, c));
                assert_eq!(Factorization::answer(&spec), Value::Expr(formatter::format_factor_pair(&spec)));
            }
        }
    }
}
