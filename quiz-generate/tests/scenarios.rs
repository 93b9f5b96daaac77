use ::std::collections::HashMap;

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use quiz_generate::generate::{
    engine::{
        build,
        math::{
            algebra::factorization::{self, Factorization},
            arithmetic::power::{Power, PowerParams},
            calculus::{
                definite_integral::{DefiniteIntegral, DefiniteIntegralParams},
                derivative::{Derivative, DerivativeParams},
                integral::{Integral, IntegralParams},
            },
            sequences::{
                geometric_sequence::{GeometricSequence, GeometricSequenceParams},
                Ask,
            },
        },
    },
    formatter,
    fraction::Fraction,
    term::{self, Term},
};
use quiz_generate::{generate_curated, QuizGenerator};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn two_cubed_is_eight() {
    let mut rng = StdRng::seed_from_u64(1);
    let question = build::<Power, _>(&mut rng, &PowerParams { base: 2, exponent: 3 });
    assert_eq!(question.correct_answer, "8");
    assert_eq!(question.choices.len(), 4);
}

#[test]
fn two_x_over_one_to_three_is_eight() {
    let mut rng = StdRng::seed_from_u64(2);
    let params = DefiniteIntegralParams { terms: vec![Term::power(2, 1)], lower: 1, upper: 3 };
    let question = build::<DefiniteIntegral, _>(&mut rng, &params);
    assert_eq!(question.correct_answer, "8");
    assert!(question.choices.contains(&"8".to_owned()));
}

#[test]
fn factorization_accepts_either_factor_order() {
    let mut rng = StdRng::seed_from_u64(3);
    let spec = factorization::from_monic_quadratic(5, 6).unwrap();
    let question = build::<Factorization, _>(&mut rng, &spec);
    assert!(question.check_answer("(x+2)(x+3)"));
    assert!(question.check_answer("(x+3)(x+2)"));
    assert!(question.check_answer("(x + 3)(x + 2)"));
    assert!(!question.check_answer("(x+1)(x+6)"));
}

#[test]
fn geometric_fourth_term_is_fifty_four() {
    let mut rng = StdRng::seed_from_u64(4);
    let params = GeometricSequenceParams { a1: 2, r: Fraction::from_integer(3), n: 4, ask: Ask::NthTerm };
    let question = build::<GeometricSequence, _>(&mut rng, &params);
    assert_eq!(question.correct_answer, "54");
}

#[test]
fn curated_batches_cover_every_subtype() {
    let mut rng = StdRng::seed_from_u64(5);
    let options = GenerationParameters::new(Topic::GeometricSequence, Difficulty::Easy);
    let curated = generate_curated(&mut rng, 100, &options);
    assert_eq!(curated.len(), 100);

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for question in curated.iter() {
        *counts.entry(question.subtype.as_str()).or_default() += 1;
    }
    assert_eq!(counts.len(), 5);
    assert!(counts.values().all(|count| *count >= 20), "{counts:?}");
}

#[test]
fn integrating_then_differentiating_recovers_the_integrand() {
    let mut rng = StdRng::seed_from_u64(6);
    let terms = vec![Term::power(3, 2)];
    let integral = build::<Integral, _>(&mut rng, &IntegralParams { terms: terms.clone() });
    assert_eq!(integral.correct_answer, "x^{3} + C");

    let antiderivative = term::integrate_all(&terms).unwrap();
    assert_eq!(term::differentiate_all(&antiderivative), terms);

    let derivative = build::<Derivative, _>(&mut rng, &DerivativeParams { terms: vec![Term::power(1, 3)] });
    assert_eq!(derivative.correct_answer, "3x^{2}");
    assert_eq!(formatter::format_monomial_sum(&terms), "3x^{2}");
}

#[test]
fn exact_rational_antiderivatives_differentiate_back() {
    let integrands = [
        vec![Term::power(2, -3), Term::constant(-1)],
        vec![Term::new(3, Fraction::new(1, 2)), Term::power(4, 1)],
        vec![Term::new(-5, Fraction::new(2, 3))],
    ];
    for terms in integrands {
        let antiderivative = term::integrate_all(&terms).unwrap();
        assert_eq!(term::differentiate_all(&antiderivative), terms);
    }
}

#[test]
fn seeded_generator_is_reproducible() {
    let options = GenerationParameters::new(Topic::Integral, Difficulty::Hard);
    let first = QuizGenerator::seeded(99).generate(&options);
    let second = QuizGenerator::seeded(99).generate(&options);
    assert_eq!(first.expression, second.expression);
    assert_eq!(first.choices, second.choices);
}
