use ::std::collections::HashSet;

use common_types::Generate::{Difficulty, GenerationParameters, Rendering, Topic};
use quiz_generate::{generate, generate_batch, generate_curated, Question};
use rand::{rngs::StdRng, SeedableRng};

const SEEDS: [u64; 4] = [1, 7, 2024, 90210];

fn assert_valid_choices(question: &Question) {
    let context = format!("{} / {}: {}", question.topic, question.subtype, question.expression);
    assert_eq!(question.choices.len(), 4, "{context}");
    let correct = question.choices.iter().filter(|choice| **choice == question.correct_answer).count();
    assert_eq!(correct, 1, "{context}");
    let unique: HashSet<_> = question.choices.iter().collect();
    assert_eq!(unique.len(), 4, "{context}");

    assert!(question.check_answer(&question.correct_answer), "{context}");
    for distractor in question.distractors() {
        assert!(!question.check_answer(distractor), "{context}: {distractor}");
    }
}

#[test]
fn every_topic_yields_four_distinct_choices() {
    for seed in SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        for topic in Topic::ALL {
            for difficulty in Difficulty::ALL {
                let options = GenerationParameters::new(topic, difficulty);
                for _ in 0..5 {
                    let question = generate(&mut rng, &options);
                    assert_eq!(question.topic, topic);
                    assert_valid_choices(&question);
                }
            }
        }
    }
}

#[test]
fn strings_never_carry_math_delimiters() {
    let mut rng = StdRng::seed_from_u64(3);
    for topic in Topic::ALL {
        let options = GenerationParameters::new(topic, Difficulty::Hard);
        let question = generate(&mut rng, &options);
        assert_eq!(question.rendering, topic.rendering());
        for text in question.choices.iter().chain([&question.expression]) {
            assert!(!text.contains(r"\(") && !text.contains('$'), "{text}");
        }
        let shown = question.display_expression();
        match question.rendering {
            Rendering::Math => assert!(shown.starts_with(r"\(") && shown.ends_with(r"\)")),
            Rendering::Plain => assert_eq!(shown, question.expression),
        }
    }
}

#[test]
fn batches_never_repeat_an_expression() {
    let mut rng = StdRng::seed_from_u64(11);
    for topic in Topic::ALL {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(topic, difficulty);
            let batch = generate_batch(&mut rng, 15, &options);
            assert!(!batch.is_empty());
            assert!(batch.len() <= 15);
            let expressions: HashSet<_> = batch.iter().map(|q| q.expression.as_str()).collect();
            assert_eq!(expressions.len(), batch.len(), "{topic} {difficulty}");
        }
    }
}

#[test]
fn curated_sets_are_unique_and_valid() {
    let mut rng = StdRng::seed_from_u64(5);
    for topic in Topic::ALL {
        for difficulty in Difficulty::ALL {
            let options = GenerationParameters::new(topic, difficulty);
            let curated = generate_curated(&mut rng, 30, &options);
            assert!(!curated.is_empty(), "{topic} {difficulty}");
            assert!(curated.len() <= 30);
            let expressions: HashSet<_> = curated.iter().map(|q| q.expression.as_str()).collect();
            assert_eq!(expressions.len(), curated.len(), "{topic} {difficulty}");
            curated.iter().for_each(assert_valid_choices);
        }
    }
}

#[test]
fn records_carry_the_persisted_shape() {
    let mut rng = StdRng::seed_from_u64(8);
    let options = GenerationParameters::new(Topic::Integral, Difficulty::Easy);
    let question = generate(&mut rng, &options);
    let choices = question.display_choices();
    let record = question.into_record(Difficulty::Easy);
    assert_eq!(record.topic, "integral");
    assert_eq!(record.difficulty, "easy");
    assert_eq!(record.choices, choices);
    assert!(record.choices.contains(&record.correct_answer_text));
}
