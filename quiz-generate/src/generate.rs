use common_types::Generate::{self, Difficulty, GenerationParameters};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub mod checker;
pub mod distractor;
pub mod distribution;
pub mod engine;
pub mod factorspec;
pub mod formatter;
pub mod fraction;
pub mod helper;
pub mod question;
pub mod questionstacker;
pub mod term;

use engine::{math, GenerateFailure, GenerateResult, MAX_BATCH_ATTEMPTS};
use question::Question;
use questionstacker::Stacker;

/// One question for the topic and difficulty in `options`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Question {
    let pointer = math::get_generator_from_topic::<R>(options.topic);
    pointer(rng, options)
}

/// Up to `count` questions with pairwise distinct expressions.
///
/// Every slot gets `MAX_BATCH_ATTEMPTS` draws to find an unseen expression,
/// a slot that runs out is left empty and the batch comes back short.
pub fn generate_batch<R: Rng + ?Sized>(rng: &mut R, count: usize, options: &GenerationParameters) -> Vec<Question> {
    let pointer = math::get_generator_from_topic::<R>(options.topic);
    let mut stacker = Stacker::new();

    for slot in 0..count {
        let accepted = (0..MAX_BATCH_ATTEMPTS).any(|_| stacker.try_push(pointer(rng, options)));
        if !accepted {
            tracing::trace!(topic = %options.topic, slot, "slot exhausted its attempts");
        }
    }

    if stacker.len() < count {
        tracing::warn!(
            topic = %options.topic,
            difficulty = %options.difficulty,
            requested = count,
            generated = stacker.len(),
            "batch came back short"
        );
    }
    stacker.consume_get_questions()
}

/// `count` questions drawn evenly across the subtypes of the topic's pool.
pub fn generate_curated<R: Rng + ?Sized>(rng: &mut R, count: usize, options: &GenerationParameters) -> Vec<Question> {
    let pointer = math::get_curator_from_topic::<R>(options.topic);
    pointer(rng, count, options)
}

/// A deduplicated batch per topic for a comma-separated list of topic tags.
pub fn generate_from_tags<R: Rng + ?Sized>(
    rng: &mut R,
    count_per_topic: usize,
    tags: &str,
    difficulty: Difficulty,
    max_constant_term: i64,
) -> GenerateResult<Vec<Question>> {
    let topics = Generate::str_to_topics(tags).map_err(GenerateFailure::InvalidTopic)?;
    let mut questions = Vec::new();

    for topic in topics {
        let options = GenerationParameters::new(topic, difficulty).with_max_constant_term(max_constant_term);
        questions.extend(generate_batch(rng, count_per_topic, &options));
    }

    Ok(questions)
}

/// Owns the random source so callers don't have to thread one through.
pub struct QuizGenerator {
    rng: StdRng,
}
impl QuizGenerator {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
    /// Same seed, same questions.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn generate(&mut self, options: &GenerationParameters) -> Question {
        generate(&mut self.rng, options)
    }
    pub fn generate_batch(&mut self, count: usize, options: &GenerationParameters) -> Vec<Question> {
        generate_batch(&mut self.rng, count, options)
    }
    pub fn generate_curated(&mut self, count: usize, options: &GenerationParameters) -> Vec<Question> {
        generate_curated(&mut self.rng, count, options)
    }
}

impl Default for QuizGenerator {
    fn default() -> Self {
        Self::new()
    }
}
