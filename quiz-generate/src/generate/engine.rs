use ::std::collections::HashSet;
use ::std::fmt::Debug;
use common_types::Generate::{GenerationParameters, Topic};
use rand::Rng;

use super::{
    distractor::{self, Candidate, Domain, Value},
    distribution,
    helper,
    question::{AnswerChecker, Question},
};

pub mod math;

pub type GenerateResult<T> = Result<T, GenerateFailure>;

#[derive(Debug)]
pub enum GenerateFailure {
    InvalidTopic( String ),
}

/// Why a random draw was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds,
    NotPerfectPower,
    NonIntegerRoot,
    NonIntegerAnswer,
    CommonFactor,
    Degenerate,
    DuplicateRoots,
}

pub const MAX_DRAW_ATTEMPTS: usize = 10;
pub const MAX_BATCH_ATTEMPTS: usize = 50;
pub const DEFAULT_SPREAD: i64 = 10;

pub fn ensure(condition: bool, rejection: Rejection) -> Result<(), Rejection> {
    if condition {
        Ok(())
    } else {
        Err(rejection)
    }
}

/// One topic: how to draw its parameters and turn them into a question.
pub trait Generator {
    type Params: Clone + Debug;
    const TOPIC: Topic;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<Self::Params, Rejection>;
    /// A fixed instance known to pass every check of `draw`.
    fn fallback(options: &GenerationParameters) -> Self::Params;
    /// Every valid instance over a small parameter grid.
    fn pool(options: &GenerationParameters) -> Vec<Self::Params>;
    fn subtype(params: &Self::Params) -> &'static str;

    fn expression(params: &Self::Params) -> String;
    fn answer(params: &Self::Params) -> Value;
    fn templates(params: &Self::Params) -> Vec<Candidate>;
    /// The `k`-th jitter around the answer, distinct for distinct `k`.
    fn perturb(params: &Self::Params, k: i64) -> Option<Value>;

    fn domain(_params: &Self::Params) -> Domain {
        Domain::ANY
    }
    fn checker(_params: &Self::Params) -> Option<AnswerChecker> {
        None
    }
    fn spread(_params: &Self::Params) -> i64 {
        DEFAULT_SPREAD
    }
}

pub fn build<G: Generator, R: Rng + ?Sized>(rng: &mut R, params: &G::Params) -> Question {
    let rendering = G::TOPIC.rendering();
    let correct_answer = G::answer(params).render(rendering);
    let checker = G::checker(params);
    let distractors = distractor::synthesize(
        rng,
        &correct_answer,
        rendering,
        G::templates(params),
        &G::domain(params),
        checker.as_ref(),
        G::spread(params),
        |k| G::perturb(params, k),
    );

    let mut choices = Vec::with_capacity(distractor::DISTRACTOR_COUNT + 1);
    choices.push(correct_answer.clone());
    choices.extend(distractors);
    helper::shuffle(rng, &mut choices);

    Question {
        topic: G::TOPIC,
        subtype: G::subtype(params).to_owned(),
        rendering,
        expression: G::expression(params),
        correct_answer,
        choices,
        checker,
    }
}

pub fn generate<G: Generator, R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Question {
    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        match G::draw(rng, options) {
            Ok(params) => return build::<G, R>(rng, &params),
            Err(rejection) => tracing::trace!(topic = %G::TOPIC, attempt, ?rejection, "rejected draw"),
        }
    }
    tracing::warn!(topic = %G::TOPIC, difficulty = %options.difficulty, "draw attempts exhausted, using fallback");
    build::<G, R>(rng, &G::fallback(options))
}

pub fn curate<G: Generator, R: Rng + ?Sized>(rng: &mut R, count: usize, options: &GenerationParameters) -> Vec<Question> {
    let mut seen = HashSet::new();
    let pool: Vec<(&'static str, G::Params)> = G::pool(options)
        .into_iter()
        .filter(|params| seen.insert(G::expression(params)))
        .map(|params| (G::subtype(&params), params))
        .collect();
    tracing::debug!(topic = %G::TOPIC, pool = pool.len(), "enumerated question pool");

    distribution::stratify(rng, pool, count)
        .into_iter()
        .map(|params| build::<G, R>(rng, &params))
        .collect()
}
