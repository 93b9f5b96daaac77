pub mod generate;

pub use generate::{
    generate,
    generate_batch,
    generate_curated,
    generate_from_tags,
    QuizGenerator,
    question::{AnswerChecker, Question},
    engine::{GenerateFailure, GenerateResult},
};
