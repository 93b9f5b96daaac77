// Offline seeding driver: prints persistence-ready question records as JSON lines

use ::std::collections::BTreeMap;
use ::std::io::{self, Write};
use common_types::Persist::{QuestionRecord, PERSIST_CHUNK_SIZE};
use quiz_generate::{Question, QuizGenerator};
use thiserror::Error;

mod config;
use config::{SeedConfig, SeedMode};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("no environment variable for {0}")]
    MissingConfig(&'static str),
    #[error("invalid value for {0}: '{1}'")]
    InvalidConfig(&'static str, String),
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write records: {0}")]
    Io(#[from] io::Error),
}

fn produce(config: &SeedConfig) -> Vec<Question> {
    let mut generator = match config.rng_seed {
        Some(seed) => QuizGenerator::seeded(seed),
        None => QuizGenerator::new(),
    };
    let options = config.generation_parameters();
    match config.mode {
        SeedMode::Curated => generator.generate_curated(config.count, &options),
        SeedMode::Batch => generator.generate_batch(config.count, &options),
    }
}

fn log_subtypes(questions: &[Question]) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for question in questions.iter() {
        *counts.entry(question.subtype.as_str()).or_default() += 1;
    }
    for (subtype, count) in counts {
        tracing::info!("{subtype}: {count}");
    }
}

fn write_chunks<W: Write>(out: &mut W, records: &[QuestionRecord]) -> Result<(), SeedError> {
    for (index, chunk) in records.chunks(PERSIST_CHUNK_SIZE).enumerate() {
        let line = serde_json::to_string(chunk)?;
        writeln!(out, "{line}")?;
        tracing::info!("Wrote chunk {} with {} records", index + 1, chunk.len());
    }
    out.flush()?;
    Ok(())
}

fn run() -> Result<(), SeedError> {
    let config = SeedConfig::from_env()?;
    tracing::info!(
        "Seeding {} {} questions of {} ({:?})",
        config.count,
        config.difficulty,
        config.topic,
        config.mode
    );

    let questions = produce(&config);
    if questions.len() < config.count {
        tracing::warn!("Only {} of {} questions could be generated", questions.len(), config.count);
    }
    log_subtypes(&questions);

    let records: Vec<QuestionRecord> = questions
        .into_iter()
        .map(|question| question.into_record(config.difficulty))
        .collect();
    let stdout = io::stdout();
    write_chunks(&mut stdout.lock(), &records)
}

fn main() -> Result<(), SeedError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!("Seeding failed, {err}");
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_types::Generate::{Difficulty, Topic};

    #[test]
    fn records_are_written_in_chunks_of_twenty_five() {
        let config = SeedConfig::parse(Some("integer"), "easy", Some("60"), None, "batch", Some("3")).unwrap();
        let records: Vec<QuestionRecord> = produce(&config)
            .into_iter()
            .map(|question| question.into_record(Difficulty::Easy))
            .collect();
        assert_eq!(records.len(), 60);

        let mut out = Vec::new();
        write_chunks(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        let chunks: Vec<Vec<QuestionRecord>> = text.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![25, 25, 10]);
        assert!(chunks.iter().flatten().all(|record| record.topic == Topic::IntegerArithmetic.tag()));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = SeedConfig::parse(Some("root"), "medium", Some("10"), None, "curated", Some("21")).unwrap();
        let first: Vec<String> = produce(&config).into_iter().map(|q| q.expression).collect();
        let second: Vec<String> = produce(&config).into_iter().map(|q| q.expression).collect();
        assert_eq!(first, second);
    }
}
