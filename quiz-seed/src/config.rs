use ::std::str;
use common_types::Generate::{self, Difficulty, GenerationParameters, Topic, DEFAULT_MAX_CONSTANT_TERM};
use lazy_static::lazy_static;

use crate::SeedError;

pub const DEFAULT_SEED_COUNT: usize = 100;

// Read once from the environment (or `.env`) at first use
lazy_static!{
    static ref SEED_TOPIC: Option<String> = dotenvy::var("SEED_TOPIC").ok();
    static ref SEED_DIFFICULTY: String = dotenvy::var("SEED_DIFFICULTY").unwrap_or("easy".to_owned());
    static ref SEED_COUNT: Option<String> = dotenvy::var("SEED_COUNT").ok();
    static ref SEED_MAX_CONSTANT_TERM: Option<String> = dotenvy::var("SEED_MAX_CONSTANT_TERM").ok();
    static ref SEED_MODE: String = dotenvy::var("SEED_MODE").unwrap_or("curated".to_owned());
    static ref SEED_RNG_SEED: Option<String> = dotenvy::var("SEED_RNG_SEED").ok();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Stratified across the subtypes of the topic's pool.
    Curated,
    /// Random draws, deduplicated by expression.
    Batch,
}

impl str::FromStr for SeedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "curated" => Ok(SeedMode::Curated),
            "batch" => Ok(SeedMode::Batch),
            _ => Err(format!("'{}' is not a valid SeedMode", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub count: usize,
    pub max_constant_term: i64,
    pub mode: SeedMode,
    pub rng_seed: Option<u64>,
}

fn parse_number<T: str::FromStr>(name: &'static str, raw: Option<&str>, default: T) -> Result<T, SeedError> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| SeedError::InvalidConfig(name, raw.to_owned())),
    }
}

impl SeedConfig {
    pub fn from_env() -> Result<Self, SeedError> {
        Self::parse(
            SEED_TOPIC.as_deref(),
            &SEED_DIFFICULTY,
            SEED_COUNT.as_deref(),
            SEED_MAX_CONSTANT_TERM.as_deref(),
            &SEED_MODE,
            SEED_RNG_SEED.as_deref(),
        )
    }

    pub fn parse(
        topic: Option<&str>,
        difficulty: &str,
        count: Option<&str>,
        max_constant_term: Option<&str>,
        mode: &str,
        rng_seed: Option<&str>,
    ) -> Result<Self, SeedError> {
        let topic = topic.ok_or(SeedError::MissingConfig("SEED_TOPIC"))?;
        let topic = Generate::str_to_topic(topic).map_err(|_| SeedError::InvalidConfig("SEED_TOPIC", topic.to_owned()))?;
        let difficulty = Generate::str_to_difficulty(difficulty)
            .map_err(|_| SeedError::InvalidConfig("SEED_DIFFICULTY", difficulty.to_owned()))?;
        let mode = mode
            .parse::<SeedMode>()
            .map_err(|_| SeedError::InvalidConfig("SEED_MODE", mode.to_owned()))?;
        let rng_seed = match rng_seed {
            None => None,
            Some(raw) => Some(parse_number("SEED_RNG_SEED", Some(raw), 0u64)?),
        };

        Ok(Self {
            topic,
            difficulty,
            count: parse_number("SEED_COUNT", count, DEFAULT_SEED_COUNT)?,
            max_constant_term: parse_number("SEED_MAX_CONSTANT_TERM", max_constant_term, DEFAULT_MAX_CONSTANT_TERM)?,
            mode,
            rng_seed,
        })
    }

    pub fn generation_parameters(&self) -> GenerationParameters {
        GenerationParameters::new(self.topic, self.difficulty).with_max_constant_term(self.max_constant_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = SeedConfig::parse(Some("geometric_sequence"), "easy", None, None, "curated", None).unwrap();
        assert_eq!(config.topic, Topic::GeometricSequence);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert_eq!(config.count, DEFAULT_SEED_COUNT);
        assert_eq!(config.max_constant_term, DEFAULT_MAX_CONSTANT_TERM);
        assert_eq!(config.mode, SeedMode::Curated);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = SeedConfig::parse(Some("Integral"), "Hard", Some("40"), Some("12"), "batch", Some("7")).unwrap();
        assert_eq!(config.topic, Topic::Integral);
        assert_eq!(config.count, 40);
        assert_eq!(config.mode, SeedMode::Batch);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.generation_parameters().max_constant_term, 12);
    }

    #[test]
    fn bad_values_name_their_variable() {
        let missing = SeedConfig::parse(None, "easy", None, None, "curated", None).unwrap_err();
        assert!(matches!(missing, SeedError::MissingConfig("SEED_TOPIC")));
        let count = SeedConfig::parse(Some("power"), "easy", Some("many"), None, "curated", None).unwrap_err();
        assert!(matches!(count, SeedError::InvalidConfig("SEED_COUNT", _)));
        let mode = SeedConfig::parse(Some("power"), "easy", None, None, "stream", None).unwrap_err();
        assert!(matches!(mode, SeedError::InvalidConfig("SEED_MODE", _)));
    }
}
