use common_types::Generate::GenerationParameters;

pub mod equation;
pub mod exponential;
pub mod factorization;
pub mod function;

/// Floor applied to `max_constant_term` by the algebra topics.
pub const MIN_CONSTANT_TERM: i64 = 6;

pub fn constant_term_bound(options: &GenerationParameters) -> i64 {
    options.max_constant_term.max(MIN_CONSTANT_TERM)
}
