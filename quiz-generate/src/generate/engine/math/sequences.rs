use rand::Rng;

use crate::generate::{formatter, helper};

pub mod arithmetic_sequence;
pub mod arithmetic_series;
pub mod geometric_sequence;
pub mod geometric_series;

/// Largest term a sequence question may show or ask for.
pub const MAX_TERM: i64 = 10_000;

/// Which unknown a sequence question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ask {
    /// `a_n` from `a_1`, the step and `n`.
    NthTerm,
    /// The common difference or ratio from the first four terms.
    Step,
    /// The fourth term from the first three.
    NextTerm,
    /// `a_1` from `a_n`, the step and `n`.
    FirstTerm,
    /// `n` from `a_1`, the step and `a_n`.
    TermIndex,
}

impl Ask {
    pub const ALL: [Ask; 5] = [Ask::NthTerm, Ask::Step, Ask::NextTerm, Ask::FirstTerm, Ask::TermIndex];

    pub fn tag(&self, step_tag: &'static str) -> &'static str {
        match self {
            Ask::NthTerm => "find_an",
            Ask::Step => step_tag,
            Ask::NextTerm => "find_next",
            Ask::FirstTerm => "find_a1",
            Ask::TermIndex => "find_n",
        }
    }

    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Ask {
        helper::pick(rng, &Ask::ALL)
    }

    /// How many leading terms the question shows or depends on.
    pub fn terms_needed(&self, n: i64) -> i64 {
        match self {
            Ask::Step => 4,
            Ask::NextTerm => 4,
            _ => n,
        }
    }
}

/// `3, 5, 7, ...`
pub fn format_terms(terms: &[i64]) -> String {
    format!("{}, ...", formatter::format_i64_list_raw(terms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_tag_is_topic_specific() {
        assert_eq!(Ask::Step.tag("find_d"), "find_d");
        assert_eq!(Ask::Step.tag("find_r"), "find_r");
        assert_eq!(Ask::TermIndex.tag("find_r"), "find_n");
        assert_eq!(format_terms(&[2, 6, 18]), "2, 6, 18, ...");
    }
}
