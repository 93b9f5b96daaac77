#[allow(non_snake_case)]
pub mod Generate {
    use ::std::fmt;
    use ::std::str;
    use serde::{Deserialize, Serialize};

    pub const DEFAULT_MAX_CONSTANT_TERM: i64 = 20;

    #[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum Difficulty {
        Easy,
        Medium,
        Hard,
    }

    impl Difficulty {
        pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

        pub fn tag(&self) -> &'static str {
            match self {
                Difficulty::Easy => "easy",
                Difficulty::Medium => "medium",
                Difficulty::Hard => "hard",
            }
        }
    }

    impl fmt::Display for Difficulty {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{}", self.tag())
        }
    }

    impl str::FromStr for Difficulty {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_ascii_lowercase().as_str() {
                "easy" => Ok(Difficulty::Easy),
                "medium" => Ok(Difficulty::Medium),
                "hard" => Ok(Difficulty::Hard),
                _ => Err(format!("'{}' is not a valid Difficulty", s)),
            }
        }
    }

    /// How the strings of a question are meant to be shown. `Math` strings are
    /// bare LaTeX bodies and are wrapped in math mode by whoever renders them,
    /// `Plain` strings are shown as they are.
    #[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
    pub enum Rendering {
        Plain,
        Math,
    }

    #[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum Topic {
        // Arithmetic
        IntegerArithmetic,
        FractionArithmetic,
        Power,
        Root,
        // Algebra
        Factorization,
        Equation,
        FunctionEvaluation,
        ExponentialEquation,
        // Sequences and series
        ArithmeticSequence,
        GeometricSequence,
        ArithmeticSeries,
        GeometricSeries,
        // Calculus
        Derivative,
        Integral,
        DefiniteIntegral,
    }

    impl Topic {
        pub const ALL: [Topic; 15] = [
            Topic::IntegerArithmetic,
            Topic::FractionArithmetic,
            Topic::Power,
            Topic::Root,
            Topic::Factorization,
            Topic::Equation,
            Topic::FunctionEvaluation,
            Topic::ExponentialEquation,
            Topic::ArithmeticSequence,
            Topic::GeometricSequence,
            Topic::ArithmeticSeries,
            Topic::GeometricSeries,
            Topic::Derivative,
            Topic::Integral,
            Topic::DefiniteIntegral,
        ];

        /// Tag stored alongside persisted questions.
        pub fn tag(&self) -> &'static str {
            match self {
                Topic::IntegerArithmetic => "integer",
                Topic::FractionArithmetic => "fraction",
                Topic::Power => "power",
                Topic::Root => "root",
                Topic::Factorization => "polynomial",
                Topic::Equation => "equation",
                Topic::FunctionEvaluation => "function",
                Topic::ExponentialEquation => "exponential",
                Topic::ArithmeticSequence => "arithmetic_sequence",
                Topic::GeometricSequence => "geometric_sequence",
                Topic::ArithmeticSeries => "arithmetic_series",
                Topic::GeometricSeries => "geometric_series",
                Topic::Derivative => "derivative",
                Topic::Integral => "integral",
                Topic::DefiniteIntegral => "definite_integral",
            }
        }

        pub fn rendering(&self) -> Rendering {
            match self {
                Topic::IntegerArithmetic
                | Topic::Factorization
                | Topic::Equation
                | Topic::FunctionEvaluation
                | Topic::ArithmeticSequence
                | Topic::GeometricSequence
                | Topic::ArithmeticSeries
                | Topic::GeometricSeries => Rendering::Plain,
                Topic::FractionArithmetic
                | Topic::Power
                | Topic::Root
                | Topic::ExponentialEquation
                | Topic::Derivative
                | Topic::Integral
                | Topic::DefiniteIntegral => Rendering::Math,
            }
        }
    }

    impl fmt::Display for Topic {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl str::FromStr for Topic {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            let s = s.trim();
            Topic::ALL
                .iter()
                .find(|topic| topic.tag() == s || format!("{:?}", topic) == s)
                .copied()
                .ok_or_else(|| format!("'{}' is not a valid Topic", s))
        }
    }

    #[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
    pub struct GenerationParameters {
        pub topic: Topic,
        pub difficulty: Difficulty,
        pub max_constant_term: i64,
    }

    impl GenerationParameters {
        pub fn new(topic: Topic, difficulty: Difficulty) -> Self {
            Self {
                topic,
                difficulty,
                max_constant_term: DEFAULT_MAX_CONSTANT_TERM,
            }
        }
        pub fn with_max_constant_term(mut self, max_constant_term: i64) -> Self {
            self.max_constant_term = max_constant_term;
            self
        }
    }

    pub fn str_to_topic<T: AsRef<str>>(topic: T) -> Result<Topic, String> {
        topic.as_ref().parse()
    }
    pub fn str_to_difficulty<T: AsRef<str>>(difficulty: T) -> Result<Difficulty, String> {
        difficulty.as_ref().parse()
    }
    pub fn str_to_topics<T: AsRef<str>>(topics: T) -> Result<Vec<Topic>, String> {
        topics.as_ref()
            .split(',')
            .map(|x| x.trim().parse::<Topic>())
            .collect()
    }
}

#[allow(non_snake_case)]
pub mod Persist {
    use serde::{Deserialize, Serialize};
    use crate::Generate::{Difficulty, Topic};

    // The store accepts inserts of at most this many rows per call
    pub const PERSIST_CHUNK_SIZE: usize = 25;

    #[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
    pub struct QuestionRecord {
        pub topic: String,
        pub difficulty: String,
        pub question_text: String,
        pub correct_answer_text: String,
        pub choices: Vec<String>,
    }

    impl QuestionRecord {
        pub fn new(topic: Topic, difficulty: Difficulty, question_text: String, correct_answer_text: String, choices: Vec<String>) -> Self {
            Self {
                topic: topic.tag().to_owned(),
                difficulty: difficulty.tag().to_owned(),
                question_text,
                correct_answer_text,
                choices,
            }
        }
    }
}
