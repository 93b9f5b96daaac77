use common_types::{
    Generate::{Difficulty, Rendering, Topic},
    Persist::QuestionRecord,
};
use serde::{Deserialize, Serialize};

use super::formatter;

/// Answer forms that are textually different from the canonical answer but
/// mathematically the same, e.g. both factor orders of a factorization.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum AnswerChecker {
    AnyOf(Vec<String>),
}

impl AnswerChecker {
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = normalize(answer);
        match self {
            AnswerChecker::AnyOf(accepted) => accepted.iter().any(|form| normalize(form) == answer),
        }
    }
}

fn normalize(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Question {
    pub topic: Topic,
    pub subtype: String,
    pub rendering: Rendering,
    pub expression: String,
    pub correct_answer: String,
    pub choices: Vec<String>,
    pub checker: Option<AnswerChecker>,
}

impl Question {
    pub fn check_answer(&self, answer: &str) -> bool {
        match &self.checker {
            Some(checker) => checker.accepts(answer),
            None => normalize(answer) == normalize(&self.correct_answer),
        }
    }

    pub fn distractors(&self) -> impl Iterator<Item = &str> {
        self.choices
            .iter()
            .filter(move |choice| **choice != self.correct_answer)
            .map(String::as_str)
    }

    fn display(&self, text: &str) -> String {
        match self.rendering {
            Rendering::Plain => text.to_owned(),
            Rendering::Math => formatter::math_mode(text),
        }
    }

    pub fn display_expression(&self) -> String {
        self.display(&self.expression)
    }
    pub fn display_correct_answer(&self) -> String {
        self.display(&self.correct_answer)
    }
    pub fn display_choices(&self) -> Vec<String> {
        self.choices.iter().map(|choice| self.display(choice)).collect()
    }

    pub fn into_record(self, difficulty: Difficulty) -> QuestionRecord {
        QuestionRecord::new(
            self.topic,
            difficulty,
            self.display_expression(),
            self.display_correct_answer(),
            self.display_choices(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rendering: Rendering, checker: Option<AnswerChecker>) -> Question {
        Question {
            topic: Topic::Power,
            subtype: "positive".to_owned(),
            rendering,
            expression: "2^{3} = ?".to_owned(),
            correct_answer: "8".to_owned(),
            choices: vec!["6".to_owned(), "8".to_owned(), "5".to_owned(), "16".to_owned()],
            checker,
        }
    }

    #[test]
    fn check_answer_ignores_whitespace() {
        let question = sample(Rendering::Math, None);
        assert!(question.check_answer(" 8 "));
        assert!(!question.check_answer("9"));
    }

    #[test]
    fn checker_overrides_exact_match() {
        let checker = AnswerChecker::AnyOf(vec!["8".to_owned(), "2^{3}".to_owned()]);
        let question = sample(Rendering::Math, Some(checker));
        assert!(question.check_answer("2^{3}"));
    }

    #[test]
    fn math_rendering_is_delimited_on_display_only() {
        let question = sample(Rendering::Math, None);
        assert_eq!(question.display_expression(), r#"\(2^{3} = ?\)"#);
        assert_eq!(question.distractors().collect::<Vec<_>>(), vec!["6", "5", "16"]);

        let record = question.into_record(Difficulty::Easy);
        assert_eq!(record.topic, "power");
        assert_eq!(record.correct_answer_text, r#"\(8\)"#);
        assert_eq!(record.choices.len(), 4);
    }

    #[test]
    fn plain_rendering_is_untouched() {
        let question = sample(Rendering::Plain, None);
        assert_eq!(question.display_choices()[0], "6");
    }
}
