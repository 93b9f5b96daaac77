use ::std::collections::HashSet;

use super::question::Question;

/// Collects questions for a batch, refusing any whose expression was
/// already taken.
#[derive(Debug)]
pub struct Stacker {
    questions: Vec<Question>,
    seen: HashSet<String>,
}
impl Stacker {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            seen: HashSet::new(),
        }
    }
    /// `false` when the expression is a duplicate, the question is dropped.
    pub fn try_push(&mut self, question: Question) -> bool {
        if !self.seen.insert(question.expression.clone()) {
            return false;
        }
        self.questions.push(question);
        true
    }
    pub fn len(&self) -> usize {
        self.questions.len()
    }
    pub fn consume_get_questions(self) -> Vec<Question> {
        self.questions
    }
}
