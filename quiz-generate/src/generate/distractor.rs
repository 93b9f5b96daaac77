use ::std::collections::HashSet;
use common_types::Generate::Rendering;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    fraction::Fraction,
    helper,
    question::AnswerChecker,
};

pub const DISTRACTOR_COUNT: usize = 3;
pub const MAX_JITTER_ATTEMPTS: usize = 24;
pub const MAX_WALK_STEPS: i64 = 10_000;

/// The student mistake a wrong answer imitates.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMode {
    SignFlip,
    OffByOne,
    IndexOffByOne,
    CarryError,
    Doubled,
    ForgotDivision,
    ForgotCoefficient,
    ForgotExponentStep,
    WrongOperation,
    SwappedOperands,
    SwappedDirection,
    Truncation,
    WrongBranch,
    AddedAcross,
    ForgotReciprocal,
    WrongFactorPair,
    PulledOutCoefficient,
    DroppedConstant,
    KeptConstant,
    SwappedBounds,
    UpperBoundOnly,
    WrongIndex,
    RepeatedRoot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Frac(Fraction),
    Expr(String),
}

impl Value {
    pub fn render(&self, rendering: Rendering) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Frac(f) => f.render(rendering),
            Value::Expr(text) => text.clone(),
        }
    }

    pub fn as_fraction(&self) -> Option<Fraction> {
        match self {
            Value::Int(v) => Some(Fraction::from_integer(*v)),
            Value::Frac(f) => Some(*f),
            Value::Expr(_) => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}
impl From<Fraction> for Value {
    fn from(value: Fraction) -> Self {
        match value.to_integer() {
            Some(v) => Value::Int(v),
            None => Value::Frac(value),
        }
    }
}
impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Expr(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub mode: ErrorMode,
    pub value: Value,
}

impl Candidate {
    pub fn new<V: Into<Value>>(mode: ErrorMode, value: V) -> Self {
        Self { mode, value: value.into() }
    }

    /// Skips templates whose arithmetic has no exact result.
    pub fn maybe<V: Into<Value>>(mode: ErrorMode, value: Option<V>) -> Option<Self> {
        value.map(|value| Self::new(mode, value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Any,
    Positive,
    NonNegative,
}

/// The sanity filter numeric answers of a topic satisfy. Expression values
/// are always admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub sign: Sign,
    pub integral: bool,
    pub max_abs: Option<i64>,
}

impl Domain {
    pub const ANY: Domain = Domain { sign: Sign::Any, integral: false, max_abs: None };

    pub fn integers() -> Self {
        Self { sign: Sign::Any, integral: true, max_abs: None }
    }
    pub fn positive_integers() -> Self {
        Self { sign: Sign::Positive, integral: true, max_abs: None }
    }
    pub fn non_negative_integers() -> Self {
        Self { sign: Sign::NonNegative, integral: true, max_abs: None }
    }
    pub fn with_sign(self, sign: Sign) -> Self {
        Self { sign, ..self }
    }
    pub fn with_max_abs(self, max_abs: i64) -> Self {
        Self { max_abs: Some(max_abs), ..self }
    }

    pub fn admits(&self, value: &Value) -> bool {
        let Some(fraction) = value.as_fraction() else {
            return true;
        };
        let sign_ok = match self.sign {
            Sign::Any => true,
            Sign::Positive => fraction.is_positive(),
            Sign::NonNegative => !fraction.is_negative(),
        };
        let integral_ok = !self.integral || fraction.is_integer();
        let bound_ok = self.max_abs.map_or(true, |bound| {
            fraction.numerator().abs() <= bound * fraction.denominator()
        });
        sign_ok && integral_ok && bound_ok
    }
}

struct Picker<'a> {
    rendering: Rendering,
    domain: &'a Domain,
    checker: Option<&'a AnswerChecker>,
    seen: HashSet<String>,
    picked: Vec<String>,
}

impl<'a> Picker<'a> {
    fn is_full(&self) -> bool {
        self.picked.len() >= DISTRACTOR_COUNT
    }

    fn offer(&mut self, value: &Value, enforce_domain: bool) -> bool {
        if self.is_full() || (enforce_domain && !self.domain.admits(value)) {
            return false;
        }
        let rendered = value.render(self.rendering);
        if self.checker.map_or(false, |checker| checker.accepts(&rendered)) {
            return false;
        }
        let key: String = rendered.chars().filter(|c| !c.is_whitespace()).collect();
        if !self.seen.insert(key) {
            return false;
        }
        self.picked.push(rendered);
        true
    }
}

/// Picks exactly three wrong answers.
///
/// Templates are tried in order and kept when they pass the domain filter,
/// are not accepted by the checker, and differ from the correct answer and
/// from each other. Remaining slots are filled with `perturb(k)` for random
/// `k` within `±spread`, then by walking `k = 1, -1, 2, -2, ...`. `perturb`
/// must give distinct values for distinct `k`.
pub fn synthesize<R, F>(
    rng: &mut R,
    correct_answer: &str,
    rendering: Rendering,
    templates: Vec<Candidate>,
    domain: &Domain,
    checker: Option<&AnswerChecker>,
    spread: i64,
    perturb: F,
) -> Vec<String>
where
    R: Rng + ?Sized,
    F: Fn(i64) -> Option<Value>,
{
    let mut picker = Picker {
        rendering,
        domain,
        checker,
        seen: HashSet::new(),
        picked: Vec::with_capacity(DISTRACTOR_COUNT),
    };
    picker.seen.insert(correct_answer.chars().filter(|c| !c.is_whitespace()).collect());

    for candidate in templates.iter() {
        if picker.is_full() {
            break;
        }
        if !picker.offer(&candidate.value, true) {
            tracing::trace!(mode = ?candidate.mode, value = ?candidate.value, "discarded distractor template");
        }
    }

    if !picker.is_full() {
        tracing::debug!(correct_answer, found = picker.picked.len(), "distractor templates exhausted, jittering");
        let spread = spread.max(1);
        for _ in 0..MAX_JITTER_ATTEMPTS {
            if picker.is_full() {
                break;
            }
            let k = helper::gen_range_i64_except(rng, -spread, spread, 0);
            if let Some(value) = perturb(k) {
                picker.offer(&value, true);
            }
        }
    }

    // The walk first honours the domain, and only drops it when the domain
    // is too narrow to hold three more values.
    for enforce_domain in [true, false] {
        let mut step = 1;
        while !picker.is_full() && step <= MAX_WALK_STEPS {
            for k in [step, -step] {
                if let Some(value) = perturb(k) {
                    picker.offer(&value, enforce_domain);
                }
            }
            step += 1;
        }
    }

    if !picker.is_full() {
        tracing::error!(correct_answer, found = picker.picked.len(), "could not find enough distractors");
    }
    picker.picked
}
