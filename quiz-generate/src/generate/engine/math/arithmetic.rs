use crate::generate::{
    formatter::{LABEL_ADD, LABEL_DIVIDE, LABEL_DIVIDE_RAW, LABEL_MULTIPLY, LABEL_MULTIPLY_RAW, LABEL_SUBTRACT},
    fraction::Fraction,
};

pub mod fraction;
pub mod integer;
pub mod power;
pub mod root;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Subtract, Operator::Multiply, Operator::Divide];

    pub fn tag(&self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Multiply => "multiply",
            Operator::Divide => "divide",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => LABEL_ADD,
            Operator::Subtract => LABEL_SUBTRACT,
            Operator::Multiply => LABEL_MULTIPLY,
            Operator::Divide => LABEL_DIVIDE,
        }
    }

    pub fn symbol_raw(&self) -> &'static str {
        match self {
            Operator::Add => LABEL_ADD,
            Operator::Subtract => LABEL_SUBTRACT,
            Operator::Multiply => LABEL_MULTIPLY_RAW,
            Operator::Divide => LABEL_DIVIDE_RAW,
        }
    }

    /// The operator a student most often reaches for by mistake.
    pub fn confused(&self) -> Operator {
        match self {
            Operator::Add => Operator::Subtract,
            Operator::Subtract => Operator::Add,
            Operator::Multiply => Operator::Add,
            Operator::Divide => Operator::Multiply,
        }
    }

    /// `None` on overflow, division by zero, or inexact integer division.
    pub fn apply_integer(&self, left: i64, right: i64) -> Option<i64> {
        match self {
            Operator::Add => left.checked_add(right),
            Operator::Subtract => left.checked_sub(right),
            Operator::Multiply => left.checked_mul(right),
            Operator::Divide => {
                if right == 0 || left % right != 0 {
                    return None;
                }
                Some(left / right)
            }
        }
    }

    pub fn apply(&self, left: Fraction, right: Fraction) -> Option<Fraction> {
        match self {
            Operator::Add => Some(left + right),
            Operator::Subtract => Some(left - right),
            Operator::Multiply => Some(left * right),
            Operator::Divide => left.checked_div(right),
        }
    }
}
