//! Core data model types for carryquiz.
//!
//! A [`Configuration`] describes one practice session; the generator turns it
//! into a batch of [`Problem`]s that the front end fills in and the scorer
//! grades.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Largest digit count whose operands and sums still fit in a `u64`.
pub const MAX_SUPPORTED_DIGITS: u32 = 18;

/// Which operations a session practises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Add,
    Subtract,
    /// Addition or subtraction, chosen per problem.
    #[default]
    Mixed,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationType::Add => write!(f, "add"),
            OperationType::Subtract => write!(f, "subtract"),
            OperationType::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for OperationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" | "addition" | "suma" | "+" => Ok(OperationType::Add),
            "subtract" | "sub" | "subtraction" | "resta" | "-" => Ok(OperationType::Subtract),
            "mixed" | "mix" | "mezcla" => Ok(OperationType::Mixed),
            other => Err(format!("unknown operation type: {other}")),
        }
    }
}

/// The operator of a single problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }

    /// Apply the operator. Callers guarantee `a >= b` for subtraction.
    pub fn apply(&self, a: u64, b: u64) -> u64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Settings for one practice session. Immutable once a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Upper bound on the number of digits per operand.
    pub max_digits: u32,
    /// How many problems to generate.
    pub num_problems: usize,
    /// Which operations to practise.
    #[serde(default)]
    pub operation_type: OperationType,
    /// Retry operand pairs until a carry or borrow shows up.
    #[serde(default)]
    pub force_carry: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_digits: 2,
            num_problems: 10,
            operation_type: OperationType::Mixed,
            force_carry: false,
        }
    }
}

impl Configuration {
    /// Check the bounds the generator relies on.
    ///
    /// The generator itself never validates; whoever collects the
    /// configuration calls this first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_digits == 0 {
            return Err(ConfigError::ZeroDigits);
        }
        if self.max_digits > MAX_SUPPORTED_DIGITS {
            return Err(ConfigError::TooManyDigits {
                requested: self.max_digits,
                max: MAX_SUPPORTED_DIGITS,
            });
        }
        if self.num_problems == 0 {
            return Err(ConfigError::NoProblems);
        }
        Ok(())
    }

    /// Width of an answer in digit boxes: one more than the operands, so a
    /// final carry always has room.
    pub fn answer_width(&self) -> usize {
        self.max_digits as usize + 1
    }
}

/// A single arithmetic problem within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Position within the current batch, dense from 0.
    pub id: usize,
    pub operand1: u64,
    pub operand2: u64,
    pub operator: Operator,
    correct_answer: u64,
    /// The learner's answer as typed, blanks included. `None` means unanswered.
    #[serde(default)]
    pub user_answer: Option<String>,
    /// Flag the learner sets to come back to this problem.
    #[serde(default)]
    pub marked_for_review: bool,
}

impl Problem {
    /// Build an unanswered problem. Subtraction operands must already be
    /// ordered so that `operand1 >= operand2`.
    pub fn new(id: usize, operand1: u64, operand2: u64, operator: Operator) -> Self {
        debug_assert!(operator == Operator::Add || operand1 >= operand2);
        Self {
            id,
            operand1,
            operand2,
            operator,
            correct_answer: operator.apply(operand1, operand2),
            user_answer: None,
            marked_for_review: false,
        }
    }

    pub fn correct_answer(&self) -> u64 {
        self.correct_answer
    }

    /// Whether the learner has typed anything other than blanks.
    pub fn is_answered(&self) -> bool {
        self.user_answer
            .as_deref()
            .is_some_and(|a| !a.trim().is_empty())
    }

    /// The same problem at a new position with its answer and mark cleared.
    pub fn reset_as(&self, id: usize) -> Self {
        Self {
            id,
            user_answer: None,
            marked_for_review: false,
            ..self.clone()
        }
    }

    /// One-line rendering, e.g. `62 - 38`.
    pub fn expression(&self) -> String {
        format!("{} {} {}", self.operand1, self.operator, self.operand2)
    }
}
