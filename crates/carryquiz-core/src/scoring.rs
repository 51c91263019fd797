//! Grading answers and summarising a batch.

use serde::{Deserialize, Serialize};

use crate::model::Problem;

/// Parse a typed answer: all whitespace is dropped, and what remains must be
/// a non-empty run of ASCII digits that fits in a `u64`.
pub fn parse_answer(answer: &str) -> Option<u64> {
    let digits: String = answer.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Whether the learner's answer matches. Unanswered problems are incorrect.
pub fn is_correct(problem: &Problem) -> bool {
    problem
        .user_answer
        .as_deref()
        .and_then(parse_answer)
        .is_some_and(|n| n == problem.correct_answer())
}

/// The problems that were not answered correctly, ready to practise again:
/// answers and marks cleared, ids renumbered from 0.
pub fn incorrect_problems(problems: &[Problem]) -> Vec<Problem> {
    problems
        .iter()
        .filter(|p| !is_correct(p))
        .enumerate()
        .map(|(id, p)| p.reset_as(id))
        .collect()
}

/// Encouragement shown with the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encouragement {
    /// Every answer correct.
    Perfect,
    /// At least 80%.
    Great,
    /// At least 50%.
    GoodTry,
    KeepGoing,
}

impl Encouragement {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            Encouragement::Perfect
        } else if percentage >= 80.0 {
            Encouragement::Great
        } else if percentage >= 50.0 {
            Encouragement::GoodTry
        } else {
            Encouragement::KeepGoing
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Encouragement::Perfect => "¡Felicidades! ¡Todo perfecto!",
            Encouragement::Great => "¡Muy bien! ¡Sigue así!",
            Encouragement::GoodTry => "¡Buen intento! ¡A seguir practicando!",
            Encouragement::KeepGoing => "¡No te rindas! La práctica hace al maestro.",
        }
    }
}

/// Aggregate result of grading a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub correct_count: usize,
    pub answered_count: usize,
    pub total_count: usize,
}

impl BatchSummary {
    pub fn from_problems(problems: &[Problem]) -> Self {
        Self {
            correct_count: problems.iter().filter(|p| is_correct(p)).count(),
            answered_count: problems.iter().filter(|p| p.is_answered()).count(),
            total_count: problems.len(),
        }
    }

    /// Fraction correct in `0.0..=1.0`; zero for an empty batch.
    pub fn ratio(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.total_count as f64
    }

    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Score out of ten with one decimal, e.g. `"7.0"` or `"3.3"`. Halves
    /// round up, so 1 of 8 is `"1.3"`.
    pub fn score(&self) -> String {
        if self.total_count == 0 {
            return "0.0".to_string();
        }
        // Tenths of a point, rounded half up in integer arithmetic.
        let (correct, total) = (self.correct_count as u64, self.total_count as u64);
        let tenths = (correct * 200 + total) / (2 * total);
        format!("{}.{}", tenths / 10, tenths % 10)
    }

    pub fn is_perfect(&self) -> bool {
        self.total_count > 0 && self.correct_count == self.total_count
    }

    pub fn incorrect_count(&self) -> usize {
        self.total_count - self.correct_count
    }

    pub fn encouragement(&self) -> Encouragement {
        Encouragement::for_percentage(self.percentage())
    }
}
