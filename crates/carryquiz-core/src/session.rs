//! Practice session state machine.
//!
//! A session walks through four phases:
//!
//! ```text
//! Configuring -> Practicing -> Reviewing -> ShowingResults
//!                    ^                            |
//!                    +------ retry incorrect -----+
//! ```
//!
//! `start_over` returns to `Configuring` from any phase. The scorer is never
//! run as a side effect of a transition; callers ask for [`Session::summary`]
//! whenever they want to show a score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::generator::generate;
use crate::model::{Configuration, Problem};
use crate::scoring::{incorrect_problems, is_correct, BatchSummary};
use crate::source::NumberSource;

/// Where a session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Configuring,
    Practicing,
    Reviewing,
    ShowingResults,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Configuring => write!(f, "configuring"),
            Phase::Practicing => write!(f, "practicing"),
            Phase::Reviewing => write!(f, "reviewing"),
            Phase::ShowingResults => write!(f, "showing results"),
        }
    }
}

/// What happened after an answer was submitted during practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    /// Whether the submitted answer was right, for immediate feedback.
    pub correct: bool,
    /// The session moved on to review because this was the last problem.
    pub finished: bool,
}

/// One learner's run through configure, practise, review and results.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    config: Option<Configuration>,
    problems: Vec<Problem>,
    current: usize,
    round: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Configuring,
            config: None,
            problems: Vec::new(),
            current: 0,
            round: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> Option<&Configuration> {
        self.config.as_ref()
    }

    /// The current batch.
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Index of the problem being practised.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        match self.phase {
            Phase::Practicing => self.problems.get(self.current),
            _ => None,
        }
    }

    /// How many batches have been practised since the last start, counting
    /// retries. Zero while configuring.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Grade the current batch.
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_problems(&self.problems)
    }

    fn require(&self, allowed: &[Phase], action: &'static str) -> Result<(), SessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::info!(from = %self.phase, to = %phase, round = self.round, "session phase change");
        self.phase = phase;
    }

    fn problem_mut(&mut self, id: usize) -> Result<&mut Problem, SessionError> {
        self.problems
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SessionError::UnknownProblem(id))
    }

    /// Validate `config`, generate a batch and start practising it.
    pub fn start<S: NumberSource + ?Sized>(
        &mut self,
        config: Configuration,
        source: &mut S,
    ) -> Result<(), SessionError> {
        self.require(&[Phase::Configuring], "start a practice")?;
        config.validate()?;

        self.problems = generate(&config, source);
        self.config = Some(config);
        self.current = 0;
        self.round = 1;
        self.enter(Phase::Practicing);
        Ok(())
    }

    /// Record an answer for the current problem and move to the next one.
    ///
    /// Blank answers are rejected. Answering the last problem hands the batch
    /// over to review.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome, SessionError> {
        self.require(&[Phase::Practicing], "submit an answer")?;
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        let problem = &mut self.problems[self.current];
        problem.user_answer = Some(answer.to_string());
        let correct = is_correct(problem);
        tracing::debug!(id = problem.id, correct, "answer submitted");

        let finished = self.advance();
        Ok(AnswerOutcome { correct, finished })
    }

    /// Move past the current problem. Returns `true` if that ended practice.
    fn advance(&mut self) -> bool {
        if self.current + 1 < self.problems.len() {
            self.current += 1;
            false
        } else {
            self.enter(Phase::Reviewing);
            true
        }
    }

    /// Skip to the next problem; past the last one goes to review.
    pub fn next(&mut self) -> Result<(), SessionError> {
        self.require(&[Phase::Practicing], "move to the next problem")?;
        self.advance();
        Ok(())
    }

    /// Go back one problem. Stays put on the first.
    pub fn previous(&mut self) -> Result<(), SessionError> {
        self.require(&[Phase::Practicing], "move to the previous problem")?;
        self.current = self.current.saturating_sub(1);
        Ok(())
    }

    /// Jump to the problem at `index`.
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.require(&[Phase::Practicing], "jump to a problem")?;
        if index >= self.problems.len() {
            return Err(SessionError::UnknownProblem(index));
        }
        self.current = index;
        Ok(())
    }

    /// Stop practising and review the whole batch.
    pub fn go_to_review(&mut self) -> Result<(), SessionError> {
        self.require(&[Phase::Practicing], "go to review")?;
        self.enter(Phase::Reviewing);
        Ok(())
    }

    /// Replace the answer of problem `id`. A blank answer clears it.
    pub fn update_answer(&mut self, id: usize, answer: Option<&str>) -> Result<(), SessionError> {
        self.require(&[Phase::Practicing, Phase::Reviewing], "change an answer")?;
        let problem = self.problem_mut(id)?;
        problem.user_answer = answer
            .filter(|a| !a.trim().is_empty())
            .map(str::to_string);
        Ok(())
    }

    /// Flip the review mark on problem `id` and return the new state.
    pub fn toggle_mark(&mut self, id: usize) -> Result<bool, SessionError> {
        self.require(&[Phase::Practicing, Phase::Reviewing], "mark a problem")?;
        let problem = self.problem_mut(id)?;
        problem.marked_for_review = !problem.marked_for_review;
        Ok(problem.marked_for_review)
    }

    /// Close the review and show results.
    pub fn finish_review(&mut self) -> Result<(), SessionError> {
        self.require(&[Phase::Reviewing], "finish the review")?;
        self.enter(Phase::ShowingResults);
        Ok(())
    }

    /// Practise the missed problems again.
    ///
    /// If nothing was missed, a fresh batch is generated from the same
    /// configuration instead.
    pub fn retry_incorrect<S: NumberSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<(), SessionError> {
        self.require(&[Phase::ShowingResults], "retry incorrect problems")?;
        let Some(config) = self.config else {
            return Err(SessionError::InvalidTransition {
                phase: self.phase,
                action: "retry without a configuration",
            });
        };

        let missed = incorrect_problems(&self.problems);
        self.problems = if missed.is_empty() {
            tracing::info!("perfect batch, generating a fresh one");
            generate(&config, source)
        } else {
            missed
        };
        self.current = 0;
        self.round += 1;
        self.enter(Phase::Practicing);
        Ok(())
    }

    /// Drop the configuration and batch and go back to configuring.
    pub fn start_over(&mut self) {
        self.config = None;
        self.problems.clear();
        self.current = 0;
        self.round = 0;
        self.enter(Phase::Configuring);
    }
}
