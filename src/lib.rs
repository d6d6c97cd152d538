//! Grid Puzzle Solvers
//!
//! One solver per day of a programming-puzzle advent calendar. Each solver
//! reads its day's text input and produces an answer for both parts of the
//! puzzle. The oriented maze search and the box-pushing warehouse simulation
//! live in their own modules since they carry most of the algorithmic weight.

pub mod days;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod maze;
pub mod warehouse;

use std::fmt;

use error::ParseError;

/// Options threaded through a solver run.
///
/// These only switch on optional rendering and self-checks; they never change
/// the computed answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    /// Log rendered maps before and after a simulation.
    pub render: bool,
    /// Verify structural invariants after every simulated step.
    pub check_invariants: bool,
    /// Log every simulated step at trace level.
    pub trace_steps: bool,
}

/// The answer to one part of a puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Number(i64),
    Text(String),
    /// The puzzle has no solution for this input (for example, a target that
    /// cannot be reached).
    Unreachable,
}

impl From<i64> for Answer {
    fn from(value: i64) -> Self {
        Answer::Number(value)
    }
}

impl From<usize> for Answer {
    fn from(value: usize) -> Self {
        Answer::Number(value as i64)
    }
}

impl<T: Into<Answer>> From<Option<T>> for Answer {
    fn from(value: Option<T>) -> Self {
        value.map_or(Answer::Unreachable, Into::into)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(value) => write!(f, "{value}"),
            Answer::Text(text) => f.write_str(text),
            Answer::Unreachable => f.write_str("not reachable"),
        }
    }
}

/// Answers for both parts of a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub part1: Answer,
    pub part2: Answer,
}

impl Answers {
    pub fn new(part1: impl Into<Answer>, part2: impl Into<Answer>) -> Self {
        Self {
            part1: part1.into(),
            part2: part2.into(),
        }
    }
}

/// Trait that erases the concrete solver type for dynamic dispatch.
///
/// Every day is a unit struct; the registry in [`days`] hands them out as
/// `&'static dyn Puzzle` so the CLI can pick one by number.
pub trait Puzzle: Sync {
    fn day(&self) -> u8;
    fn title(&self) -> &'static str;
    fn solve(&self, input: &str, config: &RunConfig) -> Result<Answers, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_display() {
        assert_eq!(Answer::from(42i64).to_string(), "42");
        assert_eq!(Answer::Text("6,1".into()).to_string(), "6,1");
        assert_eq!(Answer::from(None::<i64>).to_string(), "not reachable");
    }
}
