use itertools::Itertools;

use crate::error::ParseError;
use crate::input::{numbered_lines, whitespace_numbers};
use crate::{Answers, Puzzle, RunConfig};

pub struct RedNosedReports;

/// Levels all increase or all decrease, by 1 to 3 at each step.
fn is_safe(levels: &[i64]) -> bool {
    let increasing = levels
        .iter()
        .tuple_windows()
        .all(|(a, b)| (1..=3).contains(&(b - a)));
    let decreasing = levels
        .iter()
        .tuple_windows()
        .all(|(a, b)| (1..=3).contains(&(a - b)));
    increasing || decreasing
}

fn is_safe_dampened(levels: &[i64]) -> bool {
    is_safe(levels)
        || (0..levels.len()).any(|skip| {
            let rest: Vec<i64> = levels
                .iter()
                .enumerate()
                .filter(|&(index, _)| index != skip)
                .map(|(_, &level)| level)
                .collect();
            is_safe(&rest)
        })
}

impl Puzzle for RedNosedReports {
    fn day(&self) -> u8 {
        2
    }

    fn title(&self) -> &'static str {
        "Red-Nosed Reports"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let reports = numbered_lines(input)
            .map(|(line, text)| whitespace_numbers::<i64>(text, line))
            .collect::<Result<Vec<_>, _>>()?;

        let safe = reports.iter().filter(|levels| is_safe(levels)).count();
        let dampened = reports
            .iter()
            .filter(|levels| is_safe_dampened(levels))
            .count();
        Ok(Answers::new(safe, dampened))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
7 6 4 2 1
1 2 7 8 9
9 7 6 2 1
1 3 2 4 5
8 6 4 4 1
1 3 6 7 9
";

    #[test]
    fn test_example() {
        let answers = RedNosedReports.solve(EXAMPLE, &RunConfig::default()).unwrap();
        assert_eq!(answers, Answers::new(2usize, 4usize));
    }

    #[test]
    fn test_removing_first_level() {
        assert!(!is_safe(&[9, 1, 2, 3]));
        assert!(is_safe_dampened(&[9, 1, 2, 3]));
    }
}
