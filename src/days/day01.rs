use rustc_hash::FxHashMap;

use crate::error::ParseError;
use crate::input::{numbered_lines, whitespace_numbers};
use crate::{Answers, Puzzle, RunConfig};

pub struct HistorianHysteria;

fn parse(input: &str) -> Result<(Vec<i64>, Vec<i64>), ParseError> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (line, text) in numbered_lines(input) {
        match whitespace_numbers::<i64>(text, line)?[..] {
            [l, r] => {
                left.push(l);
                right.push(r);
            }
            _ => return Err(ParseError::malformed(line, "expected two location ids")),
        }
    }
    Ok((left, right))
}

fn total_distance(mut left: Vec<i64>, mut right: Vec<i64>) -> i64 {
    left.sort_unstable();
    right.sort_unstable();
    left.iter().zip(&right).map(|(l, r)| (l - r).abs()).sum()
}

fn similarity(left: &[i64], right: &[i64]) -> i64 {
    let mut counts: FxHashMap<i64, i64> = FxHashMap::default();
    for &id in right {
        *counts.entry(id).or_default() += 1;
    }
    left.iter()
        .map(|id| id * counts.get(id).copied().unwrap_or(0))
        .sum()
}

impl Puzzle for HistorianHysteria {
    fn day(&self) -> u8 {
        1
    }

    fn title(&self) -> &'static str {
        "Historian Hysteria"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let (left, right) = parse(input)?;
        let part2 = similarity(&left, &right);
        Ok(Answers::new(total_distance(left, right), part2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "3   4\n4   3\n2   5\n1   3\n3   9\n3   3\n";

    #[test]
    fn test_example() {
        let answers = HistorianHysteria
            .solve(EXAMPLE, &RunConfig::default())
            .unwrap();
        assert_eq!(answers, Answers::new(11i64, 31i64));
    }

    #[test]
    fn test_odd_line_rejected() {
        let err = parse("1 2\n3\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 2, .. }));
    }
}
