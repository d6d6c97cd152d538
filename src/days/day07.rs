use crate::error::ParseError;
use crate::input::{numbered_lines, parse_number, whitespace_numbers};
use crate::{Answers, Puzzle, RunConfig};

pub struct BridgeRepair;

struct Equation {
    target: u64,
    operands: Vec<u64>,
}

fn parse(input: &str) -> Result<Vec<Equation>, ParseError> {
    numbered_lines(input)
        .map(|(line, text)| {
            let (target, operands) = text
                .split_once(':')
                .ok_or_else(|| ParseError::malformed(line, "missing ':'"))?;
            let operands = whitespace_numbers(operands, line)?;
            if operands.is_empty() {
                return Err(ParseError::malformed(line, "no operands"));
            }
            Ok(Equation {
                target: parse_number(target, line)?,
                operands,
            })
        })
        .collect()
}

/// Strips the decimal digits of `suffix` off the end of `value`.
fn strip_digits(value: u64, suffix: u64) -> Option<u64> {
    let mut shift = 10;
    while shift <= suffix {
        shift *= 10;
    }
    (value > suffix && value % shift == suffix).then_some(value / shift)
}

/// Works backwards from the target, undoing the last operand each time.
/// Operators apply left to right, so the last operand is always applied last.
fn solvable(target: u64, operands: &[u64], concat: bool) -> bool {
    let Some((&last, rest)) = operands.split_last() else {
        return false;
    };
    if rest.is_empty() {
        return target == last;
    }
    (target >= last && solvable(target - last, rest, concat))
        || (last != 0 && target % last == 0 && solvable(target / last, rest, concat))
        || (concat && strip_digits(target, last).is_some_and(|head| solvable(head, rest, concat)))
}

fn calibration(equations: &[Equation], concat: bool) -> i64 {
    equations
        .iter()
        .filter(|equation| solvable(equation.target, &equation.operands, concat))
        .map(|equation| equation.target as i64)
        .sum()
}

impl Puzzle for BridgeRepair {
    fn day(&self) -> u8 {
        7
    }

    fn title(&self) -> &'static str {
        "Bridge Repair"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let equations = parse(input)?;
        Ok(Answers::new(
            calibration(&equations, false),
            calibration(&equations, true),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
190: 10 19
3267: 81 40 27
83: 17 5
156: 15 6
7290: 6 8 6 15
161011: 16 10 13
192: 17 8 14
21037: 9 7 18 13
292: 11 6 16 20
";

    #[test]
    fn test_example() {
        let answers = BridgeRepair.solve(EXAMPLE, &RunConfig::default()).unwrap();
        assert_eq!(answers, Answers::new(3749i64, 11387i64));
    }

    #[test]
    fn test_strip_digits() {
        assert_eq!(strip_digits(156, 6), Some(15));
        assert_eq!(strip_digits(1510, 10), Some(15));
        assert_eq!(strip_digits(156, 56), Some(1));
        assert_eq!(strip_digits(156, 7), None);
        assert_eq!(strip_digits(6, 6), None);
    }
}
