use crate::error::ParseError;
use crate::input::{numbered_lines, signed_numbers};
use crate::{Answers, Puzzle, RunConfig};

pub struct ClawContraption;

const A_COST: i128 = 3;
const B_COST: i128 = 1;
const PRIZE_OFFSET: i128 = 10_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Machine {
    a: (i128, i128),
    b: (i128, i128),
    prize: (i128, i128),
}

fn parse(input: &str) -> Result<Vec<Machine>, ParseError> {
    let lines: Vec<(usize, &str)> = numbered_lines(input).collect();
    lines
        .chunks(3)
        .map(|block| {
            let mut pairs = block.iter().map(|&(line, text)| match signed_numbers(text, line)?[..] {
                [x, y] => Ok((x as i128, y as i128)),
                _ => Err(ParseError::malformed(line, "expected an X and a Y value")),
            });
            let mut next = || {
                pairs.next().unwrap_or_else(|| {
                    let line = block.last().map_or(0, |&(line, _)| line);
                    Err(ParseError::malformed(line, "incomplete machine"))
                })
            };
            Ok(Machine {
                a: next()?,
                b: next()?,
                prize: next()?,
            })
        })
        .collect()
}

/// Cheapest presses reaching `target` along one axis when both buttons move
/// the claw along the same line.
fn cheapest_on_line(a: i128, b: i128, target: i128) -> Option<i128> {
    match (a, b) {
        (0, 0) => (target == 0).then_some(0),
        (0, b) => (target % b == 0).then(|| target / b * B_COST),
        (a, 0) => (target % a == 0).then(|| target / a * A_COST),
        // B is cheaper per unit of travel: press A as few times as possible
        (a, b) if b * A_COST >= a * B_COST => (0..=b)
            .map(|presses| (presses, target - presses * a))
            .take_while(|&(_, rest)| rest >= 0)
            .find(|&(_, rest)| rest % b == 0)
            .map(|(presses, rest)| presses * A_COST + rest / b * B_COST),
        (a, b) => (0..=a)
            .map(|presses| (presses, target - presses * b))
            .take_while(|&(_, rest)| rest >= 0)
            .find(|&(_, rest)| rest % a == 0)
            .map(|(presses, rest)| rest / a * A_COST + presses * B_COST),
    }
}

/// Fewest tokens winning the prize, or `None` if it cannot be won.
fn tokens(machine: &Machine) -> Option<i128> {
    let Machine {
        a: (ax, ay),
        b: (bx, by),
        prize: (px, py),
    } = *machine;

    let det = ax * by - ay * bx;
    if det != 0 {
        // Cramer's rule; the solution is unique
        let a = px * by - py * bx;
        let b = ax * py - ay * px;
        if a % det != 0 || b % det != 0 {
            return None;
        }
        let (a, b) = (a / det, b / det);
        return (a >= 0 && b >= 0).then_some(a * A_COST + b * B_COST);
    }

    // parallel buttons: the prize must lie on their shared line
    if px * ay - py * ax != 0 || px * by - py * bx != 0 {
        return None;
    }
    if ax == 0 && bx == 0 {
        cheapest_on_line(ay, by, py)
    } else {
        cheapest_on_line(ax, bx, px)
    }
}

fn total(machines: &[Machine], offset: i128) -> Result<i64, ParseError> {
    let sum: i128 = machines
        .iter()
        .map(|machine| Machine {
            prize: (machine.prize.0 + offset, machine.prize.1 + offset),
            ..*machine
        })
        .filter_map(|machine| tokens(&machine))
        .sum();
    i64::try_from(sum).map_err(|_| ParseError::Overflow("token total"))
}

impl Puzzle for ClawContraption {
    fn day(&self) -> u8 {
        13
    }

    fn title(&self) -> &'static str {
        "Claw Contraption"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let machines = parse(input)?;
        Ok(Answers::new(
            total(&machines, 0)?,
            total(&machines, PRIZE_OFFSET)?,
        ))
    }
}
