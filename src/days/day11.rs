use rustc_hash::FxHashMap;

use crate::error::ParseError;
use crate::input::whitespace_numbers;
use crate::{Answers, Puzzle, RunConfig};

pub struct PlutonianPebbles;

fn digits(value: u64) -> u32 {
    value.checked_ilog10().map_or(1, |log| log + 1)
}

/// Stones a single stone turns into after one blink, or `None` when the
/// engraving no longer fits in 64 bits.
fn blink(stone: u64) -> Option<(u64, Option<u64>)> {
    if stone == 0 {
        return Some((1, None));
    }
    let width = digits(stone);
    if width % 2 == 0 {
        let split = 10u64.pow(width / 2);
        Some((stone / split, Some(stone % split)))
    } else {
        Some((stone.checked_mul(2024)?, None))
    }
}

/// Stone order never matters, so only the count per engraving is tracked.
fn count_after(stones: &[u64], blinks: usize) -> Result<i64, ParseError> {
    let mut counts: FxHashMap<u64, i64> = FxHashMap::default();
    for &stone in stones {
        *counts.entry(stone).or_default() += 1;
    }
    for _ in 0..blinks {
        let mut next: FxHashMap<u64, i64> = FxHashMap::default();
        for (stone, count) in counts {
            let (left, right) = blink(stone).ok_or(ParseError::Overflow("stone engravings"))?;
            *next.entry(left).or_default() += count;
            if let Some(right) = right {
                *next.entry(right).or_default() += count;
            }
        }
        counts = next;
    }
    counts
        .values()
        .try_fold(0i64, |total, &count| total.checked_add(count))
        .ok_or(ParseError::Overflow("stone count"))
}

impl Puzzle for PlutonianPebbles {
    fn day(&self) -> u8 {
        11
    }

    fn title(&self) -> &'static str {
        "Plutonian Pebbles"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let stones = whitespace_numbers(input, 1)?;
        Ok(Answers::new(
            count_after(&stones, 25)?,
            count_after(&stones, 75)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example() {
        assert_eq!(count_after(&[125, 17], 6), Ok(22));
        assert_eq!(count_after(&[125, 17], 25), Ok(55312));
    }

    #[test]
    fn test_blink_rules() {
        assert_eq!(blink(0), Some((1, None)));
        assert_eq!(blink(1000), Some((10, Some(0))));
        assert_eq!(blink(99), Some((9, Some(9))));
        assert_eq!(blink(1), Some((2024, None)));
    }

    #[test]
    fn test_oversized_engraving_is_an_error() {
        // nineteen digits: odd width, so the stone is multiplied
        let err = PlutonianPebbles
            .solve("1000000000000000000\n", &RunConfig::default())
            .unwrap_err();
        assert_eq!(err, ParseError::Overflow("stone engravings"));
    }
}
