use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::ParseError;
use crate::geometry::Coord;
use crate::grid::{Grid, Tile};
use crate::input::{numbered_lines, separated_numbers, whitespace_numbers};
use crate::{Answer, Answers, Puzzle, RunConfig};

pub struct RamRun;

const DEFAULT_SETUP: Setup = Setup {
    width: 71,
    height: 71,
    fallen: 1024,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Memory {
    Safe,
    Corrupted,
}

impl Tile for Memory {
    const OUT_OF_BOUNDS: Self = Memory::Corrupted;

    fn glyph(self) -> char {
        match self {
            Memory::Safe => '.',
            Memory::Corrupted => '#',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Setup {
    width: usize,
    height: usize,
    /// Bytes fallen before the first walk.
    fallen: usize,
}

/// Byte positions, optionally preceded by a `width height [count]` line.
fn parse(input: &str) -> Result<(Setup, Vec<Coord>), ParseError> {
    let mut lines = numbered_lines(input).peekable();
    let setup = match lines.peek() {
        Some(&(line, text)) if !text.contains(',') => {
            lines.next();
            match whitespace_numbers::<usize>(text, line)?[..] {
                [width, height, fallen] if width > 0 && height > 0 => Setup {
                    width,
                    height,
                    fallen,
                },
                [width, height] if width > 0 && height > 0 => Setup {
                    width,
                    height,
                    ..DEFAULT_SETUP
                },
                _ => return Err(ParseError::malformed(line, "expected 'width height [count]'")),
            }
        }
        _ => DEFAULT_SETUP,
    };

    let inside = |x: i32, y: i32| {
        (0..setup.width as i32).contains(&x) && (0..setup.height as i32).contains(&y)
    };
    let bytes = lines
        .map(|(line, text)| match separated_numbers::<i32>(text, ',', line)?[..] {
            [x, y] if inside(x, y) => Ok(Coord::new(x, y)),
            [_, _] => Err(ParseError::malformed(line, "byte falls outside the memory space")),
            _ => Err(ParseError::malformed(line, "expected x,y")),
        })
        .collect::<Result<_, _>>()?;
    Ok((setup, bytes))
}

/// Fewest steps from the top-left to the bottom-right corner once the first
/// `fallen` bytes have landed.
fn shortest_exit(setup: &Setup, bytes: &[Coord], fallen: usize) -> Option<usize> {
    let mut memory = Grid::new(setup.width, setup.height, Memory::Safe);
    memory.merge(bytes.iter().take(fallen).map(|&byte| (byte, Memory::Corrupted)));

    let start = Coord::new(0, 0);
    let exit = Coord::new(setup.width as i32 - 1, setup.height as i32 - 1);
    if memory.get(start) == Memory::Corrupted {
        return None;
    }

    let mut distance: FxHashMap<Coord, usize> = FxHashMap::default();
    distance.insert(start, 0);
    let mut queue = VecDeque::from([start]);
    while let Some(at) = queue.pop_front() {
        let steps = distance[&at];
        if at == exit {
            return Some(steps);
        }
        for next in at.neighbors() {
            if memory.get(next) == Memory::Safe && !distance.contains_key(&next) {
                distance.insert(next, steps + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

/// The first byte whose landing cuts every path to the exit.
fn first_blocker(setup: &Setup, bytes: &[Coord]) -> Option<Coord> {
    // invariant: the exit is reachable after `low` bytes and not after `high`
    let (mut low, mut high) = (0, bytes.len());
    shortest_exit(setup, bytes, low)?;
    if shortest_exit(setup, bytes, high).is_some() {
        return None;
    }
    while high - low > 1 {
        let mid = low + (high - low) / 2;
        if shortest_exit(setup, bytes, mid).is_some() {
            low = mid;
        } else {
            high = mid;
        }
    }
    bytes.get(high - 1).copied()
}

impl Puzzle for RamRun {
    fn day(&self) -> u8 {
        18
    }

    fn title(&self) -> &'static str {
        "RAM Run"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let (setup, bytes) = parse(input)?;
        debug!(?setup, bytes = bytes.len(), "memory space parsed");

        let steps = shortest_exit(&setup, &bytes, setup.fallen);
        let blocker = first_blocker(&setup, &bytes)
            .map(|byte| Answer::Text(format!("{},{}", byte.x, byte.y)));
        Ok(Answers::new(steps, blocker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
7 7 12
5,4
4,2
4,5
3,0
2,1
6,3
2,4
1,5
0,6
3,3
2,6
5,1
1,2
5,5
2,5
6,5
1,4
0,4
6,4
1,1
6,1
1,0
0,5
1,6
2,0
";

    #[test]
    fn test_example() {
        let answers = RamRun.solve(EXAMPLE, &RunConfig::default()).unwrap();
        assert_eq!(answers, Answers::new(22usize, Answer::Text("6,1".into())));
    }

    #[test]
    fn test_never_blocked() {
        let answers = RamRun
            .solve("3 3 1\n1,1\n", &RunConfig::default())
            .unwrap();
        assert_eq!(answers, Answers::new(4usize, Answer::Unreachable));
    }

    #[test]
    fn test_default_setup() {
        let (setup, bytes) = parse("1,2\n").unwrap();
        assert_eq!(setup, DEFAULT_SETUP);
        assert_eq!(bytes, [Coord::new(1, 2)]);

        let (setup, _) = parse("7 7\n1,2\n").unwrap();
        assert_eq!((setup.width, setup.fallen), (7, DEFAULT_SETUP.fallen));
    }

    #[test]
    fn test_byte_outside_memory_space_rejected() {
        for input in ["7 7\n9,9\n", "7 7\n1,1\n7,0\n", "7 7\n-1,3\n"] {
            let err = RamRun.solve(input, &RunConfig::default()).unwrap_err();
            assert!(
                matches!(err, ParseError::Malformed { .. }),
                "{input:?} gave {err:?}"
            );
        }
        let err = parse("7 7\n1,1\n7,0\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line: 3, .. }));
    }
}
