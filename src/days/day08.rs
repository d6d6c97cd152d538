use std::collections::BTreeMap;

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::error::ParseError;
use crate::geometry::Coord;
use crate::grid::Grid;
use crate::{Answers, Puzzle, RunConfig};

pub struct ResonantCollinearity;

/// Antinodes cast by one antenna pair, walking outwards from `from` away
/// from `other`. Without harmonics only the first point at twice the
/// distance counts.
fn cast(
    grid: &Grid<char>,
    from: Coord,
    other: Coord,
    harmonics: bool,
    into: &mut FxHashSet<Coord>,
) {
    let delta = from - other;
    let mut at = if harmonics { from } else { from + delta };
    while grid.contains(at) {
        into.insert(at);
        if !harmonics {
            break;
        }
        at += delta;
    }
}

fn antinodes(
    grid: &Grid<char>,
    antennas: &BTreeMap<char, Vec<Coord>>,
    harmonics: bool,
) -> usize {
    let mut found = FxHashSet::default();
    for positions in antennas.values() {
        for (&a, &b) in positions.iter().tuple_combinations() {
            cast(grid, a, b, harmonics, &mut found);
            cast(grid, b, a, harmonics, &mut found);
        }
    }
    found.len()
}

impl Puzzle for ResonantCollinearity {
    fn day(&self) -> u8 {
        8
    }

    fn title(&self) -> &'static str {
        "Resonant Collinearity"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let grid = Grid::parse(input.trim_end(), |_, ch| {
            (ch == '.' || ch.is_ascii_alphanumeric()).then_some(ch)
        })?;

        let mut antennas: BTreeMap<char, Vec<Coord>> = BTreeMap::new();
        for (coord, ch) in grid.iter().filter(|&(_, ch)| ch != '.') {
            antennas.entry(ch).or_default().push(coord);
        }

        Ok(Answers::new(
            antinodes(&grid, &antennas, false),
            antinodes(&grid, &antennas, true),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
............
........0...
.....0......
.......0....
....0.......
......A.....
............
............
........A...
.........A..
............
............
";

    #[test]
    fn test_example() {
        let answers = ResonantCollinearity
            .solve(EXAMPLE, &RunConfig::default())
            .unwrap();
        assert_eq!(answers, Answers::new(14usize, 34usize));
    }

    #[test]
    fn test_single_antenna_casts_nothing() {
        let answers = ResonantCollinearity
            .solve("...\n.a.\n...", &RunConfig::default())
            .unwrap();
        assert_eq!(answers, Answers::new(0usize, 0usize));
    }
}
