use crate::error::ParseError;
use crate::geometry::Coord;
use crate::grid::Grid;
use crate::{Answers, Puzzle, RunConfig};

pub struct CeresSearch;

const COMPASS: [Coord; 8] = [
    Coord::new(0, -1),
    Coord::new(1, -1),
    Coord::new(1, 0),
    Coord::new(1, 1),
    Coord::new(0, 1),
    Coord::new(-1, 1),
    Coord::new(-1, 0),
    Coord::new(-1, -1),
];

fn spells(grid: &Grid<char>, from: Coord, delta: Coord, word: &str) -> bool {
    let mut at = from;
    for ch in word.chars() {
        if grid.get(at) != ch {
            return false;
        }
        at += delta;
    }
    true
}

fn count_xmas(grid: &Grid<char>) -> usize {
    grid.positions('X')
        .map(|from| {
            COMPASS
                .iter()
                .filter(|&&delta| spells(grid, from, delta, "XMAS"))
                .count()
        })
        .sum()
}

/// An `A` with `M` and `S` at opposite ends of both diagonals.
fn count_crosses(grid: &Grid<char>) -> usize {
    let is_mas = |a: char, b: char| matches!((a, b), ('M', 'S') | ('S', 'M'));
    grid.positions('A')
        .filter(|&at| {
            let corner = |dx, dy| grid.get(at + Coord::new(dx, dy));
            is_mas(corner(-1, -1), corner(1, 1)) && is_mas(corner(1, -1), corner(-1, 1))
        })
        .count()
}

impl Puzzle for CeresSearch {
    fn day(&self) -> u8 {
        4
    }

    fn title(&self) -> &'static str {
        "Ceres Search"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let grid = Grid::parse(input.trim_end(), |_, ch| ch.is_ascii_alphabetic().then_some(ch))?;
        Ok(Answers::new(count_xmas(&grid), count_crosses(&grid)))
    }
}
