use rustc_hash::FxHashSet;
use tracing::trace;

use crate::error::ParseError;
use crate::geometry::{Coord, Direction};
use crate::grid::Grid;
use crate::{Answers, Puzzle, RunConfig};

pub struct GardenGroups;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Region {
    area: usize,
    perimeter: usize,
    /// Equal to the number of straight sides.
    corners: usize,
}

/// Flood-fills the region containing `seed`, marking its plots as seen.
fn measure(garden: &Grid<char>, seed: Coord, seen: &mut FxHashSet<Coord>) -> Region {
    let plant = garden.get(seed);
    let same = |at: Coord| garden.get(at) == plant;

    let mut region = Region::default();
    let mut pending = vec![seed];
    seen.insert(seed);

    while let Some(at) = pending.pop() {
        region.area += 1;
        for dir in Direction::ALL {
            let next = at.step(dir);
            if !same(next) {
                region.perimeter += 1;
            } else if seen.insert(next) {
                pending.push(next);
            }

            let side = dir.turn_right();
            let (ahead, beside) = (same(next), same(at.step(side)));
            let diagonal = same(next.step(side));
            if (!ahead && !beside) || (ahead && beside && !diagonal) {
                region.corners += 1;
            }
        }
    }
    trace!(%plant, ?region, "measured region");
    region
}

fn regions(garden: &Grid<char>) -> Vec<Region> {
    let mut seen = FxHashSet::default();
    let mut found = Vec::new();
    for seed in garden.coords() {
        if !seen.contains(&seed) {
            found.push(measure(garden, seed, &mut seen));
        }
    }
    found
}

impl Puzzle for GardenGroups {
    fn day(&self) -> u8 {
        12
    }

    fn title(&self) -> &'static str {
        "Garden Groups"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        let garden = Grid::parse(input.trim_end(), |_, ch| ch.is_ascii_uppercase().then_some(ch))?;
        let regions = regions(&garden);
        let fencing: usize = regions.iter().map(|r| r.area * r.perimeter).sum();
        let discounted: usize = regions.iter().map(|r| r.area * r.corners).sum();
        Ok(Answers::new(fencing, discounted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(map: &str) -> Answers {
        GardenGroups.solve(map, &RunConfig::default()).unwrap()
    }

    #[test]
    fn test_small_example() {
        assert_eq!(prices("AAAA\nBBCD\nBBCC\nEEEC"), Answers::new(140usize, 80usize));
    }

    #[test]
    fn test_enclosed_regions() {
        let map = "OOOOO\nOXOXO\nOOOOO\nOXOXO\nOOOOO";
        assert_eq!(prices(map), Answers::new(772usize, 436usize));
    }

    #[test]
    fn test_e_shape_sides() {
        let map = "EEEEE\nEXXXX\nEEEEE\nEXXXX\nEEEEE";
        assert_eq!(prices(map).part2, 236usize.into());
    }

    #[test]
    fn test_larger_example() {
        let map = "\
RRRRIICCFF
RRRRIICCCF
VVRRRCCFFF
VVRCCCJFFF
VVVVCJJCFE
VVIVCCJJEE
VVIIICJJEE
MIIIIIJJEE
MIIISIJEEE
MMMISSJEEE";
        assert_eq!(prices(map), Answers::new(1930usize, 1206usize));
    }

    #[test]
    fn test_single_plot() {
        let garden = Grid::parse("A", |_, ch| Some(ch)).unwrap();
        assert_eq!(
            regions(&garden),
            [Region {
                area: 1,
                perimeter: 4,
                corners: 4
            }]
        );
    }
}
