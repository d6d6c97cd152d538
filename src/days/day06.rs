use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::error::ParseError;
use crate::geometry::{Coord, Direction};
use crate::grid::{Grid, Tile};
use crate::{Answers, Puzzle, RunConfig};

pub struct GuardGallivant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spot {
    Open,
    Obstruction,
    Outside,
}

impl Tile for Spot {
    const OUT_OF_BOUNDS: Self = Spot::Outside;

    fn glyph(self) -> char {
        match self {
            Spot::Open => '.',
            Spot::Obstruction => '#',
            Spot::Outside => ' ',
        }
    }
}

enum Patrol {
    /// The guard walked off the map after visiting these cells.
    Leaves(FxHashSet<Coord>),
    Loops,
}

/// Walks the guard forward, turning right at every obstruction. `extra` is
/// treated as one more obstruction.
fn patrol(lab: &Grid<Spot>, start: Coord, extra: Option<Coord>) -> Patrol {
    let mut seen: FxHashSet<(Coord, Direction)> = FxHashSet::default();
    let mut at = start;
    let mut heading = Direction::Up;

    loop {
        if !seen.insert((at, heading)) {
            return Patrol::Loops;
        }
        let ahead = at.step(heading);
        match lab.get(ahead) {
            Spot::Outside => break,
            _ if Some(ahead) == extra => heading = heading.turn_right(),
            Spot::Obstruction => heading = heading.turn_right(),
            Spot::Open => at = ahead,
        }
    }
    Patrol::Leaves(seen.into_iter().map(|(coord, _)| coord).collect())
}

impl Puzzle for GuardGallivant {
    fn day(&self) -> u8 {
        6
    }

    fn title(&self) -> &'static str {
        "Guard Gallivant"
    }

    fn solve(&self, input: &str, config: &RunConfig) -> Result<Answers, ParseError> {
        let mut guards = Vec::new();
        let lab = Grid::parse(input.trim_end(), |coord, ch| match ch {
            '.' => Some(Spot::Open),
            '#' => Some(Spot::Obstruction),
            '^' => {
                guards.push(coord);
                Some(Spot::Open)
            }
            _ => None,
        })?;
        let start = match guards[..] {
            [start] => start,
            [] => return Err(ParseError::Missing("guard")),
            _ => return Err(ParseError::Duplicate("guard")),
        };

        let visited = match patrol(&lab, start, None) {
            Patrol::Leaves(visited) => visited,
            Patrol::Loops => {
                debug!("guard never leaves the lab");
                return Ok(Answers::new(None::<i64>, None::<i64>));
            }
        };
        if config.render {
            info!(
                "patrol:\n{}",
                lab.render_with(|coord, _| visited.contains(&coord).then_some('X'))
            );
        }

        // only cells on the original route can change it
        let traps = visited
            .iter()
            .filter(|&&coord| coord != start)
            .filter(|&&coord| matches!(patrol(&lab, start, Some(coord)), Patrol::Loops))
            .count();

        Ok(Answers::new(visited.len(), traps))
    }
}
