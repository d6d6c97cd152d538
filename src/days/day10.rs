use rustc_hash::FxHashSet;

use crate::error::ParseError;
use crate::geometry::Coord;
use crate::grid::Grid;
use crate::{Answers, Puzzle, RunConfig};

pub struct HoofIt;

fn height(map: &Grid<char>, at: Coord) -> Option<u32> {
    map.get(at).to_digit(10)
}

/// Peaks reachable from `trailhead`, plus the number of distinct trails
/// reaching them. A trail climbs exactly one unit per step.
fn hike(map: &Grid<char>, trailhead: Coord) -> (usize, usize) {
    let mut peaks = FxHashSet::default();
    let mut trails = 0;
    let mut pending = vec![(trailhead, 0)];

    while let Some((at, level)) = pending.pop() {
        if level == 9 {
            peaks.insert(at);
            trails += 1;
            continue;
        }
        for next in at.neighbors() {
            if height(map, next) == Some(level + 1) {
                pending.push((next, level + 1));
            }
        }
    }
    (peaks.len(), trails)
}

impl Puzzle for HoofIt {
    fn day(&self) -> u8 {
        10
    }

    fn title(&self) -> &'static str {
        "Hoof It"
    }

    fn solve(&self, input: &str, _config: &RunConfig) -> Result<Answers, ParseError> {
        // '.' marks impassable ground in the smaller maps
        let map = Grid::parse(input.trim_end(), |_, ch| {
            (ch.is_ascii_digit() || ch == '.').then_some(ch)
        })?;

        let (score, rating) = map
            .positions('0')
            .map(|trailhead| hike(&map, trailhead))
            .fold((0, 0), |(score, rating), (peaks, trails)| {
                (score + peaks, rating + trails)
            });
        Ok(Answers::new(score, rating))
    }
}
