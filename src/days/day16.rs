use tracing::info;

use crate::error::ParseError;
use crate::maze::Maze;
use crate::{Answer, Answers, Puzzle, RunConfig};

pub struct ReindeerMaze;

impl Puzzle for ReindeerMaze {
    fn day(&self) -> u8 {
        16
    }

    fn title(&self) -> &'static str {
        "Reindeer Maze"
    }

    fn solve(&self, input: &str, config: &RunConfig) -> Result<Answers, ParseError> {
        let maze = Maze::parse(input)?;
        let Some(route) = maze.solve() else {
            return Ok(Answers::new(Answer::Unreachable, Answer::Unreachable));
        };
        if config.render {
            info!("best tiles:\n{}", maze.render_route(&route));
        }
        Ok(Answers::new(route.cost as i64, route.tiles.len()))
    }
}
