use crate::error::ParseError;
use crate::input::split_sections;
use crate::warehouse::{parse_moves, simulate, Layout};
use crate::{Answers, Puzzle, RunConfig};

pub struct WarehouseWoes;

impl Puzzle for WarehouseWoes {
    fn day(&self) -> u8 {
        15
    }

    fn title(&self) -> &'static str {
        "Warehouse Woes"
    }

    fn solve(&self, input: &str, config: &RunConfig) -> Result<Answers, ParseError> {
        let (map, moves) = split_sections(input);
        let moves = parse_moves(moves)?;
        Ok(Answers::new(
            simulate(map, &moves, Layout::Narrow, config)?,
            simulate(map, &moves, Layout::Wide, config)?,
        ))
    }
}
