//! Box-pushing simulation in a walled warehouse.
//!
//! A robot walks the floor one instruction at a time. Walking into a box
//! pushes it, along with every box behind it, provided the whole group can
//! shift one cell; otherwise the robot stays put and nothing moves.
//!
//! Wide boxes occupy two cells (`[` and `]`). Pushed vertically, each half
//! drags its partner, so a push can fan out into a whole cluster of boxes
//! spread over several columns. The cells of a push are gathered first into a
//! [`Stencil`], turned into staged writes, and only then merged into the grid,
//! so a blocked push never leaves a half-moved cluster behind.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::error::ParseError;
use crate::geometry::{Coord, Direction};
use crate::grid::{Grid, Tile};
use crate::RunConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Empty,
    /// A box one cell wide.
    Box,
    BoxLeft,
    BoxRight,
}

impl Tile for Cell {
    const OUT_OF_BOUNDS: Self = Cell::Wall;

    fn glyph(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Empty => '.',
            Cell::Box => 'O',
            Cell::BoxLeft => '[',
            Cell::BoxRight => ']',
        }
    }
}

impl Cell {
    pub fn is_box(self) -> bool {
        matches!(self, Cell::Box | Cell::BoxLeft | Cell::BoxRight)
    }

    /// Direction of the other half of a wide box.
    fn partner(self) -> Option<Direction> {
        match self {
            Cell::BoxLeft => Some(Direction::Right),
            Cell::BoxRight => Some(Direction::Left),
            _ => None,
        }
    }
}

/// How map characters translate into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One cell per character. `[` and `]` are accepted as wide box halves.
    Narrow,
    /// Every character becomes two cells: `O` becomes `[]`, `@` becomes `@.`.
    Wide,
}

impl Layout {
    fn decode(self, ch: char) -> Option<&'static [Cell]> {
        let cells: &'static [Cell] = match (self, ch) {
            (Layout::Narrow, '#') => &[Cell::Wall],
            (Layout::Narrow, '.' | '@') => &[Cell::Empty],
            (Layout::Narrow, 'O') => &[Cell::Box],
            (Layout::Narrow, '[') => &[Cell::BoxLeft],
            (Layout::Narrow, ']') => &[Cell::BoxRight],
            (Layout::Wide, '#') => &[Cell::Wall, Cell::Wall],
            (Layout::Wide, '.' | '@') => &[Cell::Empty, Cell::Empty],
            (Layout::Wide, 'O') => &[Cell::BoxLeft, Cell::BoxRight],
            _ => return None,
        };
        Some(cells)
    }

    fn scale(self) -> i32 {
        match self {
            Layout::Narrow => 1,
            Layout::Wide => 2,
        }
    }
}

/// Outcome of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    Blocked,
}

/// Cells that move together in one push, as offsets from a pivot cell.
///
/// The pivot is the cell directly in front of the robot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stencil {
    pivot: Coord,
    offsets: BTreeSet<Coord>,
}

impl Stencil {
    pub fn pivot(&self) -> Coord {
        self.pivot
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offsets(&self) -> impl Iterator<Item = Coord> + '_ {
        self.offsets.iter().copied()
    }

    /// Absolute coordinates covered by the stencil.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.offsets.iter().map(move |&offset| self.pivot + offset)
    }
}

/// Tally of cell contents, used to check that pushes conserve everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub walls: usize,
    pub empties: usize,
    pub boxes: usize,
    /// Wide box halves without their partner.
    pub broken: usize,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("warehouse invariant broken by instruction {instruction} ({direction:?}): before {before:?}, after {after:?}")]
pub struct InvariantViolation {
    pub instruction: usize,
    pub direction: Direction,
    pub before: Census,
    pub after: Census,
}

/// Switches for optional work during [`Warehouse::run`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationConfig {
    /// Take a census around every committed push and fail on any change.
    pub check_invariants: bool,
    /// Log the rendered map after every instruction at trace level.
    pub trace_steps: bool,
}

impl From<&RunConfig> for SimulationConfig {
    fn from(config: &RunConfig) -> Self {
        Self {
            check_invariants: config.check_invariants,
            trace_steps: config.trace_steps,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub moved: usize,
    pub blocked: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warehouse {
    grid: Grid<Cell>,
    robot: Coord,
}

impl Warehouse {
    /// Parses a warehouse map. The robot (`@`) is stored separately and its
    /// cell is left empty.
    pub fn parse(text: &str, layout: Layout) -> Result<Self, ParseError> {
        let mut robots = Vec::new();
        let mut rows = Vec::new();

        for (y, line) in text.trim_end().lines().enumerate() {
            let mut row = Vec::with_capacity(line.len() * layout.scale() as usize);
            for (x, ch) in line.trim_end().chars().enumerate() {
                let cells = layout.decode(ch).ok_or(ParseError::UnexpectedChar {
                    ch,
                    line: y + 1,
                    column: x + 1,
                })?;
                if ch == '@' {
                    robots.push(Coord::new(x as i32 * layout.scale(), y as i32));
                }
                row.extend_from_slice(cells);
            }
            if !halves_paired(&row) {
                return Err(ParseError::malformed(y + 1, "unpaired wide box half"));
            }
            rows.push(row);
        }

        let grid = Grid::from_rows(rows)?;
        let robot = match robots[..] {
            [robot] => robot,
            [] => return Err(ParseError::Missing("robot")),
            _ => return Err(ParseError::Duplicate("robot")),
        };
        Ok(Self { grid, robot })
    }

    pub fn robot(&self) -> Coord {
        self.robot
    }

    pub fn grid(&self) -> &Grid<Cell> {
        &self.grid
    }

    /// Works out which cells a push towards `dir` would move.
    ///
    /// Returns `None` when the push is blocked, an empty stencil when the
    /// robot walks into free floor, and otherwise every cell dragged along.
    /// The exploration is depth first with a memo set keyed by coordinate, so
    /// a box reached through both of its columns is visited once.
    pub fn plan_push(&self, dir: Direction) -> Option<Stencil> {
        let pivot = self.robot.step(dir);
        match self.grid.get(pivot) {
            Cell::Wall => return None,
            Cell::Empty => {
                return Some(Stencil {
                    pivot,
                    offsets: BTreeSet::new(),
                })
            }
            _ => {}
        }

        let mut dragged: FxHashSet<Coord> = FxHashSet::default();
        let mut pending = vec![pivot];

        while let Some(coord) = pending.pop() {
            if !dragged.insert(coord) {
                continue;
            }
            let cell = self.grid.get(coord);

            // port and starboard halves rise and fall together
            if dir.is_vertical() {
                if let Some(side) = cell.partner() {
                    pending.push(coord.step(side));
                }
            }

            let ahead = coord.step(dir);
            match self.grid.get(ahead) {
                Cell::Wall => {
                    trace!(%coord, %ahead, "push blocked by wall");
                    return None;
                }
                Cell::Empty => {}
                _ => pending.push(ahead),
            }
        }

        Some(Stencil {
            pivot,
            offsets: dragged.into_iter().map(|coord| coord - pivot).collect(),
        })
    }

    /// Turns a stencil into staged writes: every covered cell is vacated,
    /// then every cell's content lands one step towards `dir`.
    pub fn stage(&self, stencil: &Stencil, dir: Direction) -> FxHashMap<Coord, Cell> {
        let mut writes: FxHashMap<Coord, Cell> = FxHashMap::default();
        for coord in stencil.cells() {
            writes.insert(coord, Cell::Empty);
        }
        for coord in stencil.cells() {
            writes.insert(coord.step(dir), self.grid.get(coord));
        }
        writes
    }

    /// Executes one instruction. A blocked instruction changes nothing.
    pub fn step(&mut self, dir: Direction) -> Step {
        let Some(stencil) = self.plan_push(dir) else {
            return Step::Blocked;
        };
        if !stencil.is_empty() {
            let writes = self.stage(&stencil, dir);
            trace!(cells = stencil.len(), "committing push");
            self.grid.merge(writes);
        }
        self.robot = self.robot.step(dir);
        Step::Moved
    }

    /// Executes a sequence of instructions.
    ///
    /// An instruction repeating the previous one after it was blocked is
    /// counted as blocked without re-planning, since nothing has changed.
    pub fn run(
        &mut self,
        moves: &[Direction],
        config: &SimulationConfig,
    ) -> Result<RunSummary, InvariantViolation> {
        let mut summary = RunSummary::default();
        let mut blocked_towards: Option<Direction> = None;

        for (instruction, &dir) in moves.iter().enumerate() {
            if blocked_towards == Some(dir) {
                summary.blocked += 1;
                continue;
            }

            let before = config.check_invariants.then(|| self.census());
            let outcome = self.step(dir);
            match outcome {
                Step::Moved => {
                    summary.moved += 1;
                    blocked_towards = None;
                }
                Step::Blocked => {
                    summary.blocked += 1;
                    blocked_towards = Some(dir);
                }
            }

            if let Some(before) = before {
                let after = self.census();
                if after != before || after.broken > 0 {
                    return Err(InvariantViolation {
                        instruction,
                        direction: dir,
                        before,
                        after,
                    });
                }
            }

            if config.trace_steps {
                trace!(instruction, arrow = %dir.arrow(), ?outcome, "\n{}", self.render());
            }
        }

        debug!(moved = summary.moved, blocked = summary.blocked, "simulation finished");
        Ok(summary)
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for (coord, cell) in self.grid.iter() {
            match cell {
                Cell::Wall => census.walls += 1,
                Cell::Empty => census.empties += 1,
                Cell::Box => census.boxes += 1,
                Cell::BoxLeft => {
                    if self.grid.get(coord.step(Direction::Right)) == Cell::BoxRight {
                        census.boxes += 1;
                    } else {
                        census.broken += 1;
                    }
                }
                Cell::BoxRight => {
                    if self.grid.get(coord.step(Direction::Left)) != Cell::BoxLeft {
                        census.broken += 1;
                    }
                }
            }
        }
        census
    }

    /// Sum of `100 * y + x` over every box, measured at its leftmost cell.
    pub fn gps_sum(&self) -> i64 {
        self.grid
            .iter()
            .filter(|&(_, cell)| matches!(cell, Cell::Box | Cell::BoxLeft))
            .map(|(coord, _)| 100 * coord.y as i64 + coord.x as i64)
            .sum()
    }

    pub fn render(&self) -> String {
        self.grid
            .render_with(|coord, _| (coord == self.robot).then_some('@'))
    }
}

fn halves_paired(row: &[Cell]) -> bool {
    row.iter().enumerate().all(|(x, &cell)| match cell {
        Cell::BoxLeft => row.get(x + 1) == Some(&Cell::BoxRight),
        Cell::BoxRight => x > 0 && row[x - 1] == Cell::BoxLeft,
        _ => true,
    })
}

/// Parses a block of arrow instructions. Line breaks are ignored.
pub fn parse_moves(text: &str) -> Result<Vec<Direction>, ParseError> {
    let mut moves = Vec::new();
    for (y, line) in text.lines().enumerate() {
        for (x, ch) in line.trim_end().chars().enumerate() {
            let dir = Direction::from_arrow(ch).ok_or(ParseError::UnexpectedChar {
                ch,
                line: y + 1,
                column: x + 1,
            })?;
            moves.push(dir);
        }
    }
    Ok(moves)
}

/// Parses a map and its instructions, runs them, and returns the GPS sum.
pub fn simulate(
    map: &str,
    moves: &[Direction],
    layout: Layout,
    config: &RunConfig,
) -> Result<i64, ParseError> {
    let mut warehouse = Warehouse::parse(map, layout)?;
    if config.render {
        info!("{layout:?} warehouse before:\n{}", warehouse.render());
    }

    warehouse.run(moves, &SimulationConfig::from(config))?;

    if config.render {
        info!("{layout:?} warehouse after:\n{}", warehouse.render());
    }
    Ok(warehouse.gps_sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = "\
########
#..O.O.#
##@.O..#
#...O..#
#.#.O..#
#...O..#
#......#
########";

    const SMALL_MOVES: &str = "<^^>>>vv<v>>v<<";

    const WIDE_MAP: &str = "\
#######
#...#.#
#.....#
#..OO@#
#..O..#
#.....#
#######";

    const WIDE_MOVES: &str = "<vv<<^^<<^^";

    const DIAMOND: &str = "\
##########
##......##
##..[]..##
##.[][].##
##..[]..##
##..@...##
##########";

    fn checked() -> SimulationConfig {
        SimulationConfig {
            check_invariants: true,
            trace_steps: false,
        }
    }

    #[test]
    fn test_box_pushed_up_one_row() {
        let mut warehouse = Warehouse::parse("#.#\n#O#\n#@#", Layout::Narrow).unwrap();
        assert_eq!(warehouse.step(Direction::Up), Step::Moved);
        assert_eq!(warehouse.robot(), Coord::new(1, 1));
        assert_eq!(warehouse.grid().get(Coord::new(1, 0)), Cell::Box);
        assert_eq!(warehouse.grid().get(Coord::new(1, 1)), Cell::Empty);
        assert_eq!(warehouse.render(), "#O#\n#@#\n#.#");
    }

    #[test]
    fn test_small_example() {
        let mut warehouse = Warehouse::parse(SMALL_MAP, Layout::Narrow).unwrap();
        let moves = parse_moves(SMALL_MOVES).unwrap();
        warehouse.run(&moves, &checked()).unwrap();
        assert_eq!(warehouse.gps_sum(), 2028);
        insta::assert_snapshot!(warehouse.render(), @r"
        ########
        #....OO#
        ##.....#
        #.....O#
        #.#O@..#
        #...O..#
        #...O..#
        ########
        ");
    }

    #[test]
    fn test_wide_example() {
        let mut warehouse = Warehouse::parse(WIDE_MAP, Layout::Wide).unwrap();
        assert_eq!(warehouse.robot(), Coord::new(10, 3));
        let moves = parse_moves(WIDE_MOVES).unwrap();
        let summary = warehouse.run(&moves, &checked()).unwrap();
        assert_eq!(summary, RunSummary { moved: 10, blocked: 1 });
        assert_eq!(warehouse.gps_sum(), 105 + 207 + 306);
        insta::assert_snapshot!(warehouse.render(), @r"
        ##############
        ##...[].##..##
        ##...@.[]...##
        ##....[]....##
        ##..........##
        ##..........##
        ##############
        ");
    }

    #[test]
    fn test_horizontal_push_of_wide_run() {
        let mut warehouse = Warehouse::parse("#.[][]@#", Layout::Narrow).unwrap();
        assert_eq!(warehouse.step(Direction::Left), Step::Moved);
        assert_eq!(warehouse.render(), "#[][]@.#");
        assert_eq!(warehouse.step(Direction::Left), Step::Blocked);
        assert_eq!(warehouse.render(), "#[][]@.#");
    }

    #[test]
    fn test_shared_box_is_dragged_once() {
        let mut warehouse = Warehouse::parse(DIAMOND, Layout::Narrow).unwrap();
        let stencil = warehouse.plan_push(Direction::Up).unwrap();
        assert_eq!(stencil.pivot(), Coord::new(4, 4));
        assert_eq!(stencil.len(), 8);
        assert!(stencil.offsets().any(|offset| offset == Coord::new(0, 0)));
        assert!(stencil.offsets().any(|offset| offset == Coord::new(-1, -1)));

        assert_eq!(warehouse.step(Direction::Up), Step::Moved);
        assert_eq!(warehouse.census().boxes, 4);
        insta::assert_snapshot!(warehouse.render(), @r"
        ##########
        ##..[]..##
        ##.[][].##
        ##..[]..##
        ##..@...##
        ##......##
        ##########
        ");
    }

    #[test]
    fn test_blocked_push_leaves_grid_untouched() {
        let mut warehouse = Warehouse::parse("#####\n#@OO#\n#####", Layout::Narrow).unwrap();
        let before = warehouse.clone();
        assert_eq!(warehouse.step(Direction::Right), Step::Blocked);
        assert_eq!(warehouse, before);
    }

    #[test]
    fn test_one_blocked_column_blocks_whole_box() {
        let map = "######\n#..#.#\n#.[].#\n#.@..#\n######";
        let mut warehouse = Warehouse::parse(map, Layout::Narrow).unwrap();
        let before = warehouse.clone();
        assert_eq!(warehouse.plan_push(Direction::Up), None);
        assert_eq!(warehouse.step(Direction::Up), Step::Blocked);
        assert_eq!(warehouse, before);
    }

    #[test]
    fn test_walking_into_floor_plans_empty_stencil() {
        let warehouse = Warehouse::parse("#@.#", Layout::Narrow).unwrap();
        let stencil = warehouse.plan_push(Direction::Right).unwrap();
        assert!(stencil.is_empty());
        assert_eq!(warehouse.plan_push(Direction::Left), None);
    }

    #[test]
    fn test_staged_writes_conserve_cells() {
        let warehouse = Warehouse::parse(DIAMOND, Layout::Narrow).unwrap();
        let stencil = warehouse.plan_push(Direction::Up).unwrap();
        let writes = warehouse.stage(&stencil, Direction::Up);
        let boxes = writes.values().filter(|cell| cell.is_box()).count();
        assert_eq!(boxes, 8);
        assert_eq!(writes[&Coord::new(4, 4)], Cell::Empty);
        assert_eq!(writes[&Coord::new(4, 1)], Cell::BoxLeft);
    }

    #[test]
    fn test_repeated_blocked_instruction_is_skipped() {
        let mut warehouse = Warehouse::parse("#@O#", Layout::Narrow).unwrap();
        let moves = [Direction::Right; 4];
        let summary = warehouse.run(&moves, &checked()).unwrap();
        assert_eq!(summary, RunSummary { moved: 0, blocked: 4 });
    }

    #[test]
    fn test_census_and_pairing_hold_for_every_prefix() {
        let mut warehouse = Warehouse::parse(SMALL_MAP, Layout::Wide).unwrap();
        let initial = warehouse.census();
        assert_eq!(initial.boxes, 6);
        for dir in parse_moves(SMALL_MOVES).unwrap() {
            warehouse.step(dir);
            assert_eq!(warehouse.census(), initial);
        }
    }

    #[test]
    fn test_invariant_violation_surfaces_without_line() {
        let violation = InvariantViolation {
            instruction: 3,
            direction: Direction::Up,
            before: Census::default(),
            after: Census {
                broken: 1,
                ..Census::default()
            },
        };
        let err = ParseError::from(violation.clone());
        assert_eq!(err, ParseError::Invariant(violation));
        assert!(err
            .to_string()
            .starts_with("warehouse invariant broken by instruction 3 (Up)"));
        assert!(!err.to_string().contains("line"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Warehouse::parse("#.#", Layout::Narrow).unwrap_err(),
            ParseError::Missing("robot")
        );
        assert_eq!(
            Warehouse::parse("#@@#", Layout::Narrow).unwrap_err(),
            ParseError::Duplicate("robot")
        );
        assert_eq!(
            Warehouse::parse("#@x#", Layout::Wide).unwrap_err(),
            ParseError::UnexpectedChar {
                ch: 'x',
                line: 1,
                column: 3
            }
        );
        assert!(matches!(
            Warehouse::parse("#@[.#", Layout::Narrow).unwrap_err(),
            ParseError::Malformed { line: 1, .. }
        ));
        assert_eq!(
            parse_moves("<>\n^x").unwrap_err(),
            ParseError::UnexpectedChar {
                ch: 'x',
                line: 2,
                column: 2
            }
        );
    }
}
