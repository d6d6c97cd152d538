//! Oriented shortest-path search over a walled maze.
//!
//! The walker has a heading: stepping forward costs [`STEP_COST`], turning
//! 90 degrees in place costs [`TURN_COST`] and a half turn costs twice that.
//! Because the cost to reach a cell depends on the heading on arrival, the
//! search runs over `(heading, coord)` states rather than cells.
//!
//! The search is plain uniform-cost search: every edge weight is
//! non-negative, so the first time a state leaves the frontier its cost is
//! final.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::geometry::{Coord, Direction};
use crate::grid::{Grid, Tile};

/// Cost of one step forward.
pub const STEP_COST: u64 = 1;

/// Cost of one 90 degree turn.
pub const TURN_COST: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeCell {
    Empty,
    Wall,
}

impl Tile for MazeCell {
    const OUT_OF_BOUNDS: Self = MazeCell::Wall;

    fn glyph(self) -> char {
        match self {
            MazeCell::Empty => '.',
            MazeCell::Wall => '#',
        }
    }
}

/// A search state: where the walker stands and which way it faces.
///
/// Ordered heading first so frontier ties break deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    pub heading: Direction,
    pub at: Coord,
}

impl State {
    pub const fn new(heading: Direction, at: Coord) -> Self {
        Self { heading, at }
    }
}

/// Priority queue with decrease-key.
///
/// Entries are ordered by cost, then by state. `best` mirrors the cost each
/// queued state currently has so a cheaper enqueue can remove the stale entry
/// before inserting the new one.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: BTreeSet<(u64, State)>,
    best: FxHashMap<State, u64>,
}

impl Frontier {
    /// Queues `state` at `cost` unless it is already queued at least as
    /// cheaply. Returns whether the frontier changed.
    pub fn enqueue(&mut self, cost: u64, state: State) -> bool {
        if let Some(&queued) = self.best.get(&state) {
            if queued <= cost {
                return false;
            }
            self.queue.remove(&(queued, state));
        }
        self.queue.insert((cost, state));
        self.best.insert(state, cost);
        true
    }

    /// Removes and returns the cheapest entry.
    pub fn dequeue(&mut self) -> Option<(u64, State)> {
        let (cost, state) = self.queue.pop_first()?;
        self.best.remove(&state);
        Some((cost, state))
    }
}

/// Final costs of every state the search reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Costs {
    finalized: FxHashMap<State, u64>,
}

impl Costs {
    pub fn get(&self, state: State) -> Option<u64> {
        self.finalized.get(&state).copied()
    }

    /// Number of states the search finalized.
    pub fn reached(&self) -> usize {
        self.finalized.len()
    }

    /// Cheapest cost over all four headings at `coord`, with every heading
    /// that achieves it. `None` when the cell was never reached.
    pub fn best_at(&self, coord: Coord) -> Option<(u64, Vec<State>)> {
        let mut best_cost = u64::MAX;
        let mut states = Vec::new();
        for heading in Direction::ALL {
            let state = State::new(heading, coord);
            let Some(cost) = self.get(state) else {
                continue;
            };
            if cost < best_cost {
                best_cost = cost;
                states.clear();
            }
            if cost == best_cost {
                states.push(state);
            }
        }
        (!states.is_empty()).then_some((best_cost, states))
    }

    /// Every coordinate lying on at least one optimal path to `target`.
    ///
    /// Walks backwards from each target state tied for the best cost,
    /// following a reversed edge whenever the predecessor's final cost plus
    /// that edge's cost accounts exactly for the current state's cost.
    pub fn best_tiles(&self, target: Coord) -> BTreeSet<Coord> {
        let mut tiles = BTreeSet::new();
        let Some((_, mut pending)) = self.best_at(target) else {
            return tiles;
        };
        let mut expanded: FxHashSet<State> = FxHashSet::default();

        while let Some(state) = pending.pop() {
            if !expanded.insert(state) {
                continue;
            }
            tiles.insert(state.at);
            let Some(cost) = self.get(state) else {
                continue;
            };

            for (edge_cost, previous) in predecessors(state) {
                // forward steps are never taken out of the target
                if edge_cost == STEP_COST && previous.at == target {
                    continue;
                }
                if self
                    .get(previous)
                    .is_some_and(|previous_cost| previous_cost + edge_cost == cost)
                {
                    pending.push(previous);
                }
            }
        }

        tiles
    }
}

/// Forward edges out of `state`.
///
/// Stepping forward is suppressed once the walker stands on `target`.
fn successors(state: State, cost: u64, target: Coord) -> impl Iterator<Item = (u64, State)> {
    let State { heading, at } = state;
    let turns = [
        (cost + TURN_COST, State::new(heading.turn_left(), at)),
        (cost + TURN_COST, State::new(heading.turn_right(), at)),
        (cost + 2 * TURN_COST, State::new(heading.reverse(), at)),
    ];
    let forward = (at != target).then(|| (cost + STEP_COST, State::new(heading, at.step(heading))));
    turns.into_iter().chain(forward)
}

/// Reversed edges into `state`, each paired with the forward edge's cost.
fn predecessors(state: State) -> [(u64, State); 4] {
    let State { heading, at } = state;
    [
        // a left turn out of the heading to our right lands here
        (TURN_COST, State::new(heading.turn_right(), at)),
        (TURN_COST, State::new(heading.turn_left(), at)),
        (2 * TURN_COST, State::new(heading.reverse(), at)),
        (STEP_COST, State::new(heading, at.step(heading.reverse()))),
    ]
}

/// Runs uniform-cost search from `start` facing `heading`.
///
/// Returns the final cost of every reachable state. The target is reachable
/// iff [`Costs::best_at`] returns `Some` for it.
pub fn search(grid: &Grid<MazeCell>, start: Coord, heading: Direction, target: Coord) -> Costs {
    let mut frontier = Frontier::default();
    let mut finalized: FxHashMap<State, u64> = FxHashMap::default();

    if grid.get(start) == MazeCell::Wall {
        return Costs { finalized };
    }
    frontier.enqueue(0, State::new(heading, start));

    while let Some((cost, state)) = frontier.dequeue() {
        trace!(?state, cost, "finalized");
        finalized.insert(state, cost);

        for (next_cost, next) in successors(state, cost, target) {
            if grid.get(next.at) == MazeCell::Wall || finalized.contains_key(&next) {
                continue;
            }
            frontier.enqueue(next_cost, next);
        }
    }

    Costs { finalized }
}

/// Cheapest route through a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub cost: u64,
    pub tiles: BTreeSet<Coord>,
}

/// A parsed maze with its start (`S`) and target (`E`) cells.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid<MazeCell>,
    start: Coord,
    target: Coord,
}

impl Maze {
    /// The walker always sets off facing east.
    pub const START_HEADING: Direction = Direction::Right;

    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut starts = Vec::new();
        let mut targets = Vec::new();
        let grid = Grid::parse(text.trim_end(), |coord, ch| match ch {
            '#' => Some(MazeCell::Wall),
            '.' => Some(MazeCell::Empty),
            'S' => {
                starts.push(coord);
                Some(MazeCell::Empty)
            }
            'E' => {
                targets.push(coord);
                Some(MazeCell::Empty)
            }
            _ => None,
        })?;

        let start = single(starts, "start")?;
        let target = single(targets, "target")?;
        Ok(Self {
            grid,
            start,
            target,
        })
    }

    pub fn grid(&self) -> &Grid<MazeCell> {
        &self.grid
    }

    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn target(&self) -> Coord {
        self.target
    }

    pub fn search(&self) -> Costs {
        search(&self.grid, self.start, Self::START_HEADING, self.target)
    }

    /// Best cost and best tiles, or `None` when the target is unreachable.
    pub fn solve(&self) -> Option<Route> {
        let costs = self.search();
        debug!(states = costs.reached(), "search exhausted the frontier");
        let (cost, _) = costs.best_at(self.target)?;
        let tiles = costs.best_tiles(self.target);
        debug!(cost, tiles = tiles.len(), "maze solved");
        Some(Route { cost, tiles })
    }

    /// Renders the maze with `O` on every tile of `route`.
    pub fn render_route(&self, route: &Route) -> String {
        self.grid
            .render_with(|coord, _| route.tiles.contains(&coord).then_some('O'))
    }
}

fn single(found: Vec<Coord>, what: &'static str) -> Result<Coord, ParseError> {
    match found[..] {
        [coord] => Ok(coord),
        [] => Err(ParseError::Missing(what)),
        _ => Err(ParseError::Duplicate(what)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST_EXAMPLE: &str = "\
###############
#.......#....E#
#.#.###.#.###.#
#.....#.#...#.#
#.###.#####.#.#
#.#.#.......#.#
#.#.#####.###.#
#...........#.#
###.#.#####.#.#
#...#.....#.#.#
#.#.#.###.#.#.#
#.....#...#.#.#
#.###.#.#.#.#.#
#S..#.....#...#
###############
";

    const SECOND_EXAMPLE: &str = "\
#################
#...#...#...#..E#
#.#.#.#.#.#.#.#.#
#.#.#.#...#...#.#
#.#.#.#.###.#.#.#
#...#.#.#.....#.#
#.#.#.#.#.#####.#
#.#...#.#.#.....#
#.#.#####.#.###.#
#.#.#.......#...#
#.#.###.#####.###
#.#.#...#.....#.#
#.#.#.#####.###.#
#.#.#.........#.#
#.#.#.#########.#
#S#.............#
#################
";

    const OPEN_ROOM: &str = "\
######
#S...#
#....#
#....#
#...E#
######
";

    #[test]
    fn test_first_example() {
        let route = Maze::parse(FIRST_EXAMPLE).unwrap().solve().unwrap();
        assert_eq!(route.cost, 7036);
        assert_eq!(route.tiles.len(), 45);
    }

    #[test]
    fn test_second_example() {
        let route = Maze::parse(SECOND_EXAMPLE).unwrap().solve().unwrap();
        assert_eq!(route.cost, 11048);
        assert_eq!(route.tiles.len(), 64);
    }

    #[test]
    fn test_straight_corridor_costs_only_steps() {
        let maze = Maze::parse("######\n#S..E#\n######").unwrap();
        let route = maze.solve().unwrap();
        assert_eq!(route.cost, 3);
        assert_eq!(route.tiles.len(), 4);
    }

    #[test]
    fn test_corridor_behind_start_needs_half_turn() {
        let maze = Maze::parse("######\n#E..S#\n######").unwrap();
        assert_eq!(maze.solve().unwrap().cost, 3 + 2 * TURN_COST);
    }

    #[test]
    fn test_corridor_needing_one_turn() {
        let maze = Maze::parse("###\n#E#\n#.#\n#S#\n###").unwrap();
        assert_eq!(maze.solve().unwrap().cost, 2 + TURN_COST);
    }

    #[test]
    fn test_open_room_corner_to_corner() {
        let maze = Maze::parse(OPEN_ROOM).unwrap();
        let route = maze.solve().unwrap();
        assert_eq!(route.cost, 3 + 3 + TURN_COST);
        insta::assert_snapshot!(maze.render_route(&route), @r"
        ######
        #OOOO#
        #...O#
        #...O#
        #...O#
        ######
        ");
    }

    #[test]
    fn test_unreachable_target() {
        let maze = Maze::parse("#####\n#S#E#\n#####").unwrap();
        assert_eq!(maze.solve(), None);
        assert!(maze.search().best_tiles(maze.target()).is_empty());
    }

    #[test]
    fn test_search_is_idempotent() {
        let maze = Maze::parse(FIRST_EXAMPLE).unwrap();
        let first = maze.search();
        let second = maze.search();
        assert_eq!(first, second);
        assert_eq!(
            first.best_tiles(maze.target()),
            second.best_tiles(maze.target())
        );
    }

    #[test]
    fn test_start_state_costs_nothing() {
        let maze = Maze::parse(OPEN_ROOM).unwrap();
        let costs = maze.search();
        assert_eq!(costs.get(State::new(Direction::Right, maze.start())), Some(0));
        assert_eq!(
            costs.get(State::new(Direction::Down, maze.start())),
            Some(TURN_COST)
        );
        assert_eq!(
            costs.get(State::new(Direction::Left, maze.start())),
            Some(2 * TURN_COST)
        );
    }

    #[test]
    fn test_frontier_decrease_key() {
        let mut frontier = Frontier::default();
        let state = State::new(Direction::Up, Coord::new(1, 1));
        assert!(frontier.enqueue(10, state));
        assert!(!frontier.enqueue(12, state));
        assert!(frontier.enqueue(5, state));
        assert_eq!(frontier.dequeue(), Some((5, state)));
        assert_eq!(frontier.dequeue(), None);
    }

    #[test]
    fn test_reached_counts_finalized_states() {
        let maze = Maze::parse(OPEN_ROOM).unwrap();
        let walled = search(maze.grid(), Coord::new(0, 0), Direction::Right, maze.target());
        assert_eq!(walled.reached(), 0);
        assert!(walled.best_at(maze.target()).is_none());

        let costs = maze.search();
        assert!(costs.reached() >= 4);
        assert!(costs.get(State::new(Direction::Up, maze.start())).is_some());
    }

    #[test]
    fn test_frontier_orders_by_cost_then_state() {
        let mut frontier = Frontier::default();
        let right = State::new(Direction::Right, Coord::new(0, 0));
        let up = State::new(Direction::Up, Coord::new(5, 5));
        frontier.enqueue(3, right);
        frontier.enqueue(3, up);
        frontier.enqueue(1, State::new(Direction::Left, Coord::new(9, 9)));
        assert_eq!(frontier.dequeue().map(|(cost, _)| cost), Some(1));
        assert_eq!(frontier.dequeue(), Some((3, up)));
        assert_eq!(frontier.dequeue(), Some((3, right)));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Maze::parse("#S.#").unwrap_err(),
            ParseError::Missing("target")
        );
        assert_eq!(
            Maze::parse("#SSE#").unwrap_err(),
            ParseError::Duplicate("start")
        );
        assert_eq!(
            Maze::parse("#S?E#").unwrap_err(),
            ParseError::UnexpectedChar {
                ch: '?',
                line: 1,
                column: 3
            }
        );
    }
}
