use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::error::ParseError;
use crate::geometry::Coord;
use crate::input::{numbered_lines, signed_numbers, whitespace_numbers};
use crate::{Answers, Puzzle, RunConfig};

pub struct RestroomRedoubt;

const DEFAULT_AREA: (i64, i64) = (101, 103);
const SECONDS: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Robot {
    position: (i64, i64),
    velocity: (i64, i64),
}

struct Lobby {
    width: i64,
    height: i64,
    robots: Vec<Robot>,
}

impl Lobby {
    /// Robot lines, optionally preceded by a `width height` line.
    fn parse(input: &str) -> Result<Self, ParseError> {
        let mut lines = numbered_lines(input).peekable();
        let (width, height) = match lines.peek() {
            Some(&(line, text)) if !text.contains('=') => {
                lines.next();
                match whitespace_numbers::<i64>(text, line)?[..] {
                    [width, height] if width > 0 && height > 0 => (width, height),
                    _ => return Err(ParseError::malformed(line, "expected 'width height'")),
                }
            }
            _ => DEFAULT_AREA,
        };

        let robots = lines
            .map(|(line, text)| match signed_numbers(text, line)?[..] {
                [px, py, vx, vy] => Ok(Robot {
                    position: (px, py),
                    velocity: (vx, vy),
                }),
                _ => Err(ParseError::malformed(line, "expected p=x,y v=dx,dy")),
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            width,
            height,
            robots,
        })
    }

    fn positions_after(&self, seconds: i64) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.robots.iter().map(move |robot| {
            (
                (robot.position.0 + robot.velocity.0 * seconds).rem_euclid(self.width),
                (robot.position.1 + robot.velocity.1 * seconds).rem_euclid(self.height),
            )
        })
    }

    /// Product of robot counts per quadrant; robots on a middle line count
    /// for none.
    fn safety_factor(&self, seconds: i64) -> i64 {
        let (mid_x, mid_y) = (self.width / 2, self.height / 2);
        let mut quadrants = [0i64; 4];
        for (x, y) in self.positions_after(seconds) {
            if x == mid_x || y == mid_y {
                continue;
            }
            let index = usize::from(x > mid_x) + 2 * usize::from(y > mid_y);
            quadrants[index] += 1;
        }
        quadrants.iter().product()
    }

    /// First second at which no two robots share a tile. Positions repeat
    /// after `width * height` seconds, so the search stops there.
    fn first_spread_out(&self) -> Option<i64> {
        (0..self.width * self.height).find(|&seconds| {
            let mut taken = FxHashSet::default();
            self.positions_after(seconds).all(|position| taken.insert(position))
        })
    }

    fn render(&self, seconds: i64) -> String {
        let taken: FxHashSet<Coord> = self
            .positions_after(seconds)
            .map(|(x, y)| Coord::new(x as i32, y as i32))
            .collect();
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        if taken.contains(&Coord::new(x as i32, y as i32)) {
                            '#'
                        } else {
                            '.'
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Puzzle for RestroomRedoubt {
    fn day(&self) -> u8 {
        14
    }

    fn title(&self) -> &'static str {
        "Restroom Redoubt"
    }

    fn solve(&self, input: &str, config: &RunConfig) -> Result<Answers, ParseError> {
        let lobby = Lobby::parse(input)?;
        debug!(
            width = lobby.width,
            height = lobby.height,
            robots = lobby.robots.len(),
            "lobby parsed"
        );

        let spread = lobby.first_spread_out();
        if let (true, Some(seconds)) = (config.render, spread) {
            info!("robots after {seconds} s:\n{}", lobby.render(seconds));
        }
        Ok(Answers::new(lobby.safety_factor(SECONDS), spread))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
11 7
p=0,4 v=3,-3
p=6,3 v=-1,-3
p=10,3 v=-1,2
p=2,0 v=2,-1
p=0,0 v=1,3
p=3,0 v=-2,-2
p=7,6 v=-1,-3
p=3,0 v=-1,-2
p=9,3 v=2,3
p=7,3 v=-1,2
p=2,4 v=2,-3
p=9,5 v=-3,-3
";

    #[test]
    fn test_example_safety_factor() {
        let lobby = Lobby::parse(EXAMPLE).unwrap();
        assert_eq!((lobby.width, lobby.height), (11, 7));
        assert_eq!(lobby.safety_factor(SECONDS), 12);
    }

    #[test]
    fn test_single_robot_wraps() {
        let lobby = Lobby::parse("11 7\np=2,4 v=2,-3").unwrap();
        let track: Vec<_> = (0..=5).map(|s| lobby.positions_after(s).next().unwrap()).collect();
        assert_eq!(track, [(2, 4), (4, 1), (6, 5), (8, 2), (10, 6), (1, 3)]);
        assert_eq!(lobby.first_spread_out(), Some(0));
    }

    #[test]
    fn test_default_area() {
        let lobby = Lobby::parse("p=0,0 v=1,1").unwrap();
        assert_eq!((lobby.width, lobby.height), DEFAULT_AREA);
    }

    #[test]
    fn test_render_marks_robots() {
        let lobby = Lobby::parse("3 2\np=1,1 v=0,0").unwrap();
        assert_eq!(lobby.render(0), "...\n.#.");
    }
}
