//! Dense grid representation for character-map puzzles.
//!
//! Cells are stored row-major in a flat vector. Reading a coordinate outside
//! the bounds yields the tile type's `OUT_OF_BOUNDS` sentinel instead of an
//! error, so callers can look at neighbours without bounds checks.

use crate::error::ParseError;
use crate::geometry::Coord;

/// A cell type that can live in a [`Grid`].
pub trait Tile: Copy + Eq {
    /// Value reported for coordinates outside the grid.
    const OUT_OF_BOUNDS: Self;

    /// Character used when rendering the grid.
    fn glyph(self) -> char;
}

/// Plain letter maps. Reads outside the grid give `'\0'`.
impl Tile for char {
    const OUT_OF_BOUNDS: Self = '\0';

    fn glyph(self) -> char {
        self
    }
}

/// A rectangular grid of tiles with an implicit out-of-bounds sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Tile> Grid<T> {
    /// Creates a `width` x `height` grid filled with `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Builds a grid from rows that must all have the same width.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ParseError> {
        let Some(first) = rows.first() else {
            return Err(ParseError::Empty);
        };
        let width = first.len();
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ParseError::RaggedRow {
                    line: row_index + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parses a character map, one tile per character.
    ///
    /// `decode` receives the coordinate and character and returns `None` for
    /// characters it does not understand, which aborts with the position of
    /// the offending character.
    pub fn parse<F>(text: &str, mut decode: F) -> Result<Self, ParseError>
    where
        F: FnMut(Coord, char) -> Option<T>,
    {
        let rows = text
            .lines()
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .map(|(x, ch)| {
                        decode(Coord::new(x as i32, y as i32), ch).ok_or(
                            ParseError::UnexpectedChar {
                                ch,
                                line: y + 1,
                                column: x + 1,
                            },
                        )
                    })
                    .collect::<Result<Vec<T>, ParseError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(rows)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Converts a coordinate to a flat index, or `None` if out of bounds.
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.x < 0 || coord.y < 0 {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Converts a flat index back to a coordinate.
    #[inline(always)]
    fn coord(&self, index: usize) -> Coord {
        Coord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Returns the tile at `coord`, or the sentinel when out of bounds.
    #[inline]
    pub fn get(&self, coord: Coord) -> T {
        self.index(coord)
            .map_or(T::OUT_OF_BOUNDS, |index| self.cells[index])
    }

    /// Writes a tile. Returns `false` and leaves the grid untouched when
    /// `coord` is outside the bounds; the grid never grows.
    pub fn set(&mut self, coord: Coord, value: T) -> bool {
        match self.index(coord) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    /// Applies a batch of staged writes.
    pub fn merge(&mut self, slice: impl IntoIterator<Item = (Coord, T)>) {
        for (coord, value) in slice {
            self.set(coord, value);
        }
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cells.len()).map(|index| self.coord(index))
    }

    /// All `(coord, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &tile)| (self.coord(index), tile))
    }

    /// Coordinates holding `tile`.
    pub fn positions(&self, tile: T) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(move |&(_, value)| value == tile)
            .map(|(coord, _)| coord)
    }

    /// Renders the grid as text, one line per row, without a trailing newline.
    pub fn render(&self) -> String {
        self.render_with(|_, _| None)
    }

    /// Renders the grid, letting `overlay` replace the glyph of any cell.
    pub fn render_with<F>(&self, overlay: F) -> String
    where
        F: Fn(Coord, T) -> Option<char>,
    {
        let mut output = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            if y > 0 {
                output.push('\n');
            }
            for x in 0..self.width {
                let coord = Coord::new(x as i32, y as i32);
                let tile = self.get(coord);
                output.push(overlay(coord, tile).unwrap_or_else(|| tile.glyph()));
            }
        }
        output
    }
}
