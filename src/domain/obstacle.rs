//! Static terrain: obstacle kinds and the tile grid.
//!
//! Obstacle semantics live here so every query (grid scan, world edges,
//! touch handling) agrees on what `Wall` and `Lava` mean.

use super::vector::Vector;
use crate::error::Result;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Obstacle {
    Wall, // Solid, blocks motion
    Lava, // Lethal on touch
}

impl Obstacle {
    /// Grid symbol mapping: `x` is wall, `!` is lava, anything else is open.
    pub fn from_symbol(symbol: char) -> Option<Obstacle> {
        match symbol {
            'x' => Some(Obstacle::Wall),
            '!' => Some(Obstacle::Lava),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Obstacle::Wall => "wall",
            Obstacle::Lava => "lava",
        }
    }

    /// Does touching this end the level?
    pub fn is_lethal(self) -> bool {
        matches!(self, Obstacle::Lava)
    }
}

/// Anything an actor can ask "what blocks me here?".
/// Implemented by the bare `Grid` and by `Level`.
pub trait ObstacleMap {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>>;
}

/// 2D terrain indexed `[row][col]`. Rows may be jagged; a cell past the end
/// of its row is open space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    cells: Vec<Vec<Option<Obstacle>>>,
}

impl Grid {
    pub fn new(cells: Vec<Vec<Option<Obstacle>>>) -> Self {
        Grid { cells }
    }

    pub fn rows(&self) -> &[Vec<Option<Obstacle>>] {
        &self.cells
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Longest row length; 0 for an empty grid.
    pub fn width(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell content at (col, row). Out of range is open.
    pub fn cell(&self, col: usize, row: usize) -> Option<Obstacle> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// What would block a box of `size` placed at `pos`?
    ///
    /// Priority:
    ///   1. bottom below the floor        → Lava
    ///   2. top, left or right off-world  → Wall
    ///   3. first non-empty cell in the box footprint, row-major
    ///
    /// The footprint covers every cell the box overlaps, including cells it
    /// only partially covers: rows `floor(top)..ceil(bottom)`, columns
    /// `floor(left)..ceil(right)`.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        let pos = pos.check_finite("pos")?;
        let size = size.check_size()?;

        let left = pos.x;
        let top = pos.y;
        let right = pos.x + size.x;
        let bottom = pos.y + size.y;

        if bottom > self.height() as f64 {
            return Ok(Some(Obstacle::Lava));
        }
        if top < 0.0 || right > self.width() as f64 || left < 0.0 {
            return Ok(Some(Obstacle::Wall));
        }

        let (row_start, row_end) = (top.floor() as usize, bottom.ceil() as usize);
        let (col_start, col_end) = (left.floor() as usize, right.ceil() as usize);

        for row in row_start..row_end {
            for col in col_start..col_end {
                if let Some(obstacle) = self.cell(col, row) {
                    return Ok(Some(obstacle));
                }
            }
        }
        Ok(None)
    }
}

impl ObstacleMap for Grid {
    fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<Obstacle>> {
        Grid::obstacle_at(self, pos, size)
    }
}
