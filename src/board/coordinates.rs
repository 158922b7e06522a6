//! Grid coordinates and step directions.
//!
//! The origin `(0/0)` is the lower-left corner of the map: `up` increases `y`
//! and `right` increases `x`. Steps are clamped at the map edge, there is no
//! wraparound.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::BoardError;

/// A cell on a square map. Both axes lie in `[0, map_size - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coordinates {
    x: u16,
    y: u16,
}

impl Coordinates {
    /// Creates coordinates, failing if either axis falls outside the map.
    ///
    /// Takes signed values so callers can scan areas that overhang the
    /// border and discard the misses.
    pub fn new(x: i32, y: i32, map_size: u16) -> Result<Self, BoardError> {
        let limit = i32::from(map_size);
        if x < 0 || y < 0 || x >= limit || y >= limit {
            return Err(BoardError::OutOfBounds { x, y, map_size });
        }
        Ok(Coordinates {
            x: x as u16,
            y: y as u16,
        })
    }

    pub const fn x(self) -> u16 {
        self.x
    }

    pub const fn y(self) -> u16 {
        self.y
    }

    /// Returns the neighbouring cell in `direction`, clamped at the border.
    ///
    /// Stepping off the map returns `self` unchanged.
    pub fn step(self, direction: Direction, map_size: u16) -> Coordinates {
        let max = map_size.saturating_sub(1);
        let mut next = self;
        match direction {
            Direction::Right => next.x = (self.x + 1).min(max),
            Direction::Left => next.x = self.x.saturating_sub(1),
            Direction::Up => next.y = (self.y + 1).min(max),
            Direction::Down => next.y = self.y.saturating_sub(1),
        }
        next
    }

    /// All in-bounds cells within `radius` of `self` on both axes
    /// (a square of side `2 * radius + 1`), including `self`.
    pub fn area(self, radius: i32, map_size: u16) -> Vec<Coordinates> {
        let (cx, cy) = (i32::from(self.x), i32::from(self.y));
        let mut cells = Vec::with_capacity(((2 * radius + 1) * (2 * radius + 1)) as usize);
        for x in cx - radius..=cx + radius {
            for y in cy - radius..=cy + radius {
                if let Ok(c) = Coordinates::new(x, y, map_size) {
                    cells.push(c);
                }
            }
        }
        cells
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{})", self.x, self.y)
    }
}

/// One of the four orthogonal directions an order can point in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Returns the lowercase name used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
