use std::{cmp::Ordering, ops::Add};

/// A grid coordinate, `x` is the column and `y` is the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos2 {
    pub x: i64,
    pub y: i64,
}
impl Pos2 {
    /// Offsets of the 8 cells surrounding a position, in row-major order
    pub const NEIGHBORHOOD: [Pos2; 8] = [
        Pos2 { x: -1, y: -1 },
        Pos2 { x: 0, y: -1 },
        Pos2 { x: 1, y: -1 },
        Pos2 { x: -1, y: 0 },
        Pos2 { x: 1, y: 0 },
        Pos2 { x: -1, y: 1 },
        Pos2 { x: 0, y: 1 },
        Pos2 { x: 1, y: 1 },
    ];

    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            x: col as i64,
            y: row as i64,
        }
    }

    /// Wraps this position onto a `rows` by `cols` torus
    ///
    /// Returns the `(row, col)` pair, both within bounds
    #[inline]
    pub fn wrap(self, rows: usize, cols: usize) -> (usize, usize) {
        (
            self.y.rem_euclid(rows as i64) as usize,
            self.x.rem_euclid(cols as i64) as usize,
        )
    }
}
impl PartialOrd for Pos2 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Pos2 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // compare y coordinate first, then x coordinate
        // i.e. row-major order
        Ord::cmp(&self.y, &other.y).then(Ord::cmp(&self.x, &other.x))
    }
}
impl Add for Pos2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
