//! Board directions used for rays, pins and checks.

use std::fmt;
use std::ops::Neg;

use crate::square::Square;

/// A (rank, file) step on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub rank: i8,
    pub file: i8,
}

impl Direction {
    pub const NORTH: Direction = Direction::new(1, 0);
    pub const SOUTH: Direction = Direction::new(-1, 0);
    pub const EAST: Direction = Direction::new(0, 1);
    pub const WEST: Direction = Direction::new(0, -1);
    pub const NORTH_EAST: Direction = Direction::new(1, 1);
    pub const NORTH_WEST: Direction = Direction::new(1, -1);
    pub const SOUTH_EAST: Direction = Direction::new(-1, 1);
    pub const SOUTH_WEST: Direction = Direction::new(-1, -1);

    /// Rook rays.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
    ];

    /// Bishop rays.
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NORTH_EAST,
        Direction::NORTH_WEST,
        Direction::SOUTH_EAST,
        Direction::SOUTH_WEST,
    ];

    /// Queen rays and king steps: orthogonals first, then diagonals.
    pub const ALL_RAYS: [Direction; 8] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
        Direction::NORTH_EAST,
        Direction::NORTH_WEST,
        Direction::SOUTH_EAST,
        Direction::SOUTH_WEST,
    ];

    /// Knight jumps.
    pub const KNIGHT_JUMPS: [Direction; 8] = [
        Direction::new(2, 1),
        Direction::new(2, -1),
        Direction::new(-2, 1),
        Direction::new(-2, -1),
        Direction::new(1, 2),
        Direction::new(1, -2),
        Direction::new(-1, 2),
        Direction::new(-1, -2),
    ];

    #[inline]
    pub const fn new(rank: i8, file: i8) -> Direction {
        Direction { rank, file }
    }

    /// Return `true` for rook-like steps.
    #[inline]
    pub const fn is_orthogonal(self) -> bool {
        (self.rank == 0) != (self.file == 0)
    }

    /// Return `true` for bishop-like steps.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.rank != 0 && (self.rank == self.file || self.rank == -self.file)
    }

    /// Unit step leading from `from` toward `to`, if the two share a rank,
    /// file or diagonal. `None` for equal or unaligned squares.
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let dr = to.rank() as i8 - from.rank() as i8;
        let df = to.file() as i8 - from.file() as i8;
        if dr == 0 && df == 0 {
            return None;
        }
        if dr != 0 && df != 0 && dr.abs() != df.abs() {
            return None;
        }
        Some(Direction::new(dr.signum(), df.signum()))
    }

    /// Walk from `origin` in this direction until the edge of the board.
    pub fn ray(self, origin: Square) -> Ray {
        Ray {
            next: origin.offset(self),
            dir: self,
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    #[inline]
    fn neg(self) -> Direction {
        Direction::new(-self.rank, -self.file)
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.rank, self.file)
    }
}

/// Iterator over the squares of a ray, nearest first.
#[derive(Debug, Clone)]
pub struct Ray {
    next: Option<Square>,
    dir: Direction,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let current = self.next?;
        self.next = current.offset(self.dir);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;
    use crate::square::Square;

    #[test]
    fn classification() {
        for dir in Direction::ORTHOGONAL {
            assert!(dir.is_orthogonal());
            assert!(!dir.is_diagonal());
        }
        for dir in Direction::DIAGONAL {
            assert!(dir.is_diagonal());
            assert!(!dir.is_orthogonal());
        }
        for jump in Direction::KNIGHT_JUMPS {
            assert!(!jump.is_diagonal() && !jump.is_orthogonal());
        }
    }

    #[test]
    fn between_aligned_squares() {
        assert_eq!(Direction::between(Square::E1, Square::E8), Some(Direction::NORTH));
        assert_eq!(Direction::between(Square::H8, Square::A1), Some(Direction::SOUTH_WEST));
        assert_eq!(Direction::between(Square::A5, Square::H5), Some(Direction::EAST));
        assert_eq!(Direction::between(Square::E1, Square::F3), None);
        assert_eq!(Direction::between(Square::E1, Square::E1), None);
    }

    #[test]
    fn ray_walks_to_edge() {
        let squares: Vec<Square> = Direction::NORTH_EAST.ray(Square::E5).collect();
        assert_eq!(squares, vec![Square::F6, Square::G7, Square::H8]);
        assert_eq!(Direction::WEST.ray(Square::A3).count(), 0);
    }

    #[test]
    fn negation_reverses() {
        assert_eq!(-Direction::NORTH, Direction::SOUTH);
        assert_eq!(-Direction::SOUTH_EAST, Direction::NORTH_WEST);
    }
}
