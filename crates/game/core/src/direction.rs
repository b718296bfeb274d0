//! Compass directions and targeting vectors.
//!
//! All spatial reasoning in the engine is 8-way: a [`Direction`] is a single
//! compass step, a [`DirectionSet`] is the bitmask form used by ability and
//! movement vectors, and a [`Vector`] pairs a direction set with a range.

use bitflags::bitflags;

use crate::config::GameConfig;

/// One of the eight compass directions.
///
/// Rows grow downward and columns grow rightward, so `Up` is a negative row
/// delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// `(row_delta, col_delta)` for a single step.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::UpRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::Left => (0, -1),
            Direction::UpLeft => (-1, -1),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
            Direction::Right => Direction::Left,
            Direction::DownRight => Direction::UpLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::Left => Direction::Right,
            Direction::UpLeft => Direction::DownRight,
        }
    }

    /// The bitmask form of this direction.
    pub const fn bit(self) -> DirectionSet {
        match self {
            Direction::Up => DirectionSet::UP,
            Direction::UpRight => DirectionSet::UP_RIGHT,
            Direction::Right => DirectionSet::RIGHT,
            Direction::DownRight => DirectionSet::DOWN_RIGHT,
            Direction::Down => DirectionSet::DOWN,
            Direction::DownLeft => DirectionSet::DOWN_LEFT,
            Direction::Left => DirectionSet::LEFT,
            Direction::UpLeft => DirectionSet::UP_LEFT,
        }
    }

    /// Resolves the direction from one board coordinate to another.
    ///
    /// The result is determined purely by the signs of the row/column deltas
    /// (a target two rows up and one column left still resolves to `UpLeft`).
    /// Returns `None` when both coordinates are the same cell.
    pub fn between(from: crate::board::Coord, to: crate::board::Coord) -> Option<Direction> {
        let row_delta = to.row - from.row;
        let col_delta = to.col - from.col;

        match (row_delta.signum(), col_delta.signum()) {
            (-1, -1) => Some(Direction::UpLeft),
            (-1, 1) => Some(Direction::UpRight),
            (-1, 0) => Some(Direction::Up),
            (1, -1) => Some(Direction::DownLeft),
            (1, 1) => Some(Direction::DownRight),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

bitflags! {
    /// A set of compass directions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DirectionSet: u8 {
        const UP         = 1 << 0;
        const UP_RIGHT   = 1 << 1;
        const RIGHT      = 1 << 2;
        const DOWN_RIGHT = 1 << 3;
        const DOWN       = 1 << 4;
        const DOWN_LEFT  = 1 << 5;
        const LEFT       = 1 << 6;
        const UP_LEFT    = 1 << 7;
    }
}

impl DirectionSet {
    /// The four cardinal directions.
    pub const LATERAL: DirectionSet = DirectionSet::UP
        .union(DirectionSet::RIGHT)
        .union(DirectionSet::DOWN)
        .union(DirectionSet::LEFT);

    /// The four diagonal directions.
    pub const DIAGONAL: DirectionSet = DirectionSet::UP_RIGHT
        .union(DirectionSet::DOWN_RIGHT)
        .union(DirectionSet::DOWN_LEFT)
        .union(DirectionSet::UP_LEFT);

    /// All eight directions.
    pub const ALL: DirectionSet = DirectionSet::LATERAL.union(DirectionSet::DIAGONAL);

    pub fn contains_direction(self, direction: Direction) -> bool {
        self.contains(direction.bit())
    }
}

/// A reachability descriptor: a set of directions and how far they extend.
///
/// A range of 0 means the owner's own cell (self-targeting).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub directions: DirectionSet,
    pub range: u32,
}

impl Vector {
    pub const fn new(directions: DirectionSet, range: u32) -> Self {
        Self { directions, range }
    }
}

/// Bounded list of vectors carried by a piece or ability.
pub type VectorList = arrayvec::ArrayVec<Vector, { GameConfig::MAX_VECTORS }>;

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::board::Coord;

    #[test]
    fn offsets_and_opposites_are_consistent() {
        for direction in Direction::iter() {
            let (dr, dc) = direction.offset();
            let (or, oc) = direction.opposite().offset();
            assert_eq!((dr, dc), (-or, -oc));
        }
    }

    #[test]
    fn lateral_and_diagonal_partition_all() {
        assert_eq!(
            DirectionSet::LATERAL | DirectionSet::DIAGONAL,
            DirectionSet::ALL
        );
        assert!((DirectionSet::LATERAL & DirectionSet::DIAGONAL).is_empty());
    }

    #[test]
    fn direction_between_follows_delta_signs() {
        let origin = Coord::new(3, 3);
        assert_eq!(
            Direction::between(origin, Coord::new(0, 3)),
            Some(Direction::Up)
        );
        assert_eq!(
            Direction::between(origin, Coord::new(5, 0)),
            Some(Direction::DownLeft)
        );
        assert_eq!(
            Direction::between(origin, Coord::new(3, 5)),
            Some(Direction::Right)
        );
        // Two rows up, one column right is still a diagonal.
        assert_eq!(
            Direction::between(origin, Coord::new(1, 4)),
            Some(Direction::UpRight)
        );
        assert_eq!(Direction::between(origin, origin), None);
    }
}
