//! Directional inputs.

/// One directional input inside a combat sequence.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Axis grouping used by bias tables and on-hit rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Number of directions.
    pub const COUNT: usize = 4;

    /// All directions in declaration order.
    pub const fn all() -> [Direction; Self::COUNT] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// Both directions lying on `axis`.
    pub const fn along(axis: Axis) -> [Direction; 2] {
        match axis {
            Axis::Horizontal => [Direction::Left, Direction::Right],
            Axis::Vertical => [Direction::Up, Direction::Down],
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self.axis(), Axis::Horizontal)
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self.axis(), Axis::Vertical)
    }
}
