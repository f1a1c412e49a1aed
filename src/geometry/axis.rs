//! The axis a divide rule splits along

use std::fmt;
use std::str::FromStr;

use glam::IVec3;

use crate::error::GrammarError;

/// One of the three scope axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    X,
    Y,
    Z,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::X, Direction::Y, Direction::Z];

    /// Component index of this axis (`X` = 0)
    pub fn index(self) -> usize {
        match self {
            Direction::X => 0,
            Direction::Y => 1,
            Direction::Z => 2,
        }
    }

    /// Unit vector pointing along the positive axis
    pub fn unit(self) -> IVec3 {
        match self {
            Direction::X => IVec3::X,
            Direction::Y => IVec3::Y,
            Direction::Z => IVec3::Z,
        }
    }

    /// Read this axis' component of `v`
    pub fn component(self, v: IVec3) -> i32 {
        v[self.index()]
    }

    /// Copy of `v` with this axis' component replaced
    pub fn with_component(self, mut v: IVec3, value: i32) -> IVec3 {
        v[self.index()] = value;
        v
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::X => write!(f, "X"),
            Direction::Y => write!(f, "Y"),
            Direction::Z => write!(f, "Z"),
        }
    }
}

impl FromStr for Direction {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Direction::X),
            "Y" | "y" => Ok(Direction::Y),
            "Z" | "z" => Ok(Direction::Z),
            other => Err(GrammarError::UnknownDirection(other.to_string())),
        }
    }
}
