use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCube", into = "RawCube")]
pub struct CubeCoord {
    x: i32,
    y: i32,
    z: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCube {
    x: i32,
    y: i32,
    z: i32,
}

impl CubeCoord {
    pub const ORIGIN: CubeCoord = CubeCoord { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    // Summed in i64 so extreme axis values cannot wrap back to zero.
    pub fn try_from_xyz(x: i32, y: i32, z: i32) -> Option<Self> {
        let sum = i64::from(x) + i64::from(y) + i64::from(z);
        (sum == 0).then_some(Self { x, y, z })
    }

    pub const fn x(self) -> i32 {
        self.x
    }

    pub const fn y(self) -> i32 {
        self.y
    }

    pub const fn z(self) -> i32 {
        self.z
    }

    pub fn max_abs(self) -> u32 {
        self.x
            .unsigned_abs()
            .max(self.y.unsigned_abs())
            .max(self.z.unsigned_abs())
    }

    pub fn distance(self, other: CubeCoord) -> u32 {
        (self - other).max_abs()
    }

    pub fn step(self, direction: Direction, n: i32) -> Self {
        self + direction.offset() * n
    }
}

impl TryFrom<RawCube> for CubeCoord {
    type Error = String;

    fn try_from(raw: RawCube) -> std::result::Result<Self, Self::Error> {
        CubeCoord::try_from_xyz(raw.x, raw.y, raw.z)
            .ok_or_else(|| format!("({},{},{}) does not sum to zero", raw.x, raw.y, raw.z))
    }
}

impl From<CubeCoord> for RawCube {
    fn from(c: CubeCoord) -> Self {
        RawCube {
            x: c.x,
            y: c.y,
            z: c.z,
        }
    }
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

impl Add for CubeCoord {
    type Output = CubeCoord;

    fn add(self, rhs: Self) -> Self::Output {
        CubeCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for CubeCoord {
    type Output = CubeCoord;

    fn sub(self, rhs: Self) -> Self::Output {
        CubeCoord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for CubeCoord {
    type Output = CubeCoord;

    fn neg(self) -> Self::Output {
        CubeCoord::new(-self.x, -self.y)
    }
}

impl Mul<i32> for CubeCoord {
    type Output = CubeCoord;

    fn mul(self, rhs: i32) -> Self::Output {
        CubeCoord::new(self.x * rhs, self.y * rhs)
    }
}

/// Unit steps, labelled for flat-top hexes with screen y pointing down.
/// Index order walks the ring counter-clockwise from NE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NorthEast,
    North,
    NorthWest,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(GridError::InvalidDirection(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub const fn offset(self) -> CubeCoord {
        match self {
            Direction::NorthEast => CubeCoord::new(1, -1),
            Direction::North => CubeCoord::new(0, -1),
            Direction::NorthWest => CubeCoord::new(-1, 0),
            Direction::SouthWest => CubeCoord::new(-1, 1),
            Direction::South => CubeCoord::new(0, 1),
            Direction::SouthEast => CubeCoord::new(1, 0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::NorthEast => "NE",
            Direction::North => "N",
            Direction::NorthWest => "NW",
            Direction::SouthWest => "SW",
            Direction::South => "S",
            Direction::SouthEast => "SE",
        }
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 3) % 6]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GridError::InvalidDirectionLabel(s.to_string()))
    }
}
