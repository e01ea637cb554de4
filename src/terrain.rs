use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GridError, Result};
use crate::grid::HexGrid;
use crate::property::bag;

pub const TERRAIN_KEY: &str = "terrain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Terrain {
    Plain,
    Scrub,
    Forest,
    ForestedHills,
    Rough,
    Desert,
    Hills,
    HillyForest,
    Mountains,
    MountainPass,
    Marsh,
    Pond,
    Depression,
}

/// Outcomes a transition roll can land on, in table order.
const ROLL_TYPES: [Terrain; 10] = [
    Terrain::Plain,
    Terrain::Scrub,
    Terrain::Forest,
    Terrain::Rough,
    Terrain::Desert,
    Terrain::Hills,
    Terrain::Mountains,
    Terrain::Marsh,
    Terrain::Pond,
    Terrain::Depression,
];

impl Terrain {
    pub const ALL: [Terrain; 13] = [
        Terrain::Plain,
        Terrain::Scrub,
        Terrain::Forest,
        Terrain::ForestedHills,
        Terrain::Rough,
        Terrain::Desert,
        Terrain::Hills,
        Terrain::HillyForest,
        Terrain::Mountains,
        Terrain::MountainPass,
        Terrain::Marsh,
        Terrain::Pond,
        Terrain::Depression,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Terrain::Plain => "plain",
            Terrain::Scrub => "scrub",
            Terrain::Forest => "forest",
            Terrain::ForestedHills => "forested hills",
            Terrain::Rough => "rough",
            Terrain::Desert => "desert",
            Terrain::Hills => "hills",
            Terrain::HillyForest => "hilly forest",
            Terrain::Mountains => "mountains",
            Terrain::MountainPass => "mountain pass",
            Terrain::Marsh => "marsh",
            Terrain::Pond => "pond",
            Terrain::Depression => "depression",
        }
    }

    /// d20 weights over `ROLL_TYPES` when leaving this terrain.
    fn transition_weights(self) -> [u32; 10] {
        match self {
            Terrain::Plain => [11, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            Terrain::Scrub => [3, 11, 1, 1, 1, 1, 1, 1, 1, 1],
            Terrain::Forest => [1, 4, 14, 1, 1, 1, 1, 1, 1, 1],
            Terrain::ForestedHills => [1, 1, 1, 1, 1, 4, 14, 1, 1, 1],
            Terrain::Rough => [1, 1, 5, 8, 1, 1, 1, 1, 1, 1],
            Terrain::Desert => [3, 5, 4, 14, 1, 1, 1, 1, 1, 1],
            Terrain::Hills => [1, 2, 3, 4, 5, 14, 1, 1, 1, 1],
            Terrain::HillyForest => [1, 1, 1, 1, 1, 2, 3, 4, 5, 14],
            Terrain::Mountains | Terrain::MountainPass => [1, 2, 3, 4, 5, 10, 18, 1, 1, 1],
            Terrain::Marsh => [2, 4, 5, 6, 8, 1, 15, 1, 1, 1],
            Terrain::Pond => [1, 1, 1, 1, 1, 1, 1, 19, 1, 1],
            Terrain::Depression => [1, 1, 1, 1, 1, 1, 1, 1, 1, 20],
        }
    }

    /// Rare variant a rolled terrain may turn into, with its probability.
    fn variant(self) -> Option<(Terrain, f64)> {
        match self {
            Terrain::Forest => Some((Terrain::ForestedHills, 0.1)),
            Terrain::Hills => Some((Terrain::HillyForest, 0.1)),
            Terrain::Mountains => Some((Terrain::MountainPass, 0.05)),
            _ => None,
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Terrain {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Terrain::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| GridError::UnknownTerrain(s.to_string()))
    }
}

impl TryFrom<String> for Terrain {
    type Error = GridError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Terrain> for String {
    fn from(t: Terrain) -> Self {
        t.name().to_string()
    }
}

/// `None` when the d20 `roll` exceeds the table's cumulative weight.
pub fn next_terrain<R: Rng + ?Sized>(from: Terrain, roll: u32, rng: &mut R) -> Option<Terrain> {
    let mut cumulative = 0u32;
    for (weight, kind) in from.transition_weights().into_iter().zip(ROLL_TYPES) {
        cumulative += weight;
        if roll <= cumulative {
            return Some(match kind.variant() {
                Some((rare, chance)) if rng.r#gen::<f64>() < chance => rare,
                _ => kind,
            });
        }
    }
    None
}

#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    current: Terrain,
}

impl TerrainGenerator {
    pub fn new(start: Terrain) -> Self {
        Self { current: start }
    }

    pub fn current(&self) -> Terrain {
        self.current
    }

    /// Each cell's roll chains off the previous result.
    pub fn populate<R: Rng + ?Sized>(&mut self, grid: &mut HexGrid, rng: &mut R) -> usize {
        let mut written = 0usize;
        for c in grid.coords() {
            let roll = rng.gen_range(1..=20);
            if let Some(t) = next_terrain(self.current, roll, rng) {
                self.current = t;
            }
            if grid.set_properties(c, bag([(TERRAIN_KEY, self.current.name())])) {
                written += 1;
            }
        }
        debug!(written, last = %self.current, "populated terrain");
        written
    }
}
