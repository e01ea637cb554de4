use std::fmt;

use rand::Rng;
use tracing::debug;

use crate::grid::HexGrid;
use crate::property::bag;

pub const SETTLEMENT_KEY: &str = "settlement";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleKind {
    SmallShellKeep,
    Tower,
    MoatHouse,
    LargeShellKeep,
    SmallWalledCastle,
    MediumWalledCastle,
    ConcentricCastle,
    LargeWalledCastle,
    FortressComplex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inhabitants {
    TotallyDeserted,
    MonsterLair,
    Humans,
    CharacterTypes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ruin {
    Village,
    City,
    Shrine,
    Tomb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Settlement {
    SingleDwelling,
    Thorp,
    Hamlet,
    Village,
    Town,
    City,
    Castle {
        kind: CastleKind,
        inhabitants: Inhabitants,
    },
    Ruins(Ruin),
    Uninhabited,
}

impl CastleKind {
    pub fn from_roll(roll: u32) -> Option<Self> {
        let kind = match roll {
            1..=10 => CastleKind::SmallShellKeep,
            11..=25 => CastleKind::Tower,
            26..=35 => CastleKind::MoatHouse,
            36..=45 => CastleKind::LargeShellKeep,
            46..=65 => CastleKind::SmallWalledCastle,
            66..=80 => CastleKind::MediumWalledCastle,
            81..=88 => CastleKind::ConcentricCastle,
            89..=95 => CastleKind::LargeWalledCastle,
            96..=100 => CastleKind::FortressComplex,
            _ => return None,
        };
        Some(kind)
    }

    pub fn size(self) -> CastleSize {
        match self {
            CastleKind::SmallShellKeep | CastleKind::Tower | CastleKind::MoatHouse => {
                CastleSize::Small
            }
            CastleKind::LargeShellKeep
            | CastleKind::SmallWalledCastle
            | CastleKind::MediumWalledCastle => CastleSize::Medium,
            CastleKind::ConcentricCastle
            | CastleKind::LargeWalledCastle
            | CastleKind::FortressComplex => CastleSize::Large,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CastleKind::SmallShellKeep => "Small shell keep",
            CastleKind::Tower => "Tower",
            CastleKind::MoatHouse => "Moat house or friary",
            CastleKind::LargeShellKeep => "Large shell keep",
            CastleKind::SmallWalledCastle => "Small walled castle with keep",
            CastleKind::MediumWalledCastle => "Medium walled castle with keep",
            CastleKind::ConcentricCastle => "Concentric castle",
            CastleKind::LargeWalledCastle => "Large walled castle with keep",
            CastleKind::FortressComplex => "Fortress complex",
        }
    }
}

impl CastleSize {
    /// Upper bounds of the d100 inhabitant bands, in `Inhabitants` order.
    fn inhabitant_bounds(self) -> [u32; 4] {
        match self {
            CastleSize::Small => [45, 60, 70, 100],
            CastleSize::Medium => [30, 50, 65, 100],
            CastleSize::Large => [15, 40, 60, 100],
        }
    }
}

impl Inhabitants {
    const ALL: [Inhabitants; 4] = [
        Inhabitants::TotallyDeserted,
        Inhabitants::MonsterLair,
        Inhabitants::Humans,
        Inhabitants::CharacterTypes,
    ];

    pub fn from_roll(size: CastleSize, roll: u32) -> Option<Self> {
        if roll == 0 {
            return None;
        }
        size.inhabitant_bounds()
            .into_iter()
            .zip(Self::ALL)
            .find(|(upper, _)| roll <= *upper)
            .map(|(_, who)| who)
    }

    pub fn name(self) -> &'static str {
        match self {
            Inhabitants::TotallyDeserted => "Totally deserted",
            Inhabitants::MonsterLair => "Deserted (monster therein)",
            Inhabitants::Humans => "Humans",
            Inhabitants::CharacterTypes => "Character-types",
        }
    }
}

impl Ruin {
    pub fn from_roll(roll: u32) -> Option<Self> {
        match roll {
            1..=30 => Some(Ruin::Village),
            31..=60 => Some(Ruin::City),
            61..=85 => Some(Ruin::Shrine),
            86..=100 => Some(Ruin::Tomb),
            _ => None,
        }
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Settlement::SingleDwelling => f.write_str("Single Dwelling"),
            Settlement::Thorp => f.write_str("Thorp"),
            Settlement::Hamlet => f.write_str("Hamlet"),
            Settlement::Village => f.write_str("Village"),
            Settlement::Town => f.write_str("Town"),
            Settlement::City => f.write_str("City"),
            Settlement::Castle { kind, inhabitants } => {
                write!(f, "Castle ({}, {})", kind.name(), inhabitants.name())
            }
            Settlement::Ruins(Ruin::Village) => f.write_str("Ruined Village"),
            Settlement::Ruins(Ruin::City) => f.write_str("Ruined City"),
            Settlement::Ruins(Ruin::Shrine) => f.write_str("Ruined Shrine"),
            Settlement::Ruins(Ruin::Tomb) => f.write_str("Ruined Tomb"),
            Settlement::Uninhabited => f.write_str("Uninhabited"),
        }
    }
}

/// Castle from its two d100 rolls: type (which fixes the size), then
/// inhabitants against that size's bands.
pub fn castle_from_rolls(kind_roll: u32, inhabitant_roll: u32) -> Option<Settlement> {
    let kind = CastleKind::from_roll(kind_roll)?;
    let inhabitants = Inhabitants::from_roll(kind.size(), inhabitant_roll)?;
    Some(Settlement::Castle { kind, inhabitants })
}

fn d100<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..=100)
}

/// Settlement for a d100 `roll`. Castles and ruins take further rolls from
/// `rng`. Rolls outside 1..=100 are uninhabited.
pub fn settlement_type<R: Rng + ?Sized>(roll: u32, rng: &mut R) -> Settlement {
    match roll {
        1..=3 => Settlement::SingleDwelling,
        4..=5 => Settlement::Thorp,
        6..=7 => Settlement::Hamlet,
        8..=9 => Settlement::Village,
        10 => Settlement::Town,
        11 => Settlement::City,
        12..=14 => {
            let kind_roll = d100(rng);
            let inhabitant_roll = d100(rng);
            castle_from_rolls(kind_roll, inhabitant_roll)
                .unwrap_or(Settlement::Uninhabited)
        }
        15..=16 => match Ruin::from_roll(d100(rng)) {
            Some(ruin) => Settlement::Ruins(ruin),
            None => Settlement::Uninhabited,
        },
        _ => Settlement::Uninhabited,
    }
}

pub fn populate_settlements<R: Rng + ?Sized>(grid: &mut HexGrid, rng: &mut R) -> usize {
    let mut written = 0usize;
    let mut inhabited = 0usize;
    for c in grid.coords() {
        let settlement = settlement_type(d100(rng), rng);
        if settlement != Settlement::Uninhabited {
            inhabited += 1;
        }
        if grid.set_properties(c, bag([(SETTLEMENT_KEY, settlement.to_string())])) {
            written += 1;
        }
    }
    debug!(written, inhabited, "populated settlements");
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{TERRAIN_KEY, Terrain, TerrainGenerator};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn plain_rolls_hit_table_bands() {
        let mut rng = StdRng::seed_from_u64(1);
        let cases = [
            (1, "Single Dwelling"),
            (3, "Single Dwelling"),
            (4, "Thorp"),
            (5, "Thorp"),
            (6, "Hamlet"),
            (9, "Village"),
            (10, "Town"),
            (11, "City"),
            (17, "Uninhabited"),
            (100, "Uninhabited"),
            (0, "Uninhabited"),
            (101, "Uninhabited"),
        ];
        for (roll, expected) in cases {
            let got = settlement_type(roll, &mut rng).to_string();
            assert_eq!(got, expected, "roll {roll}");
        }
    }

    #[test]
    fn castle_and_ruin_bands_reroll() {
        let mut rng = StdRng::seed_from_u64(2);
        for roll in 12..=14 {
            for _ in 0..20 {
                let s = settlement_type(roll, &mut rng);
                assert!(matches!(s, Settlement::Castle { .. }), "roll {roll}");
            }
        }
        for roll in 15..=16 {
            for _ in 0..20 {
                let s = settlement_type(roll, &mut rng);
                assert!(matches!(s, Settlement::Ruins(_)), "roll {roll}");
                assert!(s.to_string().starts_with("Ruined "));
            }
        }
    }

    #[test]
    fn castle_string_format() {
        let castle = castle_from_rolls(1, 1).unwrap();
        assert_eq!(
            castle.to_string(),
            "Castle (Small shell keep, Totally deserted)"
        );
        let castle = castle_from_rolls(100, 100).unwrap();
        assert_eq!(
            castle.to_string(),
            "Castle (Fortress complex, Character-types)"
        );
    }

    #[test]
    fn castle_size_bands() {
        let cases = [
            (35, CastleKind::MoatHouse, CastleSize::Small),
            (36, CastleKind::LargeShellKeep, CastleSize::Medium),
            (80, CastleKind::MediumWalledCastle, CastleSize::Medium),
            (81, CastleKind::ConcentricCastle, CastleSize::Large),
        ];
        for (roll, kind, size) in cases {
            let got = CastleKind::from_roll(roll).unwrap();
            assert_eq!(got, kind);
            assert_eq!(got.size(), size);
        }
        assert!(CastleKind::from_roll(0).is_none());
        assert!(CastleKind::from_roll(101).is_none());
    }

    #[test]
    fn inhabitants_depend_on_size() {
        // 45 is the last deserted roll for a small castle only.
        let small = castle_from_rolls(20, 45).unwrap();
        assert_eq!(small.to_string(), "Castle (Tower, Totally deserted)");
        let medium = castle_from_rolls(50, 45).unwrap();
        assert_eq!(
            medium.to_string(),
            "Castle (Small walled castle with keep, Deserted (monster therein))"
        );
        let large = castle_from_rolls(90, 45).unwrap();
        assert_eq!(
            large.to_string(),
            "Castle (Large walled castle with keep, Humans)"
        );
        assert!(castle_from_rolls(20, 0).is_none());
        assert!(castle_from_rolls(20, 101).is_none());
    }

    #[test]
    fn ruin_bands() {
        assert_eq!(Ruin::from_roll(30), Some(Ruin::Village));
        assert_eq!(Ruin::from_roll(31), Some(Ruin::City));
        assert_eq!(Ruin::from_roll(85), Some(Ruin::Shrine));
        assert_eq!(Ruin::from_roll(86), Some(Ruin::Tomb));
        assert_eq!(Ruin::from_roll(0), None);
    }

    #[test]
    fn populate_keeps_existing_terrain() {
        let mut grid = HexGrid::new(3);
        let mut rng = StdRng::seed_from_u64(5);
        TerrainGenerator::new(Terrain::Plain).populate(&mut grid, &mut rng);
        let written = populate_settlements(&mut grid, &mut rng);
        assert_eq!(written, grid.len());
        for (_, props) in grid.iter() {
            assert!(props[TERRAIN_KEY].as_str().is_some());
            assert!(!props[SETTLEMENT_KEY].as_str().unwrap().is_empty());
        }
    }
}
