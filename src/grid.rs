use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coords::CubeCoord;
use crate::error::{GridError, Result};
use crate::property::{PropertyBag, PropertyValue};

#[derive(Debug, Clone, PartialEq)]
pub struct HexGrid {
    radius: u32,
    cells: HashMap<CubeCoord, PropertyBag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub coords: CubeCoord,
    pub props: PropertyBag,
}

impl HexGrid {
    pub const MAX_RADIUS: u32 = 4096;

    pub fn new(radius: u32) -> Self {
        assert!(radius <= Self::MAX_RADIUS, "Grid radius too large");
        let mut cells = HashMap::with_capacity(Self::cell_count(radius));
        let r = radius as i32;
        for x in -r..=r {
            for y in (-r).max(-x - r)..=r.min(-x + r) {
                cells.insert(CubeCoord::new(x, y), PropertyBag::new());
            }
        }
        debug!(radius, cells = cells.len(), "built hex grid");
        Self { radius, cells }
    }

    pub fn try_new(radius: u32) -> Result<Self> {
        if radius > Self::MAX_RADIUS {
            return Err(GridError::RadiusTooLarge(radius));
        }
        Ok(Self::new(radius))
    }

    /// Saturates at `usize::MAX`.
    pub const fn cell_count(radius: u32) -> usize {
        let r = radius as u128;
        let n = 3 * r * (r + 1) + 1;
        if n > usize::MAX as u128 {
            usize::MAX
        } else {
            n as usize
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, c: CubeCoord) -> bool {
        self.cells.contains_key(&c)
    }

    /// Cell coordinates in ascending order.
    pub fn coords(&self) -> Vec<CubeCoord> {
        let mut out: Vec<_> = self.cells.keys().copied().collect();
        out.sort_unstable();
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (CubeCoord, &PropertyBag)> {
        self.cells.iter().map(|(c, b)| (*c, b))
    }

    /// Merges into the existing bag. `false` if the cell is outside the grid.
    pub fn set_properties(&mut self, c: CubeCoord, props: PropertyBag) -> bool {
        match self.cells.get_mut(&c) {
            Some(existing) => {
                existing.extend(props);
                true
            }
            None => false,
        }
    }

    pub fn set_property(
        &mut self,
        c: CubeCoord,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> bool {
        match self.cells.get_mut(&c) {
            Some(existing) => {
                existing.insert(key.to_string(), value.into());
                true
            }
            None => false,
        }
    }

    pub fn get_properties(&self, c: CubeCoord) -> Option<&PropertyBag> {
        self.cells.get(&c)
    }

    /// Requested keys only. Keys the bag lacks are present with `None`.
    pub fn get_properties_subset(
        &self,
        c: CubeCoord,
        keys: &[&str],
    ) -> Option<HashMap<String, Option<PropertyValue>>> {
        let existing = self.cells.get(&c)?;
        Some(
            keys.iter()
                .map(|k| (k.to_string(), existing.get(*k).cloned()))
                .collect(),
        )
    }

    pub fn get_property(&self, c: CubeCoord, key: &str) -> Option<&PropertyValue> {
        self.cells.get(&c)?.get(key)
    }

    /// Returns how many updates landed on a cell.
    pub fn update_from_list(&mut self, updates: impl IntoIterator<Item = CellUpdate>) -> usize {
        let mut applied = 0usize;
        for u in updates {
            if self.set_properties(u.coords, u.props) {
                applied = applied.saturating_add(1);
            }
        }
        applied
    }
}
