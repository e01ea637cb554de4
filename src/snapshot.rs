use std::collections::BTreeMap;

use tracing::debug;

use crate::coords::CubeCoord;
use crate::error::{GridError, Result};
use crate::grid::HexGrid;
use crate::property::PropertyBag;

/// Flat external form: `"(x,y,z)"` key to the cell's bag.
pub type Snapshot = BTreeMap<String, PropertyBag>;

pub fn coord_key(c: CubeCoord) -> String {
    c.to_string()
}

pub fn parse_coord_key(key: &str) -> Result<CubeCoord> {
    let bad = || GridError::InvalidCoordKey(key.to_string());
    let inner = key
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(bad)?;
    let parts = inner
        .split(',')
        .map(|p| p.trim().parse::<i32>().map_err(|_| bad()))
        .collect::<Result<Vec<i32>>>()?;
    match parts[..] {
        [x, y, z] => CubeCoord::try_from_xyz(x, y, z).ok_or_else(bad),
        _ => Err(bad()),
    }
}

pub fn to_snapshot(grid: &HexGrid) -> Snapshot {
    grid.iter()
        .map(|(c, props)| (coord_key(c), props.clone()))
        .collect()
}

/// Radius is the largest absolute axis value among the keys. Cells the
/// snapshot omits start with empty bags. A single bad key fails the load.
pub fn from_snapshot(snapshot: Snapshot) -> Result<HexGrid> {
    let cells = snapshot
        .into_iter()
        .map(|(k, props)| Ok((parse_coord_key(&k)?, props)))
        .collect::<Result<Vec<_>>>()?;
    let radius = cells
        .iter()
        .map(|(c, _)| c.max_abs())
        .max()
        .unwrap_or(0);
    debug!(radius, cells = cells.len(), "restoring grid from snapshot");

    let mut grid = HexGrid::try_new(radius)?;
    for (c, props) in cells {
        grid.set_properties(c, props);
    }
    Ok(grid)
}

pub fn to_json(grid: &HexGrid) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_snapshot(grid))?)
}

pub fn from_json(json: &str) -> Result<HexGrid> {
    from_snapshot(serde_json::from_str(json)?)
}
