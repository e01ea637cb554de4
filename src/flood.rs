use std::collections::HashSet;

use crate::coords::{CubeCoord, Direction};
use crate::grid::HexGrid;

pub const OBSTACLE_KEY: &str = "obstacle";

// Only existing cells can be obstacles, so the fill walks off the grid.
pub fn is_obstacle(grid: &HexGrid, c: CubeCoord) -> bool {
    grid.get_property(c, OBSTACLE_KEY)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Ring `k` holds the cells first reached in exactly `k` unobstructed steps.
/// Always `n + 1` rings, some possibly empty.
pub fn flood_fill(grid: &HexGrid, center: CubeCoord, n: u32) -> Vec<Vec<CubeCoord>> {
    let mut visited: HashSet<CubeCoord> = HashSet::new();
    visited.insert(center);
    let mut rings: Vec<Vec<CubeCoord>> = Vec::with_capacity(n as usize + 1);
    rings.push(vec![center]);

    for k in 1..=n as usize {
        let mut fringe = Vec::new();
        for &from in &rings[k - 1] {
            for dir in Direction::ALL {
                let next = from.step(dir, 1);
                if visited.contains(&next) || is_obstacle(grid, next) {
                    continue;
                }
                visited.insert(next);
                fringe.push(next);
            }
        }
        rings.push(fringe);
    }
    rings
}

/// All cells reached by [`flood_fill`], ring order preserved.
pub fn reachable(grid: &HexGrid, center: CubeCoord, n: u32) -> Vec<CubeCoord> {
    flood_fill(grid, center, n).into_iter().flatten().collect()
}
