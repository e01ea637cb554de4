use std::collections::HashSet;

use crate::coords::{CubeCoord, Direction};
use crate::error::Result;
use crate::grid::HexGrid;

const RANGE_CAPACITY_HINT: usize = 1 << 16;

/// Every coordinate within cube distance `n` of `center`, whether or not any
/// grid holds it.
pub fn hexes_in_range(center: CubeCoord, n: u32, exclude_center: bool) -> Vec<CubeCoord> {
    let mut out = Vec::with_capacity(HexGrid::cell_count(n).min(RANGE_CAPACITY_HINT));
    let n = i32::try_from(n).unwrap_or(i32::MAX);
    for dx in -n..=n {
        for dy in (-n).max((-dx).saturating_sub(n))..=n.min(n.saturating_sub(dx)) {
            if exclude_center && dx == 0 && dy == 0 {
                continue;
            }
            out.push(center + CubeCoord::new(dx, dy));
        }
    }
    out
}

pub fn neighbors(c: CubeCoord) -> Vec<CubeCoord> {
    hexes_in_range(c, 1, true)
}

pub fn cube_distance(a: CubeCoord, b: CubeCoord) -> u32 {
    a.distance(b)
}

/// `start` moved `n` steps in direction `direction` (an index 0..=5).
pub fn relative_coordinate(start: CubeCoord, direction: usize, n: i32) -> Result<CubeCoord> {
    Ok(start.step(Direction::from_index(direction)?, n))
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// The axis with the largest rounding error is rebuilt from the other two.
pub fn cube_round(x: f64, y: f64, z: f64) -> CubeCoord {
    let mut rx = x.round();
    let mut ry = y.round();
    let rz = z.round();

    let dx = (rx - x).abs();
    let dy = (ry - y).abs();
    let dz = (rz - z).abs();

    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy > dz {
        ry = -rx - rz;
    }
    // z is derived by `CubeCoord::new` in the remaining case.
    CubeCoord::new(rx as i32, ry as i32)
}

/// Straight line of cells from `a` to `b`, both ends included.
pub fn hexes_in_path(a: CubeCoord, b: CubeCoord) -> Vec<CubeCoord> {
    let dist = cube_distance(a, b);
    if dist == 0 {
        return vec![a];
    }
    let n = f64::from(dist);
    (0..=dist)
        .map(|i| {
            let t = f64::from(i) / n;
            cube_round(
                lerp(f64::from(a.x()), f64::from(b.x()), t),
                lerp(f64::from(a.y()), f64::from(b.y()), t),
                lerp(f64::from(a.z()), f64::from(b.z()), t),
            )
        })
        .collect()
}

/// Cells in both ranges, in the enumeration order of the first.
pub fn hex_range_intersection(
    center_a: CubeCoord,
    range_a: u32,
    center_b: CubeCoord,
    range_b: u32,
) -> Vec<CubeCoord> {
    let b: HashSet<CubeCoord> = hexes_in_range(center_b, range_b, false)
        .into_iter()
        .collect();
    hexes_in_range(center_a, range_a, false)
        .into_iter()
        .filter(|c| b.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn random_coord(rng: &mut StdRng) -> CubeCoord {
        CubeCoord::new(rng.gen_range(-30..=30), rng.gen_range(-30..=30))
    }

    #[test]
    fn range_zero_is_center() {
        let c = CubeCoord::new(3, -7);
        assert_eq!(hexes_in_range(c, 0, false), vec![c]);
        assert!(hexes_in_range(c, 0, true).is_empty());
    }

    #[test]
    fn range_sizes_and_bounds() {
        let c = CubeCoord::new(-2, 5);
        for n in 0..5 {
            let r = hexes_in_range(c, n, false);
            assert_eq!(r.len(), HexGrid::cell_count(n));
            assert!(r.iter().all(|h| cube_distance(*h, c) <= n));
            let unique: HashSet<_> = r.iter().collect();
            assert_eq!(unique.len(), r.len());
        }
    }

    #[test]
    fn neighbors_are_six_unit_steps() {
        let c = CubeCoord::new(-1, -78);
        let ns = neighbors(c);
        assert_eq!(ns.len(), 6);
        assert!(!ns.contains(&c));
        for n in &ns {
            assert_eq!(cube_distance(*n, c), 1);
            assert_eq!(n.x() + n.y() + n.z(), 0);
        }
    }

    #[test]
    fn range_ignores_grid_edge() {
        // No grid involved: coordinates far from the origin still enumerate.
        let ns = neighbors(CubeCoord::new(1000, -1000));
        assert!(ns.contains(&CubeCoord::new(1001, -1000)));
    }

    #[test]
    fn distance_metric_properties() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let a = random_coord(&mut rng);
            let b = random_coord(&mut rng);
            let c = random_coord(&mut rng);
            assert_eq!(cube_distance(a, a), 0);
            assert_eq!(cube_distance(a, b), cube_distance(b, a));
            assert!(cube_distance(a, c) <= cube_distance(a, b) + cube_distance(b, c));
        }
    }

    #[test]
    fn relative_coordinate_scales_direction() {
        let c = relative_coordinate(CubeCoord::ORIGIN, 2, 5).unwrap();
        assert_eq!(c, CubeCoord::try_from_xyz(-5, 0, 5).unwrap());
        assert!(matches!(
            relative_coordinate(CubeCoord::ORIGIN, 6, 1),
            Err(GridError::InvalidDirection(6))
        ));
    }

    #[test]
    fn cube_round_restores_invariant() {
        assert_eq!(cube_round(0.4, 0.4, -0.8), CubeCoord::new(0, 1));
        assert_eq!(cube_round(1.1, -0.6, -0.5), CubeCoord::new(1, -1));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let x: f64 = rng.gen_range(-10.0..10.0);
            let y: f64 = rng.gen_range(-10.0..10.0);
            let c = cube_round(x, y, -x - y);
            assert_eq!(c.x() + c.y() + c.z(), 0);
            assert!((f64::from(c.x()) - x).abs() <= 1.0);
        }
    }

    #[test]
    fn cube_round_ties_prefer_y_then_z() {
        // x and y residuals tie: y is rebuilt, x keeps its rounded value.
        assert_eq!(cube_round(0.5, 0.5, -1.0), CubeCoord::new(1, 0));
        // y and z tie: z is rebuilt.
        assert_eq!(cube_round(1.0, -0.5, -0.5), CubeCoord::new(1, -1));
        // x and z tie: z is rebuilt.
        assert_eq!(cube_round(-0.5, 1.0, -0.5), CubeCoord::new(-1, 1));
        // strictly largest x residual still wins.
        assert_eq!(cube_round(0.4, 0.3, -0.7), CubeCoord::new(1, 0));
    }

    #[test]
    fn large_range_size_is_exact() {
        let r = hexes_in_range(CubeCoord::ORIGIN, 300, false);
        assert_eq!(r.len(), HexGrid::cell_count(300));
        assert!(r.len() > RANGE_CAPACITY_HINT);
    }

    #[test]
    fn path_to_self_is_single_cell() {
        let c = CubeCoord::new(4, 4);
        assert_eq!(hexes_in_path(c, c), vec![c]);
    }

    #[test]
    fn path_is_contiguous_line() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let a = random_coord(&mut rng);
            let b = random_coord(&mut rng);
            let path = hexes_in_path(a, b);
            assert_eq!(path.len() as u32, cube_distance(a, b) + 1);
            assert_eq!(path.first(), Some(&a));
            assert_eq!(path.last(), Some(&b));
            for w in path.windows(2) {
                assert_eq!(cube_distance(w[0], w[1]), 1);
            }
        }
    }

    #[test]
    fn straight_path_along_axis() {
        let path = hexes_in_path(CubeCoord::ORIGIN, CubeCoord::new(3, -3));
        assert_eq!(
            path,
            vec![
                CubeCoord::ORIGIN,
                CubeCoord::new(1, -1),
                CubeCoord::new(2, -2),
                CubeCoord::new(3, -3)
            ]
        );
    }

    #[test]
    fn intersection_of_ranges() {
        let a = CubeCoord::ORIGIN;
        let b = CubeCoord::new(2, -1);
        let both = hex_range_intersection(a, 1, b, 1);
        assert_eq!(both.len(), 2);
        assert!(
            both.iter()
                .all(|c| cube_distance(*c, a) <= 1 && cube_distance(*c, b) <= 1)
        );
        assert!(hex_range_intersection(a, 1, CubeCoord::new(5, 0), 1).is_empty());
        assert_eq!(hex_range_intersection(a, 2, a, 2).len(), 19);
    }
}
