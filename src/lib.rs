pub mod config;
pub mod coords;
pub mod error;
pub mod flood;
pub mod grid;
pub mod property;
pub mod query;
pub mod render;
pub mod settlement;
pub mod snapshot;
pub mod terrain;

// Re-exports for convenience in tests and integration users.
pub use config::MapConfig;
pub use coords::{CubeCoord, Direction};
pub use error::{GridError, Result};
pub use flood::{OBSTACLE_KEY, flood_fill, is_obstacle, reachable};
pub use grid::{CellUpdate, HexGrid};
pub use property::{PropertyBag, PropertyValue, bag};
pub use query::{
    cube_distance, cube_round, hex_range_intersection, hexes_in_path, hexes_in_range, lerp,
    neighbors, relative_coordinate,
};
pub use render::{
    Orientation, Point2, RenderConfig, draw_grid, draw_line, hex_corner, hex_to_pixel,
    render_to_png,
};
pub use settlement::{
    CastleKind, CastleSize, Inhabitants, Ruin, SETTLEMENT_KEY, Settlement, castle_from_rolls,
    populate_settlements, settlement_type,
};
pub use snapshot::{
    Snapshot, coord_key, from_json, from_snapshot, parse_coord_key, to_json, to_snapshot,
};
pub use terrain::{TERRAIN_KEY, Terrain, TerrainGenerator, next_terrain};
