use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid direction index: {0} (expected 0..=5)")]
    InvalidDirection(usize),
    #[error("Invalid direction label: {0}")]
    InvalidDirectionLabel(String),
    #[error("Invalid orientation: {0} (choose either 'flat' or 'pointy')")]
    InvalidOrientation(String),
    #[error("Invalid hex size: {0}")]
    InvalidHexSize(f64),
    #[error("Grid radius too large: {0}")]
    RadiusTooLarge(u32),
    #[error("Invalid coordinate key: {0}")]
    InvalidCoordKey(String),
    #[error("Invalid terrain type: {0}")]
    UnknownTerrain(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, GridError>;
