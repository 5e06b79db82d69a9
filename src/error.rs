use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("marker {id}: expected 4 corners, got {count}")]
    CornerCount { id: u32, count: usize },

    #[error("marker {id}: corner coordinate is not finite")]
    NonFiniteCorner { id: u32 },

    #[error("marker {id}: corners are not in clockwise order")]
    CounterClockwise { id: u32 },

    #[error("Config IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Parse Error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Marker Source Error: {0}")]
    Source(String),
}
