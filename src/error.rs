// One error type for the whole viewer.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the screen buffer failed

    #[error("Device does not have a depth sensor")]
    NoDepthSensor,

    #[error("Frame dimension mismatch: color {color:?} vs depth {depth:?}")]
    DimensionMismatch {
        color: (usize, usize),
        depth: (usize, usize),
    },

    #[error("Invalid frame: {0}")]
    InvalidFrame(String), // Buffer length does not match width/height

    #[error("Recording error: {0}")]
    Recording(String), // Recording directory is empty or malformed

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Device description error: {0}")]
    DeviceDescription(#[from] serde_json::Error),

    #[error("Invalid option: {0}")]
    Config(String),
}
