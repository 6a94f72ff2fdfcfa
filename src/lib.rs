//! Depth-based background removal for recorded depth camera sessions.
//!
//! Frames flow source -> aligner -> masker -> colorizer/window; see `main.rs`
//! for the loop that wires them together.

pub mod align;
pub mod clipping;
pub mod colorize;
pub mod config;
pub mod device;
pub mod draw;
pub mod error;
pub mod mask;
pub mod session;
pub mod source;
pub mod types;

pub use error::Error;
pub use mask::{BACKGROUND_FILL, remove_background};
pub use session::Session;
