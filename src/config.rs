//! Command-line options.

use std::path::PathBuf;

use clap::Parser;

use crate::clipping::{CLIP_DEFAULT, CLIP_MAX, CLIP_MIN, ClippingDistance};
use crate::error::Error;

/// Playback rates outside this range are rejected.
pub const MIN_FPS: f32 = 0.1;
pub const MAX_FPS: f32 = 1000.0;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "depth-clip",
    version,
    about = "Play back a depth recording with everything beyond a clipping distance removed"
)]
pub struct Args {
    /// Recording directory (device.json + NNNN_color.png / NNNN_depth.png pairs)
    pub recording: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: usize,

    /// Initial clipping distance in meters (Up/Down adjust it at runtime)
    #[arg(long, default_value_t = CLIP_DEFAULT)]
    pub clip: f32,

    /// Playback rate in frames per second
    #[arg(long, default_value_t = 30.0)]
    pub fps: f32,

    /// Restart the recording when it ends
    #[arg(long = "loop")]
    pub looping: bool,
}

impl Args {
    /// Reject values the viewer cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.clip.is_finite() {
            return Err(Error::Config(format!("--clip must be a number, got {}", self.clip)));
        }
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(Error::Config(format!(
                "--fps must be within [{MIN_FPS}, {MAX_FPS}], got {}",
                self.fps
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config("window size must be non-zero".into()));
        }
        Ok(())
    }

    /// Starting clipping distance, clamped into [0, 6] meters.
    pub fn clipping(&self) -> ClippingDistance {
        if !(CLIP_MIN..=CLIP_MAX).contains(&self.clip) {
            log::warn!(
                "--clip {} is outside [{CLIP_MIN}, {CLIP_MAX}], clamping",
                self.clip
            );
        }
        ClippingDistance::new(self.clip)
    }
}
