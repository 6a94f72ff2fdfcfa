// Plays back a recorded depth camera session from disk.
// Visual expectation: when main.rs calls `wait_for_frames()`, you get the next
// depth + color pair, paced to the recording's frame rate.
//
// Recording layout:
//   device.json          -> which sensors the device had (see device.rs)
//   0000_color.png       -> 8-bit color frame
//   0000_depth.png       -> 16-bit grayscale depth frame (sensor units)
//   0001_color.png ...

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use image::DynamicImage;
use log::{debug, info, warn};

use crate::device::Device;
use crate::error::Error;
use crate::types::{ColorFrame, DepthFrame, FrameSet};

pub const DEVICE_FILE: &str = "device.json";
const COLOR_SUFFIX: &str = "_color.png";
const DEPTH_SUFFIX: &str = "_depth.png";

/// Anything that can hand out synchronized depth/color pairs.
pub trait FrameSource {
    fn device(&self) -> &Device;

    /// Block until the next frame set is ready.
    /// `None` means this cycle produced nothing usable; the caller just moves on.
    fn wait_for_frames(&mut self) -> Option<FrameSet>;

    /// True once the source will never produce another frame.
    fn is_finished(&self) -> bool {
        false
    }
}

/// One recorded capture cycle on disk.
#[derive(Clone, Debug)]
struct RecordedPair {
    color: PathBuf,
    depth: PathBuf,
}

pub struct RecordedPipeline {
    device: Device,
    pairs: Vec<RecordedPair>,
    cursor: usize,
    looping: bool,
    frame_interval: Option<Duration>,
    next_due: Option<Instant>,
    frames_served: u64,
}

impl RecordedPipeline {
    /// Open a recording directory. Nothing is decoded yet; frames load lazily per cycle.
    pub fn open(dir: &Path, looping: bool) -> Result<Self, Error> {
        // 1) The device description decides which sensors (and depth scale) we have.
        let device_path = dir.join(DEVICE_FILE);
        let text = fs::read_to_string(&device_path).map_err(|e| {
            Error::Recording(format!("read {}: {e}", device_path.display()))
        })?;
        let device = Device::from_json(&text).map_err(|e| {
            Error::Recording(format!("parse {}: {e}", device_path.display()))
        })?;

        // 2) Collect frame stems from both modalities so a lost file still counts as a cycle.
        let mut stems = BTreeSet::new();
        for entry in fs::read_dir(dir)? {
            let name = entry?.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stem) = name
                .strip_suffix(COLOR_SUFFIX)
                .or_else(|| name.strip_suffix(DEPTH_SUFFIX))
            {
                stems.insert(stem.to_string());
            }
        }
        if stems.is_empty() {
            return Err(Error::Recording(format!(
                "no *{COLOR_SUFFIX} / *{DEPTH_SUFFIX} frames in {}",
                dir.display()
            )));
        }

        let pairs: Vec<RecordedPair> = stems
            .into_iter()
            .map(|stem| RecordedPair {
                color: dir.join(format!("{stem}{COLOR_SUFFIX}")),
                depth: dir.join(format!("{stem}{DEPTH_SUFFIX}")),
            })
            .collect();

        info!(
            "Opened recording {} ({} frames, device '{}')",
            dir.display(),
            pairs.len(),
            device.name
        );

        Ok(Self {
            device,
            pairs,
            cursor: 0,
            looping,
            frame_interval: None,
            next_due: None,
            frames_served: 0,
        })
    }

    /// Pace playback to `fps` frames per second. Without this, frames come as fast as they decode.
    /// Fails when `fps` is not positive or its frame interval does not fit a `Duration`.
    pub fn paced(mut self, fps: f32) -> Result<Self, Error> {
        if !(fps > 0.0 && fps.is_finite()) {
            return Err(Error::Config(format!("frame rate must be positive, got {fps}")));
        }
        let interval = Duration::try_from_secs_f32(1.0 / fps)
            .map_err(|e| Error::Config(format!("frame rate {fps}: {e}")))?;
        self.frame_interval = Some(interval);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn wait_for_slot(&mut self) {
        let Some(interval) = self.frame_interval else { return };
        let now = Instant::now();
        if let Some(due) = self.next_due {
            if due > now {
                thread::sleep(due - now);
            }
        }
        self.next_due = Some(Instant::now() + interval);
    }
}

impl FrameSource for RecordedPipeline {
    fn device(&self) -> &Device {
        &self.device
    }

    fn wait_for_frames(&mut self) -> Option<FrameSet> {
        if self.cursor >= self.pairs.len() {
            if !self.looping {
                return None;
            }
            debug!("Recording wrapped around");
            self.cursor = 0;
        }

        self.wait_for_slot();

        let pair = self.pairs[self.cursor].clone();
        self.cursor += 1;
        let index = self.frames_served;
        self.frames_served += 1;

        // Each modality decodes independently; a broken file only drops that modality.
        let color = load_color(&pair.color)
            .map_err(|e| warn!("Skipping color {}: {e}", pair.color.display()))
            .ok();
        let depth = load_depth(&pair.depth)
            .map_err(|e| warn!("Skipping depth {}: {e}", pair.depth.display()))
            .ok();

        if color.is_none() && depth.is_none() {
            return None;
        }
        Some(FrameSet { index, depth, color })
    }

    fn is_finished(&self) -> bool {
        !self.looping && self.cursor >= self.pairs.len()
    }
}

/// Decode any 8-bit image into packed RGB8.
pub fn load_color(path: &Path) -> Result<ColorFrame, Error> {
    let rgb = image::open(path)?.to_rgb8();
    let (w, h) = rgb.dimensions();
    ColorFrame::new(w as usize, h as usize, 3, rgb.into_raw())
}

/// Decode a 16-bit grayscale image into raw depth units.
pub fn load_depth(path: &Path) -> Result<DepthFrame, Error> {
    match image::open(path)? {
        DynamicImage::ImageLuma16(buf) => {
            let (w, h) = buf.dimensions();
            DepthFrame::new(w as usize, h as usize, buf.into_raw())
        }
        other => Err(Error::InvalidFrame(format!(
            "{} is {:?}, depth needs 16-bit grayscale",
            path.display(),
            other.color()
        ))),
    }
}
