// Brings depth onto the color image's pixel grid so the masker can walk both
// buffers with one index.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use log::debug;

use crate::types::{AlignedFrameSet, DepthFrame, FrameSet};

pub trait Aligner {
    /// `None` when the set cannot be aligned (a modality is missing); the cycle is skipped.
    fn process(&self, frames: FrameSet) -> Option<AlignedFrameSet>;
}

/// Align depth to the color stream's resolution.
///
/// Depth is resampled with nearest-neighbour: every output sample is a real
/// source sample, never a blend across an object edge.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlignToColor;

impl Aligner for AlignToColor {
    fn process(&self, frames: FrameSet) -> Option<AlignedFrameSet> {
        let (Some(depth), Some(color)) = (frames.depth, frames.color) else {
            debug!("Frame set {} is missing a modality", frames.index);
            return None;
        };

        let depth = if depth.dimensions() == color.dimensions() {
            depth
        } else {
            resample_depth(&depth, color.width, color.height)?
        };

        Some(AlignedFrameSet { index: frames.index, depth, color })
    }
}

/// Nearest-neighbour resize of a depth frame. `None` if the buffer is malformed.
pub fn resample_depth(depth: &DepthFrame, width: usize, height: usize) -> Option<DepthFrame> {
    if width == 0 || height == 0 || depth.width == 0 || depth.height == 0 {
        return DepthFrame::new(width, height, vec![0; width * height]).ok();
    }
    let src: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(depth.width as u32, depth.height as u32, depth.data.clone())?;
    let dst = imageops::resize(&src, width as u32, height as u32, FilterType::Nearest);
    DepthFrame::new(width, height, dst.into_raw()).ok()
}
