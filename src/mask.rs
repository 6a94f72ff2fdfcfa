// Background removal: paint over every color pixel whose depth is missing
// or farther than the clipping distance.
// Visual expectation: only things closer than the clipping distance stay visible;
// everything else turns flat grey.
use crate::error::Error;
use crate::types::{ColorFrame, DepthFrame};

/// Byte written into every channel of a removed pixel (flat grey for RGB8).
pub const BACKGROUND_FILL: u8 = 0x99;

/// How many pixels one call painted over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaskStats {
    pub masked: usize,
    pub total: usize,
}

impl MaskStats {
    /// Share of the frame that was removed, 0.0 for an empty frame.
    pub fn masked_fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.masked as f32 / self.total as f32
    }
}

/// True when a pixel at `distance` meters counts as background.
/// No reading (distance <= 0) is background regardless of the clipping distance.
#[inline]
pub fn is_background(distance: f32, clipping_distance: f32) -> bool {
    distance <= 0.0 || distance > clipping_distance
}

/// Overwrite background pixels of `color` in place.
///
/// `depth` must already be aligned to `color` (same width and height); a mismatch
/// is rejected before any byte is touched. The depth buffer is only read, so
/// calling this twice with the same parameters changes nothing the second time.
pub fn remove_background(
    color: &mut ColorFrame,
    depth: &DepthFrame,
    depth_scale: f32,
    clipping_distance: f32,
) -> Result<MaskStats, Error> {
    // 1) Frames must line up pixel for pixel, else we would mask the wrong spots.
    if color.width != depth.width || color.height != depth.height {
        return Err(Error::DimensionMismatch {
            color: color.dimensions(),
            depth: depth.dimensions(),
        });
    }

    let total = color.width * color.height;
    let bpp = color.bytes_per_pixel;
    if total == 0 || bpp == 0 {
        return Ok(MaskStats { masked: 0, total });
    }

    // 2) One walk over the flattened frame; each depth sample owns `bpp` color bytes.
    let mut masked = 0;
    for (pixel, &sample) in color
        .data
        .chunks_exact_mut(bpp)
        .zip(depth.data.iter())
        .take(total)
    {
        let distance = depth_scale * sample as f32;
        if is_background(distance, clipping_distance) {
            pixel.fill(BACKGROUND_FILL);
            masked += 1;
        }
    }

    Ok(MaskStats { masked, total })
}
