// Depth visualization for the picture-in-picture view.
// Visual expectation: near surfaces look blue, far ones red, holes black.
// Histogram equalization spreads the colors over the depths actually present,
// so a scene that only spans half a meter still uses the full palette.

use crate::types::{ColorFrame, DepthFrame};

#[derive(Clone, Copy, Debug, Default)]
pub struct Colorizer;

impl Colorizer {
    pub fn new() -> Self {
        Self
    }

    /// Produce an RGB8 frame the same size as `depth`.
    pub fn colorize(&self, depth: &DepthFrame) -> ColorFrame {
        let cdf = cumulative_histogram(&depth.data);
        let valid = cdf[u16::MAX as usize] as f32;

        let mut data = Vec::with_capacity(depth.data.len() * 3);
        for &d in &depth.data {
            if d == 0 || valid == 0.0 {
                data.extend_from_slice(&[0, 0, 0]); // no reading
                continue;
            }
            // Rank of this depth among all valid samples, 0..1
            let t = cdf[d as usize] as f32 / valid;
            data.extend_from_slice(&jet(t));
        }

        ColorFrame {
            width: depth.width,
            height: depth.height,
            bytes_per_pixel: 3,
            data,
        }
    }
}

/// cdf[v] = number of non-zero samples with value <= v.
fn cumulative_histogram(samples: &[u16]) -> Vec<u32> {
    let mut hist = vec![0u32; u16::MAX as usize + 1];
    for &d in samples {
        if d != 0 {
            hist[d as usize] += 1;
        }
    }
    for i in 1..hist.len() {
        hist[i] += hist[i - 1];
    }
    hist
}

/// Classic jet palette: 0 -> dark blue, 0.5 -> green/yellow, 1 -> dark red.
fn jet(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let channel = |center: f32| {
        let v = 1.5 - (4.0 * t - center).abs();
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    };
    [channel(3.0), channel(2.0), channel(1.0)]
}
