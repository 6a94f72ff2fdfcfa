// Frame types shared by the capture, align, mask and draw stages.

use crate::error::Error;

/// Screen buffer handed to minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window content is (pixels)
    pub height: usize,     // how tall the window content is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Fill every pixel with one color (used to clear letterbox bars).
    pub fn fill(&mut self, color: u32) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }
}

/// Depth samples in sensor units, one per pixel, row-major.
/// A sample of 0 means "no depth data" for that pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u16>,
}

impl DepthFrame {
    pub fn new(width: usize, height: usize, data: Vec<u16>) -> Result<Self, Error> {
        if data.len() != width * height {
            return Err(Error::InvalidFrame(format!(
                "depth {}x{} needs {} samples, got {}",
                width,
                height,
                width * height,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Sample at (x, y), or None outside the frame.
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }
}

/// Packed color (or any other modality) pixels.
/// Each pixel is `bytes_per_pixel` consecutive bytes; the channel order is opaque here.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFrame {
    pub width: usize,
    pub height: usize,
    pub bytes_per_pixel: usize,
    pub data: Vec<u8>,
}

impl ColorFrame {
    pub fn new(
        width: usize,
        height: usize,
        bytes_per_pixel: usize,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        if data.len() != width * height * bytes_per_pixel {
            return Err(Error::InvalidFrame(format!(
                "color {}x{}x{} needs {} bytes, got {}",
                width,
                height,
                bytes_per_pixel,
                width * height * bytes_per_pixel,
                data.len()
            )));
        }
        Ok(Self { width, height, bytes_per_pixel, data })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Bytes of the pixel at (x, y), or None outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y * self.width + x) * self.bytes_per_pixel;
        self.data.get(start..start + self.bytes_per_pixel)
    }
}

/// Whatever one capture cycle produced. Either modality may be missing.
#[derive(Clone, Debug)]
pub struct FrameSet {
    pub index: u64,
    pub depth: Option<DepthFrame>,
    pub color: Option<ColorFrame>,
}

/// Depth and color with identical width/height, ready for masking.
#[derive(Clone, Debug)]
pub struct AlignedFrameSet {
    pub index: u64,
    pub depth: DepthFrame,
    pub color: ColorFrame,
}
