// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the background-removed color stream.
// 2) A small colorized depth view in the bottom-right corner.
// 3) A tiny 5x7 bitmap font to render HUD text on top of the video.

use crate::error::Error;
use crate::session::{ControlKey, KeyAction};
use crate::types::{ColorFrame, FrameBuffer};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the requested size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Pump window events without drawing (used when a cycle produced no frame).
    pub fn poll(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Key transitions since the last `present`.
    /// Presses come without auto-repeat, so holding Up moves the clip plane once.
    pub fn key_events(&self) -> Vec<(ControlKey, KeyAction)> {
        let pressed = self
            .window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .map(|k| (control_key(k), KeyAction::Press));
        let released = self
            .window
            .get_keys_released()
            .into_iter()
            .map(|k| (control_key(k), KeyAction::Release));
        pressed.chain(released).collect()
    }
}

fn control_key(key: Key) -> ControlKey {
    match key {
        Key::Up => ControlKey::Up,
        Key::Down => ControlKey::Down,
        _ => ControlKey::Other,
    }
}

/* ---------- Layout ---------- */

/// Screen rectangle in pixels (floating point so ratios stay exact until we rasterize).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Largest rect with aspect `width:height` that fits inside `self`, centered.
    /// Visual: the frame is letterboxed instead of stretched.
    pub fn adjust_ratio(&self, width: usize, height: usize) -> Rect {
        if width == 0 || height == 0 {
            return *self;
        }
        let mut h = self.h;
        let mut w = self.h * width as f32 / height as f32;
        if w > self.w {
            let scale = self.w / w;
            w *= scale;
            h *= scale;
        }
        Rect {
            x: self.x + (self.w - w) / 2.0,
            y: self.y + (self.h - h) / 2.0,
            w,
            h,
        }
    }
}

/// Where the main stream and the depth thumbnail go inside a `win_w x win_h` window.
/// The thumbnail is a fifth of the window, tucked into the main view's
/// bottom-right corner with a margin of max(w,h)/25.
pub fn layout(
    win_w: usize,
    win_h: usize,
    color_dims: (usize, usize),
    depth_dims: (usize, usize),
) -> (Rect, Rect) {
    let (w, h) = (win_w as f32, win_h as f32);
    let main = Rect::new(0.0, 0.0, w, h).adjust_ratio(color_dims.0, color_dims.1);

    let mut pip = Rect::new(0.0, 0.0, w / 5.0, h / 5.0).adjust_ratio(depth_dims.0, depth_dims.1);
    let margin = w.max(h) / 25.0;
    pip.x = main.x + main.w - pip.w - margin;
    pip.y = main.y + main.h - pip.h - margin;

    (main, pip)
}

/* ---------- Software drawing: frames, pixels, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Scale a packed color frame into `rect` (nearest-neighbour).
/// Frames with 3+ bytes per pixel are read as R,G,B; 1-byte frames as gray.
/// Visual: the frame appears inside the rect; parts outside the window are cut off.
pub fn blit_rgb(fb: &mut FrameBuffer, frame: &ColorFrame, rect: Rect) {
    let bpp = frame.bytes_per_pixel;
    if frame.width == 0 || frame.height == 0 || bpp == 0 || rect.w < 1.0 || rect.h < 1.0 {
        return;
    }

    let x0 = rect.x.round() as i32;
    let y0 = rect.y.round() as i32;
    let dw = rect.w.round() as i32;
    let dh = rect.h.round() as i32;

    for dy in 0..dh {
        let sy = ((dy as f32 + 0.5) * frame.height as f32 / dh as f32) as usize;
        let sy = sy.min(frame.height - 1);
        for dx in 0..dw {
            let sx = ((dx as f32 + 0.5) * frame.width as f32 / dw as f32) as usize;
            let sx = sx.min(frame.width - 1);

            let ofs = (sy * frame.width + sx) * bpp;
            // A frame shorter than its dimensions claim just leaves those pixels undrawn.
            let Some(px) = frame.data.get(ofs..ofs + bpp) else { continue };
            let (r, g, b) = if bpp >= 3 {
                (px[0] as u32, px[1] as u32, px[2] as u32)
            } else {
                (px[0] as u32, px[0] as u32, px[0] as u32)
            };
            put_pixel(fb, x0 + dx, y0 + dy, (r << 16) | (g << 8) | b);
        }
    }
}

/// Draw a 1-pixel rectangle outline.
pub fn draw_frame_outline(fb: &mut FrameBuffer, rect: Rect, color: u32) {
    let x0 = rect.x.round() as i32;
    let y0 = rect.y.round() as i32;
    let x1 = (rect.x + rect.w).round() as i32 - 1;
    let y1 = (rect.y + rect.h).round() as i32 - 1;
    for x in x0..=x1 {
        put_pixel(fb, x, y0, color);
        put_pixel(fb, x, y1, color);
    }
    for y in y0..=y1 {
        put_pixel(fb, x0, y, color);
        put_pixel(fb, x1, y, color);
    }
}

/* ---------- 5x7 bitmap font (ASCII subset for "CLIP: 1.300 M | FPS: 30.0 | UP/DOWN") ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx as i32 + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs (unknown characters leave a gap).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
