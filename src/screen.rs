//! Display sink.
//!
//! The PPU draws through the [`Screen`] trait so the core stays free of
//! windowing concerns. [`FrameBuffer`] collects pixels in memory for
//! frontends and tests; [`NullScreen`] discards them for callers that only
//! need timing.

pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub trait Screen {
    /// Store one pixel. Coordinates are always within the visible area.
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb);

    /// Reset the display to all-white, as on power-up.
    fn clear(&mut self);

    /// Called once per frame at the start of VBlank, when the visible
    /// area holds a complete picture.
    fn present(&mut self) {}
}

/// An in-memory 160x144 frame, row-major.
pub struct FrameBuffer {
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb::new(0xFF, 0xFF, 0xFF); SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * SCREEN_WIDTH + x]
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }
}

impl Screen for FrameBuffer {
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        self.pixels[y * SCREEN_WIDTH + x] = color;
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgb::new(0xFF, 0xFF, 0xFF));
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Discards all output. Useful when only CPU and timer behavior matter.
pub struct NullScreen;

impl Screen for NullScreen {
    fn set_pixel(&mut self, _x: usize, _y: usize, _color: Rgb) {}

    fn clear(&mut self) {}
}
