pub(crate) mod decode;
pub(crate) mod source;

use std::sync::Arc;

/// A decoded frame ready for drawing.
#[derive(Clone, Debug)]
pub struct FrameImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Straight-alpha RGBA8, row-major, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

impl FrameImage {
    /// Wrap decoded pixels.
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        }
    }

    /// A single-color frame, handy for hosts that synthesize placeholders.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(n * 4);
        for _ in 0..n {
            data.extend_from_slice(&rgba);
        }
        Self::new(width, height, data)
    }

    /// Non-zero natural size and a pixel buffer that matches it.
    pub fn is_drawable(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.rgba8.len() == (self.width as usize) * (self.height as usize) * 4
    }

    /// Width over height. Only meaningful for drawable frames.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Borrow the pixels as an `image` buffer.
    pub fn view(&self) -> Option<image::ImageBuffer<image::Rgba<u8>, &[u8]>> {
        image::ImageBuffer::from_raw(self.width, self.height, self.rgba8.as_slice())
    }
}
