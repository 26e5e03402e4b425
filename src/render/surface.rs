use std::path::Path;

use anyhow::Context as _;
use image::{RgbaImage, imageops};

use crate::{
    assets::FrameImage,
    foundation::{
        core::{Rect, Size},
        error::FramescrollResult,
    },
};

/// Drawable target owned by the frame renderer.
pub trait Surface {
    /// Pixel dimensions `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Change pixel dimensions. Contents after a resize are unspecified until the next paint.
    fn resize(&mut self, width: u32, height: u32);

    /// Reset every pixel to the background.
    fn clear(&mut self);

    /// Draw `image` scaled into `dest`; parts outside the surface are cropped.
    fn draw_image(&mut self, image: &FrameImage, dest: Rect);

    /// Dimensions as a `kurbo` size.
    fn size(&self) -> Size {
        let (w, h) = self.dimensions();
        Size::new(f64::from(w), f64::from(h))
    }
}

/// CPU raster surface backed by an RGBA8 image.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    pixels: RgbaImage,
    clear_rgba: [u8; 4],
}

impl RasterSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_clear(width, height, [0, 0, 0, 0])
    }

    /// Surface cleared to `clear_rgba`.
    pub fn with_clear(width: u32, height: u32, clear_rgba: [u8; 4]) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, image::Rgba(clear_rgba)),
            clear_rgba,
        }
    }

    /// Current pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Write the surface as a PNG.
    pub fn save_png(&self, path: &Path) -> FramescrollResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.pixels
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

impl Surface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.pixels.dimensions() == (width, height) {
            return;
        }
        self.pixels = RgbaImage::from_pixel(width, height, image::Rgba(self.clear_rgba));
    }

    fn clear(&mut self) {
        let bg = image::Rgba(self.clear_rgba);
        for px in self.pixels.pixels_mut() {
            *px = bg;
        }
    }

    fn draw_image(&mut self, image: &FrameImage, dest: Rect) {
        let Some(src) = image.view() else {
            return;
        };
        let Some(region) = visible_region(image, dest, self.size()) else {
            return;
        };

        // Only the part of the frame that lands on the surface is scaled.
        let part = imageops::crop_imm(
            &src,
            region.src_x,
            region.src_y,
            region.src_w,
            region.src_h,
        );
        let scaled = imageops::resize(
            &*part,
            region.out_w,
            region.out_h,
            imageops::FilterType::Triangle,
        );
        imageops::overlay(&mut self.pixels, &scaled, region.out_x, region.out_y);
    }
}

/// Source pixels to sample and where their scaled copy goes on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisibleRegion {
    src_x: u32,
    src_y: u32,
    src_w: u32,
    src_h: u32,
    out_x: i64,
    out_y: i64,
    out_w: u32,
    out_h: u32,
}

fn visible_region(image: &FrameImage, dest: Rect, surface: Size) -> Option<VisibleRegion> {
    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    if !dest.is_finite() {
        return None;
    }
    if !(dest.width().round() >= 1.0 && dest.height().round() >= 1.0) || iw < 1.0 || ih < 1.0 {
        return None;
    }

    let clip = dest.intersect(Rect::from_origin_size((0.0, 0.0), surface));
    let (x0, y0) = (clip.x0.round(), clip.y0.round());
    let (x1, y1) = (clip.x1.round(), clip.y1.round());
    if x1 - x0 < 1.0 || y1 - y0 < 1.0 {
        return None;
    }

    // Surface pixel span -> source pixel span, widened to whole source pixels.
    let sx = iw / dest.width();
    let sy = ih / dest.height();
    let src_x0 = ((x0 - dest.x0) * sx).floor().clamp(0.0, iw - 1.0);
    let src_y0 = ((y0 - dest.y0) * sy).floor().clamp(0.0, ih - 1.0);
    let src_x1 = ((x1 - dest.x0) * sx).ceil().clamp(src_x0 + 1.0, iw);
    let src_y1 = ((y1 - dest.y0) * sy).ceil().clamp(src_y0 + 1.0, ih);

    Some(VisibleRegion {
        src_x: src_x0 as u32,
        src_y: src_y0 as u32,
        src_w: (src_x1 - src_x0) as u32,
        src_h: (src_y1 - src_y0) as u32,
        out_x: x0 as i64,
        out_y: y0 as i64,
        out_w: (x1 - x0) as u32,
        out_h: (y1 - y0) as u32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
