use crate::{
    foundation::core::{Rect, Size},
    loader::store::FrameStore,
    render::{
        fit::{FitMode, fit_rect},
        surface::Surface,
    },
};

/// Record of a successful paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DrawnFrame {
    /// Frame the caller asked for (clamped to the frame set).
    pub requested: usize,
    /// Frame actually drawn.
    pub drawn: usize,
    /// Destination rectangle on the surface.
    pub dest: Rect,
}

impl DrawnFrame {
    /// The requested frame was unavailable and a neighbor was drawn instead.
    pub fn is_fallback(&self) -> bool {
        self.requested != self.drawn
    }
}

/// Best loaded frame for `target`: itself, else the nearest loaded frame before it, else
/// the nearest loaded frame after it.
pub fn resolve_frame(store: &FrameStore, target: usize) -> Option<usize> {
    let last = store.len().checked_sub(1)?;
    let target = target.min(last);
    if store.is_loaded(target) {
        return Some(target);
    }
    (0..target)
        .rev()
        .find(|&i| store.is_loaded(i))
        .or_else(|| (target + 1..=last).find(|&i| store.is_loaded(i)))
}

/// Paints frames from a [`FrameStore`] onto the surface it owns.
#[derive(Debug)]
pub struct FrameRenderer<T> {
    surface: T,
    last: Option<DrawnFrame>,
}

impl<T: Surface> FrameRenderer<T> {
    /// Renderer taking ownership of `surface`.
    pub fn new(surface: T) -> Self {
        Self {
            surface,
            last: None,
        }
    }

    /// The surface, read-only.
    pub fn surface(&self) -> &T {
        &self.surface
    }

    /// Give the surface back.
    pub fn into_surface(self) -> T {
        self.surface
    }

    /// Resize the surface. The caller is expected to repaint afterwards.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
    }

    /// Blank the surface and forget the last paint.
    pub fn reset(&mut self) {
        self.surface.clear();
        self.last = None;
    }

    /// Most recent successful paint.
    pub fn last_drawn(&self) -> Option<DrawnFrame> {
        self.last
    }

    /// Paint the best available frame for `target`.
    ///
    /// Returns `None`, leaving the surface untouched, when no frame is loaded, when the
    /// resolved image is not drawable, or when the surface has no area.
    pub fn render(
        &mut self,
        target: usize,
        store: &FrameStore,
        mode: FitMode,
    ) -> Option<DrawnFrame> {
        let drawn = resolve_frame(store, target)?;
        let image = store.image(drawn).filter(|img| img.is_drawable())?;
        let image_size = Size::new(f64::from(image.width), f64::from(image.height));
        let dest = fit_rect(image_size, self.surface.size(), mode)?;

        self.surface.clear();
        self.surface.draw_image(image, dest);

        let frame = DrawnFrame {
            requested: target.min(store.len() - 1),
            drawn,
            dest,
        };
        tracing::trace!(requested = frame.requested, drawn, "painted frame");
        self.last = Some(frame);
        Some(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
