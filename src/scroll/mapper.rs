/// Map normalized scroll progress to a frame index in `0..total_frames`.
///
/// `round(progress * (total_frames - 1))`, clamped. Non-finite progress maps to frame 0.
pub fn frame_index(progress: f64, total_frames: usize) -> usize {
    let last = total_frames.saturating_sub(1);
    if !progress.is_finite() || progress <= 0.0 {
        return 0;
    }
    let idx = (progress * last as f64).round();
    if idx >= last as f64 {
        last
    } else {
        idx as usize
    }
}

/// The dedicated scroll region that drives the sequence.
///
/// The region is `height_multiple` viewports tall and pinned content stays on screen while
/// it scrolls, so progress runs from the region's top edge reaching the viewport top to its
/// bottom edge reaching the viewport bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRegion {
    /// Region height in viewport heights.
    pub height_multiple: f64,
}

impl ScrollRegion {
    /// Region `height_multiple` viewports tall.
    pub fn new(height_multiple: f64) -> Self {
        Self { height_multiple }
    }

    /// Region height in pixels for a viewport height.
    pub fn height_px(self, viewport_height: f64) -> f64 {
        viewport_height * self.height_multiple
    }

    /// Scroll progress in `[0, 1]` for a scroll offset measured from the region's top.
    pub fn progress(self, offset_px: f64, viewport_height: f64) -> f64 {
        let scrollable = self.height_px(viewport_height) - viewport_height;
        if !offset_px.is_finite() || !scrollable.is_finite() || scrollable <= 0.0 {
            return 0.0;
        }
        (offset_px / scrollable).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/mapper.rs"]
mod tests;
