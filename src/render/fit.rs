use crate::foundation::core::{Rect, ScreenCategory, Size};

/// How a frame is scaled into the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Fill the surface, cropping overflow.
    Cover,
    /// Show the whole frame, letterboxing the rest.
    Contain,
}

impl FitMode {
    /// Cover on small screens, contain on large ones.
    pub fn for_category(category: ScreenCategory) -> Self {
        match category {
            ScreenCategory::Small => Self::Cover,
            ScreenCategory::Large => Self::Contain,
        }
    }
}

/// Destination rectangle for drawing `image` into `canvas`, centered.
///
/// The axis that would overflow (cover) or fall short (contain) is pinned to the canvas and
/// the other follows from the image's aspect ratio. `None` for degenerate sizes.
pub fn fit_rect(image: Size, canvas: Size, mode: FitMode) -> Option<Rect> {
    let usable = |s: Size| {
        s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0
    };
    if !usable(image) || !usable(canvas) {
        return None;
    }

    let image_ratio = image.width / image.height;
    let canvas_ratio = canvas.width / canvas.height;
    let canvas_wider = canvas_ratio > image_ratio;

    let fit_width = match mode {
        FitMode::Cover => canvas_wider,
        FitMode::Contain => !canvas_wider,
    };
    let (w, h) = if fit_width {
        (canvas.width, canvas.width / image_ratio)
    } else {
        (canvas.height * image_ratio, canvas.height)
    };

    let x = (canvas.width - w) / 2.0;
    let y = (canvas.height - h) / 2.0;
    Some(Rect::new(x, y, x + w, y + h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
