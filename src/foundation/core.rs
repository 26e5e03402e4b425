pub use kurbo::{Rect, Size};

/// Which physical frame variant the viewport calls for.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScreenCategory {
    /// Desktop-sized viewport: standard-resolution frames, contain fitting.
    #[default]
    Large,
    /// Viewport at or below the small-screen breakpoint: optimized frames, cover fitting.
    Small,
}

impl ScreenCategory {
    /// Classify a logical pixel width against the small-screen breakpoint (inclusive).
    pub fn from_width(width: u32, small_max_width: u32) -> Self {
        if width <= small_max_width {
            Self::Small
        } else {
            Self::Large
        }
    }

    /// `true` for [`ScreenCategory::Small`].
    pub fn is_small(self) -> bool {
        matches!(self, Self::Small)
    }
}

/// Viewport dimensions in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Build a viewport.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions as a `kurbo` size.
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
