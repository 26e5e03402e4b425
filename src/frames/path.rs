use crate::{config::SequenceConfig, foundation::core::ScreenCategory};

/// Zero-padded width of the index part of a frame path.
pub const FRAME_INDEX_WIDTH: usize = 4;

/// Deterministic mapping from `(index, variant)` to an asset path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePaths {
    standard_prefix: String,
    small_screen_prefix: String,
    extension: String,
}

impl FramePaths {
    /// Build a resolver from explicit prefixes and extension.
    pub fn new(
        standard_prefix: impl Into<String>,
        small_screen_prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            standard_prefix: standard_prefix.into(),
            small_screen_prefix: small_screen_prefix.into(),
            extension: extension.into(),
        }
    }

    /// Build a resolver from a sequence configuration.
    pub fn from_config(cfg: &SequenceConfig) -> Self {
        Self::new(
            cfg.standard_prefix.clone(),
            cfg.small_screen_prefix.clone(),
            cfg.extension.clone(),
        )
    }

    /// Path of frame `index` in the standard or small-screen set.
    ///
    /// Range checking is the caller's job; any index formats without panicking.
    pub fn path(&self, index: usize, small_screen: bool) -> String {
        let prefix = if small_screen {
            &self.small_screen_prefix
        } else {
            &self.standard_prefix
        };
        format!(
            "{prefix}{index:0width$}{ext}",
            width = FRAME_INDEX_WIDTH,
            ext = self.extension
        )
    }

    /// Path of frame `index` in the set used by `category`.
    pub fn path_for(&self, index: usize, category: ScreenCategory) -> String {
        self.path(index, category.is_small())
    }
}

impl Default for FramePaths {
    fn default() -> Self {
        Self::from_config(&SequenceConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/path.rs"]
mod tests;
