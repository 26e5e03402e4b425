use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context as _;

use crate::foundation::error::{FramescrollError, FramescrollResult};

/// Number of logical frames in the product reveal.
pub const TOTAL_FRAMES: usize = 142;

/// Static configuration for one scroll-bound frame sequence.
///
/// Every field has a default matching the shipped site, so an empty JSON object is a
/// valid configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
    /// Logical frame count, indices `0..total_frames`.
    pub total_frames: usize,
    /// Path prefix of the standard-resolution frame set.
    pub standard_prefix: String,
    /// Path prefix of the small-screen frame set.
    pub small_screen_prefix: String,
    /// File extension (including the dot) shared by both sets.
    pub extension: String,
    /// Frames loaded before the sequence becomes interactive.
    pub initial_batch: usize,
    /// Frames loaded concurrently per background chunk.
    pub chunk_size: usize,
    /// Background progress is reported every `progress_every` settlements.
    pub progress_every: usize,
    /// Widths at or below this are small screens.
    pub small_screen_max_width: u32,
    /// Widths at or below this are mobile (layout only).
    pub mobile_max_width: u32,
    /// Quiet period before a viewport width change is applied.
    pub resize_debounce_ms: u64,
    /// Height of the scroll region in viewport heights.
    pub scroll_height_multiple: f64,
    /// Width assumed before the first viewport measurement.
    pub default_viewport_width: u32,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            total_frames: TOTAL_FRAMES,
            standard_prefix: "/images/aceh-gayo/frame_".to_string(),
            small_screen_prefix: "/images/px-aceh-gayo/frame_".to_string(),
            extension: ".webp".to_string(),
            initial_batch: 30,
            chunk_size: 20,
            progress_every: 5,
            small_screen_max_width: 768,
            mobile_max_width: 480,
            resize_debounce_ms: 150,
            scroll_height_multiple: 5.0,
            default_viewport_width: 1440,
        }
    }
}

impl SequenceConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_json_file(path: &Path) -> FramescrollResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open config '{}'", path.display()))
            .map_err(|e| FramescrollError::config(format!("{e:#}")))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| FramescrollError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json_str(s: &str) -> FramescrollResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FramescrollError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> FramescrollResult<()> {
        if self.total_frames == 0 {
            return Err(FramescrollError::validation("total_frames must be > 0"));
        }
        if self.initial_batch == 0 {
            return Err(FramescrollError::validation("initial_batch must be > 0"));
        }
        if self.chunk_size == 0 {
            return Err(FramescrollError::validation("chunk_size must be > 0"));
        }
        if self.progress_every == 0 {
            return Err(FramescrollError::validation("progress_every must be > 0"));
        }
        if self.standard_prefix == self.small_screen_prefix {
            return Err(FramescrollError::validation(
                "standard_prefix and small_screen_prefix must differ",
            ));
        }
        if self.extension.is_empty() || !self.extension.starts_with('.') {
            return Err(FramescrollError::validation(
                "extension must be non-empty and start with '.'",
            ));
        }
        if self.mobile_max_width > self.small_screen_max_width {
            return Err(FramescrollError::validation(
                "mobile_max_width must be <= small_screen_max_width",
            ));
        }
        if !self.scroll_height_multiple.is_finite() || self.scroll_height_multiple <= 1.0 {
            return Err(FramescrollError::validation(
                "scroll_height_multiple must be finite and > 1",
            ));
        }
        Ok(())
    }

    /// Frames in the critical batch, never more than the frame set.
    pub fn critical_batch_len(&self) -> usize {
        self.initial_batch.min(self.total_frames)
    }

    /// Debounce quiet period.
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
