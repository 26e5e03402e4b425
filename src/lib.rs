//! Framescroll is a scroll-synchronized frame sequence engine.
//!
//! It plays an ordered set of still frames as a "video" driven by scroll position: the
//! host reports scroll progress and the engine paints the matching frame onto a raster
//! surface, fitted to the viewport.
//!
//! # Pipeline overview
//!
//! 1. **Classify**: viewport width -> [`ScreenCategory`] (which physical frame variant to load)
//! 2. **Load**: [`ProgressiveLoader`] fetches a critical batch, then bounded background chunks,
//!    into a generation-tagged [`FrameStore`]
//! 3. **Map**: scroll progress in `[0, 1]` -> frame index ([`frame_index`])
//! 4. **Paint**: [`RedrawScheduler`] coalesces index changes into one paint per display refresh;
//!    [`FrameRenderer`] draws the nearest loaded frame with cover or contain fitting
//!
//! [`ScrollSequence`] owns all of the above for one page view.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Host-agnostic**: frames come from a [`FrameSource`], pixels go to a [`Surface`], and the
//!   host drives loading futures on its own local executor.
//! - **Stale results never land**: every settlement carries the [`Generation`] of the cycle that
//!   issued it and is dropped once that cycle was superseded.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod frames;
mod loader;
mod render;
mod scroll;
mod sequence;
mod viewport;

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;

pub use assets::FrameImage;
pub use assets::decode::decode_frame;
pub use assets::source::{FrameLoadError, FrameSource, FsFrameSource};
pub use config::{SequenceConfig, TOTAL_FRAMES};
pub use foundation::core::{Rect, ScreenCategory, Size, Viewport};
pub use foundation::error::{FramescrollError, FramescrollResult};
pub use frames::path::{FRAME_INDEX_WIDTH, FramePaths};
pub use loader::progressive::{
    CycleOutcome, CycleReport, LoadCycle, LoadEvent, LoadPhase, LoadPlan, LoadProgress,
    ProgressiveLoader,
};
pub use loader::store::{FrameState, FrameStore, Generation, Settlement, SharedFrameStore};
pub use render::fit::{FitMode, fit_rect};
pub use render::renderer::{DrawnFrame, FrameRenderer, resolve_frame};
pub use render::scheduler::{PaintTicket, RedrawScheduler};
pub use render::surface::{RasterSurface, Surface};
pub use scroll::mapper::{ScrollRegion, frame_index};
pub use sequence::ScrollSequence;
pub use viewport::classifier::{ScreenSize, ScreenSizeClassifier};
