use std::{cell::RefCell, rc::Rc};

use crate::{
    assets::{FrameImage, source::FrameLoadError},
    foundation::core::ScreenCategory,
};

/// Token identifying one loading cycle. Advances on every cycle start and on teardown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Load state of one logical frame.
#[derive(Clone, Debug, Default)]
pub enum FrameState {
    /// No request issued in this cycle.
    #[default]
    NotRequested,
    /// Request issued, not settled yet.
    InFlight,
    /// Decoded and drawable.
    Loaded(FrameImage),
    /// Settled without a usable image. Terminal for the cycle.
    Failed,
}

impl FrameState {
    /// `true` for [`FrameState::Loaded`].
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// `true` once the request has either loaded or failed.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed)
    }
}

/// What [`FrameStore::settle`] did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// The result was recorded for the live cycle.
    Applied {
        /// Whether the frame is now loaded (as opposed to failed).
        loaded: bool,
        /// Settled frames in the live cycle, this one included.
        settled: usize,
    },
    /// The result belongs to a superseded cycle and was discarded.
    Stale,
    /// The frame had already settled in this cycle; nothing changed.
    Duplicate,
}

/// Frame load state for the live cycle, tagged with its [`Generation`].
///
/// Every write takes the generation of the cycle that produced it and is ignored unless
/// that generation is still current.
#[derive(Debug)]
pub struct FrameStore {
    generation: Generation,
    category: Option<ScreenCategory>,
    slots: Vec<FrameState>,
    settled: usize,
    loaded: usize,
    failed: usize,
    ready: bool,
}

/// Store handle shared between a sequence and its in-flight loading cycle.
pub type SharedFrameStore = Rc<RefCell<FrameStore>>;

impl FrameStore {
    /// Empty store for `total_frames` frames with no active cycle.
    pub fn new(total_frames: usize) -> Self {
        Self {
            generation: Generation::default(),
            category: None,
            slots: vec![FrameState::NotRequested; total_frames],
            settled: 0,
            loaded: 0,
            failed: 0,
            ready: false,
        }
    }

    /// [`FrameStore::new`] wrapped for sharing.
    pub fn shared(total_frames: usize) -> SharedFrameStore {
        Rc::new(RefCell::new(Self::new(total_frames)))
    }

    /// Number of logical frames.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` when the frame set is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Generation of the live cycle.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Category of the live cycle, `None` before the first cycle and after teardown.
    pub fn category(&self) -> Option<ScreenCategory> {
        self.category
    }

    /// Whether `generation` is the live cycle.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.category.is_some() && generation == self.generation
    }

    /// Start a new cycle: invalidate the previous generation and forget all frames.
    pub fn begin_cycle(&mut self, category: ScreenCategory) -> Generation {
        self.reset();
        self.category = Some(category);
        self.generation
    }

    /// Tear down the live cycle without starting another one.
    pub fn retire(&mut self) {
        self.reset();
        self.category = None;
    }

    fn reset(&mut self) {
        self.generation = self.generation.next();
        self.slots.fill(FrameState::NotRequested);
        self.settled = 0;
        self.loaded = 0;
        self.failed = 0;
        self.ready = false;
    }

    /// Record that a request for `index` was issued. Returns `false` for stale cycles,
    /// out-of-range indices, and frames already requested.
    pub fn mark_in_flight(&mut self, generation: Generation, index: usize) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        match self.slots.get_mut(index) {
            Some(slot @ FrameState::NotRequested) => {
                *slot = FrameState::InFlight;
                true
            }
            _ => false,
        }
    }

    /// Record the outcome of a request issued by cycle `generation`.
    pub fn settle(
        &mut self,
        generation: Generation,
        index: usize,
        result: Result<FrameImage, FrameLoadError>,
    ) -> Settlement {
        if !self.is_current(generation) {
            tracing::trace!(index, generation = generation.0, "discarding stale frame result");
            return Settlement::Stale;
        }
        let Some(slot) = self.slots.get_mut(index) else {
            return Settlement::Duplicate;
        };
        if slot.is_settled() {
            return Settlement::Duplicate;
        }

        let loaded = match result {
            Ok(image) if image.is_drawable() => {
                *slot = FrameState::Loaded(image);
                self.loaded += 1;
                true
            }
            Ok(_) => {
                tracing::debug!(index, "frame decoded to an unusable image");
                *slot = FrameState::Failed;
                self.failed += 1;
                false
            }
            Err(err) => {
                tracing::debug!(index, error = %err, "frame failed to load");
                *slot = FrameState::Failed;
                self.failed += 1;
                false
            }
        };
        self.settled += 1;
        Settlement::Applied {
            loaded,
            settled: self.settled,
        }
    }

    /// Mark the live cycle interactive. Returns `true` only for the first call per cycle.
    pub fn mark_ready(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) || self.ready {
            return false;
        }
        self.ready = true;
        true
    }

    /// Whether the live cycle finished its critical batch.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// State of frame `index`.
    pub fn state(&self, index: usize) -> Option<&FrameState> {
        self.slots.get(index)
    }

    /// Whether frame `index` is loaded.
    pub fn is_loaded(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(FrameState::is_loaded)
    }

    /// Decoded image of frame `index`, if loaded.
    pub fn image(&self, index: usize) -> Option<&FrameImage> {
        match self.slots.get(index)? {
            FrameState::Loaded(image) => Some(image),
            _ => None,
        }
    }

    /// Settled frames in the live cycle.
    pub fn settled_count(&self) -> usize {
        self.settled
    }

    /// Loaded frames in the live cycle.
    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    /// Failed frames in the live cycle.
    pub fn failed_count(&self) -> usize {
        self.failed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/store.rs"]
mod tests;
