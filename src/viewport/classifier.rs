use std::time::{Duration, Instant};

use crate::{config::SequenceConfig, foundation::core::ScreenCategory};

/// Classified viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Last applied width in logical pixels.
    pub width: u32,
    /// Frame-set category for `width`.
    pub category: ScreenCategory,
    /// Width is at or below the mobile breakpoint. Layout-only.
    pub is_mobile: bool,
}

#[derive(Clone, Copy, Debug)]
struct PendingWidth {
    width: u32,
    deadline: Instant,
}

type Subscriber = Box<dyn FnMut(ScreenSize)>;

/// Debounced viewport-width classifier.
///
/// Starts in the large-screen category until the first measurement, so a desktop visitor
/// never fetches the small-screen set first. Subscribers hear about category transitions
/// only, once per transition.
pub struct ScreenSizeClassifier {
    small_max_width: u32,
    mobile_max_width: u32,
    debounce: Duration,
    current: ScreenSize,
    pending: Option<PendingWidth>,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for ScreenSizeClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenSizeClassifier")
            .field("current", &self.current)
            .field("pending", &self.pending)
            .field("debounce", &self.debounce)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ScreenSizeClassifier {
    /// Classifier seeded with the configured pre-mount width.
    pub fn new(cfg: &SequenceConfig) -> Self {
        let width = cfg.default_viewport_width;
        Self {
            small_max_width: cfg.small_screen_max_width,
            mobile_max_width: cfg.mobile_max_width,
            debounce: cfg.resize_debounce(),
            current: ScreenSize {
                width,
                category: ScreenCategory::from_width(width, cfg.small_screen_max_width),
                is_mobile: width <= cfg.mobile_max_width,
            },
            pending: None,
            subscribers: Vec::new(),
        }
    }

    /// Current classification.
    pub fn current(&self) -> ScreenSize {
        self.current
    }

    /// Current frame-set category.
    pub fn category(&self) -> ScreenCategory {
        self.current.category
    }

    /// Register a callback invoked on every category transition.
    pub fn subscribe(&mut self, f: impl FnMut(ScreenSize) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    /// Apply a width immediately, dropping any pending debounced width.
    ///
    /// Returns the new classification when the category changed.
    pub fn measure(&mut self, width: u32) -> Option<ScreenSize> {
        self.pending = None;
        self.apply(width)
    }

    /// Record a width from a resize event; it is applied by [`Self::poll`] once no
    /// further width arrives for the debounce period.
    pub fn observe(&mut self, width: u32, now: Instant) {
        self.pending = Some(PendingWidth {
            width,
            deadline: now + self.debounce,
        });
    }

    /// Apply the pending width if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<ScreenSize> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;
        self.apply(pending.width)
    }

    /// When the pending width becomes due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    fn apply(&mut self, width: u32) -> Option<ScreenSize> {
        let next = ScreenSize {
            width,
            category: ScreenCategory::from_width(width, self.small_max_width),
            is_mobile: width <= self.mobile_max_width,
        };
        let changed = next.category != self.current.category;
        self.current = next;
        if !changed {
            return None;
        }

        tracing::debug!(width, category = ?next.category, "screen category changed");
        for sub in &mut self.subscribers {
            sub(next);
        }
        Some(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/classifier.rs"]
mod tests;
