use std::{cell::Ref, time::Instant};

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    assets::source::FrameSource,
    config::SequenceConfig,
    foundation::{
        core::{ScreenCategory, Viewport},
        error::FramescrollResult,
    },
    frames::path::FramePaths,
    loader::{
        progressive::{LoadCycle, LoadEvent, LoadPlan, LoadProgress, ProgressiveLoader},
        store::{FrameStore, SharedFrameStore},
    },
    render::{
        fit::FitMode,
        renderer::{DrawnFrame, FrameRenderer, resolve_frame},
        scheduler::RedrawScheduler,
        surface::Surface,
    },
    scroll::mapper::{ScrollRegion, frame_index},
    viewport::classifier::{ScreenSize, ScreenSizeClassifier},
};

type ProgressListener = Box<dyn FnMut(f64)>;

/// One scroll-bound frame animation for one page view.
///
/// Owns the classifier, loader, frame store, renderer and redraw scheduler, and applies the
/// transition rules between them:
///
/// - category change: start a new loading cycle
/// - frame index change: schedule a paint
/// - viewport resize: resize the surface and repaint the current frame
/// - critical batch settled: paint the latest target
///
/// The host feeds it scroll progress, viewport sizes and display refreshes, and drives the
/// [`LoadCycle`] futures it returns on a local executor.
pub struct ScrollSequence<S, T> {
    config: SequenceConfig,
    classifier: ScreenSizeClassifier,
    region: ScrollRegion,
    loader: ProgressiveLoader<S>,
    store: SharedFrameStore,
    renderer: FrameRenderer<T>,
    scheduler: RedrawScheduler,
    events_tx: UnboundedSender<LoadEvent>,
    events_rx: UnboundedReceiver<LoadEvent>,
    viewport: Option<Viewport>,
    progress: f64,
    target: usize,
    load_progress: Option<LoadProgress>,
    progress_listener: Option<ProgressListener>,
}

impl<S, T> std::fmt::Debug for ScrollSequence<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSequence")
            .field("screen", &self.classifier.current())
            .field("viewport", &self.viewport)
            .field("progress", &self.progress)
            .field("current_frame", &self.scheduler.current())
            .field("load_progress", &self.load_progress)
            .finish_non_exhaustive()
    }
}

impl<S: FrameSource + 'static, T: Surface> ScrollSequence<S, T> {
    /// Build an unmounted sequence.
    pub fn new(config: SequenceConfig, source: S, surface: T) -> FramescrollResult<Self> {
        config.validate()?;
        let (events_tx, events_rx) = mpsc::unbounded();
        Ok(Self {
            classifier: ScreenSizeClassifier::new(&config),
            region: ScrollRegion::new(config.scroll_height_multiple),
            loader: ProgressiveLoader::new(
                source,
                FramePaths::from_config(&config),
                LoadPlan::from_config(&config),
            ),
            store: FrameStore::shared(config.total_frames),
            renderer: FrameRenderer::new(surface),
            scheduler: RedrawScheduler::new(),
            events_tx,
            events_rx,
            viewport: None,
            progress: 0.0,
            target: 0,
            load_progress: None,
            progress_listener: None,
            config,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Current viewport classification.
    pub fn screen(&self) -> ScreenSize {
        self.classifier.current()
    }

    /// The classifier, e.g. to subscribe layout code to category changes.
    pub fn classifier_mut(&mut self) -> &mut ScreenSizeClassifier {
        &mut self.classifier
    }

    /// Frame load state of the live cycle.
    pub fn store(&self) -> Ref<'_, FrameStore> {
        self.store.borrow()
    }

    /// The rendered surface.
    pub fn surface(&self) -> &T {
        self.renderer.surface()
    }

    /// The redraw scheduler.
    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    /// Frame source.
    pub fn source(&self) -> &S {
        self.loader.source()
    }

    /// Last successfully painted frame index.
    pub fn current_frame(&self) -> usize {
        self.scheduler.current()
    }

    /// Most recent paint.
    pub fn last_drawn(&self) -> Option<DrawnFrame> {
        self.renderer.last_drawn()
    }

    /// Frame index the last scroll progress maps to.
    pub fn target_frame(&self) -> usize {
        self.target
    }

    /// Last scroll progress received.
    pub fn scroll_progress(&self) -> f64 {
        self.progress
    }

    /// Latest progress reported by the live cycle.
    pub fn load_progress(&self) -> Option<LoadProgress> {
        self.load_progress
    }

    /// Whether the live cycle settled its critical batch.
    pub fn is_ready(&self) -> bool {
        self.store.borrow().is_ready()
    }

    /// Whether [`Self::mount`] ran and [`Self::unmount`] did not.
    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    /// Fit mode for the frame set currently resident.
    pub fn fit_mode(&self) -> FitMode {
        let category = self
            .store
            .borrow()
            .category()
            .unwrap_or_else(|| self.classifier.category());
        FitMode::for_category(category)
    }

    /// Receive every scroll progress value, unchanged, e.g. for narrative overlays.
    pub fn set_progress_listener(&mut self, listener: impl FnMut(f64) + 'static) {
        self.progress_listener = Some(Box::new(listener));
    }

    /// Attach to a viewport: measure it, size the surface, and start loading.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn mount(&mut self, viewport: Viewport) -> LoadCycle {
        self.classifier.measure(viewport.width);
        self.viewport = Some(viewport);
        self.renderer.resize(viewport.width, viewport.height);
        self.start_cycle()
    }

    /// Tear down: in-flight loads of the live cycle become stale, no paint is pending, and
    /// the surface is blank.
    pub fn unmount(&mut self) {
        self.store.borrow_mut().retire();
        self.scheduler.reset();
        self.renderer.reset();
        self.viewport = None;
        self.target = 0;
        self.load_progress = None;
        while self.events_rx.try_recv().is_ok() {}
        tracing::debug!("sequence unmounted");
    }

    /// Viewport resized: resize and repaint now, reclassify once resizing settles.
    pub fn on_viewport_resize(&mut self, viewport: Viewport, now: Instant) -> Option<DrawnFrame> {
        if !self.is_mounted() {
            return None;
        }
        self.viewport = Some(viewport);
        self.renderer.resize(viewport.width, viewport.height);
        self.classifier.observe(viewport.width, now);
        self.paint(self.scheduler.current())
    }

    /// Apply a debounced width change. Returns the new cycle when the category changed.
    pub fn poll_viewport(&mut self, now: Instant) -> Option<LoadCycle> {
        let change = self.classifier.poll(now)?;
        if !self.is_mounted() {
            return None;
        }
        tracing::info!(width = change.width, category = ?change.category, "reloading frame set");
        Some(self.start_cycle())
    }

    /// Scroll progress through the sequence's region, `0.0..=1.0`.
    pub fn on_scroll(&mut self, progress: f64) {
        self.progress = progress;
        if let Some(listener) = self.progress_listener.as_mut() {
            listener(progress);
        }
        self.target = frame_index(progress, self.config.total_frames);
        self.scheduler.request(self.target);
    }

    /// Scroll offset in pixels from the top of the sequence's region.
    pub fn on_scroll_offset(&mut self, offset_px: f64) {
        let height = self.viewport.map_or(0.0, |v| f64::from(v.height));
        let progress = self.region.progress(offset_px, height);
        self.on_scroll(progress);
    }

    /// Display refresh: apply loader notifications, then run the pending paint.
    pub fn on_animation_frame(&mut self) -> Option<DrawnFrame> {
        self.drain_load_events();
        if !self.is_mounted() {
            return None;
        }
        self.refresh_stale_paint();
        let index = self.scheduler.take_due()?;
        self.paint(index)
    }

    fn start_cycle(&mut self) -> LoadCycle {
        let category: ScreenCategory = self.classifier.category();
        self.scheduler.cancel();
        self.load_progress = None;
        tracing::debug!(?category, "starting load cycle");
        self.loader.start(&self.store, category, self.events_tx.clone())
    }

    fn paint(&mut self, index: usize) -> Option<DrawnFrame> {
        let mode = self.fit_mode();
        let drawn = {
            let store = self.store.borrow();
            self.renderer.render(index, &store, mode)
        }?;
        self.scheduler.commit(drawn.requested);
        Some(drawn)
    }

    // Paints requested before any frame was loaded never committed, so the scroll target
    // can differ from the scheduler's latest target here.
    fn schedule_target(&mut self) {
        if self.scheduler.pending() == Some(self.target) {
            return;
        }
        if self.scheduler.request(self.target).is_none() {
            self.scheduler.invalidate();
        }
    }

    // Progress events are throttled, so the store itself is checked: once ready, repaint
    // whenever a better frame for the scroll target has settled than the one on screen.
    fn refresh_stale_paint(&mut self) {
        if self.scheduler.pending().is_some() {
            return;
        }
        let best = {
            let store = self.store.borrow();
            if !store.is_ready() {
                return;
            }
            resolve_frame(&store, self.target)
        };
        let Some(best) = best else {
            return;
        };
        let on_screen = self.renderer.last_drawn().map(|d| (d.requested, d.drawn));
        if on_screen != Some((self.target, best)) {
            self.schedule_target();
        }
    }

    fn drain_load_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            let live = self.store.borrow().generation();
            match event {
                LoadEvent::Ready { generation } if generation == live => {
                    self.schedule_target();
                }
                LoadEvent::Progress(p) if p.generation == live => {
                    self.load_progress = Some(p);
                }
                LoadEvent::Finished(report) if report.generation == live => {
                    tracing::info!(
                        loaded = report.loaded,
                        failed = report.failed,
                        category = ?report.category,
                        "frame set loaded"
                    );
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/sequence.rs"]
mod tests;
