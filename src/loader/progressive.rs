use std::{ops::Range, rc::Rc};

use futures::{
    FutureExt as _, StreamExt as _,
    channel::mpsc::UnboundedSender,
    future::LocalBoxFuture,
    stream::FuturesUnordered,
};
use tracing::Instrument as _;

use crate::{
    assets::source::FrameSource,
    config::SequenceConfig,
    foundation::core::ScreenCategory,
    frames::path::FramePaths,
    loader::store::{Generation, Settlement, SharedFrameStore},
};

/// Batch sizes for one loading cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadPlan {
    /// Frames in the set.
    pub total_frames: usize,
    /// Frames loaded before the cycle reports ready.
    pub initial_batch: usize,
    /// Frames per background chunk.
    pub chunk_size: usize,
    /// Background progress is reported every this many settlements.
    pub progress_every: usize,
}

impl LoadPlan {
    /// Plan taken from a sequence configuration.
    pub fn from_config(cfg: &SequenceConfig) -> Self {
        Self {
            total_frames: cfg.total_frames,
            initial_batch: cfg.initial_batch,
            chunk_size: cfg.chunk_size,
            progress_every: cfg.progress_every,
        }
    }

    /// Indices of the critical batch.
    pub fn critical_range(&self) -> Range<usize> {
        0..self.initial_batch.min(self.total_frames)
    }

    /// Background chunks, in load order.
    pub fn background_chunks(&self) -> Vec<Range<usize>> {
        let start = self.critical_range().end;
        let chunk = self.chunk_size.max(1);
        (start..self.total_frames)
            .step_by(chunk)
            .map(|s| s..(s + chunk).min(self.total_frames))
            .collect()
    }
}

/// Which part of a cycle a request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    /// The batch that gates interactivity.
    Critical,
    /// Chunks streamed after the sequence is interactive.
    Background,
}

/// Snapshot of a cycle's progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadProgress {
    /// Cycle the snapshot belongs to.
    pub generation: Generation,
    /// Phase of the settlement that produced the snapshot.
    pub phase: LoadPhase,
    /// Settled frames, loaded or failed.
    pub settled: usize,
    /// Loaded frames.
    pub loaded: usize,
    /// Failed frames.
    pub failed: usize,
    /// Frames in the set.
    pub total: usize,
}

impl LoadProgress {
    /// Settled share of the whole set, `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.settled as f64 / self.total as f64
    }

    /// Percentage shown by the loading overlay: settled frames against the critical batch,
    /// capped at 100.
    pub fn batch_percent(&self, initial_batch: usize) -> u8 {
        if initial_batch == 0 {
            return 100;
        }
        ((self.settled * 100) / initial_batch).min(100) as u8
    }
}

/// How a cycle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every frame was requested and settled.
    Completed,
    /// A newer cycle (or teardown) took over before the cycle finished.
    Superseded,
}

/// Summary returned by a finished cycle future.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Cycle generation.
    pub generation: Generation,
    /// Frame set the cycle loaded.
    pub category: ScreenCategory,
    /// How the cycle ended.
    pub outcome: CycleOutcome,
    /// Results the cycle recorded.
    pub settled: usize,
    /// Loaded frames among them.
    pub loaded: usize,
    /// Failed frames among them.
    pub failed: usize,
}

/// Notifications emitted by a running cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadEvent {
    /// Requests for `range` were issued.
    Chunk {
        /// Cycle generation.
        generation: Generation,
        /// Phase of the chunk.
        phase: LoadPhase,
        /// Frame indices requested.
        range: Range<usize>,
    },
    /// Progress update.
    Progress(LoadProgress),
    /// The critical batch settled; painting may start. Emitted once per cycle.
    Ready {
        /// Cycle generation.
        generation: Generation,
    },
    /// The cycle settled every frame.
    Finished(CycleReport),
}

/// A loading cycle for the host to drive on its local executor.
pub type LoadCycle = LocalBoxFuture<'static, CycleReport>;

/// Two-phase frame loader: a critical batch in parallel, then bounded background chunks.
#[derive(Debug)]
pub struct ProgressiveLoader<S> {
    source: Rc<S>,
    paths: FramePaths,
    plan: LoadPlan,
}

impl<S: FrameSource + 'static> ProgressiveLoader<S> {
    /// Loader pulling frames from `source`.
    pub fn new(source: S, paths: FramePaths, plan: LoadPlan) -> Self {
        Self {
            source: Rc::new(source),
            paths,
            plan,
        }
    }

    /// Frame source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Batch plan.
    pub fn plan(&self) -> LoadPlan {
        self.plan
    }

    /// Begin a new cycle for `category`, superseding whatever cycle `store` held.
    ///
    /// The store is reset immediately; requests are issued once the returned future is
    /// polled.
    pub fn start(
        &self,
        store: &SharedFrameStore,
        category: ScreenCategory,
        events: UnboundedSender<LoadEvent>,
    ) -> LoadCycle {
        let generation = store.borrow_mut().begin_cycle(category);
        let span = tracing::debug_span!(
            "load_cycle",
            generation = generation.as_u64(),
            category = ?category
        );
        let driver = CycleDriver {
            source: Rc::clone(&self.source),
            paths: self.paths.clone(),
            plan: self.plan,
            store: Rc::clone(store),
            generation,
            category,
            events,
            settled: 0,
            loaded: 0,
            failed: 0,
        };
        driver.run().instrument(span).boxed_local()
    }
}

struct CycleDriver<S> {
    source: Rc<S>,
    paths: FramePaths,
    plan: LoadPlan,
    store: SharedFrameStore,
    generation: Generation,
    category: ScreenCategory,
    events: UnboundedSender<LoadEvent>,
    settled: usize,
    loaded: usize,
    failed: usize,
}

impl<S: FrameSource> CycleDriver<S> {
    async fn run(mut self) -> CycleReport {
        let critical = self.plan.critical_range();
        tracing::debug!(frames = critical.len(), "loading critical batch");
        if !self.load_range(critical, LoadPhase::Critical).await {
            return self.report(CycleOutcome::Superseded);
        }

        if !self.store.borrow_mut().mark_ready(self.generation) {
            return self.report(CycleOutcome::Superseded);
        }
        tracing::debug!(
            loaded = self.loaded,
            failed = self.failed,
            "critical batch settled"
        );
        self.emit(LoadEvent::Ready {
            generation: self.generation,
        });

        for range in self.plan.background_chunks() {
            if !self.load_range(range, LoadPhase::Background).await {
                return self.report(CycleOutcome::Superseded);
            }
        }

        let report = self.report(CycleOutcome::Completed);
        tracing::debug!(loaded = report.loaded, failed = report.failed, "cycle finished");
        self.emit(LoadEvent::Finished(report));
        report
    }

    /// Issue every request in `range` at once and wait for all of them to settle.
    /// Returns `false` if the cycle is no longer current.
    async fn load_range(&mut self, range: Range<usize>, phase: LoadPhase) -> bool {
        if !self.is_current() {
            return false;
        }
        self.emit(LoadEvent::Chunk {
            generation: self.generation,
            phase,
            range: range.clone(),
        });

        let mut in_flight = FuturesUnordered::new();
        for index in range {
            if !self.store.borrow_mut().mark_in_flight(self.generation, index) {
                continue;
            }
            let path = self.paths.path_for(index, self.category);
            let request = self.source.load(&path);
            in_flight.push(async move { (index, request.await) });
        }

        while let Some((index, result)) = in_flight.next().await {
            let outcome = self
                .store
                .borrow_mut()
                .settle(self.generation, index, result);
            let Settlement::Applied { loaded, settled } = outcome else {
                continue;
            };
            self.settled = settled;
            if loaded {
                self.loaded += 1;
            } else {
                self.failed += 1;
            }
            if self.should_report(phase, settled, loaded) {
                self.emit(LoadEvent::Progress(LoadProgress {
                    generation: self.generation,
                    phase,
                    settled,
                    loaded: self.loaded,
                    failed: self.failed,
                    total: self.plan.total_frames,
                }));
            }
        }

        self.is_current()
    }

    fn should_report(&self, phase: LoadPhase, settled: usize, loaded: bool) -> bool {
        match phase {
            LoadPhase::Critical => true,
            LoadPhase::Background => {
                !loaded
                    || settled % self.plan.progress_every.max(1) == 0
                    || settled == self.plan.total_frames
            }
        }
    }

    fn is_current(&self) -> bool {
        self.store.borrow().is_current(self.generation)
    }

    fn emit(&self, event: LoadEvent) {
        // A dropped receiver means nobody is listening any more.
        let _ = self.events.unbounded_send(event);
    }

    fn report(&self, outcome: CycleOutcome) -> CycleReport {
        if outcome == CycleOutcome::Superseded {
            tracing::debug!(settled = self.settled, "cycle superseded");
        }
        CycleReport {
            generation: self.generation,
            category: self.category,
            outcome,
            settled: self.settled,
            loaded: self.loaded,
            failed: self.failed,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/loader/progressive.rs"]
mod tests;
