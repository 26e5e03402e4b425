/// Handle for a scheduled paint. Tickets increase monotonically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaintTicket(u64);

#[derive(Clone, Copy, Debug)]
struct PendingPaint {
    ticket: PaintTicket,
    index: usize,
}

/// Coalesces frame-index changes into at most one pending paint per display refresh.
///
/// A newer request replaces the pending one, so the surface converges on the latest scroll
/// position instead of replaying a backlog.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    current: usize,
    pending: Option<PendingPaint>,
    next_ticket: u64,
    superseded: u64,
}

impl RedrawScheduler {
    /// Scheduler with frame 0 as the current frame and nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last successfully painted frame.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the pending paint, if any.
    pub fn pending(&self) -> Option<usize> {
        self.pending.map(|p| p.index)
    }

    /// Ticket of the pending paint, if any.
    pub fn pending_ticket(&self) -> Option<PaintTicket> {
        self.pending.map(|p| p.ticket)
    }

    /// Where the surface is heading: the pending index, else the current one.
    pub fn latest_target(&self) -> usize {
        self.pending().unwrap_or(self.current)
    }

    /// Paints cancelled because a newer request replaced them.
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }

    /// Ask for `index` to be painted. No-op when it is already the latest target.
    pub fn request(&mut self, index: usize) -> Option<PaintTicket> {
        if index == self.latest_target() {
            return None;
        }
        Some(self.schedule(index))
    }

    /// Schedule a repaint of the latest target even if it is unchanged.
    pub fn invalidate(&mut self) -> PaintTicket {
        self.schedule(self.latest_target())
    }

    /// Take the pending paint for this refresh.
    pub fn take_due(&mut self) -> Option<usize> {
        self.pending.take().map(|p| p.index)
    }

    /// Record a successful paint of `index`.
    pub fn commit(&mut self, index: usize) {
        self.current = index;
    }

    /// Drop the pending paint without running it.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.superseded += 1;
        }
    }

    /// Forget everything, e.g. when the page view is torn down.
    pub fn reset(&mut self) {
        self.pending = None;
        self.current = 0;
    }

    fn schedule(&mut self, index: usize) -> PaintTicket {
        if self.pending.is_some() {
            self.superseded += 1;
        }
        let ticket = PaintTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(PendingPaint { ticket, index });
        ticket
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scheduler.rs"]
mod tests;
