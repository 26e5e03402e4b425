//! Scripted frame source shared by unit tests.

use std::{
    cell::RefCell,
    collections::HashSet,
    rc::Rc,
};

use futures::{
    FutureExt as _,
    channel::oneshot,
    executor::ThreadPool,
    future::{self, LocalBoxFuture},
};

use crate::assets::{FrameImage, source::{FrameLoadError, FrameSource}};

type Reply = oneshot::Sender<Result<FrameImage, FrameLoadError>>;

#[derive(Default)]
struct ScriptState {
    requests: Vec<String>,
    pending: Vec<(String, Reply)>,
    immediate: bool,
    failing: HashSet<String>,
}

/// Records every request; either answers immediately or holds requests until a test
/// settles them by path.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    state: RefCell<ScriptState>,
}

impl ScriptedSource {
    pub(crate) fn manual() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn immediate() -> Rc<Self> {
        let src = Self::default();
        src.state.borrow_mut().immediate = true;
        Rc::new(src)
    }

    /// Make immediate answers for `path` fail.
    pub(crate) fn fail_path(&self, path: impl Into<String>) {
        self.state.borrow_mut().failing.insert(path.into());
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.state.borrow().requests.clone()
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub(crate) fn succeed(&self, path: &str) -> bool {
        self.complete(path, Ok(frame_image()))
    }

    pub(crate) fn fail(&self, path: &str) -> bool {
        self.complete(path, Err(FrameLoadError::Decode(format!("scripted failure: {path}"))))
    }

    fn complete(&self, path: &str, result: Result<FrameImage, FrameLoadError>) -> bool {
        let mut state = self.state.borrow_mut();
        let Some(pos) = state.pending.iter().position(|(p, _)| p == path) else {
            return false;
        };
        let (_, reply) = state.pending.remove(pos);
        reply.send(result).is_ok()
    }
}

impl FrameSource for ScriptedSource {
    fn load(&self, path: &str) -> LocalBoxFuture<'static, Result<FrameImage, FrameLoadError>> {
        let mut state = self.state.borrow_mut();
        state.requests.push(path.to_string());
        if state.immediate {
            let result = if state.failing.contains(path) {
                Err(FrameLoadError::Decode(format!("scripted failure: {path}")))
            } else {
                Ok(frame_image())
            };
            return future::ready(result).boxed_local();
        }

        let (tx, rx) = oneshot::channel();
        state.pending.push((path.to_string(), tx));
        async move { rx.await.unwrap_or(Err(FrameLoadError::Dropped)) }.boxed_local()
    }
}

/// 16:9 opaque test frame.
pub(crate) fn frame_image() -> FrameImage {
    FrameImage::solid(16, 9, [200, 120, 40, 255])
}

/// Single-worker pool whose worker stays parked until the returned sender fires (or drops).
pub(crate) fn gated_pool() -> (ThreadPool, std::sync::mpsc::Sender<()>) {
    let pool = ThreadPool::builder().pool_size(1).create().unwrap();
    let (gate_tx, gate_rx) = std::sync::mpsc::channel::<()>();
    pool.spawn_ok(async move {
        let _ = gate_rx.recv();
    });
    (pool, gate_tx)
}
