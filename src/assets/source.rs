use std::{
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use futures::{
    FutureExt as _,
    channel::oneshot,
    executor::ThreadPool,
    future::{self, LocalBoxFuture},
};

use crate::{
    assets::{FrameImage, decode::decode_frame},
    foundation::error::FramescrollResult,
};

/// Why a single frame could not be loaded.
///
/// Load failures are per frame and never abort a loading cycle.
#[derive(thiserror::Error, Debug)]
pub enum FrameLoadError {
    /// The frame path cannot be mapped onto the source.
    #[error("invalid frame path '{0}'")]
    InvalidPath(String),

    /// Reading the frame bytes failed.
    #[error("read frame '{path}'")]
    Io {
        /// Resolved filesystem path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a decodable image.
    #[error("decode frame: {0}")]
    Decode(String),

    /// The image decoded to zero width or height.
    #[error("frame has zero size")]
    Empty,

    /// The request was dropped before it produced a result.
    #[error("frame request dropped before completion")]
    Dropped,
}

/// Asynchronous per-frame retrieval.
///
/// Each call starts one request and returns a future for its outcome. The future must not
/// borrow the source, so a loader can keep many requests in flight at once.
pub trait FrameSource {
    /// Start loading the frame at `path`.
    fn load(&self, path: &str) -> LocalBoxFuture<'static, Result<FrameImage, FrameLoadError>>;
}

impl<T: FrameSource + ?Sized> FrameSource for Rc<T> {
    fn load(&self, path: &str) -> LocalBoxFuture<'static, Result<FrameImage, FrameLoadError>> {
        (**self).load(path)
    }
}

/// Loads frames from a directory standing in for the site's public asset root.
///
/// A frame path such as `/images/aceh-gayo/frame_0000.webp` resolves to
/// `<root>/images/aceh-gayo/frame_0000.webp`.
///
/// Reads and decodes run on a worker pool; the returned futures only wait for the answer,
/// so the thread driving a loading cycle stays free between settlements.
#[derive(Clone, Debug)]
pub struct FsFrameSource {
    root: PathBuf,
    pool: ThreadPool,
}

impl FsFrameSource {
    /// Source rooted at `root`, with its own decode pool.
    pub fn new(root: impl Into<PathBuf>) -> FramescrollResult<Self> {
        let pool = ThreadPool::builder()
            .name_prefix("framescroll-frames-")
            .create()
            .context("start frame decode pool")?;
        Ok(Self::with_pool(root, pool))
    }

    /// Source rooted at `root`, decoding on `pool`.
    pub fn with_pool(root: impl Into<PathBuf>, pool: ThreadPool) -> Self {
        Self {
            root: root.into(),
            pool,
        }
    }

    /// Asset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for a site-absolute or relative frame path.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, FrameLoadError> {
        let s = path.replace('\\', "/");
        let mut out = self.root.clone();
        let mut parts = 0usize;
        for part in s.split('/') {
            if part.is_empty() || part == "." {
                continue;
            }
            if part == ".." {
                return Err(FrameLoadError::InvalidPath(path.to_string()));
            }
            out.push(part);
            parts += 1;
        }
        if parts == 0 {
            return Err(FrameLoadError::InvalidPath(path.to_string()));
        }
        Ok(out)
    }
}

impl FrameSource for FsFrameSource {
    fn load(&self, path: &str) -> LocalBoxFuture<'static, Result<FrameImage, FrameLoadError>> {
        let full = match self.resolve(path) {
            Ok(full) => full,
            Err(e) => return future::ready(Err(e)).boxed_local(),
        };

        let (tx, rx) = oneshot::channel();
        self.pool.spawn_ok(async move {
            // The receiver is gone when the loader was dropped; nothing to report then.
            let _ = tx.send(read_frame(&full));
        });
        async move { rx.await.unwrap_or(Err(FrameLoadError::Dropped)) }.boxed_local()
    }
}

fn read_frame(full: &Path) -> Result<FrameImage, FrameLoadError> {
    let bytes = std::fs::read(full).map_err(|source| FrameLoadError::Io {
        path: full.to_path_buf(),
        source,
    })?;
    decode_frame(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
