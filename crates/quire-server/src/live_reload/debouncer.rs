//! Event debouncing for live reload.
//!
//! Editors emit several events per save. Events are held per path until the
//! path has been quiet for the debounce window, then emitted once.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Kind of filesystem event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FsEventKind {
    Created,
    Modified,
    Removed,
}

impl FsEventKind {
    /// Merge a new event into a pending one.
    ///
    /// `None` means the pair cancels out: a file created and removed inside
    /// one window never existed as far as the build is concerned.
    #[allow(clippy::match_same_arms)]
    fn merge(self, new: Self) -> Option<Self> {
        use FsEventKind::{Created, Modified, Removed};

        match (self, new) {
            (Created, Removed) => None,
            (Created, _) => Some(Created),
            (Modified, kind) => Some(kind),
            (Removed, Created) => Some(Modified),
            (Removed, _) => Some(Removed),
        }
    }
}

/// A debounced filesystem event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FsEvent {
    pub path: PathBuf,
    pub kind: FsEventKind,
}

struct Pending {
    kind: FsEventKind,
    deadline: Instant,
}

/// Thread-safe per-path debouncer.
pub(crate) struct EventDebouncer {
    pending: Mutex<HashMap<PathBuf, Pending>>,
    window: Duration,
}

impl EventDebouncer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            window,
        }
    }

    /// Record an event, restarting the window for its path.
    pub(crate) fn record(&self, path: PathBuf, kind: FsEventKind) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let deadline = Instant::now() + self.window;

        let merged = match pending.remove(&path) {
            Some(existing) => existing.kind.merge(kind),
            None => Some(kind),
        };
        if let Some(kind) = merged {
            pending.insert(path, Pending { kind, deadline });
        }
    }

    /// Take every event whose window has elapsed, sorted by path.
    pub(crate) fn drain_ready(&self) -> Vec<FsEvent> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        let mut ready: Vec<FsEvent> = pending
            .extract_if(|_, p| p.deadline <= now)
            .map(|(path, p)| FsEvent { path, kind: p.kind })
            .collect();
        ready.sort_by(|a, b| a.path.cmp(&b.path));
        ready
    }
}
