//! Live reload manager.
//!
//! Watches the content root, rebuilds the site after each debounced batch of
//! changes, then tells connected clients which routes changed.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use quire_site::Pipeline;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};

use super::debouncer::{EventDebouncer, FsEvent, FsEventKind};

/// Message sent to WebSocket clients after a rebuild.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct ReloadEvent {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Route id of the changed document, or the changed file's relative path.
    path: String,
}

impl ReloadEvent {
    fn reload(path: String) -> Self {
        Self {
            kind: "reload",
            path,
        }
    }
}

const DEBOUNCE: Duration = Duration::from_millis(100);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What to watch and how to rebuild.
pub struct LiveReloadOptions {
    /// Content root to watch.
    pub source_dir: PathBuf,
    /// Output root; events under it are ignored.
    pub output_dir: PathBuf,
    /// Glob patterns relative to `source_dir`.
    pub watch_patterns: Vec<String>,
    /// Pipeline run after every batch of changes.
    pub pipeline: Pipeline,
}

/// Owns the watcher; dropping it stops watching.
pub(crate) struct LiveReloadManager {
    source_dir: PathBuf,
    output_dir: PathBuf,
    patterns: Vec<glob::Pattern>,
    pipeline: Arc<Pipeline>,
    broadcaster: broadcast::Sender<ReloadEvent>,
    watcher: Option<RecommendedWatcher>,
}

impl LiveReloadManager {
    pub(crate) fn new(options: LiveReloadOptions, broadcaster: broadcast::Sender<ReloadEvent>) -> Self {
        let patterns = options
            .watch_patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!(pattern = %p, error = %e, "Ignoring invalid watch pattern");
                    None
                }
            })
            .collect();

        Self {
            source_dir: canonical(options.source_dir),
            output_dir: canonical(options.output_dir),
            patterns,
            pipeline: Arc::new(options.pipeline),
            broadcaster,
            watcher: None,
        }
    }

    /// Start watching.
    ///
    /// Must be called inside a tokio runtime: spawns one task feeding the
    /// debouncer and one draining it.
    pub(crate) fn start(&mut self) -> Result<(), notify::Error> {
        let (tx, mut rx) = mpsc::channel::<Event>(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    let _ = tx.blocking_send(event);
                }
                Err(e) => tracing::warn!(error = %e, "Watch error"),
            }
        })?;
        watcher.watch(&self.source_dir, RecursiveMode::Recursive)?;
        self.watcher = Some(watcher);
        tracing::info!(path = %self.source_dir.display(), "Watching for changes");

        let debouncer = Arc::new(EventDebouncer::new(DEBOUNCE));

        let filter = EventFilter {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            patterns: self.patterns.clone(),
        };
        let recorder = Arc::clone(&debouncer);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                filter.record(&event, &recorder);
            }
        });

        let pipeline = Arc::clone(&self.pipeline);
        let broadcaster = self.broadcaster.clone();
        let source_dir = self.source_dir.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            loop {
                interval.tick().await;
                let batch = debouncer.drain_ready();
                if !batch.is_empty() {
                    rebuild(&batch, &source_dir, &pipeline, &broadcaster).await;
                }
            }
        });

        Ok(())
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.broadcaster.subscribe()
    }
}

fn canonical(path: PathBuf) -> PathBuf {
    std::fs::canonicalize(&path).unwrap_or(path)
}

struct EventFilter {
    source_dir: PathBuf,
    output_dir: PathBuf,
    patterns: Vec<glob::Pattern>,
}

impl EventFilter {
    fn record(&self, event: &Event, debouncer: &EventDebouncer) {
        let kind = match event.kind {
            EventKind::Create(_) => FsEventKind::Created,
            EventKind::Modify(_) => FsEventKind::Modified,
            EventKind::Remove(_) => FsEventKind::Removed,
            _ => return,
        };

        for path in &event.paths {
            if self.matches(path) {
                tracing::debug!(path = %path.display(), ?kind, "Recorded filesystem event");
                debouncer.record(path.clone(), kind);
            }
        }
    }

    fn matches(&self, path: &Path) -> bool {
        if path.starts_with(&self.output_dir) {
            return false;
        }
        let Ok(relative) = path.strip_prefix(&self.source_dir) else {
            return false;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        self.patterns.iter().any(|p| p.matches(&relative))
    }
}

/// Rebuild once for the whole batch, then announce every changed path.
async fn rebuild(
    batch: &[FsEvent],
    source_dir: &Path,
    pipeline: &Arc<Pipeline>,
    broadcaster: &broadcast::Sender<ReloadEvent>,
) {
    let start = Instant::now();
    let pipeline = Arc::clone(pipeline);

    match tokio::task::spawn_blocking(move || pipeline.run()).await {
        Ok(Ok(report)) => {
            for warning in report.warnings() {
                tracing::warn!("{warning}");
            }
            tracing::info!(
                changes = batch.len(),
                pages = report.build.pages,
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Rebuilt site"
            );
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Rebuild failed");
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "Rebuild task panicked");
            return;
        }
    }

    for event in batch {
        if let Some(path) = changed_path(&event.path, source_dir) {
            // No receivers just means no browser is connected.
            let _ = broadcaster.send(ReloadEvent::reload(path));
        }
    }
}

/// Route id for documents, relative path for anything else.
fn changed_path(file: &Path, source_dir: &Path) -> Option<String> {
    let relative = file.strip_prefix(source_dir).ok()?;
    let is_document = relative
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == "md" || e == "markdown");
    let path = if is_document {
        relative.with_extension("")
    } else {
        relative.to_path_buf()
    };
    Some(path.to_string_lossy().replace('\\', "/"))
}
