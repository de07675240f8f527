//! File watching for hot reload.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// Site content file changed
    ContentModified(PathBuf),

    /// Price table file changed
    PricesModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Generic modification
    Modified(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatchEvent::ContentModified(p)
            | WatchEvent::PricesModified(p)
            | WatchEvent::Created(p)
            | WatchEvent::Deleted(p)
            | WatchEvent::Modified(p) => p,
        }
    }
}

/// Quiet period after the last event for a path before it is delivered.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Trailing-edge debounce keyed by path.
///
/// A burst of events for one path collapses into its last event, delivered
/// once the path has been quiet for the window.
#[derive(Debug)]
struct Debouncer {
    window: Duration,
    pending: HashMap<PathBuf, (WatchEvent, Instant)>,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            window,
            pending: HashMap::new(),
        }
    }

    fn push(&mut self, event: WatchEvent, at: Instant) {
        let path = event.path().to_path_buf();
        self.pending.insert(path, (event, at));
    }

    /// Earliest instant at which a pending event becomes ready.
    fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|(_, at)| *at + self.window).min()
    }

    fn drain_ready(&mut self, now: Instant) -> Vec<WatchEvent> {
        let ready: Vec<PathBuf> = self
            .pending
            .iter()
            .filter(|(_, (_, at))| *at + self.window <= now)
            .map(|(path, _)| path.clone())
            .collect();

        ready
            .into_iter()
            .filter_map(|path| self.pending.remove(&path).map(|(event, _)| event))
            .collect()
    }
}

/// Files the server cares about, used to classify raw events.
#[derive(Debug, Clone)]
pub struct WatchTargets {
    pub content: PathBuf,
    pub prices: PathBuf,
}

impl WatchTargets {
    /// Directories to watch: the parents of both files, deduplicated.
    pub fn directories(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = [&self.content, &self.prices]
            .iter()
            .map(|p| match p.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            })
            .collect();
        dirs.dedup();
        dirs
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        paths: &[PathBuf],
        targets: WatchTargets,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            }
        }

        std::thread::spawn(move || {
            let mut debouncer = Debouncer::new(DEBOUNCE);

            loop {
                let timeout = debouncer
                    .next_deadline()
                    .map(|d| d.saturating_duration_since(Instant::now()))
                    .unwrap_or(Duration::from_secs(3600));

                match sync_rx.recv_timeout(timeout) {
                    Ok(event) => {
                        // Access and other unclassified kinds never reach the debouncer
                        for path in &event.paths {
                            if let Some(e) = classify_event(path, &event.kind, &targets) {
                                debouncer.push(e, Instant::now());
                            }
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => return,
                }

                for e in debouncer.drain_ready(Instant::now()) {
                    if async_tx.blocking_send(e).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.file_name().is_some() && a.file_name() == b.file_name() && a.ends_with(b),
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(
    path: &Path,
    kind: &notify::EventKind,
    targets: &WatchTargets,
) -> Option<WatchEvent> {
    use notify::EventKind;

    match kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            if same_file(path, &targets.prices) =>
        {
            Some(WatchEvent::PricesModified(path.to_path_buf()))
        }
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            if same_file(path, &targets.content) =>
        {
            Some(WatchEvent::ContentModified(path.to_path_buf()))
        }
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) => Some(WatchEvent::Modified(path.to_path_buf())),
        _ => None,
    }
}
