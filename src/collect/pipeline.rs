//! Concurrent file collection
//!
//! One walk runs on the calling thread and decides, entry by entry, what to
//! collect. Every included file becomes one read task on a fixed-size worker
//! pool; the walk never waits for reads. Once the walk ends the pipeline joins
//! all outstanding reads and drains their results.

use crate::core::error::{CollectorError, Result};
use crate::core::types::FileRecord;
use crate::ignore::policy::InclusionPolicy;
use crate::ignore::rules::relative_slash_path;
use crossbeam_channel::unbounded;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Lifecycle of one collection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    /// Enumerating entries and dispatching reads
    Walking,
    /// Walk finished, waiting for dispatched reads
    Draining,
    /// All reads joined, results drained
    Done,
}

/// Progress snapshot passed to the progress callback after each read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectProgress {
    /// Reads dispatched so far
    pub dispatched: usize,
    /// Reads finished so far, successful or not
    pub completed: usize,
    /// Reads that failed so far
    pub failed: usize,
}

/// A file that passed the inclusion policy but could not be read
#[derive(Debug)]
pub struct ReadFailure {
    pub path: PathBuf,
    pub error: CollectorError,
}

/// Everything one collection run produced
///
/// `files` has no particular order. `files.len() + read_failures.len()`
/// always equals `dispatched`.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    pub files: Vec<FileRecord>,
    pub read_failures: Vec<ReadFailure>,
    /// Fatal walk error; reads dispatched before it are still in `files`
    pub walk_error: Option<CollectorError>,
    pub dispatched: usize,
}

/// What kind of filesystem object a walk entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    /// A regular file, or a symlink resolving to one
    File,
    /// FIFOs, sockets, device nodes and dangling links; never read
    Other,
}

impl EntryKind {
    /// Classify a walk entry without following directory links
    pub fn of(entry: &walkdir::DirEntry) -> Self {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(meta) if meta.is_file() => EntryKind::File,
                _ => EntryKind::Other,
            }
        } else {
            EntryKind::Other
        }
    }
}

/// One entry produced by the directory walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl WalkEntry {
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Dir)
    }

    pub fn other(path: impl Into<PathBuf>) -> Self {
        Self::new(path, EntryKind::Other)
    }
}

impl From<walkdir::DirEntry> for WalkEntry {
    fn from(entry: walkdir::DirEntry) -> Self {
        let kind = EntryKind::of(&entry);
        Self {
            path: entry.into_path(),
            kind,
        }
    }
}

type ProgressCallback = Box<dyn Fn(&CollectProgress) + Send + Sync>;

/// Default number of read workers
pub fn default_workers() -> usize {
    // Reads are I/O bound, so oversubscribe the CPUs a little
    num_cpus::get() * 2
}

/// Walks a tree once and reads every included file on a bounded pool
pub struct CollectionPipeline<'a> {
    policy: &'a InclusionPolicy,
    pool: rayon::ThreadPool,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
    state: Mutex<PipelineState>,
}

impl<'a> CollectionPipeline<'a> {
    /// Create a pipeline with `workers` read threads (0 = default)
    pub fn new(policy: &'a InclusionPolicy, workers: usize) -> Result<Self> {
        let workers = if workers == 0 {
            default_workers()
        } else {
            workers
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("collector-read-{}", i))
            .build()?;

        Ok(Self {
            policy,
            pool,
            workers,
            progress_callback: None,
            state: Mutex::new(PipelineState::Idle),
        })
    }

    /// Set progress callback, invoked from worker threads after each read
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CollectProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn state(&self) -> PipelineState {
        *self.state.lock()
    }

    /// Walk `root` and collect every included file
    pub fn collect(&self, root: &Path) -> CollectOutcome {
        info!("Collecting files under {}", root.display());

        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let skip = entry.file_type().is_dir() && self.policy.is_ignored(entry.path(), root);
                if skip {
                    debug!("Directory ignored: {}", entry.path().display());
                }
                !skip
            })
            .map(|entry| entry.map(WalkEntry::from).map_err(CollectorError::from));

        self.collect_entries(root, entries)
    }

    /// Dispatch reads for an already produced entry stream
    ///
    /// The first `Err` in `entries` stops the walk. Reads dispatched before it
    /// still complete and are returned next to the error.
    pub fn collect_entries<I>(&self, root: &Path, entries: I) -> CollectOutcome
    where
        I: IntoIterator<Item = Result<WalkEntry>>,
    {
        let (sender, receiver) = unbounded::<std::result::Result<FileRecord, ReadFailure>>();
        let dispatched = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        let progress = self.progress_callback.as_deref();
        let mut walk_error = None;

        self.set_state(PipelineState::Walking);
        self.pool.in_place_scope(|scope| {
            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("Walk aborted: {}", e);
                        walk_error = Some(e);
                        break;
                    },
                };

                match entry.kind {
                    EntryKind::Dir => continue,
                    EntryKind::Other => {
                        debug!("Not a regular file: {}", entry.path.display());
                        continue;
                    },
                    EntryKind::File => {},
                }
                if !self.policy.is_included(&entry.path, root) {
                    debug!("File not included: {}", entry.path.display());
                    continue;
                }

                debug!("Processing file: {}", entry.path.display());
                dispatched.fetch_add(1, Ordering::SeqCst);
                let sender = sender.clone();
                let (dispatched, completed, failed) = (&dispatched, &completed, &failed);

                scope.spawn(move |_| {
                    let message = read_record(&entry.path, root).map_err(|error| {
                        warn!("Error processing file {}: {}", entry.path.display(), error);
                        failed.fetch_add(1, Ordering::SeqCst);
                        ReadFailure {
                            path: entry.path.clone(),
                            error,
                        }
                    });
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;

                    if let Some(callback) = progress {
                        callback(&CollectProgress {
                            dispatched: dispatched.load(Ordering::SeqCst),
                            completed: done,
                            failed: failed.load(Ordering::SeqCst),
                        });
                    }

                    // The receiver outlives the scope, so this cannot fail
                    let _ = sender.send(message);
                });
            }

            self.set_state(PipelineState::Draining);
        });
        drop(sender);

        let mut outcome = CollectOutcome {
            dispatched: dispatched.into_inner(),
            walk_error,
            ..CollectOutcome::default()
        };
        for message in receiver.iter() {
            match message {
                Ok(record) => outcome.files.push(record),
                Err(failure) => outcome.read_failures.push(failure),
            }
        }

        self.set_state(PipelineState::Done);
        info!(
            "Collected {} files ({} read failures)",
            outcome.files.len(),
            outcome.read_failures.len()
        );
        outcome
    }

    fn set_state(&self, state: PipelineState) {
        debug!("Pipeline state: {:?}", state);
        *self.state.lock() = state;
    }
}

/// Read one file into a record keyed by its root-relative path
pub fn read_record(path: &Path, root: &Path) -> Result<FileRecord> {
    let content = fs::read(path).map_err(|e| CollectorError::file_read(path.to_path_buf(), e))?;
    let relative = relative_slash_path(path, root)?;
    Ok(FileRecord::new(relative, content))
}
