//! Directory traversal.
//!
//! Produces every regular file beneath a root, lazily. Entries that cannot be
//! read are logged and skipped; the walk always continues.

use docseek_core::CandidatePath;
use std::path::Path;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Lazy sequence of files under a root.
///
/// Directory symlinks are listed but not descended into. A symlink to a
/// regular file is yielded like the file itself.
pub struct Candidates {
    inner: walkdir::IntoIter,
}

impl Iterator for Candidates {
    type Item = CandidatePath;

    fn next(&mut self) -> Option<CandidatePath> {
        loop {
            if let Some(path) = candidate(self.inner.next()?) {
                return Some(path);
            }
        }
    }
}

/// Start a fresh walk of `root`.
///
/// Each call restarts from the top; a walk cannot be resumed.
#[must_use]
pub fn enumerate(root: &Path) -> Candidates {
    Candidates { inner: walk(root) }
}

fn walk(root: &Path) -> walkdir::IntoIter {
    WalkDir::new(root).follow_links(false).into_iter()
}

/// Keep regular files and file symlinks; log and drop unreadable entries.
fn candidate(entry: walkdir::Result<DirEntry>) -> Option<CandidatePath> {
    match entry {
        Ok(entry) => {
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            is_file.then(|| entry.into_path())
        }
        Err(e) => {
            let path = e.path().map(Path::to_path_buf);
            if e.io_error().is_some() {
                warn!("Cannot read {:?}: {}", path, e);
            } else {
                debug!("Skipping {:?}: {}", path, e);
            }
            None
        }
    }
}

/// Counters from one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct WalkStats {
    /// Entries examined, directories included
    pub visited: u64,
    /// Files handed to the receiver
    pub sent: u64,
}

/// Walk `root` on the current (blocking) thread, sending each file to `tx`.
///
/// Cancellation is checked at every entry, directories included, so a large
/// tree without files still stops promptly. Also stops once the receiver is
/// gone.
pub(crate) fn feed(
    root: &Path,
    tx: &mpsc::Sender<CandidatePath>,
    cancel: &CancellationToken,
) -> WalkStats {
    let mut stats = WalkStats::default();
    for entry in walk(root) {
        if cancel.is_cancelled() {
            debug!("Walk of {:?} stopped by cancellation", root);
            break;
        }
        stats.visited += 1;
        let Some(path) = candidate(entry) else {
            continue;
        };
        if tx.blocking_send(path).is_err() {
            debug!("Walk of {:?} stopped: receiver closed", root);
            break;
        }
        stats.sent += 1;
    }
    stats
}
