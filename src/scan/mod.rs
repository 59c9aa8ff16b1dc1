//! Walker and metadata extraction
//!
//! Produces the [`ScanResult`] the selector works from.

pub mod extract;
pub mod walker;

use indicatif::ProgressBar;

use crate::domain::ScanResult;
use crate::error::Result;
use crate::interrupt::Interrupt;

pub use extract::extract_record;
pub use walker::{Candidate, FileWalker};

/// Walk the tree and read every candidate. Unreadable files are dropped and
/// counted; only cancellation or a broken skip pattern aborts the scan.
pub fn scan_codebase(
    mut walker: FileWalker,
    interrupt: &Interrupt,
    progress: &ProgressBar,
) -> Result<ScanResult> {
    let candidates = walker.walk(interrupt)?;
    let mut stats = walker.into_stats();

    progress.set_length(candidates.len() as u64);
    let mut files = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        interrupt.check()?;
        progress.set_message(candidate.relative_path.clone());
        match extract_record(candidate) {
            Some(record) => files.push(record),
            None => stats.files_unreadable += 1,
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(ScanResult::new(files, stats))
}
