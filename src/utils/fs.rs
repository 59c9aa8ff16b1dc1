//! Atomic output writing
//!
//! Content goes to a temporary file in the destination's directory, is
//! synced, and is then renamed over the destination. A failed or cancelled
//! run leaves the previous file (or nothing) in place, never a partial one.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{ContextError, Result};
use crate::interrupt::Interrupt;

pub fn write_atomic(path: &Path, content: &str, interrupt: &Interrupt) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp =
        NamedTempFile::new_in(parent).map_err(|e| ContextError::destination(path, e))?;
    temp.write_all(content.as_bytes()).map_err(|e| ContextError::destination(path, e))?;
    temp.as_file().sync_all().map_err(|e| ContextError::destination(path, e))?;

    // Dropping the temp file on this path removes it.
    interrupt.check()?;

    temp.persist(path).map_err(|e| ContextError::destination(path, e.error))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "output persisted");
    Ok(())
}
