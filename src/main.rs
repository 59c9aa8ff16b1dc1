//! codebase-context: generate a single-file codebase context for LLMs
//!
//! Scans a directory, selects source-like files under a token budget and
//! writes their contents plus summary metadata to one text file.

use anyhow::Result;

fn main() -> Result<()> {
    codebase_context::cli::run()
}
