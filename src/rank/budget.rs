//! Prefix-fit token budgeting
//!
//! Walks the ranked order and stops at the first file that would overflow
//! the budget. Later files are never considered, even if they would fit, so
//! the selection is always a prefix of the ranked order.

use crate::domain::{FileRecord, SelectionResult};

pub fn fit_to_budget(ordered: Vec<FileRecord>, budget: usize) -> SelectionResult {
    let candidate_count = ordered.len();
    let mut selected = Vec::new();
    let mut running = 0usize;

    for file in ordered {
        let tokens = file.estimated_tokens();
        if running.saturating_add(tokens) > budget {
            tracing::debug!(
                path = file.relative_path(),
                tokens,
                running,
                budget,
                "budget reached"
            );
            break;
        }
        running += tokens;
        selected.push(file);
    }

    SelectionResult { files: selected, included_tokens: running, candidate_count }
}
