//! Candidate ordering: priority files first, then smallest-first.

use std::collections::HashMap;

use crate::domain::FileRecord;
use crate::utils::normalize_relative;

/// Order candidates for budget fitting.
///
/// Files named in `priority` come first, in the caller's order; a repeated
/// entry is ignored because its file was already taken. Everything else
/// follows sorted by `(estimated_tokens, relative_path)`.
pub fn order_candidates(files: Vec<FileRecord>, priority: &[String]) -> Vec<FileRecord> {
    let index: HashMap<String, usize> =
        files.iter().enumerate().map(|(i, f)| (f.relative_path().to_string(), i)).collect();
    let mut slots: Vec<Option<FileRecord>> = files.into_iter().map(Some).collect();

    let mut ordered = Vec::with_capacity(slots.len());
    for raw in priority {
        let wanted = normalize_relative(raw);
        match index.get(&wanted).and_then(|&i| slots[i].take()) {
            Some(file) => ordered.push(file),
            None if index.contains_key(&wanted) => {
                tracing::debug!(path = %wanted, "duplicate priority entry ignored");
            }
            None => tracing::warn!(path = %wanted, "priority file not found among candidates"),
        }
    }

    let mut rest: Vec<FileRecord> = slots.into_iter().flatten().collect();
    rest.sort_by(|a, b| {
        a.estimated_tokens()
            .cmp(&b.estimated_tokens())
            .then_with(|| a.relative_path().cmp(b.relative_path()))
    });

    ordered.extend(rest);
    ordered
}
