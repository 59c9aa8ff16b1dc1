//! Candidate ranking and budget-constrained selection

pub mod budget;
pub mod ordering;

pub use budget::fit_to_budget;
pub use ordering::order_candidates;

use crate::domain::{ScanResult, SelectionResult};

/// Rank the scanned files and keep the longest prefix that fits `budget`.
pub fn select_files(scan: ScanResult, budget: usize, priority: &[String]) -> SelectionResult {
    let ordered = order_candidates(scan.files, priority);
    fit_to_budget(ordered, budget)
}

#[cfg(test)]
mod tests {
    use super::select_files;
    use crate::domain::{FileRecord, ScanResult, ScanStats};
    use std::path::PathBuf;

    fn file(rel: &str, bytes: usize) -> FileRecord {
        FileRecord::new(rel, PathBuf::from("/repo").join(rel), "x".repeat(bytes))
    }

    fn scan(files: Vec<FileRecord>) -> ScanResult {
        ScanResult::new(files, ScanStats::default())
    }

    fn selected(files: &[FileRecord]) -> Vec<&str> {
        files.iter().map(FileRecord::relative_path).collect()
    }

    #[test]
    fn small_file_fits_large_one_is_excluded() {
        let result = select_files(scan(vec![file("b.py", 4000), file("a.py", 40)]), 500, &[]);
        assert_eq!(selected(&result.files), vec!["a.py"]);
        assert_eq!(result.excluded_count(), 1);
        assert_eq!(result.included_tokens, 10);
    }

    #[test]
    fn oversized_priority_file_blocks_everything_after_it() {
        let result = select_files(
            scan(vec![file("src/util.py", 40), file("src/main.py", 8000), file("README.md", 80)]),
            1000,
            &["src/main.py".to_string()],
        );
        assert!(result.files.is_empty());
        assert_eq!(result.excluded_count(), 3);
    }

    #[test]
    fn priority_files_lead_in_caller_order() {
        let result = select_files(
            scan(vec![file("a.py", 4), file("c.py", 400), file("b.py", 40), file("d.py", 8)]),
            100_000,
            &["c.py".to_string(), "b.py".to_string()],
        );
        assert_eq!(selected(&result.files), vec!["c.py", "b.py", "a.py", "d.py"]);
    }

    #[test]
    fn selection_never_exceeds_budget() {
        let files: Vec<FileRecord> =
            (0..40).map(|i| file(&format!("f{i:02}.rs"), (i * 37) % 900)).collect();
        for budget in [0, 1, 50, 333, 1000, 5000] {
            let result = select_files(scan(files.clone()), budget, &["f07.rs".to_string()]);
            let sum: usize = result.files.iter().map(FileRecord::estimated_tokens).sum();
            assert_eq!(sum, result.included_tokens);
            assert!(sum <= budget, "budget {budget} exceeded: {sum}");
            assert!(result.files.iter().all(|f| f.estimated_tokens() <= budget));
        }
    }

    #[test]
    fn selection_is_deterministic() {
        let files = vec![file("x/b.py", 40), file("a.py", 40), file("x/a.py", 12), file("z", 0)];
        let first = select_files(scan(files.clone()), 20, &[]);
        let second = select_files(scan(files.into_iter().rev().collect()), 20, &[]);
        assert_eq!(selected(&first.files), selected(&second.files));
        assert_eq!(selected(&first.files), vec!["z", "x/a.py", "a.py"]);
    }
}
