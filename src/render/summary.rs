//! Codebase summary block

use std::collections::HashMap;

use crate::domain::FileRecord;
use crate::render::RULE;
use crate::utils::format_with_commas;

const LARGEST_FILES_SHOWN: usize = 5;

/// Aggregate counts, extension breakdown and the largest selected files.
/// Ends with a closing rule and a newline.
pub fn render_summary(files: &[FileRecord], total_tokens: usize) -> String {
    let total_lines: usize = files.iter().map(FileRecord::line_count).sum();
    let total_bytes: usize = files.iter().map(FileRecord::size_bytes).sum();

    let mut lines = vec![
        RULE.to_string(),
        "CODEBASE SUMMARY".to_string(),
        RULE.to_string(),
        format!("Total Files: {}", files.len()),
        format!("Total Lines: {}", format_with_commas(total_lines as u64)),
        format!("Total Tokens (estimated): {}", format_with_commas(total_tokens as u64)),
        format!("Total Size: {:.2} KB", total_bytes as f64 / 1024.0),
        String::new(),
        "File Types:".to_string(),
    ];

    for (ext, count) in extension_breakdown(files) {
        lines.push(format!("  {ext}: {count} files"));
    }

    lines.push(String::new());
    lines.push("Largest Files:".to_string());
    let mut largest: Vec<&FileRecord> = files.iter().collect();
    largest.sort_by(|a, b| b.estimated_tokens().cmp(&a.estimated_tokens()));
    for file in largest.into_iter().take(LARGEST_FILES_SHOWN) {
        lines.push(format!(
            "  {} - {} lines, ~{} tokens",
            file.relative_path(),
            file.line_count(),
            format_with_commas(file.estimated_tokens() as u64)
        ));
    }

    lines.push(RULE.to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Count files per extension, most common first; ties keep first-seen order.
pub fn extension_breakdown(files: &[FileRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for file in files {
        let ext = file.suffix().unwrap_or_else(|| "no extension".to_string());
        match index.get(&ext) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(ext.clone(), counts.len());
                counts.push((ext, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
