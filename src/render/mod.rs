//! Context file rendering
//!
//! Pure text assembly: header, summary, optional tree, then every selected
//! file's content. The caller supplies the timestamp so output is
//! reproducible when it is omitted.

pub mod summary;
pub mod tree;

use std::path::Path;

use crate::domain::SelectionResult;
use crate::utils::format_with_commas;

pub use summary::render_summary;
pub use tree::render_tree;

/// Section delimiter
pub const RULE: &str =
    "================================================================================";

/// Inputs for [`render_context`] beyond the selection itself.
#[derive(Debug, Clone)]
pub struct RenderOptions<'a> {
    /// Scan root as the user gave it
    pub root: &'a Path,

    /// Directory name shown at the top of the tree
    pub root_name: String,

    /// Token budget the selection was fitted to
    pub budget: usize,

    pub include_tree: bool,

    /// Pre-formatted generation time; `None` omits the header line
    pub generated_at: Option<String>,
}

pub fn render_context(selection: &SelectionResult, options: &RenderOptions<'_>) -> String {
    let mut out = String::new();

    out.push_str("# CODEBASE CONTEXT FOR LLM\n");
    if let Some(generated_at) = &options.generated_at {
        out.push_str(&format!("# Generated: {generated_at}\n"));
    }
    out.push_str(&format!("# Root: {}\n", options.root.display()));
    out.push_str(&format!("# Token Budget: {}\n", format_with_commas(options.budget as u64)));
    out.push_str(&format!(
        "# Actual Tokens: ~{}\n\n",
        format_with_commas(selection.included_tokens as u64)
    ));

    out.push_str(&render_summary(&selection.files, selection.included_tokens));

    if options.include_tree {
        out.push_str("\nPROJECT STRUCTURE:\n");
        out.push_str(&render_tree(&options.root_name, &selection.files));
        out.push_str("\n\n");
    }

    out.push_str(&format!("{RULE}\nFILE CONTENTS\n{RULE}\n\n"));
    for file in &selection.files {
        out.push_str(&format!(
            "\n{RULE}\nFILE: {}\nLines: {} | Tokens: ~{}\n{RULE}\n\n",
            file.relative_path(),
            file.line_count(),
            file.estimated_tokens()
        ));
        out.push_str(file.content());
        out.push_str("\n\n");
    }

    out
}

/// Name of the root directory for the tree header, resolving `.` and
/// similar through the filesystem.
pub fn root_name(root: &Path) -> String {
    if let Some(name) = root.file_name() {
        return name.to_string_lossy().into_owned();
    }
    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default()
}
