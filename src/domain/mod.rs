//! Core domain types and models
//!
//! Defines FileRecord, ScanResult, SelectionResult and Config, plus the
//! read-only filtering tables shared by the walker.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::utils::estimate_tokens;

/// Default output file name
pub const DEFAULT_OUTPUT_FILE: &str = "codebase-context.txt";

/// Default token budget
pub const DEFAULT_MAX_TOKENS: usize = 100_000;

/// Extensions included when the caller does not supply their own list.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    // Python
    ".py",
    // JavaScript/TypeScript
    ".js",
    ".jsx",
    ".ts",
    ".tsx",
    // JVM
    ".java",
    ".kt",
    ".scala",
    // C family
    ".c",
    ".cpp",
    ".h",
    ".hpp",
    ".cs",
    // Systems / scripting
    ".go",
    ".rs",
    ".rb",
    ".php",
    ".swift",
    ".r",
    // Web
    ".html",
    ".css",
    ".scss",
    ".sass",
    ".vue",
    ".svelte",
    // Config / data
    ".json",
    ".yaml",
    ".yml",
    ".toml",
    ".xml",
    // SQL and shell
    ".sql",
    ".sh",
    ".bash",
    ".ps1",
    ".bat",
    // Documentation
    ".md",
    ".txt",
    ".rst",
];

/// Directory names that are never descended into (whole-segment match).
pub const SKIP_DIRS: &[&str] = &[
    // Dependencies
    "node_modules",
    "venv",
    "env",
    ".env",
    "vendor",
    "bower_components",
    // Caches
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    "coverage",
    // Version control
    ".git",
    ".svn",
    // Build outputs
    "dist",
    "build",
    "target",
    "bin",
    "obj",
    // IDE/Editor
    ".idea",
    ".vscode",
];

/// Glob patterns matched against a single directory segment.
pub const SKIP_DIR_GLOBS: &[&str] = &["*_venv"];

/// File names that are never candidates.
pub const SKIP_FILES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    ".gitignore",
    ".dockerignore",
    "package-lock.json",
    "yarn.lock",
    "poetry.lock",
    "Pipfile.lock",
];

pub static SKIP_DIR_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SKIP_DIRS.iter().copied().collect());

pub static SKIP_FILE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| SKIP_FILES.iter().copied().collect());

/// One scanned file with its content and derived metrics.
///
/// Metrics are computed once in [`FileRecord::new`]; the content cannot be
/// changed afterwards, so they never drift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    relative_path: String,
    absolute_path: PathBuf,
    content: String,
    size_bytes: usize,
    line_count: usize,
    estimated_tokens: usize,
}

impl FileRecord {
    pub fn new(relative_path: impl Into<String>, absolute_path: PathBuf, content: String) -> Self {
        let size_bytes = content.len();
        // An empty file still counts as one line.
        let line_count = content.matches('\n').count() + 1;
        let estimated_tokens = estimate_tokens(&content);
        Self {
            relative_path: relative_path.into(),
            absolute_path,
            content,
            size_bytes,
            line_count,
            estimated_tokens,
        }
    }

    /// Path relative to the scan root, always `/`-separated
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn estimated_tokens(&self) -> usize {
        self.estimated_tokens
    }

    /// File name component of the relative path
    pub fn file_name(&self) -> &str {
        self.relative_path.rsplit('/').next().unwrap_or(&self.relative_path)
    }

    /// Extension with a leading dot and original case, or `None` when the
    /// name has no (non-empty) suffix.
    pub fn suffix(&self) -> Option<String> {
        file_suffix(self.file_name())
    }
}

/// Extension of a bare file name with its leading dot.
///
/// Dotfiles such as `.bashrc` and names ending in a dot have no suffix.
pub fn file_suffix(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
}

/// Counters collected while walking the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Regular files seen beneath the root
    pub files_seen: usize,

    /// Directories pruned by the skip-directory rules
    pub dirs_skipped: usize,

    /// Files skipped by name
    pub files_skipped_name: usize,

    /// Files skipped by extension
    pub files_skipped_extension: usize,

    /// Entries that could not be read or stat'ed
    pub files_unreadable: usize,
}

/// Every candidate that survived filtering and extraction.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<FileRecord>,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn new(files: Vec<FileRecord>, stats: ScanStats) -> Self {
        Self { files, stats }
    }

    /// Sum of estimated tokens across all discovered files
    pub fn total_estimated_tokens(&self) -> usize {
        self.files.iter().map(FileRecord::estimated_tokens).sum()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Files chosen for output, in emission order.
#[derive(Debug, Clone, Default)]
pub struct SelectionResult {
    pub files: Vec<FileRecord>,

    /// Sum of estimated tokens of `files`
    pub included_tokens: usize,

    /// Number of candidates the selector was given
    pub candidate_count: usize,
}

impl SelectionResult {
    /// Candidates left out because the budget ran out
    pub fn excluded_count(&self) -> usize {
        self.candidate_count.saturating_sub(self.files.len())
    }

    pub fn budget_exhausted(&self) -> bool {
        self.excluded_count() > 0
    }
}

/// Normalize extensions to lowercase, dot-prefixed form.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    let lower = trimmed.to_lowercase();
    Some(if lower.starts_with('.') { lower } else { format!(".{lower}") })
}

/// Accepts either a comma-separated string or a list of strings, mapping
/// every entry through `normalize` and dropping the ones it rejects.
struct StringListVisitor {
    normalize: fn(&str) -> Option<String>,
}

impl<'de> serde::de::Visitor<'de> for StringListVisitor {
    type Value = Vec<String>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a comma-separated string or a list of strings")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.split(',').filter_map(self.normalize).collect())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut result = Vec::new();
        while let Some(entry) = seq.next_element::<String>()? {
            if let Some(normalized) = (self.normalize)(&entry) {
                result.push(normalized);
            }
        }
        Ok(result)
    }
}

fn deserialize_extensions<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let list = deserializer.deserialize_any(StringListVisitor { normalize: normalize_extension })?;
    Ok(list.into_iter().collect())
}

fn deserialize_priority<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(StringListVisitor { normalize: trimmed_entry })
}

fn trimmed_entry(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Main configuration for codebase-context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Destination file
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Token budget for file contents
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Emit the project structure section
    #[serde(default = "default_true")]
    pub include_tree: bool,

    /// Active extension allow-list
    #[serde(
        default = "default_extensions",
        alias = "include_extensions",
        deserialize_with = "deserialize_extensions"
    )]
    pub extensions: BTreeSet<String>,

    /// Relative paths to front-load, in order
    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: Vec<String>,

    /// Emit the `# Generated:` header line
    #[serde(default = "default_true")]
    pub timestamp: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            max_tokens: default_max_tokens(),
            include_tree: true,
            extensions: default_extensions(),
            priority: Vec::new(),
            timestamp: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

pub fn default_extensions() -> BTreeSet<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}
