//! Directory traversal with skip rules

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::{
    default_extensions, file_suffix, normalize_extension, ScanStats, SKIP_DIR_GLOBS,
    SKIP_DIR_SET, SKIP_FILE_SET,
};
use crate::error::Result;
use crate::interrupt::Interrupt;
use crate::utils::normalize_path;

/// A file that passed every exclusion rule and is waiting to be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub absolute_path: PathBuf,
    pub relative_path: String,
}

/// Directory-name rules: exact names plus whole-segment globs.
#[derive(Debug, Clone)]
pub struct SkipRules {
    dir_globs: GlobSet,
}

impl SkipRules {
    pub fn new() -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in SKIP_DIR_GLOBS {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self { dir_globs: builder.build()? })
    }

    pub fn is_skipped_dir(&self, name: &str) -> bool {
        SKIP_DIR_SET.contains(name) || self.dir_globs.is_match(name)
    }

    pub fn is_skipped_file(&self, name: &str) -> bool {
        SKIP_FILE_SET.contains(name)
    }
}

/// Walks a root directory and yields candidate files.
pub struct FileWalker {
    root: PathBuf,
    extensions: BTreeSet<String>,
    excluded: Option<(OsString, PathBuf)>,
    stats: ScanStats,
}

impl FileWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: default_extensions(),
            excluded: None,
            stats: ScanStats::default(),
        }
    }

    /// Replace the extension allow-list. Entries are compared case-insensitively.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions =
            extensions.into_iter().filter_map(|e| normalize_extension(e.as_ref())).collect();
        self
    }

    /// Never yield this file, e.g. the output destination living inside the root.
    pub fn exclude_file(mut self, path: &Path) -> Self {
        if let (Some(name), Ok(canonical)) = (path.file_name(), path.canonicalize()) {
            self.excluded = Some((name.to_os_string(), canonical));
        }
        self
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }

    pub fn into_stats(self) -> ScanStats {
        self.stats
    }

    pub fn walk(&mut self, interrupt: &Interrupt) -> Result<Vec<Candidate>> {
        let rules = SkipRules::new()?;
        let mut candidates = Vec::new();

        let mut entries =
            WalkDir::new(&self.root).follow_links(false).sort_by_file_name().into_iter();
        while let Some(next) = entries.next() {
            interrupt.check()?;

            let entry = match next {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("skipping unreadable entry: {err}");
                    self.stats.files_unreadable += 1;
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let file_type = entry.file_type();
            if file_type.is_dir() {
                if rules.is_skipped_dir(&name) {
                    tracing::debug!(dir = %entry.path().display(), "skipping directory");
                    self.stats.dirs_skipped += 1;
                    entries.skip_current_dir();
                }
                continue;
            }

            if file_type.is_symlink() {
                match std::fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => {}
                    Ok(_) => continue,
                    Err(err) => {
                        tracing::debug!(
                            path = %entry.path().display(),
                            "skipping broken link: {err}"
                        );
                        self.stats.files_unreadable += 1;
                        continue;
                    }
                }
            } else if !file_type.is_file() {
                continue;
            }
            self.stats.files_seen += 1;

            // A file named like a skipped directory (`.env`, `bin`) is a skipped segment too.
            if rules.is_skipped_dir(&name) || rules.is_skipped_file(&name) {
                self.stats.files_skipped_name += 1;
                continue;
            }
            if !self.extension_allowed(&name) {
                self.stats.files_skipped_extension += 1;
                continue;
            }
            if self.is_excluded(entry.path()) {
                tracing::debug!(path = %entry.path().display(), "skipping output destination");
                continue;
            }

            let relative = match entry.path().strip_prefix(&self.root) {
                Ok(rel) => normalize_path(rel),
                Err(_) => continue,
            };
            candidates.push(Candidate {
                absolute_path: entry.path().to_path_buf(),
                relative_path: relative,
            });
        }

        tracing::debug!(
            candidates = candidates.len(),
            seen = self.stats.files_seen,
            dirs_skipped = self.stats.dirs_skipped,
            "walk finished"
        );
        Ok(candidates)
    }

    fn extension_allowed(&self, name: &str) -> bool {
        match file_suffix(name) {
            None => true,
            Some(ext) => self.extensions.contains(&ext.to_lowercase()),
        }
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Some((name, canonical)) = &self.excluded else {
            return false;
        };
        path.file_name() == Some(name.as_os_str())
            && path.canonicalize().map(|p| &p == canonical).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::{FileWalker, SkipRules};
    use crate::interrupt::Interrupt;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(path, content).expect("write");
    }

    fn walk(walker: &mut FileWalker) -> Vec<String> {
        walker
            .walk(&Interrupt::new())
            .expect("walk")
            .into_iter()
            .map(|c| c.relative_path)
            .collect()
    }

    #[test]
    fn skips_dependency_directories() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "node_modules/x.js", "x");
        touch(tmp.path(), "src/x.js", "x");

        let mut walker = FileWalker::new(tmp.path());
        assert_eq!(walk(&mut walker), vec!["src/x.js"]);
        assert_eq!(walker.stats().dirs_skipped, 1);
    }

    #[test]
    fn skip_dirs_match_whole_segments_only() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "buildtools/a.py", "a");
        touch(tmp.path(), "src/build/b.py", "b");
        touch(tmp.path(), "my_venv/c.py", "c");
        touch(tmp.path(), "src/target_util.rs", "d");

        let mut walker = FileWalker::new(tmp.path());
        assert_eq!(walk(&mut walker), vec!["buildtools/a.py", "src/target_util.rs"]);
    }

    #[test]
    fn extensionless_files_bypass_allow_list() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "Makefile", "all:\n");
        touch(tmp.path(), "Dockerfile", "FROM scratch\n");
        touch(tmp.path(), "main.py", "print(1)\n");
        touch(tmp.path(), "lib.rs", "fn x() {}\n");

        let mut walker = FileWalker::new(tmp.path()).extensions([".rs"]);
        assert_eq!(walk(&mut walker), vec!["Dockerfile", "Makefile", "lib.rs"]);
        assert_eq!(walker.stats().files_skipped_extension, 1);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "Upper.PY", "x");
        touch(tmp.path(), "image.png", "x");

        let mut walker = FileWalker::new(tmp.path()).extensions(["PY"]);
        assert_eq!(walk(&mut walker), vec!["Upper.PY"]);
    }

    #[test]
    fn skips_lockfiles_and_os_metadata() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "package-lock.json", "{}");
        touch(tmp.path(), ".DS_Store", "");
        touch(tmp.path(), ".gitignore", "target\n");
        touch(tmp.path(), "package.json", "{}");

        let mut walker = FileWalker::new(tmp.path());
        assert_eq!(walk(&mut walker), vec!["package.json"]);
        assert_eq!(walker.stats().files_skipped_name, 3);
    }

    #[test]
    fn excluded_destination_is_not_a_candidate() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "codebase-context.txt", "previous run");
        touch(tmp.path(), "notes.txt", "keep");

        let mut walker =
            FileWalker::new(tmp.path()).exclude_file(&tmp.path().join("codebase-context.txt"));
        assert_eq!(walk(&mut walker), vec!["notes.txt"]);
    }

    #[test]
    fn files_named_like_skip_dirs_are_skipped() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), ".env", "SECRET=1\n");
        touch(tmp.path(), "env", "PATH=/bin\n");
        touch(tmp.path(), "config/.env", "TOKEN=2\n");
        touch(tmp.path(), "main.py", "print(1)\n");

        let mut walker = FileWalker::new(tmp.path());
        assert_eq!(walk(&mut walker), vec!["main.py"]);
        assert_eq!(walker.stats().files_skipped_name, 3);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_counted_and_skipped() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "a.py", "a");
        touch(tmp.path(), "z.py", "z");
        std::os::unix::fs::symlink(tmp.path().join("gone.py"), tmp.path().join("link.py"))
            .expect("symlink");

        let mut walker = FileWalker::new(tmp.path());
        assert_eq!(walk(&mut walker), vec!["a.py", "z.py"]);
        assert_eq!(walker.stats().files_unreadable, 1);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_does_not_abort_walk() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "a.py", "a");
        touch(tmp.path(), "locked/hidden.py", "h");
        touch(tmp.path(), "z.py", "z");
        let locked = tmp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

        // Permission bits do not apply to root.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");
            return;
        }

        let mut walker = FileWalker::new(tmp.path());
        let result = walker.walk(&Interrupt::new());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");

        let found: Vec<String> =
            result.expect("walk").into_iter().map(|c| c.relative_path).collect();
        assert_eq!(found, vec!["a.py", "z.py"]);
        assert_eq!(walker.stats().files_unreadable, 1);
    }

    #[test]
    fn interrupted_walk_stops() {
        let tmp = TempDir::new().expect("tmp");
        touch(tmp.path(), "a.py", "a");
        let interrupt = Interrupt::new();
        interrupt.trigger();

        let mut walker = FileWalker::new(tmp.path());
        assert!(walker.walk(&interrupt).is_err());
    }

    #[test]
    fn skip_rules_cover_glob_segments() {
        let rules = SkipRules::new().expect("rules");
        assert!(rules.is_skipped_dir(".git"));
        assert!(rules.is_skipped_dir("project_venv"));
        assert!(!rules.is_skipped_dir("venvs"));
        assert!(!rules.is_skipped_dir("src"));
        assert!(rules.is_skipped_file("yarn.lock"));
        assert!(!rules.is_skipped_file("Cargo.lock"));
    }
}
