//! Context generation: scan, select, render, write

use anyhow::Result;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::domain::{normalize_extension, Config};
use crate::error::ContextError;
use crate::interrupt::Interrupt;
use crate::rank::select_files;
use crate::render::{render_context, root_name, RenderOptions};
use crate::scan::{scan_codebase, FileWalker};
use crate::utils::{format_with_commas, write_atomic};

#[derive(Args)]
pub struct GenerateArgs {
    /// Path to codebase
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Output file name [default: codebase-context.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum tokens to include [default: 100000]
    #[arg(short, long, value_name = "TOKENS")]
    pub max_tokens: Option<usize>,

    /// Exclude directory tree structure
    #[arg(long)]
    pub no_tree: bool,

    /// Custom file extensions to include (e.g., .py .js .txt)
    #[arg(short, long, value_name = "EXT", num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Priority files to include first (relative paths)
    #[arg(short, long, value_name = "PATH", num_args = 1..)]
    pub priority: Option<Vec<String>>,

    /// Path to config file (codebase-context.toml or .codebase-context.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Omit the generation timestamp for reproducible output
    #[arg(long)]
    pub no_timestamp: bool,
}

pub fn run(args: GenerateArgs, interrupt: &Interrupt) -> Result<()> {
    let root = args.path.clone();
    if !root.exists() {
        return Err(ContextError::PathNotFound(root).into());
    }

    let file_config = load_config(&root, args.config.as_deref())?;
    let cli_overrides = CliOverrides {
        output: args.output.clone(),
        max_tokens: args.max_tokens,
        include_tree: if args.no_tree { Some(false) } else { None },
        extensions: args
            .extensions
            .as_ref()
            .map(|exts| exts.iter().filter_map(|e| normalize_extension(e)).collect()),
        priority: args.priority.clone(),
        timestamp: if args.no_timestamp { Some(false) } else { None },
    };
    let config = merge_cli_with_config(file_config, cli_overrides);
    tracing::debug!(?config, "effective configuration");

    generate_context_file(&root, &config, interrupt)
}

/// Run the whole pipeline for `root` and write the artifact to `config.output`.
pub fn generate_context_file(root: &Path, config: &Config, interrupt: &Interrupt) -> Result<()> {
    println!("🔍 Scanning codebase at: {}", root.display());

    let walker = FileWalker::new(root)
        .extensions(config.extensions.iter())
        .exclude_file(&config.output);
    let progress = scan_progress();
    let scan = scan_codebase(walker, interrupt, &progress)?;
    tracing::info!(
        files_seen = scan.stats.files_seen,
        dirs_skipped = scan.stats.dirs_skipped,
        skipped_name = scan.stats.files_skipped_name,
        skipped_extension = scan.stats.files_skipped_extension,
        unreadable = scan.stats.files_unreadable,
        "scan complete"
    );

    println!(
        "📊 Found {} files (~{} tokens)",
        scan.len(),
        format_with_commas(scan.total_estimated_tokens() as u64)
    );

    let selection = select_files(scan, config.max_tokens, &config.priority);
    if selection.budget_exhausted() {
        println!(
            "{}",
            style(format!(
                "⚠️  Reached token limit. Including {}/{} files",
                selection.files.len(),
                selection.candidate_count
            ))
            .yellow()
        );
    }

    let options = RenderOptions {
        root,
        root_name: root_name(root),
        budget: config.max_tokens,
        include_tree: config.include_tree,
        generated_at: config
            .timestamp
            .then(|| chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
    };
    let rendered = render_context(&selection, &options);

    interrupt.check()?;
    write_atomic(&config.output, &rendered, interrupt)?;

    println!(
        "{}",
        style(format!("✅ Context file generated: {}", config.output.display())).green()
    );
    println!(
        "📝 Included {} files with ~{} tokens",
        selection.files.len(),
        format_with_commas(selection.included_tokens as u64)
    );

    if selection.budget_exhausted() {
        println!();
        println!(
            "{}",
            style(format!(
                "⚠️  {} files were excluded due to token limit",
                selection.excluded_count()
            ))
            .yellow()
        );
        println!(
            "💡 Consider increasing --max-tokens or using --priority to include specific files"
        );
    }

    Ok(())
}

fn scan_progress() -> ProgressBar {
    let progress = ProgressBar::new_spinner();
    if let Ok(spinner) = ProgressStyle::with_template("{spinner} Reading {pos}/{len} {wide_msg}") {
        progress.set_style(spinner);
    }
    progress
}

#[cfg(test)]
mod tests {
    use super::generate_context_file;
    use crate::domain::Config;
    use crate::interrupt::Interrupt;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(out: &TempDir, max_tokens: usize) -> Config {
        Config {
            output: out.path().join("ctx.txt"),
            max_tokens,
            timestamp: false,
            ..Config::default()
        }
    }

    #[test]
    fn writes_selected_files_only() {
        let repo = TempDir::new().expect("repo");
        let out = TempDir::new().expect("out");
        fs::write(repo.path().join("a.py"), "a".repeat(40)).expect("write a");
        fs::write(repo.path().join("b.py"), "b".repeat(4000)).expect("write b");

        let config = config_for(&out, 500);
        generate_context_file(repo.path(), &config, &Interrupt::new()).expect("generate");

        let rendered = fs::read_to_string(&config.output).expect("read output");
        assert!(rendered.contains("FILE: a.py\n"));
        assert!(!rendered.contains("FILE: b.py\n"));
        assert!(rendered.contains("# Actual Tokens: ~10\n"));
    }

    #[test]
    fn interrupted_run_leaves_no_output() {
        let repo = TempDir::new().expect("repo");
        let out = TempDir::new().expect("out");
        fs::write(repo.path().join("a.py"), "print(1)\n").expect("write");

        let interrupt = Interrupt::new();
        interrupt.trigger();
        let config = config_for(&out, 1000);
        let err = generate_context_file(repo.path(), &config, &interrupt).expect_err("cancelled");

        assert_eq!(err.to_string(), "Operation cancelled by user");
        assert!(!config.output.exists());
    }
}
