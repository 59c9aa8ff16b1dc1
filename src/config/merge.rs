//! CLI argument merging with config

use crate::domain::Config;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub output: Option<PathBuf>,
    pub max_tokens: Option<usize>,
    pub include_tree: Option<bool>,
    pub extensions: Option<BTreeSet<String>>,
    pub priority: Option<Vec<String>>,
    pub timestamp: Option<bool>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(output) = cli.output {
        base_config.output = output;
    }
    if let Some(max_tokens) = cli.max_tokens {
        base_config.max_tokens = max_tokens;
    }
    if let Some(include_tree) = cli.include_tree {
        base_config.include_tree = include_tree;
    }
    if let Some(extensions) = cli.extensions {
        base_config.extensions = extensions;
    }
    if let Some(priority) = cli.priority {
        base_config.priority = priority;
    }
    if let Some(timestamp) = cli.timestamp {
        base_config.timestamp = timestamp;
    }

    base_config
}
