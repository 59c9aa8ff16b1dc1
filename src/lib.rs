//! codebase-context: pack a source tree into one token-budgeted text file
//!
//! The pipeline walks a directory, reads every candidate file permissively,
//! ranks the files (priority paths first, then smallest first), keeps the
//! longest prefix that fits the token budget and renders it as a single
//! context document for LLM prompts.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod interrupt;
pub mod rank;
pub mod render;
pub mod scan;
pub mod utils;
