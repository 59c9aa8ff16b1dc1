//! Utility functions

pub mod encoding;
pub mod fs;
pub mod paths;
pub mod tokens;

pub use encoding::read_file_safe;
pub use fs::write_atomic;
pub use paths::{normalize_path, normalize_relative};
pub use tokens::estimate_tokens;

/// Group the digits of `n` in threes, as printed in the token budget header.
pub fn format_with_commas(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}
