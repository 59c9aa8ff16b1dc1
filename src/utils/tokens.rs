//! Token estimation

/// Characters-per-token ratio used for budgeting
pub const BYTES_PER_TOKEN: usize = 4;

/// Rough token estimate: one token per four bytes of text, truncated.
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / BYTES_PER_TOKEN
}
