//! Input errors.
//!
//! Everything that can go wrong in ipbrute goes wrong here, before the first
//! address is hashed. Once a subnet and a target set exist, the search itself
//! is infallible.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InputError>;

#[derive(Debug, Error)]
pub enum InputError {
    /// A target string that is neither an IPv4 address nor a CIDR block.
    #[error("invalid target '{input}': {reason}")]
    InvalidTarget { input: String, reason: String },

    /// A job prefix shorter than the subnet it should split, or above 32.
    #[error("cannot split a /{prefix} subnet into /{split} jobs")]
    InvalidSplit { prefix: u8, split: u8 },

    /// A hash-list line that is not a hex digest.
    #[error("hash list line {line}: '{value}' is not a hex digest")]
    InvalidHash { line: usize, value: String },

    #[error("failed to read hash list: {0}")]
    Io(#[from] std::io::Error),
}
