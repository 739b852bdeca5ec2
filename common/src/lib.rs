//! # ipbrute common
//!
//! Models and input handling shared by the search engine and the CLI:
//!
//! * **[`network`]**: IPv4 subnets, their iteration and the target parser.
//! * **[`hashes`]**: the immutable set of digests being searched for.
//! * **[`error`]**: input errors raised before any search begins.
//! * **[`config`]**: runtime options filled in by the CLI.

pub mod config;
pub mod error;
pub mod hashes;
pub mod log;
pub mod network;

#[doc(hidden)]
pub use tracing as __tracing;
