//! # ipbrute core
//!
//! The enumeration-and-match engine. A search walks every address of a
//! [`Subnet`](ipbrute_common::network::subnet::Subnet), digests its
//! dotted-decimal form and checks the digest against an immutable
//! [`TargetSet`](ipbrute_common::hashes::TargetSet).
//!
//! * **[`digest`]**: address digest functions.
//! * **[`search`]**: the single-subnet search task.
//! * **[`pool`]**: workers running search tasks over a shared job queue.
//! * **[`sink`]**: draining and persisting matches.

pub mod digest;
pub mod error;
pub mod pool;
pub mod search;
pub mod sink;
