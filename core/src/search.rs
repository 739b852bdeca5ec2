//! # Search Task
//!
//! Walks one subnet in increasing order, digests every address and reports the
//! ones whose digest is in the target set.
//!
//! A search has no side effects besides the matches it emits, so running it
//! twice over the same inputs gives the same matches in the same order.

use std::fmt;
use std::net::Ipv4Addr;

use ipbrute_common::error::InputError;
use ipbrute_common::hashes::TargetSet;
use ipbrute_common::network::subnet::Subnet;

use crate::digest::AddressDigest;

/// An address whose digest is in the target set.
///
/// A hash collision is indistinguishable from a true preimage here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Match {
    pub hash: String,
    pub addr: Ipv4Addr,
}

impl fmt::Display for Match {
    /// The persisted form, `<hex-hash>=<dotted-decimal>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.hash, self.addr)
    }
}

/// What a single search visited and found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub addresses: u64,
    pub matches: u64,
}

/// Searches `subnet`, handing every match to `on_match` as it is found.
pub fn search_with<D, F>(
    subnet: &Subnet,
    targets: &TargetSet,
    digest: &D,
    mut on_match: F,
) -> TaskSummary
where
    D: AddressDigest + ?Sized,
    F: FnMut(Match),
{
    let mut summary = TaskSummary::default();

    for addr in subnet.iter() {
        summary.addresses += 1;

        let hash = digest.digest(addr);
        if targets.contains(&hash) {
            summary.matches += 1;
            on_match(Match { hash, addr });
        }
    }

    summary
}

/// Searches `subnet` and collects the matches in address order.
pub fn search<D>(subnet: &Subnet, targets: &TargetSet, digest: &D) -> Vec<Match>
where
    D: AddressDigest + ?Sized,
{
    let mut matches = Vec::new();
    search_with(subnet, targets, digest, |m| matches.push(m));
    matches
}

/// Parses `cidr` and searches it. A bad CIDR fails before any address is hashed.
pub fn search_cidr<D>(cidr: &str, targets: &TargetSet, digest: &D) -> Result<Vec<Match>, InputError>
where
    D: AddressDigest + ?Sized,
{
    let subnet: Subnet = cidr.parse()?;
    Ok(search(&subnet, targets, digest))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
