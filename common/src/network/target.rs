//! # Search Target Model
//!
//! Defines the inputs the CLI accepts as the address space to search.
//!
//! A target can be:
//! * A single IPv4 address (e.g., `10.0.0.1`), searched as a `/32`.
//! * A CIDR block (e.g., `192.168.1.0/24`).
//! * A comma-separated list of the above.
//!
//! Targets are parsed and validated before the worker pool starts, so every
//! parse error surfaces before the first address is hashed. Jobs are then
//! pulled lazily, one [`Subnet`] at a time.

use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::{InputError, Result};
use crate::network::subnet::Subnet;

/// Represents the address space to search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Search a single subnet (a host is a `/32`).
    Subnet { subnet: Subnet },
    /// Holds a list of different targets
    Multi { targets: Vec<Target> },
}

impl FromStr for Target {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.contains(',') {
            return parse_commas(s);
        }

        if let Some(target) = parse_host(s) {
            return Ok(target);
        }

        let subnet = s.parse::<Subnet>()?;
        Ok(Target::Subnet { subnet })
    }
}

impl Target {
    /// Flattens the target into disjoint subnets, in address order.
    ///
    /// CIDR blocks either nest or do not meet, so sorting by base (wider block
    /// first) and dropping every block inside the last kept one leaves each
    /// address covered exactly once.
    pub fn subnets(&self) -> Vec<Subnet> {
        let mut all = Vec::new();
        collect_subnets(self, &mut all);
        all.sort_by_key(|subnet| (subnet.base(), subnet.prefix()));

        let mut subnets: Vec<Subnet> = Vec::with_capacity(all.len());
        for subnet in all {
            match subnets.last() {
                Some(kept) if kept.contains(subnet.base()) => continue,
                _ => subnets.push(subnet),
            }
        }
        subnets
    }

    /// Total number of distinct addresses covered.
    pub fn address_count(&self) -> u64 {
        self.subnets().iter().map(Subnet::len).sum()
    }

    /// Lazily splits every subnet into `/split_prefix` jobs.
    ///
    /// Subnets already narrower than `split_prefix` become a single job. The
    /// prefix is checked up front; no job is built until the iterator is
    /// pulled.
    pub fn jobs(&self, split_prefix: u8) -> Result<impl Iterator<Item = Subnet> + Send + use<>> {
        let parts = self
            .subnets()
            .into_iter()
            .map(|subnet| subnet.split(split_prefix.max(subnet.prefix())))
            .collect::<Result<Vec<_>>>()?;

        Ok(parts.into_iter().flatten())
    }

    /// Number of jobs [`Target::jobs`] yields for `split_prefix`.
    pub fn job_count(&self, split_prefix: u8) -> u64 {
        let split = split_prefix.min(32);
        self.subnets()
            .iter()
            .map(|subnet| 1u64 << (split.max(subnet.prefix()) - subnet.prefix()))
            .sum()
    }
}

fn collect_subnets(target: &Target, subnets: &mut Vec<Subnet>) {
    match target {
        Target::Subnet { subnet } => subnets.push(*subnet),
        Target::Multi { targets } => {
            for target in targets {
                collect_subnets(target, subnets);
            }
        }
    }
}

/// Parses a comma-separated list of targets (e.g., "10.0.0.0/24, 192.168.1.7").
fn parse_commas(s: &str) -> Result<Target> {
    let mut targets = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        targets.push(Target::from_str(part)?);
    }

    if targets.is_empty() {
        return Err(InputError::InvalidTarget {
            input: s.to_string(),
            reason: "no targets in list".to_string(),
        });
    }

    Ok(Target::Multi { targets })
}

/// Parses a single IPv4 address.
fn parse_host(s: &str) -> Option<Target> {
    s.parse::<Ipv4Addr>().ok().map(|addr| Target::Subnet {
        subnet: Subnet::host(addr),
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
