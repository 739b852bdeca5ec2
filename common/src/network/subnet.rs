//! # IPv4 Subnet Model
//!
//! A [`Subnet`] is a CIDR block: a base address plus a prefix length. It is the
//! unit of work handed to search workers, and the [`SubnetIter`] walks its
//! addresses in increasing order.
//!
//! Iteration stops the first time the successor of the current address falls
//! outside the subnet. Incrementing `255.255.255.255` carries out of the 32-bit
//! space and wraps to `0.0.0.0`, which `0.0.0.0/0` still contains, so a carried
//! successor is never treated as contained.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::{InputError, Result};

/// A contiguous, inclusive block of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subnet {
    base: Ipv4Addr,
    prefix: u8,
}

impl Subnet {
    /// Creates the subnet of `prefix` bits containing `addr`.
    ///
    /// Host bits of `addr` are cleared, so `10.0.0.7/24` becomes `10.0.0.0/24`.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self> {
        let network = Ipv4Network::new(addr, prefix).map_err(|e| InputError::InvalidTarget {
            input: format!("{addr}/{prefix}"),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base: network.network(),
            prefix,
        })
    }

    /// A single-address subnet.
    pub fn host(addr: Ipv4Addr) -> Self {
        Self {
            base: addr,
            prefix: 32,
        }
    }

    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// The highest address in the subnet.
    pub fn last(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !self.mask())
    }

    /// Number of addresses, `2^(32 - prefix)`.
    pub fn len(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    /// Always false, a subnet holds at least its base address.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & self.mask() == u32::from(self.base)
    }

    pub fn iter(&self) -> SubnetIter {
        SubnetIter {
            subnet: *self,
            next: Some(self.base),
            remaining: self.len(),
        }
    }

    /// Partitions the subnet into its `/split` sub-subnets, in address order.
    ///
    /// A `/24` split into `/26` yields four blocks. Splitting into the subnet's
    /// own prefix yields the subnet itself.
    pub fn split(&self, split: u8) -> Result<impl Iterator<Item = Subnet> + use<>> {
        if split < self.prefix || split > 32 {
            return Err(InputError::InvalidSplit {
                prefix: self.prefix,
                split,
            });
        }

        let base = u64::from(u32::from(self.base));
        let count = 1u64 << (split - self.prefix);
        let step = 1u64 << (32 - u32::from(split));

        Ok((0..count).map(move |i| Subnet {
            base: Ipv4Addr::from((base + i * step) as u32),
            prefix: split,
        }))
    }

    fn mask(&self) -> u32 {
        if self.prefix == 0 {
            0
        } else {
            u32::MAX << (32 - u32::from(self.prefix))
        }
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

impl FromStr for Subnet {
    type Err = InputError;

    /// Parses CIDR notation like "192.168.1.0/24".
    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: String| InputError::InvalidTarget {
            input: s.to_string(),
            reason,
        };

        let Some((ip_str, prefix_str)) = s.trim().split_once('/') else {
            return Err(invalid("missing '/prefix'".to_string()));
        };

        let addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|e| invalid(format!("invalid IP '{ip_str}': {e}")))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|e| invalid(format!("invalid prefix '{prefix_str}': {e}")))?;

        Subnet::new(addr, prefix)
    }
}

impl IntoIterator for Subnet {
    type Item = Ipv4Addr;
    type IntoIter = SubnetIter;

    fn into_iter(self) -> SubnetIter {
        self.iter()
    }
}

impl IntoIterator for &Subnet {
    type Item = Ipv4Addr;
    type IntoIter = SubnetIter;

    fn into_iter(self) -> SubnetIter {
        self.iter()
    }
}

/// Increments `addr` with carry across all four octets.
///
/// Wraps at the top of the address space; the flag reports that the carry
/// left the 32-bit space.
pub fn successor(addr: Ipv4Addr) -> (Ipv4Addr, bool) {
    let (next, carried) = u32::from(addr).overflowing_add(1);
    (Ipv4Addr::from(next), carried)
}

/// Lazy, increasing walk over a [`Subnet`].
#[derive(Debug, Clone)]
pub struct SubnetIter {
    subnet: Subnet,
    next: Option<Ipv4Addr>,
    remaining: u64,
}

impl Iterator for SubnetIter {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Ipv4Addr> {
        let current = self.next?;
        self.remaining -= 1;

        let (succ, carried) = successor(current);
        self.next = (!carried && self.subnet.contains(succ)).then_some(succ);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = usize::try_from(self.remaining).ok();
        (exact.unwrap_or(usize::MAX), exact)
    }

    fn nth(&mut self, n: usize) -> Option<Ipv4Addr> {
        let current = self.next?;

        if n as u64 >= self.remaining {
            self.next = None;
            self.remaining = 0;
            return None;
        }

        self.next = Some(Ipv4Addr::from(u32::from(current) + n as u32));
        self.remaining -= n as u64;
        self.next()
    }

    /// # Panics
    ///
    /// If the remaining length does not fit in `usize`, as for `0.0.0.0/0`
    /// on 32-bit targets.
    fn count(self) -> usize {
        match usize::try_from(self.remaining) {
            Ok(count) => count,
            Err(_) => panic!("{} addresses left in {}, more than usize holds", self.remaining, self.subnet),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
