use std::net::Ipv4Addr;

use colored::*;
use ipbrute_common::config::Config;
use ipbrute_core::digest::{AddressDigest, Md5};

use crate::terminal::{colors, print};

/// Prints the digest of every address, the same value `crack` compares against.
pub fn hash(addrs: &[Ipv4Addr], cfg: &Config) {
    let digests: Vec<(String, String)> = addrs
        .iter()
        .map(|addr| (addr.to_string(), Md5.digest(*addr)))
        .collect();

    if cfg.quiet > 0 {
        for (addr, digest) in &digests {
            print::print(&format!("{digest}={addr}"));
        }
        return;
    }

    print::set_key_width(digests.iter().map(|(addr, _)| addr.as_str()));
    for (addr, digest) in digests {
        print::aligned_line(&addr, digest.color(colors::HASH));
    }
}
