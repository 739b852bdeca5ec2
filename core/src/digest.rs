//! Address digest functions.
//!
//! Digests are always computed over the dotted-decimal text of an address
//! ("192.168.1.1"), never over its four raw octets, and returned as lower-case
//! hex so they compare directly against [`TargetSet`] entries.
//!
//! [`TargetSet`]: ipbrute_common::hashes::TargetSet

use std::net::Ipv4Addr;

/// Maps an address to the hex digest of its textual form.
///
/// Implementations must be pure: the same address always yields the same
/// digest.
pub trait AddressDigest: Send + Sync {
    /// Short algorithm name for logs.
    fn name(&self) -> &'static str;

    /// Length of every digest in hex characters.
    fn width(&self) -> usize;

    fn digest(&self, addr: Ipv4Addr) -> String;
}

/// MD5 over the dotted-decimal string. Not a security choice, it is what the
/// leaked hash lists use.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5;

impl AddressDigest for Md5 {
    fn name(&self) -> &'static str {
        "md5"
    }

    fn width(&self) -> usize {
        32
    }

    fn digest(&self, addr: Ipv4Addr) -> String {
        md5_hex(addr)
    }
}

pub fn md5_hex(addr: Ipv4Addr) -> String {
    format!("{:x}", md5::compute(addr.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_known_values() {
        assert_eq!(
            md5_hex(Ipv4Addr::new(127, 0, 0, 1)),
            "f528764d624db129b32c21fbca0cb8d6"
        );
        assert_eq!(
            Md5.digest(Ipv4Addr::new(127, 0, 0, 1)),
            "f528764d624db129b32c21fbca0cb8d6"
        );
    }

    #[test]
    fn test_md5_hashes_text_not_octets() {
        let addr = Ipv4Addr::new(127, 0, 0, 1);
        let raw = format!("{:x}", md5::compute(addr.octets()));
        assert_ne!(md5_hex(addr), raw);
    }

    #[test]
    fn test_digest_is_pure() {
        let addr = Ipv4Addr::new(10, 20, 30, 40);
        let first = Md5.digest(addr);
        for _ in 0..10 {
            assert_eq!(Md5.digest(addr), first);
        }
        assert_eq!(first.len(), Md5.width());
        assert!(first.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }
}
