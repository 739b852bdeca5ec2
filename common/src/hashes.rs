//! # Target Hash Set
//!
//! The set of hex-encoded digests the search is trying to invert.
//!
//! A [`TargetSet`] is built once from the hash list before any worker starts,
//! then shared behind an `Arc`. It exposes no way to insert or remove entries,
//! so workers read it concurrently without locks.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::debug;
use crate::error::{InputError, Result};

/// Immutable set of lower-case hex digests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    hashes: HashSet<String>,
}

impl TargetSet {
    /// Builds a set from hex strings, trimming and lower-casing each entry.
    ///
    /// Duplicates collapse. No validation happens here, see
    /// [`TargetSet::from_reader`] for the checked path.
    pub fn new<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hashes = hashes
            .into_iter()
            .map(|hash| hash.as_ref().trim().to_ascii_lowercase())
            .collect();

        Self { hashes }
    }

    /// Reads one hex digest per line.
    ///
    /// Whitespace around each line is trimmed, blank lines and `#` comments
    /// are skipped. Any other line must be hex, otherwise the whole read fails
    /// with the offending line number.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut hashes = HashSet::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let hash = line.trim();

            if hash.is_empty() || hash.starts_with('#') {
                continue;
            }

            if !is_hex(hash) {
                return Err(InputError::InvalidHash {
                    line: idx + 1,
                    value: hash.to_string(),
                });
            }

            debug!("loading hash: {hash}");
            hashes.insert(hash.to_ascii_lowercase());
        }

        Ok(Self { hashes })
    }

    /// Opens and reads a hash-list file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Expects a lower-case hex digest, as produced by the digest functions.
    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hashes.iter().map(String::as_str)
    }

    /// Entries whose length is not `width` hex characters, sorted.
    ///
    /// A digest of one algorithm always has the same width, so these can never
    /// match and usually point at a truncated or foreign hash list.
    pub fn off_width(&self, width: usize) -> Vec<&str> {
        let mut odd: Vec<&str> = self.iter().filter(|hash| hash.len() != width).collect();
        odd.sort_unstable();
        odd
    }
}

impl<S: AsRef<str>> FromIterator<S> for TargetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
