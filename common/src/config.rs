use std::num::NonZeroUsize;

/// Jobs never cover more than a /16 unless the caller asks for it.
pub const DEFAULT_SPLIT_PREFIX: u8 = 16;

pub struct Config {
    /// Number of search workers.
    pub workers: usize,
    /// Prefix length every target subnet is split into before submission.
    pub split_prefix: u8,
    /// 0 prints everything, 1 drops decoration, 2 only reports matches.
    pub quiet: u8,
    pub no_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            split_prefix: DEFAULT_SPLIT_PREFIX,
            quiet: 0,
            no_banner: false,
        }
    }
}

/// One worker per available core.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
