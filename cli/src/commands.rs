pub mod crack;
pub mod hash;

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use ipbrute_common::config::DEFAULT_SPLIT_PREFIX;
use ipbrute_common::network::target::Target;

#[derive(Parser)]
#[command(name = "ipbrute")]
#[command(about = "Recovers IPv4 addresses from leaked digests of their text form.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output: -q drops decoration, -qq also drops progress and summary
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the target address space for addresses matching a hash list
    #[command(alias = "c")]
    Crack {
        /// IPv4 address, CIDR block, or a comma-separated list of both
        target: Target,

        /// File with one hex digest per line
        #[arg(short = 'H', long)]
        hashes: PathBuf,

        /// File every match is appended to as `<hash>=<ip>`
        #[arg(short, long, default_value = "matches.txt")]
        output: PathBuf,

        /// Number of search workers [default: one per core]
        #[arg(short, long)]
        workers: Option<usize>,

        /// Prefix length the target is split into, one job per block
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_SPLIT_PREFIX,
            value_parser = clap::value_parser!(u8).range(0..=32)
        )]
        split: u8,
    },
    /// Print the digest of one or more addresses
    #[command(alias = "h")]
    Hash {
        #[arg(required = true)]
        addrs: Vec<Ipv4Addr>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
