mod commands;
mod terminal;

use commands::{CommandLine, Commands, crack, hash};
use ipbrute_common::config::{self, Config};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let mut cfg = Config {
        quiet: commands.quiet,
        no_banner: commands.no_banner,
        ..Config::default()
    };

    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Crack {
            target,
            hashes,
            output,
            workers,
            split,
        } => {
            cfg.workers = workers.unwrap_or_else(config::default_workers);
            cfg.split_prefix = split;
            print::header("getting ready for the search", cfg.quiet);
            crack::crack(target, &hashes, &output, &cfg).await
        }
        Commands::Hash { addrs } => {
            print::header("digests", cfg.quiet);
            hash::hash(&addrs, &cfg);
            Ok(())
        }
    }
}
