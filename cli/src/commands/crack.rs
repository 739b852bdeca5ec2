use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use ipbrute_common::{config::Config, hashes::TargetSet, network::target::Target, success, warn};
use ipbrute_core::digest::{AddressDigest, Md5};
use ipbrute_core::error::PoolError;
use ipbrute_core::pool::{JobReport, PoolOptions, PoolStats, WorkerPool};
use ipbrute_core::sink::{self, DrainSummary, LineSink};
use tracing::Instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{colors, print, progress};

pub async fn crack(target: Target, hashes: &Path, output: &Path, cfg: &Config) -> anyhow::Result<()> {
    let targets = TargetSet::load(hashes)
        .with_context(|| format!("failed to load hash list {}", hashes.display()))?;

    if targets.is_empty() {
        warn!("{} holds no hashes, nothing can match", hashes.display());
    }
    success!("{} unique hashes loaded", targets.len());

    let digest = Arc::new(Md5);
    for hash in targets.off_width(digest.width()) {
        warn!(
            "'{hash}' is {} hex chars, {} digests are {}; it can never match",
            hash.len(),
            digest.name(),
            digest.width()
        );
    }

    let jobs = target
        .jobs(cfg.split_prefix)
        .with_context(|| format!("failed to split {target:?} into /{} jobs", cfg.split_prefix))?;
    let job_count: u64 = target.job_count(cfg.split_prefix);

    let mut line_sink = LineSink::append(output)
        .with_context(|| format!("failed to open {} for appending", output.display()))?;

    print_plan(&target, job_count, output, digest.name(), cfg);

    let span = progress::job_progress(job_count, cfg.quiet);
    let progress_span = span.clone();
    let options = PoolOptions::new(cfg.workers).with_progress(Arc::new(move |_: &JobReport| {
        progress_span.pb_inc(1);
    }));

    let start_time: Instant = Instant::now();
    let (pool, results) = WorkerPool::spawn(options, Arc::new(targets), digest);

    let sink_task = tokio::task::spawn_blocking(move || sink::drain(results, &mut line_sink));

    let stop: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));
    let submit_stop = Arc::clone(&stop);
    let mut search = tokio::task::spawn_blocking(move || -> Result<PoolStats, PoolError> {
        for job in jobs {
            if submit_stop.load(Ordering::Relaxed) {
                break;
            }
            pool.submit(job)?;
        }
        Ok(pool.join())
    });

    let stats: PoolStats = async {
        loop {
            tokio::select! {
                res = &mut search => return anyhow::Ok(res??),
                res = tokio::signal::ctrl_c(), if !stop.load(Ordering::Relaxed) => {
                    res.context("failed to listen for ctrl-c")?;
                    warn!("interrupted, no new jobs will start; finishing queued ones");
                    stop.store(true, Ordering::Relaxed);
                }
            }
        }
    }
    .instrument(span)
    .await?;

    let drained: DrainSummary = sink_task.await?;

    search_ends(&stats, &drained, start_time.elapsed(), output, cfg);

    if drained.failed > 0 {
        anyhow::bail!(
            "{} of {} matches could not be written to {}",
            drained.failed,
            drained.matches,
            output.display()
        );
    }

    Ok(())
}

fn print_plan(target: &Target, jobs: u64, output: &Path, digest: &str, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    let subnets: Vec<String> = target.subnets().iter().map(ToString::to_string).collect();
    let details: [(&str, String); 5] = [
        ("Addresses", target.address_count().to_string()),
        ("Jobs", format!("{jobs} × /{} or smaller", cfg.split_prefix)),
        ("Workers", cfg.workers.to_string()),
        ("Digest", digest.to_string()),
        ("Output", output.display().to_string()),
    ];

    print::set_key_width(std::iter::once("Target").chain(details.iter().map(|(key, _)| *key)));
    print::aligned_line("Target", subnets.join(", ").color(colors::IPV4_ADDR));
    for (key, value) in details {
        print::aligned_line(key, value);
    }
}

fn search_ends(stats: &PoolStats, drained: &DrainSummary, total_time: Duration, output: &Path, cfg: &Config) {
    if cfg.quiet > 1 {
        return;
    }

    if drained.matches == 0 {
        print::header("zero matches", cfg.quiet);
        if cfg.quiet == 0 {
            print::no_results();
        }
    }

    let matches: ColoredString = format!("{} matches", drained.matches).bold().green();
    let addresses: ColoredString = format!("{} addresses", stats.addresses).bold().color(colors::ACCENT);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output_line = format!(
        "Search Complete: {matches} in {addresses} ({} jobs) in {total_time}",
        stats.jobs
    );

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output_line);
            if drained.matches > 0 {
                print::centerln(&format!("written to {}", output.display()));
            }
        }
        _ => success!("{}", output_line),
    }
}
