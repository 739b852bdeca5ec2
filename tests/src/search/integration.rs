use std::collections::BTreeSet;
use std::io::Cursor;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::thread;

use ipbrute_common::hashes::TargetSet;
use ipbrute_common::network::subnet::Subnet;
use ipbrute_common::network::target::Target;
use ipbrute_core::digest::{Md5, md5_hex};
use ipbrute_core::pool::{PoolOptions, WorkerPool};
use ipbrute_core::search::Match;
use ipbrute_core::sink::{self, LineSink};

/// Runs `jobs` through a pool while a sink thread drains into memory, and
/// returns the persisted text.
fn run_to_lines(targets: TargetSet, jobs: &[&str], workers: usize) -> String {
    let (pool, results) = WorkerPool::spawn(PoolOptions::new(workers), Arc::new(targets), Arc::new(Md5));

    let drain = thread::spawn(move || {
        let mut line_sink = LineSink::new(Vec::new());
        let summary = sink::drain(results, &mut line_sink);
        (summary, line_sink.into_inner())
    });

    for job in jobs {
        pool.submit_cidr(job).unwrap();
    }
    pool.join();

    let (summary, bytes) = drain.join().unwrap();
    assert_eq!(summary.failed, 0);
    String::from_utf8(bytes).unwrap()
}

#[test]
fn localhost_from_hash_list_to_output_line() {
    let hash = md5_hex(Ipv4Addr::new(127, 0, 0, 1));
    let list = format!("  {hash}  \n\n");
    let targets = TargetSet::from_reader(Cursor::new(list)).unwrap();

    let output = run_to_lines(targets, &["127.0.0.0/30"], 2);

    assert_eq!(output, format!("{hash}=127.0.0.1\n"));
}

#[test]
fn empty_target_set_writes_nothing() {
    let output = run_to_lines(TargetSet::default(), &["10.0.0.0/24", "10.0.1.0/24"], 3);
    assert!(output.is_empty());
}

#[test]
fn matches_from_one_job_stay_in_address_order() {
    let addrs = [
        Ipv4Addr::new(192, 168, 7, 3),
        Ipv4Addr::new(192, 168, 7, 90),
        Ipv4Addr::new(192, 168, 7, 254),
    ];
    let targets: TargetSet = addrs.iter().map(|addr| md5_hex(*addr)).collect();

    let output = run_to_lines(targets, &["192.168.7.0/24"], 4);
    let found: Vec<&str> = output
        .lines()
        .filter_map(|line| line.split_once('=').map(|(_, addr)| addr))
        .collect();

    assert_eq!(found, vec!["192.168.7.3", "192.168.7.90", "192.168.7.254"]);
}

#[test]
fn top_of_address_space_is_searched() {
    let targets = TargetSet::new([md5_hex(Ipv4Addr::BROADCAST), md5_hex(Ipv4Addr::new(255, 255, 255, 0))]);
    let output = run_to_lines(targets, &["255.255.255.0/24"], 1);

    assert_eq!(output.lines().count(), 2);
    assert!(output.ends_with("=255.255.255.255\n"));
}

#[test]
fn concurrent_submitters_share_the_queue() {
    let wanted: BTreeSet<Ipv4Addr> = [
        Ipv4Addr::new(10, 1, 0, 10),
        Ipv4Addr::new(10, 1, 3, 77),
        Ipv4Addr::new(10, 2, 0, 5),
        Ipv4Addr::new(10, 2, 3, 200),
    ]
    .into_iter()
    .collect();
    let targets: TargetSet = wanted.iter().map(|addr| md5_hex(*addr)).collect();

    let (pool, results) = WorkerPool::spawn(PoolOptions::new(2), Arc::new(targets), Arc::new(Md5));

    thread::scope(|scope| {
        for block in ["10.1.0.0/22", "10.2.0.0/22"] {
            let pool = &pool;
            scope.spawn(move || {
                let parent: Subnet = block.parse().unwrap();
                for job in parent.split(24).unwrap() {
                    pool.submit(job).unwrap();
                }
            });
        }
    });

    let stats = pool.join();
    let found: BTreeSet<Ipv4Addr> = results.iter().map(|m: Match| m.addr).collect();

    assert_eq!(stats.jobs, 8);
    assert_eq!(stats.addresses, 2048);
    assert_eq!(found, wanted);
}

#[test]
fn target_jobs_feed_the_pool() {
    let target: Target = "172.16.0.0/22, 172.16.9.9".parse().unwrap();
    assert_eq!(target.job_count(24), 5);
    let jobs = target.jobs(24).unwrap();

    let wanted = [Ipv4Addr::new(172, 16, 2, 2), Ipv4Addr::new(172, 16, 9, 9)];
    let targets: TargetSet = wanted.iter().map(|addr| md5_hex(*addr)).collect();

    let (pool, results) = WorkerPool::spawn(PoolOptions::new(3), Arc::new(targets), Arc::new(Md5));
    for job in jobs {
        pool.submit(job).unwrap();
    }
    let stats = pool.join();

    let mut found: Vec<Ipv4Addr> = results.iter().map(|m| m.addr).collect();
    found.sort();
    assert_eq!(found, wanted.to_vec());
    assert_eq!(stats.addresses, 1024 + 1);
}

#[test]
fn overlapping_target_entries_match_once() {
    let target: Target = "10.0.0.0/24, 10.0.0.7, 10.0.0.0/25".parse().unwrap();
    let wanted = Ipv4Addr::new(10, 0, 0, 7);
    let targets = TargetSet::new([md5_hex(wanted)]);

    let (pool, results) = WorkerPool::spawn(PoolOptions::new(4), Arc::new(targets), Arc::new(Md5));
    for job in target.jobs(26).unwrap() {
        pool.submit(job).unwrap();
    }
    let stats = pool.join();

    let found: Vec<Ipv4Addr> = results.iter().map(|m| m.addr).collect();
    assert_eq!(found, vec![wanted]);
    assert_eq!(stats.addresses, 256);
    assert_eq!(stats.jobs, 4);
}
