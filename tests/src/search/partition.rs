use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::sync::Arc;

use ipbrute_common::hashes::TargetSet;
use ipbrute_common::network::subnet::Subnet;
use ipbrute_core::digest::{Md5, md5_hex};
use ipbrute_core::pool::{PoolOptions, WorkerPool};
use ipbrute_core::search::{self, Match};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random addresses inside `subnet`, plus a few decoy hashes from outside it.
fn random_targets(subnet: &Subnet, seed: u64, count: usize) -> (TargetSet, BTreeSet<Ipv4Addr>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = u32::from(subnet.base());
    let len = subnet.len() as u32;

    let inside: BTreeSet<Ipv4Addr> = (0..count)
        .map(|_| Ipv4Addr::from(base + rng.random_range(0..len)))
        .collect();

    let decoys = [Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(1, 1, 1, 1)];
    let targets: TargetSet = inside
        .iter()
        .chain(decoys.iter())
        .map(|addr| md5_hex(*addr))
        .collect();

    (targets, inside)
}

fn pooled(subnet: &Subnet, targets: &Arc<TargetSet>, split: u8, workers: usize) -> BTreeSet<Match> {
    let (pool, results) = WorkerPool::spawn(PoolOptions::new(workers), Arc::clone(targets), Arc::new(Md5));
    for job in subnet.split(split).unwrap() {
        pool.submit(job).unwrap();
    }
    let stats = pool.join();
    assert_eq!(stats.addresses, subnet.len());

    results.iter().collect()
}

#[test]
fn split_search_matches_single_search() {
    let subnet: Subnet = "10.20.0.0/18".parse().unwrap();
    let (targets, inside) = random_targets(&subnet, 0x1b_2c, 12);
    let targets = Arc::new(targets);

    let single: BTreeSet<Match> = search::search(&subnet, &targets, &Md5).into_iter().collect();
    let found: BTreeSet<Ipv4Addr> = single.iter().map(|m| m.addr).collect();
    assert_eq!(found, inside);

    for (split, workers) in [(18, 1), (20, 3), (24, 4), (26, 8)] {
        assert_eq!(
            pooled(&subnet, &targets, split, workers),
            single,
            "split /{split} over {workers} workers"
        );
    }
}

#[test]
fn repeated_pooled_search_is_idempotent() {
    let subnet: Subnet = "192.168.0.0/20".parse().unwrap();
    let (targets, inside) = random_targets(&subnet, 42, 6);
    let targets = Arc::new(targets);

    let first = pooled(&subnet, &targets, 24, 4);
    let second = pooled(&subnet, &targets, 24, 4);

    assert_eq!(first.len(), inside.len());
    assert_eq!(first, second);
}
