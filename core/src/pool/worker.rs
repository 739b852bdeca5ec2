use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender};
use ipbrute_common::debug;
use ipbrute_common::hashes::TargetSet;
use ipbrute_common::network::subnet::Subnet;

use super::{JobReport, ProgressCallback};
use crate::digest::AddressDigest;
use crate::search::{self, Match};

/// Running totals of one worker.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct WorkerStats {
    pub jobs: u64,
    pub addresses: u64,
    pub matches: u64,
}

/// One search thread: idle while waiting on the queue, running while it
/// searches a job, terminated once the queue is closed and empty.
pub(super) struct Worker<D: ?Sized> {
    pub id: usize,
    pub jobs: Receiver<Subnet>,
    pub results: Sender<Match>,
    pub targets: Arc<TargetSet>,
    pub digest: Arc<D>,
    pub on_job_done: Option<ProgressCallback>,
    pub live: Arc<AtomicUsize>,
}

impl<D: AddressDigest + ?Sized> Worker<D> {
    pub fn run(self) -> WorkerStats {
        let _alive = LiveGuard(Arc::clone(&self.live));
        let mut stats = WorkerStats::default();

        for subnet in self.jobs.iter() {
            stats.jobs += 1;
            let job = stats.jobs as usize;
            debug!("worker #{} starting job #{job} for {subnet}", self.id);

            // The pool keeps a receiver alive until every worker has joined.
            let summary = search::search_with(&subnet, &self.targets, self.digest.as_ref(), |m| {
                let _ = self.results.send(m);
            });

            stats.addresses += summary.addresses;
            stats.matches += summary.matches;
            debug!("worker #{} finished job #{job} for {subnet}", self.id);

            if let Some(callback) = &self.on_job_done {
                callback(&JobReport {
                    worker: self.id,
                    job,
                    subnet,
                    addresses: summary.addresses,
                    matches: summary.matches,
                });
            }
        }

        debug!("worker #{} terminated after {} jobs", self.id, stats.jobs);
        stats
    }
}

/// Marks the worker as exited, even when a search panics.
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Release);
    }
}
