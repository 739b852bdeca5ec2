//! # Worker Pool
//!
//! A fixed set of OS threads, each pulling [`Subnet`] jobs from a shared queue
//! and running a search task over them until the queue is closed and empty.
//! Every match goes to a single result channel that the caller drains, usually
//! with [`sink::drain`](crate::sink::drain).
//!
//! Hashing is CPU bound and never suspends, so workers are plain threads. The
//! only blocking points are waiting for the next job and handing a match over.
//!
//! The job queue is bounded so a large split does not materialize all at once.
//! The result channel is unbounded so a slow sink never loses matches.
//!
//! There is no mid-job cancellation. To abandon a search, stop submitting and
//! [`close`](WorkerPool::close) the queue; queued and running jobs finish.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use ipbrute_common::hashes::TargetSet;
use ipbrute_common::network::subnet::Subnet;
use ipbrute_common::{debug, error};

use crate::digest::AddressDigest;
use crate::error::PoolError;
use crate::search::Match;

mod worker;

use worker::{Worker, WorkerStats};

/// Called by a worker each time it finishes a job.
pub type ProgressCallback = Arc<dyn Fn(&JobReport) + Send + Sync>;

/// Outcome of one finished job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobReport {
    pub worker: usize,
    /// Per-worker job counter, starting at 1.
    pub job: usize,
    pub subnet: Subnet,
    pub addresses: u64,
    pub matches: u64,
}

#[derive(Clone)]
pub struct PoolOptions {
    pub workers: usize,
    /// Job queue capacity. Defaults to twice the worker count.
    pub queue_capacity: Option<usize>,
    pub on_job_done: Option<ProgressCallback>,
}

impl PoolOptions {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            queue_capacity: None,
            on_job_done: None,
        }
    }

    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_job_done = Some(callback);
        self
    }
}

/// Lifecycle of the pool as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// At least one worker is alive, idle or searching.
    Running,
    /// Every worker has exited but matches are still waiting in the result channel.
    Draining,
    Terminated,
}

/// Totals over every worker, returned by [`WorkerPool::join`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub workers: usize,
    pub jobs: u64,
    pub addresses: u64,
    pub matches: u64,
}

pub struct WorkerPool {
    jobs_tx: Option<Sender<Subnet>>,
    results_rx: Receiver<Match>,
    handles: Vec<JoinHandle<WorkerStats>>,
    live: Arc<AtomicUsize>,
}

impl WorkerPool {
    /// Starts `options.workers` workers (at least one) sharing `targets`.
    ///
    /// Returns the pool and the receiving end of the result channel. The
    /// channel disconnects once every worker has exited.
    pub fn spawn<D>(
        options: PoolOptions,
        targets: Arc<TargetSet>,
        digest: Arc<D>,
    ) -> (Self, Receiver<Match>)
    where
        D: AddressDigest + ?Sized + 'static,
    {
        let workers = options.workers.max(1);
        let capacity = options.queue_capacity.unwrap_or(workers * 2).max(1);

        let (jobs_tx, jobs_rx) = crossbeam_channel::bounded::<Subnet>(capacity);
        let (results_tx, results_rx) = crossbeam_channel::unbounded::<Match>();
        let live = Arc::new(AtomicUsize::new(workers));

        debug!(
            "starting {workers} {} workers, queue capacity {capacity}",
            digest.name()
        );

        let handles = (1..=workers)
            .map(|id| {
                let worker = Worker {
                    id,
                    jobs: jobs_rx.clone(),
                    results: results_tx.clone(),
                    targets: Arc::clone(&targets),
                    digest: Arc::clone(&digest),
                    on_job_done: options.on_job_done.clone(),
                    live: Arc::clone(&live),
                };
                thread::spawn(move || worker.run())
            })
            .collect();

        let pool = Self {
            jobs_tx: Some(jobs_tx),
            results_rx: results_rx.clone(),
            handles,
            live,
        };

        (pool, results_rx)
    }

    /// Queues one job, blocking while the queue is full.
    pub fn submit(&self, job: Subnet) -> Result<(), PoolError> {
        let tx = self.jobs_tx.as_ref().ok_or(PoolError::Closed)?;
        tx.send(job).map_err(|_| PoolError::Closed)
    }

    /// Parses `cidr` and queues it. A malformed CIDR never reaches a worker.
    pub fn submit_cidr(&self, cidr: &str) -> Result<(), PoolError> {
        let job: Subnet = cidr.parse()?;
        self.submit(job)
    }

    /// Signals that no more jobs will be submitted.
    ///
    /// Workers finish whatever is already queued, then exit.
    pub fn close(&mut self) {
        if self.jobs_tx.take().is_some() {
            debug!("job queue closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.jobs_tx.is_none()
    }

    pub fn workers(&self) -> usize {
        self.handles.len()
    }

    /// Jobs waiting in the queue.
    pub fn queued(&self) -> usize {
        self.jobs_tx.as_ref().map_or(0, Sender::len)
    }

    pub fn state(&self) -> PoolState {
        if self.live.load(Ordering::Acquire) > 0 {
            PoolState::Running
        } else if !self.results_rx.is_empty() {
            PoolState::Draining
        } else {
            PoolState::Terminated
        }
    }

    /// Closes the queue if still open and waits for every worker to exit.
    pub fn join(mut self) -> PoolStats {
        self.close();

        let mut stats = PoolStats {
            workers: self.handles.len(),
            ..PoolStats::default()
        };

        for handle in self.handles.drain(..) {
            match handle.join() {
                Ok(worker) => {
                    stats.jobs += worker.jobs;
                    stats.addresses += worker.addresses;
                    stats.matches += worker.matches;
                }
                Err(_) => error!("a search worker panicked"),
            }
        }

        stats
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
