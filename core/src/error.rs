use ipbrute_common::error::InputError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    /// The job queue was closed before this submission.
    #[error("job queue is closed")]
    Closed,

    /// The job never reached the queue.
    #[error("rejected job: {0}")]
    InvalidJob(#[from] InputError),
}
