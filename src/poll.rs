//! Waiting on asynchronous server-side jobs.
//!
//! Report generation, scan uploads, analysis runs and bulk updates all
//! come back as a [`Job`] that the server works on over seconds to
//! minutes. [`JobPoller`] drives the wait loop for any of them: re-fetch
//! status at a fixed interval until the job reaches a terminal state, the
//! polling budget runs out, or the caller cancels.
//!
//! Polling is deliberately coarse: a fixed tick, no backoff, no jitter.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::api::Jobs;
use crate::error::{CodeDxError, Result};
use crate::models::{Job, JobStatus};

/// Timing knobs for the poll loop.
///
/// The defaults match interactive use against a production server: one
/// status fetch per second, for at most ten minutes. Tests inject
/// millisecond values to exercise timeout behavior without wall-clock
/// delay.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Delay between status fetches.
    pub interval: Duration,
    /// Total wall-clock budget before giving up.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(60 * 10),
        }
    }
}

/// Drives the wait-for-completion loop for asynchronous jobs.
///
/// A poller owns the job it is waiting on for the duration of [`wait`];
/// nothing else should poll the same logical job concurrently.
///
/// [`wait`]: JobPoller::wait
#[derive(Debug, Clone)]
pub struct JobPoller {
    jobs: Jobs,
    config: PollConfig,
    cancel: CancellationToken,
}

impl JobPoller {
    /// Poller with default timing and no external cancellation.
    pub fn new(jobs: Jobs) -> Self {
        Self::with_config(jobs, PollConfig::default())
    }

    /// Poller with caller-supplied timing.
    pub fn with_config(jobs: Jobs, config: PollConfig) -> Self {
        Self {
            jobs,
            config,
            // Default token never fires; wait() then blocks until the
            // job resolves or the budget runs out.
            cancel: CancellationToken::new(),
        }
    }

    /// Attach a cancellation token. Cancelling it aborts the wait loop at
    /// the next tick with [`CodeDxError::Cancelled`].
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Wait until the job completes.
    ///
    /// `description` is a human-readable progress message, logged on every
    /// tick. It is advisory only and never affects control flow.
    ///
    /// # Errors
    ///
    /// * [`CodeDxError::JobFailed`] if the server reports the job as
    ///   failed or cancelled
    /// * [`CodeDxError::Timeout`] once the polling budget is exhausted
    /// * [`CodeDxError::Cancelled`] if the caller's token fires
    ///
    /// Never returns a job in a non-terminal state.
    #[tracing::instrument(skip(self, job), fields(job_id = %job.job_id))]
    pub async fn wait(&self, job: Job, description: &str) -> Result<Job> {
        let deadline = Instant::now() + self.config.timeout;
        let mut job = job;

        loop {
            match job.status {
                JobStatus::Completed => {
                    tracing::info!(job_id = %job.job_id, "job completed");
                    return Ok(job);
                }
                JobStatus::Failed | JobStatus::Cancelled => {
                    return Err(CodeDxError::JobFailed {
                        job_id: job.job_id,
                        status: job.status.to_string(),
                    });
                }
                _ => {}
            }

            if Instant::now() >= deadline {
                return Err(CodeDxError::Timeout {
                    description: description.to_string(),
                });
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    return Err(CodeDxError::Cancelled {
                        description: description.to_string(),
                    });
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }

            tracing::info!(job_id = %job.job_id, "{description}");
            job = self.jobs.status(&job.job_id).await?;
        }
    }
}
