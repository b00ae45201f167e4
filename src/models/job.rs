//! Job model and status handling.

use serde::{Deserialize, Serialize};

/// Server-tracked handle for an asynchronous operation.
///
/// A job is created by a submission call (report generation, scan upload,
/// analysis run, bulk status update) and only ever changes by re-fetching
/// it from the server. The one local mutation is the initial seed: a
/// submission response that carries no `status` field deserializes with
/// [`JobStatus::Unknown`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Server-assigned job identifier.
    pub job_id: String,

    /// Last known status; replaced wholesale on every poll.
    #[serde(default)]
    pub status: JobStatus,
}

impl Job {
    /// Seed a job handle whose status has not been reported yet.
    pub fn submitted(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Unknown,
        }
    }

    /// Whether the server has finished working on this job, successfully
    /// or not.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

/// Lifecycle states reported by the job status endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
    /// Not yet reported by the server, or a status this client does not
    /// recognize.
    #[default]
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response to starting an analysis run.
///
/// Carries the job to poll plus the analysis id the final details are
/// keyed by. The analysis id is fixed at submission time; it is never
/// re-derived from a polled job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisJob {
    /// Identifier of the analysis this run will produce.
    pub analysis_id: u64,

    #[serde(flatten)]
    pub job: Job,
}
