//! Bulk finding triage.

use serde_json::Value;

use crate::api::{Findings, Jobs};
use crate::client::CodeDxClient;
use crate::error::Result;
use crate::models::{FindingStatus, Job};
use crate::poll::JobPoller;

/// Applies a triage status to a filtered set of findings and waits for
/// the server to finish the update.
#[derive(Debug, Clone)]
pub struct TriageWorkflow {
    findings: Findings,
    poller: JobPoller,
}

impl TriageWorkflow {
    pub fn new(client: &CodeDxClient) -> Self {
        Self {
            findings: Findings::new(client.clone()),
            poller: JobPoller::new(Jobs::new(client.clone())),
        }
    }

    /// Replace the default poller, e.g. to shorten the budget or attach a
    /// cancellation token.
    #[must_use]
    pub fn with_poller(mut self, poller: JobPoller) -> Self {
        self.poller = poller;
        self
    }

    /// Update the status of every finding in the project matching
    /// `filter`, waiting for the bulk update job to complete.
    #[tracing::instrument(skip(self, filter))]
    pub async fn update_statuses(
        &self,
        project_id: u64,
        status: FindingStatus,
        filter: Value,
    ) -> Result<Job> {
        let job = self
            .findings
            .bulk_status_update(project_id, status, filter)
            .await?;
        let job = self
            .poller
            .wait(job, "Waiting for statuses to update.")
            .await?;
        tracing::info!(project_id, status = %status, "bulk status update complete");
        Ok(job)
    }
}
