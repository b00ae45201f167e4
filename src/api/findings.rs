//! Finding query and triage endpoints.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::CodeDxClient;
use crate::error::Result;
use crate::models::{FindingStatus, Job};

#[derive(Deserialize)]
struct FindingCount {
    count: u64,
}

/// Findings endpoint group.
#[derive(Debug, Clone)]
pub struct Findings {
    client: CodeDxClient,
}

impl Findings {
    pub fn new(client: CodeDxClient) -> Self {
        Self { client }
    }

    /// Fetch metadata for a finding. `expand` names optional response
    /// sections (e.g. `descriptions`, `triage-time`) to include.
    #[tracing::instrument(skip(self))]
    pub async fn finding(&self, finding_id: u64, expand: &[&str]) -> Result<Value> {
        let mut path = format!("api/findings/{finding_id}");
        if !expand.is_empty() {
            path.push_str("?expand=");
            path.push_str(&expand.join(","));
        }
        self.client.get(&path).await?.json()
    }

    /// Count the findings in a project matching the given filter.
    #[tracing::instrument(skip(self, filter))]
    pub async fn count(&self, project_id: u64, filter: Value) -> Result<u64> {
        let path = format!("api/projects/{project_id}/findings/count");
        let counted: FindingCount = self
            .client
            .post(&path, &json!({ "filter": filter }))
            .await?
            .json()?;
        Ok(counted.count)
    }

    /// Apply a triage status to every finding matching the filter. The
    /// update runs asynchronously; the returned job tracks it.
    #[tracing::instrument(skip(self, filter))]
    pub async fn bulk_status_update(
        &self,
        project_id: u64,
        status: FindingStatus,
        filter: Value,
    ) -> Result<Job> {
        let path = format!("api/projects/{project_id}/bulk-status-update");
        self.client
            .post(&path, &json!({ "filter": filter, "status": status }))
            .await?
            .json()
    }
}
