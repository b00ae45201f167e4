//! Report generation endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::client::CodeDxClient;
use crate::error::Result;
use crate::models::{Job, ReportRequest};

#[derive(Serialize)]
struct GenerateBody<'a> {
    config: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a Value>,
}

/// Reports endpoint group.
#[derive(Debug, Clone)]
pub struct Reports {
    client: CodeDxClient,
}

impl Reports {
    pub fn new(client: CodeDxClient) -> Self {
        Self { client }
    }

    /// List the report types available for a project, with their
    /// configuration options. The shape varies per server version, so the
    /// value is returned unmodeled.
    #[tracing::instrument(skip(self))]
    pub async fn types(&self, project_id: u64) -> Result<Value> {
        let path = format!("api/projects/{project_id}/report/types");
        self.client.get(&path).await?.json()
    }

    /// Queue a report generation job.
    #[tracing::instrument(skip(self, request), fields(project_id = request.project_id, report_type = %request.report_type))]
    pub async fn generate(&self, request: &ReportRequest) -> Result<Job> {
        let path = format!(
            "api/projects/{}/report/{}",
            request.project_id,
            request.report_type.as_str()
        );
        let body = GenerateBody {
            config: &request.config,
            filter: request.filters.as_ref(),
        };
        self.client.post(&path, &body).await?.json()
    }
}
