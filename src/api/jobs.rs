//! Job status and result endpoints.

use crate::client::CodeDxClient;
use crate::error::Result;
use crate::models::Job;
use crate::response::ContentType;

/// Jobs endpoint group.
#[derive(Debug, Clone)]
pub struct Jobs {
    client: CodeDxClient,
}

impl Jobs {
    pub fn new(client: CodeDxClient) -> Self {
        Self { client }
    }

    /// Query the current status of a job.
    #[tracing::instrument(skip(self))]
    pub async fn status(&self, job_id: &str) -> Result<Job> {
        let path = format!("api/jobs/{}", urlencoding::encode(job_id));
        self.client.get(&path).await?.json()
    }

    /// Fetch the result of a completed job, negotiating the given content
    /// type. The response body must match it exactly.
    #[tracing::instrument(skip(self))]
    pub async fn result(&self, job_id: &str, content_type: ContentType) -> Result<Vec<u8>> {
        let path = format!("api/jobs/{}/result", urlencoding::encode(job_id));
        self.client
            .download(&path, content_type)
            .await?
            .content(content_type)
    }
}
