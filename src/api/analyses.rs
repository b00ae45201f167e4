//! Analysis prep and analysis endpoints.

use serde_json::json;

use crate::client::CodeDxClient;
use crate::error::Result;
use crate::models::{Analysis, AnalysisJob, AnalysisPrep, Job};

/// Analysis endpoint group.
#[derive(Debug, Clone)]
pub struct Analyses {
    client: CodeDxClient,
}

impl Analyses {
    pub fn new(client: CodeDxClient) -> Self {
        Self { client }
    }

    /// Create a new analysis prep for a project.
    ///
    /// If Git is configured on the project, the prep initializes with an
    /// input for that configuration.
    #[tracing::instrument(skip(self))]
    pub async fn create_prep(&self, project_id: u64) -> Result<AnalysisPrep> {
        self.client
            .post("api/analysis-prep", &json!({ "projectId": project_id }))
            .await?
            .json()
    }

    /// Fetch the input ids and verification errors of a prep.
    #[tracing::instrument(skip(self))]
    pub async fn prep(&self, prep_id: &str) -> Result<AnalysisPrep> {
        let path = format!("api/analysis-prep/{}", urlencoding::encode(prep_id));
        self.client.get(&path).await?.json()
    }

    /// Upload a scan file to a prep. The server processes the upload
    /// asynchronously; the returned job tracks that processing.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub async fn upload(
        &self,
        prep_id: &str,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        client_request_id: Option<&str>,
    ) -> Result<Job> {
        let path = format!("api/analysis-prep/{}/upload", urlencoding::encode(prep_id));
        self.client
            .upload(&path, file_name, mime_type, bytes, client_request_id)
            .await?
            .json()
    }

    /// Start the analysis for a prep whose verification errors have all
    /// been addressed.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, prep_id: &str) -> Result<AnalysisJob> {
        let path = format!("api/analysis-prep/{}/analyze", urlencoding::encode(prep_id));
        self.client.post(&path, &json!({})).await?.json()
    }

    /// Fetch analysis details, such as start and finish times.
    #[tracing::instrument(skip(self))]
    pub async fn details(&self, project_id: u64, analysis_id: u64) -> Result<Analysis> {
        let path = format!("api/projects/{project_id}/analyses/{analysis_id}");
        self.client.get(&path).await?.json()
    }
}
