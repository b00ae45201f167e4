//! Project endpoints.

use serde_json::json;

use crate::client::CodeDxClient;
use crate::error::Result;
use crate::models::{Project, ProjectList, ProjectQuery, ProjectUpdateParams};

/// Projects endpoint group.
#[derive(Debug, Clone)]
pub struct Projects {
    client: CodeDxClient,
}

impl Projects {
    pub fn new(client: CodeDxClient) -> Self {
        Self { client }
    }

    /// List every project visible to the API key.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Project>> {
        let list: ProjectList = self.client.get("api/projects").await?.json()?;
        Ok(list.projects)
    }

    /// Create a new project.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<Project> {
        self.client
            .put("api/projects", &json!({ "name": name }))
            .await?
            .json()
    }

    /// Rename or re-parent a project. The server acknowledges with an
    /// empty body.
    #[tracing::instrument(skip(self, params))]
    pub async fn update(&self, project_id: u64, params: &ProjectUpdateParams) -> Result<()> {
        let path = format!("api/projects/{project_id}");
        self.client.put(&path, params).await?.acknowledge()?;
        Ok(())
    }

    /// Delete a project.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, project_id: u64) -> Result<()> {
        let path = format!("api/projects/{project_id}");
        self.client.delete(&path).await?.acknowledge()?;
        Ok(())
    }

    /// Query projects by criteria.
    #[tracing::instrument(skip(self, query))]
    pub async fn query(&self, query: &ProjectQuery) -> Result<Vec<Project>> {
        self.client.post("api/projects/query", query).await?.json()
    }

    /// Count projects matching the criteria.
    #[tracing::instrument(skip(self, query))]
    pub async fn count(&self, query: &ProjectQuery) -> Result<u64> {
        self.client
            .post("api/projects/query/count", query)
            .await?
            .json()
    }

    /// Resolve a project name to its id, if such a project exists.
    #[tracing::instrument(skip(self))]
    pub async fn project_id(&self, name: &str) -> Result<Option<u64>> {
        let matches = self.query(&ProjectQuery::by_name(name)).await?;
        Ok(matches.into_iter().find(|p| p.name == name).map(|p| p.id))
    }
}
