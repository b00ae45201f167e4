//! Report generation: submit, poll, download, persist.

use std::path::Path;

use serde_json::Value;

use crate::api::{Jobs, Reports};
use crate::client::CodeDxClient;
use crate::error::Result;
use crate::models::{NessusOptions, PdfOptions, ReportRequest, XmlOptions};
use crate::poll::JobPoller;

/// Submit-then-retrieve pipeline shared by all report formats.
///
/// The finished report is fetched with the format's content type; a body
/// of any other type is a decoding failure, so a misrouted payload is
/// never written to disk.
#[derive(Debug, Clone)]
pub struct ReportWorkflow {
    reports: Reports,
    jobs: Jobs,
    poller: JobPoller,
}

impl ReportWorkflow {
    pub fn new(client: &CodeDxClient) -> Self {
        let jobs = Jobs::new(client.clone());
        Self {
            reports: Reports::new(client.clone()),
            jobs: jobs.clone(),
            poller: JobPoller::new(jobs),
        }
    }

    /// Replace the default poller, e.g. to shorten the budget or attach a
    /// cancellation token.
    #[must_use]
    pub fn with_poller(mut self, poller: JobPoller) -> Self {
        self.poller = poller;
        self
    }

    /// Generate the requested report and write it to `dest`.
    #[tracing::instrument(skip(self, request), fields(project_id = request.project_id, report_type = %request.report_type))]
    pub async fn generate(&self, request: &ReportRequest, dest: &Path) -> Result<()> {
        let job = self.reports.generate(request).await?;
        let description = format!(
            "Waiting for {} report generation.",
            request.report_type.content_type()
        );
        let job = self.poller.wait(job, &description).await?;

        tracing::info!(job_id = %job.job_id, "report generated, downloading");
        let bytes = self
            .jobs
            .result(&job.job_id, request.report_type.content_type())
            .await?;

        tokio::fs::write(dest, &bytes).await?;
        tracing::info!(dest = %dest.display(), len = bytes.len(), "report written");
        Ok(())
    }

    /// Download a project report in PDF format.
    pub async fn pdf(
        &self,
        project_id: u64,
        options: PdfOptions,
        filters: Option<Value>,
        dest: &Path,
    ) -> Result<()> {
        self.generate(&ReportRequest::pdf(project_id, options, filters), dest)
            .await
    }

    /// Download a project report in CSV format. `columns` defaults to the
    /// full column set.
    pub async fn csv(
        &self,
        project_id: u64,
        columns: Option<Vec<String>>,
        dest: &Path,
    ) -> Result<()> {
        self.generate(&ReportRequest::csv(project_id, columns), dest)
            .await
    }

    /// Download a project report in XML format.
    pub async fn xml(&self, project_id: u64, options: XmlOptions, dest: &Path) -> Result<()> {
        self.generate(&ReportRequest::xml(project_id, options), dest)
            .await
    }

    /// Download a project report in Nessus format.
    pub async fn nessus(
        &self,
        project_id: u64,
        options: NessusOptions,
        dest: &Path,
    ) -> Result<()> {
        self.generate(&ReportRequest::nessus(project_id, options)?, dest)
            .await
    }

    /// Download a project report in NBE format.
    pub async fn nbe(&self, project_id: u64, host_address: &str, dest: &Path) -> Result<()> {
        self.generate(&ReportRequest::nbe(project_id, host_address)?, dest)
            .await
    }
}
