//! Scan ingestion: upload a vulnerability scan and run an analysis.

use std::path::Path;

use crate::api::{Analyses, Jobs};
use crate::client::CodeDxClient;
use crate::error::{CodeDxError, Result};
use crate::models::Analysis;
use crate::poll::JobPoller;

/// Upload formats the server accepts, mapped to their MIME types.
const ACCEPTED_SCAN_TYPES: &[(&str, &str)] = &[
    ("xml", "text/xml"),
    ("json", "application/json"),
    ("zip", "application/zip"),
    ("csv", "text/csv"),
    ("txt", "text/plain"),
];

/// MIME type for an accepted scan file name, or `None` if the extension
/// is not in the accepted set.
fn scan_mime_type(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?;
    ACCEPTED_SCAN_TYPES
        .iter()
        .find(|(ext, _)| extension.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

/// Four-stage scan ingestion pipeline: create a prep, upload the scan,
/// check verification errors, run the analysis.
///
/// Every stage is gated on the previous stage's success. The analysis is
/// never started while the prep has unresolved verification errors.
#[derive(Debug, Clone)]
pub struct AnalysisWorkflow {
    analyses: Analyses,
    poller: JobPoller,
}

impl AnalysisWorkflow {
    pub fn new(client: &CodeDxClient) -> Self {
        Self {
            analyses: Analyses::new(client.clone()),
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

    /// Upload `scan_file` to `project_id` and analyze it.
    ///
    /// Returns the details of the finished analysis, fetched under the
    /// analysis id assigned at submission time.
    ///
    /// # Errors
    ///
    /// * [`CodeDxError::UnsupportedScanFile`] before any request is made,
    ///   if the file extension is not an accepted upload format
    /// * [`CodeDxError::VerificationErrors`] if the server found problems
    ///   with the uploaded scan; the analysis is not started
    /// * any polling error from the upload or analysis job
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, project_id: u64, scan_file: &Path) -> Result<Analysis> {
        let file_name = scan_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Reject unsupported formats before spending a round trip.
        let mime_type = scan_mime_type(&file_name).ok_or_else(|| {
            CodeDxError::UnsupportedScanFile {
                file_name: file_name.clone(),
            }
        })?;

        tracing::info!(project_id, "creating analysis prep");
        let prep = self.analyses.create_prep(project_id).await?;
        let prep_id = prep.prep_id;

        tracing::info!(prep_id = %prep_id, file = %file_name, "uploading scan");
        let bytes = tokio::fs::read(scan_file).await?;
        let upload_job = self
            .analyses
            .upload(&prep_id, &file_name, mime_type, bytes, None)
            .await?;
        self.poller
            .wait(upload_job, "Analyzing external report content.")
            .await?;

        let prep = self.analyses.prep(&prep_id).await?;
        if !prep.is_ready() {
            tracing::warn!(
                prep_id = %prep_id,
                errors = ?prep.verification_errors,
                "scan failed verification"
            );
            return Err(CodeDxError::VerificationErrors {
                prep_id,
                errors: prep.verification_errors,
            });
        }

        let run = self.analyses.run(&prep_id).await?;
        let description = format!("Running analysis for project {project_id}.");
        self.poller.wait(run.job, &description).await?;

        let analysis = self.analyses.details(project_id, run.analysis_id).await?;
        tracing::info!(
            project_id,
            analysis_id = analysis.id,
            "analysis complete"
        );
        Ok(analysis)
    }
}
