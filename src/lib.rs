//! Code Dx API client library.
//!
//! A Rust library for interacting with the Code Dx REST API. Endpoint
//! groups (projects, jobs, analyses, reports, findings) are independent
//! capability values over one shared [`CodeDxClient`]; long-running
//! server-side operations are driven by a [`JobPoller`] and composed into
//! high-level workflows for scan ingestion, report generation and bulk
//! triage.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use codedx::{AnalysisWorkflow, CodeDxClient, PdfOptions, ReportWorkflow};
//!
//! #[tokio::main]
//! async fn main() -> codedx::Result<()> {
//!     // Create client from environment variables
//!     let client = CodeDxClient::from_env()?;
//!
//!     // Upload a scan and run an analysis
//!     let analysis = AnalysisWorkflow::new(&client)
//!         .run(7, Path::new("scan.xml"))
//!         .await?;
//!     println!("Analysis {} finished", analysis.id);
//!
//!     // Download a PDF report
//!     ReportWorkflow::new(&client)
//!         .pdf(7, PdfOptions::default(), None, Path::new("report.pdf"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized in three layers:
//!
//! - [`CodeDxClient`] issues raw authenticated exchanges and collapses
//!   each one into an [`Envelope`]; [`Envelope`] validates status and
//!   negotiated content type ([`ExpectedContent`]) before anything is
//!   decoded.
//! - [`api`] holds one thin method per endpoint, grouped by capability.
//! - [`JobPoller`] and the workflows ([`AnalysisWorkflow`],
//!   [`ReportWorkflow`], [`TriageWorkflow`]) orchestrate the asynchronous
//!   jobs those endpoints return.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CODEDX_API_KEY` (required) - API key from the Code Dx admin UI
//! - `CODEDX_BASE_URL` (required) - Instance URL including the context
//!   path (e.g. `https://codedx.example.com/codedx`)

mod client;
mod error;
mod models;
mod poll;
mod response;

pub mod api;
pub mod workflow;

// Re-export core types
pub use client::CodeDxClient;
pub use error::{CodeDxError, Result};
pub use poll::{JobPoller, PollConfig};
pub use response::{ContentType, Envelope, ExpectedContent, Payload};

// Re-export models
pub use models::{
    // Analysis types
    Analysis,
    AnalysisJob,
    AnalysisPrep,
    // Finding types
    FindingStatus,
    // Job types
    Job,
    JobStatus,
    // Project types
    Project,
    ProjectQuery,
    ProjectUpdateParams,
    // Report types
    DetailsMode,
    NessusOptions,
    PdfOptions,
    ReportRequest,
    ReportType,
    SummaryMode,
    XmlOptions,
    DEFAULT_CSV_COLUMNS,
};

// Re-export workflows at the crate root
pub use workflow::{AnalysisWorkflow, ReportWorkflow, TriageWorkflow};
