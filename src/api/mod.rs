//! Endpoint capability groups.
//!
//! Each group is an independent value wrapping a [`crate::CodeDxClient`]
//! clone; higher-level workflows compose exactly the capabilities they
//! need instead of mixing everything into one client object.

mod analyses;
mod findings;
mod jobs;
mod projects;
mod reports;

pub use analyses::Analyses;
pub use findings::Findings;
pub use jobs::Jobs;
pub use projects::Projects;
pub use reports::Reports;
