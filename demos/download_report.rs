//! Generate and download a PDF report for a project.
//!
//! Run with:
//! ```
//! CODEDX_API_KEY=your-key CODEDX_BASE_URL=https://host/codedx \
//!     cargo run --example download_report -- <project-name> [report.pdf]
//! ```

use std::path::Path;

use codedx::api::Projects;
use codedx::{CodeDxClient, PdfOptions, ReportWorkflow};

#[tokio::main]
async fn main() -> codedx::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let project = match args.next() {
        Some(project) => project,
        None => {
            eprintln!("usage: download_report <project-name> [dest-file]");
            std::process::exit(2);
        }
    };
    let dest = args.next().unwrap_or_else(|| "report.pdf".to_string());

    let client = CodeDxClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    let projects = Projects::new(client.clone());
    let Some(project_id) = projects.project_id(&project).await? else {
        eprintln!("no project named '{project}'");
        std::process::exit(1);
    };

    ReportWorkflow::new(&client)
        .pdf(project_id, PdfOptions::default(), None, Path::new(&dest))
        .await?;

    println!("Report written to {dest}");
    Ok(())
}
