//! Upload a vulnerability scan and run an analysis.
//!
//! Run with:
//! ```
//! CODEDX_API_KEY=your-key CODEDX_BASE_URL=https://host/codedx \
//!     cargo run --example upload_analysis -- <project-name> <scan-file>
//! ```

use std::path::Path;

use codedx::api::Projects;
use codedx::{AnalysisWorkflow, CodeDxClient};

#[tokio::main]
async fn main() -> codedx::Result<()> {
    // Initialize tracing for progress output (optional)
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (project, scan_file) = match (args.next(), args.next()) {
        (Some(project), Some(file)) => (project, file),
        _ => {
            eprintln!("usage: upload_analysis <project-name> <scan-file>");
            std::process::exit(2);
        }
    };

    let client = CodeDxClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    let projects = Projects::new(client.clone());
    let Some(project_id) = projects.project_id(&project).await? else {
        eprintln!("no project named '{project}'");
        std::process::exit(1);
    };
    println!("Project '{project}' has id {project_id}");

    let analysis = AnalysisWorkflow::new(&client)
        .run(project_id, Path::new(&scan_file))
        .await?;

    println!(
        "Analysis {} finished (state: {})",
        analysis.id,
        analysis.state.as_deref().unwrap_or("unknown")
    );
    Ok(())
}
