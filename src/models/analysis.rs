//! Analysis prep and analysis detail models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side staging object for an analysis.
///
/// A prep accumulates uploaded inputs; the server records a verification
/// error for every input problem it detects. An analysis must never be
/// started while `verification_errors` is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPrep {
    /// Prep identifier. Present on creation; the state endpoint may omit it.
    #[serde(default)]
    pub prep_id: String,

    /// Inputs uploaded to this prep so far.
    #[serde(default)]
    pub input_ids: Vec<String>,

    /// Problems the server detected with the uploaded inputs.
    #[serde(default)]
    pub verification_errors: Vec<String>,
}

impl AnalysisPrep {
    /// Whether the prep is ready to be analyzed.
    pub fn is_ready(&self) -> bool {
        self.verification_errors.is_empty()
    }
}

/// Details of a finished (or failed) analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Analysis identifier.
    pub id: u64,

    /// Project the analysis belongs to.
    #[serde(default)]
    pub project_id: Option<u64>,

    /// Server-reported state (e.g. "done").
    #[serde(default)]
    pub state: Option<String>,

    /// When the analysis run started.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    /// When the analysis run finished.
    #[serde(default)]
    pub finish_time: Option<DateTime<Utc>>,

    /// Failure detail, when the server reports one.
    #[serde(default)]
    pub failure_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prep_readiness_tracks_verification_errors() {
        let clean: AnalysisPrep = serde_json::from_str(
            r#"{"prepId": "prep-1", "inputIds": ["in-1"], "verificationErrors": []}"#,
        )
        .unwrap();
        assert!(clean.is_ready());

        let dirty: AnalysisPrep = serde_json::from_str(
            r#"{"prepId": "prep-1", "inputIds": ["in-1"], "verificationErrors": ["bad schema"]}"#,
        )
        .unwrap();
        assert!(!dirty.is_ready());
    }

    #[test]
    fn test_prep_state_endpoint_may_omit_prep_id() {
        let prep: AnalysisPrep =
            serde_json::from_str(r#"{"inputIds": [], "verificationErrors": []}"#).unwrap();
        assert!(prep.prep_id.is_empty());
        assert!(prep.is_ready());
    }

    #[test]
    fn test_analysis_parses_timestamps() {
        let analysis: Analysis = serde_json::from_str(
            r#"{
                "id": 42,
                "projectId": 7,
                "state": "done",
                "startTime": "2021-02-01T10:00:00Z",
                "finishTime": "2021-02-01T10:05:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(analysis.id, 42);
        assert_eq!(analysis.state.as_deref(), Some("done"));
        assert!(analysis.finish_time.unwrap() > analysis.start_time.unwrap());
    }
}
