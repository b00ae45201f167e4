//! Finding triage statuses.

use serde::{Deserialize, Serialize};

/// Triage statuses a finding can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingStatus {
    Fixed,
    Mitigated,
    Ignored,
    FalsePositive,
    Gone,
    Unresolved,
    Escalated,
}

impl FindingStatus {
    /// The wire representation accepted by the bulk status update endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingStatus::Fixed => "fixed",
            FindingStatus::Mitigated => "mitigated",
            FindingStatus::Ignored => "ignored",
            FindingStatus::FalsePositive => "false-positive",
            FindingStatus::Gone => "gone",
            FindingStatus::Unresolved => "unresolved",
            FindingStatus::Escalated => "escalated",
        }
    }
}

impl std::fmt::Display for FindingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
