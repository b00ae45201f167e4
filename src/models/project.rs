//! Project model and query criteria.

use serde::{Deserialize, Serialize};

/// A Code Dx project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier.
    pub id: u64,

    /// Project name.
    pub name: String,

    /// Parent project, for nested project trees.
    #[serde(default)]
    pub parent_id: Option<u64>,
}

/// Wrapper returned by the project list endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectList {
    pub projects: Vec<Project>,
}

/// Criteria body for the project query endpoints.
///
/// Filters are passed through as-is; the server decides which keys it
/// honors. Specifying an offset without a limit is a server-side error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectQuery {
    pub filter: serde_json::Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl ProjectQuery {
    /// Criteria matching projects by exact name.
    pub fn by_name(name: &str) -> Self {
        Self {
            filter: serde_json::json!({ "name": name }),
            ..Default::default()
        }
    }
}

/// Parameters for updating a project.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdateParams {
    /// New project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New parent project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_by_name_serializes_filter_only() {
        let query = ProjectQuery::by_name("webgoat");
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body, serde_json::json!({ "filter": { "name": "webgoat" } }));
    }

    #[test]
    fn test_query_includes_limit_and_offset_when_set() {
        let query = ProjectQuery {
            filter: serde_json::json!({}),
            limit: Some(10),
            offset: Some(20),
        };
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body["limit"], 10);
        assert_eq!(body["offset"], 20);
    }

    #[test]
    fn test_update_params_skip_unset_fields() {
        let params = ProjectUpdateParams {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "renamed" }));
    }
}
