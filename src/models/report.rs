//! Report request types and per-format configuration builders.

use std::net::Ipv4Addr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{CodeDxError, Result};
use crate::response::ContentType;

/// Default column set for CSV reports.
pub const DEFAULT_CSV_COLUMNS: &[&str] = &[
    "projectHierarchy",
    "id",
    "creationDate",
    "updateDate",
    "severity",
    "status",
    "cwe",
    "rule",
    "tool",
    "location",
    "element",
    "loc.path",
    "loc.line",
];

/// Report formats the server can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Pdf,
    Csv,
    Xml,
    Nessus,
    Nbe,
}

impl ReportType {
    /// Path segment used when submitting the generation job.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Pdf => "pdf",
            ReportType::Csv => "csv",
            ReportType::Xml => "xml",
            ReportType::Nessus => "nessus",
            ReportType::Nbe => "nbe",
        }
    }

    /// Content type the finished report is served as. Nessus reports are
    /// XML documents; NBE is a line-oriented text format.
    pub fn content_type(&self) -> ContentType {
        match self {
            ReportType::Pdf => ContentType::Pdf,
            ReportType::Csv => ContentType::Csv,
            ReportType::Xml | ReportType::Nessus => ContentType::Xml,
            ReportType::Nbe => ContentType::Text,
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much summary content a PDF report includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    None,
    #[default]
    Simple,
    Detailed,
}

/// How much per-finding detail a PDF report includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetailsMode {
    None,
    Simple,
    #[default]
    WithSource,
}

/// Configuration for a PDF report.
#[derive(Debug, Clone, Default)]
pub struct PdfOptions {
    pub summary_mode: SummaryMode,
    pub details_mode: DetailsMode,
    pub include_result_details: bool,
    pub include_comments: bool,
    pub include_request_response: bool,
}

/// Configuration for an XML report.
#[derive(Debug, Clone)]
pub struct XmlOptions {
    pub include_standards: bool,
    pub include_source: bool,
    pub include_rule_descriptions: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            include_standards: false,
            include_source: false,
            include_rule_descriptions: true,
        }
    }
}

/// Configuration for a Nessus report.
#[derive(Debug, Clone, Default)]
pub struct NessusOptions {
    pub default_host: Option<String>,
    pub operating_system: String,
    pub mac_address: String,
    pub net_bios_name: String,
}

/// One report generation request: project, format, format-specific config,
/// and optional finding filters. Immutable once built; maps one-to-one to
/// a submitted job.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub project_id: u64,
    pub report_type: ReportType,
    pub config: Value,
    pub filters: Option<Value>,
}

impl ReportRequest {
    /// Build a PDF report request.
    pub fn pdf(project_id: u64, options: PdfOptions, filters: Option<Value>) -> Self {
        Self {
            project_id,
            report_type: ReportType::Pdf,
            config: json!({
                "summaryMode": options.summary_mode,
                "detailsMode": options.details_mode,
                "includeResultDetails": options.include_result_details,
                "includeComments": options.include_comments,
                "includeRequestResponse": options.include_request_response,
            }),
            filters,
        }
    }

    /// Build a CSV report request. `columns` defaults to
    /// [`DEFAULT_CSV_COLUMNS`] when `None`.
    pub fn csv(project_id: u64, columns: Option<Vec<String>>) -> Self {
        let columns = columns.unwrap_or_else(|| {
            DEFAULT_CSV_COLUMNS.iter().map(|c| c.to_string()).collect()
        });
        Self {
            project_id,
            report_type: ReportType::Csv,
            config: json!({ "columns": columns }),
            filters: None,
        }
    }

    /// Build an XML report request.
    pub fn xml(project_id: u64, options: XmlOptions) -> Self {
        Self {
            project_id,
            report_type: ReportType::Xml,
            config: json!({
                "includeStandards": options.include_standards,
                "includeSource": options.include_source,
                "includeRuleDescriptions": options.include_rule_descriptions,
            }),
            filters: None,
        }
    }

    /// Build a Nessus report request.
    ///
    /// # Errors
    ///
    /// Fails if `mac_address` is not six colon-separated hex octet pairs.
    pub fn nessus(project_id: u64, options: NessusOptions) -> Result<Self> {
        if !is_valid_mac(&options.mac_address) {
            return Err(CodeDxError::InvalidReportConfig(format!(
                "'{}' is not a valid MAC address",
                options.mac_address
            )));
        }
        Ok(Self {
            project_id,
            report_type: ReportType::Nessus,
            config: json!({
                "defaultHost": options.default_host,
                "operatingSystem": options.operating_system,
                "macAddress": options.mac_address,
                "netBIOSName": options.net_bios_name,
            }),
            filters: None,
        })
    }

    /// Build an NBE report request.
    ///
    /// # Errors
    ///
    /// Fails if `host_address` is not a valid IPv4 address.
    pub fn nbe(project_id: u64, host_address: &str) -> Result<Self> {
        if host_address.parse::<Ipv4Addr>().is_err() {
            return Err(CodeDxError::InvalidReportConfig(format!(
                "'{host_address}' is not a valid IPv4 address"
            )));
        }
        Ok(Self {
            project_id,
            report_type: ReportType::Nbe,
            config: json!({ "hostAddress": host_address }),
            filters: None,
        })
    }
}

/// Six colon-separated pairs of hex digits.
fn is_valid_mac(mac: &str) -> bool {
    let octets: Vec<&str> = mac.split(':').collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_defaults_match_server_expectations() {
        let request = ReportRequest::pdf(7, PdfOptions::default(), None);
        assert_eq!(request.report_type, ReportType::Pdf);
        assert_eq!(
            request.config,
            json!({
                "summaryMode": "simple",
                "detailsMode": "with-source",
                "includeResultDetails": false,
                "includeComments": false,
                "includeRequestResponse": false,
            })
        );
    }

    #[test]
    fn test_pdf_modes_use_wire_spelling() {
        let options = PdfOptions {
            summary_mode: SummaryMode::Detailed,
            details_mode: DetailsMode::None,
            ..Default::default()
        };
        let request = ReportRequest::pdf(7, options, None);
        assert_eq!(request.config["summaryMode"], "detailed");
        assert_eq!(request.config["detailsMode"], "none");
    }

    #[test]
    fn test_csv_defaults_to_full_column_set() {
        let request = ReportRequest::csv(7, None);
        let columns = request.config["columns"].as_array().unwrap();
        assert_eq!(columns.len(), DEFAULT_CSV_COLUMNS.len());
        assert_eq!(columns[0], "projectHierarchy");
    }

    #[test]
    fn test_csv_honors_explicit_columns() {
        let request = ReportRequest::csv(7, Some(vec!["id".to_string(), "cwe".to_string()]));
        assert_eq!(request.config, json!({ "columns": ["id", "cwe"] }));
    }

    #[test]
    fn test_xml_defaults_include_rule_descriptions() {
        let request = ReportRequest::xml(7, XmlOptions::default());
        assert_eq!(
            request.config,
            json!({
                "includeStandards": false,
                "includeSource": false,
                "includeRuleDescriptions": true,
            })
        );
    }

    #[test]
    fn test_nessus_rejects_malformed_mac() {
        let options = NessusOptions {
            mac_address: "not-a-mac".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            ReportRequest::nessus(7, options),
            Err(CodeDxError::InvalidReportConfig(_))
        ));
    }

    #[test]
    fn test_nessus_accepts_valid_mac() {
        let options = NessusOptions {
            mac_address: "00:1A:2b:3C:4d:5E".to_string(),
            ..Default::default()
        };
        let request = ReportRequest::nessus(7, options).unwrap();
        assert_eq!(request.config["macAddress"], "00:1A:2b:3C:4d:5E");
        assert_eq!(request.config["defaultHost"], Value::Null);
    }

    #[test]
    fn test_nbe_rejects_malformed_host() {
        assert!(ReportRequest::nbe(7, "999.1.1.1").is_err());
        assert!(ReportRequest::nbe(7, "10.0.0.7").is_ok());
    }

    #[test]
    fn test_report_content_types() {
        assert_eq!(ReportType::Pdf.content_type(), ContentType::Pdf);
        assert_eq!(ReportType::Csv.content_type(), ContentType::Csv);
        assert_eq!(ReportType::Xml.content_type(), ContentType::Xml);
        assert_eq!(ReportType::Nessus.content_type(), ContentType::Xml);
        assert_eq!(ReportType::Nbe.content_type(), ContentType::Text);
    }
}
