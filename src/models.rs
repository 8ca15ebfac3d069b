//
//  reportal-client
//  models.rs
//

//! Server-returned records.
//!
//! These are flat data contracts owned by the caller once returned; the
//! client manages no further lifecycle for them. Field names travel as
//! camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parameterizable document template that can be previewed or rendered
/// to PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique identifier of the report.
    pub id: i64,

    /// Human-readable report name.
    pub name: String,

    /// Identifier of the report's type.
    pub report_type_id: i64,

    /// Name of the report's type.
    pub report_type_name: String,

    /// Name of the template the report renders with.
    pub report_template_name: String,

    /// Preview image reference, when the server has one.
    #[serde(default)]
    pub preview_image: Option<String>,

    /// Theme applied to the rendered report, when set.
    #[serde(default)]
    pub theme_name: Option<String>,

    /// Whether this report is the default of its type.
    #[serde(default)]
    pub is_default: bool,
}

/// A tenant scope under which reports live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Unique identifier of the workspace.
    pub id: i64,

    /// Human-readable workspace name.
    pub name: String,

    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,

    /// Short code identifying the workspace in URLs.
    pub code: String,
}

/// A single-use token permitting unauthenticated access to a preview URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceToken {
    /// The nonce value to place in a preview URL's query string.
    pub nonce: String,
}

/// A JSON payload staged server-side, referenced by a short-lived id
/// instead of being embedded in a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryData {
    /// Identifier to reference the staged payload with.
    pub temp_data_id: i64,

    /// When the staged payload expires, if the server reported it.
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Wire shape of a structured error body. Used only transiently during
/// error translation.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorData {
    #[serde(default)]
    pub error: Option<String>,
}

/// POST body for staging temporary data. `expiryDate` is serialized as
/// `null` when absent, matching the server contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemporaryDataBody {
    pub content: serde_json::Value,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_decodes_camel_case() {
        let report: Report = serde_json::from_str(
            r#"{
                "id": 12,
                "name": "Invoice",
                "reportTypeId": 3,
                "reportTypeName": "invoice",
                "reportTemplateName": "invoice-a4",
                "previewImage": null,
                "isDefault": true
            }"#,
        )
        .unwrap();
        assert_eq!(report.id, 12);
        assert_eq!(report.report_type_name, "invoice");
        assert!(report.is_default);
        assert_eq!(report.theme_name, None);
    }

    #[test]
    fn test_workspace_decodes_without_description() {
        let workspace: Workspace =
            serde_json::from_str(r#"{"id": 1, "name": "Acme", "code": "acme"}"#).unwrap();
        assert_eq!(workspace.code, "acme");
        assert_eq!(workspace.description, None);
    }

    #[test]
    fn test_temporary_data_decodes_camel_case() {
        let temp: TemporaryData = serde_json::from_str(r#"{"tempDataId": 42}"#).unwrap();
        assert_eq!(temp.temp_data_id, 42);
        assert_eq!(temp.expiry_date, None);
    }

    #[test]
    fn test_temporary_data_body_serializes_null_expiry() {
        let body = TemporaryDataBody {
            content: serde_json::json!({"a": 1}),
            expiry_date: None,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"content":{"a":1},"expiryDate":null}"#
        );
    }
}
