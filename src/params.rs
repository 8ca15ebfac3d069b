//
//  reportal-client
//  params.rs
//

//! Call parameters: workspace/report identification and report query
//! encoding.
//!
//! Workspaces and reports can each be named two ways: by numeric id or by
//! code. Resolution applies a fixed precedence (id wins) and produces the
//! raw string form used in the URL path; escaping happens at URL-build
//! time, not here.

use serde_json::Value;

use crate::error::Error;

/// Identifies a workspace by numeric id or by code.
///
/// At most one of the fields is meaningful; when both are set the id takes
/// precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceRef {
    /// Numeric workspace id.
    pub id: Option<i64>,

    /// Workspace code as it appears in URLs.
    pub code: Option<String>,
}

impl WorkspaceRef {
    /// Reference a workspace by numeric id.
    pub fn id(id: i64) -> Self {
        Self {
            id: Some(id),
            code: None,
        }
    }

    /// Reference a workspace by code.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            id: None,
            code: Some(code.into()),
        }
    }

    /// The id's decimal form, else the code, else `None`.
    pub(crate) fn resolve(&self) -> Option<String> {
        self.id.map(|id| id.to_string()).or_else(|| self.code.clone())
    }
}

/// Identifies a report by numeric id or by type code.
///
/// When both are set the id takes precedence. Unlike workspaces there is no
/// configured default; a reference that carries neither field fails
/// resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRef {
    /// Numeric report id.
    pub id: Option<i64>,

    /// Report type code.
    pub type_code: Option<String>,
}

impl ReportRef {
    /// Reference a report by numeric id.
    pub fn id(id: i64) -> Self {
        Self {
            id: Some(id),
            type_code: None,
        }
    }

    /// Reference a report by type code.
    pub fn type_code(type_code: impl Into<String>) -> Self {
        Self {
            id: None,
            type_code: Some(type_code.into()),
        }
    }

    /// The id's decimal form, else the type code.
    pub(crate) fn resolve(&self) -> Result<String, Error> {
        self.id
            .map(|id| id.to_string())
            .or_else(|| self.type_code.clone())
            .ok_or(Error::InvalidReportIdentification)
    }
}

/// Optional inputs for report preview and PDF operations.
///
/// `data` and `temp_data_id` are two ways of supplying the same kind of
/// payload: `data` inlines a small JSON object into the URL, while
/// `temp_data_id` references a payload previously staged with
/// [`push_temporary_data`](crate::ReportalClient::push_temporary_data) to
/// keep large payloads out of the URL. Both may be set; the server decides
/// precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportQueryParams {
    /// Caller-supplied filter/display parameters, an arbitrary JSON object.
    pub params: Option<Value>,

    /// Payload to render against, an arbitrary JSON object.
    pub data: Option<Value>,

    /// Reference to previously staged temporary data.
    pub temp_data_id: Option<i64>,

    /// Single-use token for unauthenticated preview links.
    pub nonce: Option<String>,
}

impl ReportQueryParams {
    /// Flattens the set inputs into string query pairs.
    ///
    /// JSON values are serialized compactly; absent fields produce no pair
    /// at all. Returns `None` when nothing is set.
    pub(crate) fn encode(&self) -> Option<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        if let Some(params) = &self.params {
            pairs.push(("params".to_owned(), params.to_string()));
        }
        if let Some(data) = &self.data {
            pairs.push(("data".to_owned(), data.to_string()));
        }
        if let Some(nonce) = &self.nonce {
            pairs.push(("nonce".to_owned(), nonce.clone()));
        }
        if let Some(temp_data_id) = self.temp_data_id {
            pairs.push(("tempDataId".to_owned(), temp_data_id.to_string()));
        }
        if pairs.is_empty() {
            None
        } else {
            Some(pairs)
        }
    }
}

/// Encodes an optional query, treating "no query" and "empty query" the
/// same: no query string at all.
pub(crate) fn encode_report_query(query: Option<&ReportQueryParams>) -> Option<Vec<(String, String)>> {
    query.and_then(ReportQueryParams::encode)
}

/// Everything needed to address a single report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportParams {
    /// Workspace the report lives in; falls back to the configured default
    /// when absent.
    pub workspace: Option<WorkspaceRef>,

    /// The report itself. Required.
    pub report: ReportRef,

    /// Optional preview/render inputs.
    pub query: Option<ReportQueryParams>,
}

impl ReportParams {
    /// Parameters addressing `report` in the default workspace.
    pub fn new(report: ReportRef) -> Self {
        Self {
            workspace: None,
            report,
            query: None,
        }
    }
}

/// Filters passed through when listing reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportListQuery {
    /// Restrict the listing to one report type code.
    pub report_type: Option<String>,

    /// Maximum number of reports to return.
    pub limit: Option<u32>,

    /// Offset into the listing.
    pub offset: Option<u32>,
}

impl ReportListQuery {
    pub(crate) fn encode(&self) -> Option<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        if let Some(report_type) = &self.report_type {
            pairs.push(("type".to_owned(), report_type.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_owned(), offset.to_string()));
        }
        if pairs.is_empty() {
            None
        } else {
            Some(pairs)
        }
    }
}
