//
//  reportal-client
//  client.rs
//

//! # HTTP Client for the Reportal API
//!
//! This module provides the core client for interacting with a Reportal
//! server. It owns the request pipeline shared by every operation:
//! authenticated dispatch, URL/query composition, structured-error
//! translation, and typed JSON decoding.
//!
//! ## Pipeline
//!
//! Every call moves through the same states: the request is prepared (the
//! bearer credential is attached; there is no unauthenticated dispatch
//! path), sent, and then either succeeds or fails. A non-success status is
//! routed through the error translator and never returns a value; a
//! transport failure propagates as [`Error::Transport`] untranslated.
//!
//! ## Example
//!
//! ```rust,no_run
//! use reportal_client::{ClientConfig, ReportalClient};
//!
//! # async fn example() -> Result<(), reportal_client::Error> {
//! let config = ClientConfig::new("https://reports.example.com", "secret-token")
//!     .with_default_workspace_code("acme");
//! let client = ReportalClient::new(config)?;
//!
//! for report in client.list_reports(None, None, None).await? {
//!     println!("{} ({})", report.name, report.report_type_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancellation
//!
//! Each async operation accepts an optional
//! [`CancellationToken`](crate::CancellationToken). Triggering the token
//! aborts the in-flight request and the operation fails with
//! [`Error::Cancelled`]; no partial result is returned.

use std::future::Future;

use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::{build_endpoint_url, QueryPairs};
use crate::error::Error;
use crate::models::{
    ErrorData, NonceToken, Report, TemporaryData, TemporaryDataBody, Workspace,
};
use crate::params::{
    encode_report_query, ReportListQuery, ReportParams, WorkspaceRef,
};

/// Path prefix for versioned API endpoints.
const API_PATH: &str = "/api/v1/";

/// Path prefix for endpoints served at the server root (preview links).
const ROOT_PATH: &str = "/";

/// Async client for the Reportal reporting service.
///
/// The client is stateless beyond its immutable configuration and the
/// pooled HTTP transport, and is safe for unlimited concurrent call-sites;
/// wrap it in an `Arc` to share it across tasks. Each call owns its own
/// request/response lifecycle end-to-end.
#[derive(Debug)]
pub struct ReportalClient {
    http: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
}

impl ReportalClient {
    /// Creates a client with its own pooled HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUrl`] if the configured base URL cannot
    /// be parsed or cannot serve as a base for endpoint paths, and
    /// [`Error::Transport`] if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(format!("reportal-client/{}", crate::VERSION))
            .build()?;
        Self::with_http_client(config, http)
    }

    /// Creates a client on a caller-supplied transport.
    ///
    /// Useful to share one connection pool across clients or to apply
    /// custom transport settings (timeouts, proxies, TLS).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(config.base_url())
            .map_err(|err| Error::InvalidBaseUrl(format!("{}: {}", config.base_url(), err)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(config.base_url().to_owned()));
        }
        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Lists the reports of a workspace.
    ///
    /// # Parameters
    ///
    /// * `workspace` - Workspace to list; falls back to the configured
    ///   default when `None`.
    /// * `query` - Optional type/limit/offset filters, passed through to
    ///   the server.
    /// * `cancel` - Optional cancellation token.
    ///
    /// # Errors
    ///
    /// [`Error::MissingWorkspaceId`] when no workspace is identifiable,
    /// plus the pipeline errors ([`Error::Api`], [`Error::Transport`],
    /// [`Error::Decode`], [`Error::Cancelled`]).
    pub async fn list_reports(
        &self,
        workspace: Option<&WorkspaceRef>,
        query: Option<&ReportListQuery>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<Report>, Error> {
        let workspace_id = self.workspace_id(workspace)?;
        let query = query.and_then(ReportListQuery::encode);
        let url = self.endpoint_url(&["ws", &workspace_id, "reports"], query.as_ref())?;
        with_cancellation(cancel, self.get_json(url)).await
    }

    /// Lists all workspaces visible to the credential.
    pub async fn list_workspaces(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<Workspace>, Error> {
        let url = self.endpoint_url(&["workspaces"], None)?;
        with_cancellation(cancel, self.get_json(url)).await
    }

    /// Builds the browser-facing preview URL for a report.
    ///
    /// Preview links are served at the server root, outside the versioned
    /// API prefix. No request is made; combine with
    /// [`create_nonce_token`](Self::create_nonce_token) to hand the URL to
    /// an unauthenticated viewer.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use reportal_client::{ClientConfig, ReportParams, ReportRef, ReportalClient, WorkspaceRef};
    ///
    /// # fn example() -> Result<(), reportal_client::Error> {
    /// let client = ReportalClient::new(ClientConfig::new("https://api.x", "token"))?;
    /// let url = client.report_preview_url(&ReportParams {
    ///     workspace: Some(WorkspaceRef::code("acme")),
    ///     report: ReportRef::type_code("invoice"),
    ///     query: None,
    /// })?;
    /// assert_eq!(url, "https://api.x/ws/acme/reports/invoice/preview");
    /// # Ok(())
    /// # }
    /// ```
    pub fn report_preview_url(&self, params: &ReportParams) -> Result<String, Error> {
        let workspace_id = self.workspace_id(params.workspace.as_ref())?;
        let report_id = params.report.resolve()?;
        let query = encode_report_query(params.query.as_ref());
        let url = self.endpoint_url_with_api_path(
            ROOT_PATH,
            &["ws", &workspace_id, "reports", &report_id, "preview"],
            query.as_ref(),
        )?;
        Ok(url.into())
    }

    /// Builds the download URL for a report's rendered PDF.
    pub fn report_pdf_url(&self, params: &ReportParams) -> Result<String, Error> {
        let workspace_id = self.workspace_id(params.workspace.as_ref())?;
        let report_id = params.report.resolve()?;
        let query = encode_report_query(params.query.as_ref());
        let url = self.endpoint_url(
            &["ws", &workspace_id, "reports", &report_id, "pdf"],
            query.as_ref(),
        )?;
        Ok(url.into())
    }

    /// Fetches a report rendered to PDF.
    ///
    /// The response body is binary and bypasses JSON decoding; the raw
    /// [`reqwest::Response`] is handed to the caller, who can read it with
    /// `bytes()` or stream it with `bytes_stream()`. Non-success statuses
    /// are still translated into [`Error::Api`] before the handle is
    /// returned.
    pub async fn download_report_pdf(
        &self,
        params: &ReportParams,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response, Error> {
        let workspace_id = self.workspace_id(params.workspace.as_ref())?;
        let report_id = params.report.resolve()?;
        let query = encode_report_query(params.query.as_ref());
        let url = self.endpoint_url(
            &["ws", &workspace_id, "reports", &report_id, "pdf"],
            query.as_ref(),
        )?;
        tracing::debug!("GET {}", url);
        with_cancellation(cancel, self.send(self.http.get(url))).await
    }

    /// Stages a JSON payload server-side and returns its short-lived id.
    ///
    /// Embedding large `data` payloads directly in a preview or PDF URL
    /// risks exceeding URL length limits; staging the payload once and
    /// referencing it via
    /// [`ReportQueryParams::temp_data_id`](crate::ReportQueryParams) keeps
    /// the URL short.
    ///
    /// # Parameters
    ///
    /// * `content` - The JSON object to stage.
    /// * `expires` - Optional expiry; the server applies its default when
    ///   `None`.
    /// * `workspace` - Workspace to stage under; falls back to the
    ///   configured default when `None`.
    /// * `cancel` - Optional cancellation token.
    pub async fn push_temporary_data(
        &self,
        content: serde_json::Value,
        expires: Option<DateTime<Utc>>,
        workspace: Option<&WorkspaceRef>,
        cancel: Option<&CancellationToken>,
    ) -> Result<TemporaryData, Error> {
        let workspace_id = self.workspace_id(workspace)?;
        let url = self.endpoint_url(&["ws", &workspace_id, "temporary-data"], None)?;
        let body = TemporaryDataBody {
            content,
            expiry_date: expires,
        };
        with_cancellation(cancel, self.post_json(url, &body)).await
    }

    /// Creates a single-use nonce token for unauthenticated preview links.
    pub async fn create_nonce_token(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<NonceToken, Error> {
        let url = self.endpoint_url(&["nonce-tokens"], None)?;
        with_cancellation(cancel, self.post_empty(url)).await
    }

    /// Resolves the workspace identifier for the URL path.
    ///
    /// Precedence: the ref's id, then its code, then the configured default
    /// workspace id, then the configured default workspace code.
    fn workspace_id(&self, workspace: Option<&WorkspaceRef>) -> Result<String, Error> {
        if let Some(resolved) = workspace.and_then(WorkspaceRef::resolve) {
            return Ok(resolved);
        }
        self.config
            .default_workspace_id()
            .or_else(|| self.config.default_workspace_code())
            .map(str::to_owned)
            .ok_or(Error::MissingWorkspaceId)
    }

    fn endpoint_url(&self, endpoint: &[&str], query: Option<&QueryPairs>) -> Result<Url, Error> {
        self.endpoint_url_with_api_path(API_PATH, endpoint, query)
    }

    fn endpoint_url_with_api_path(
        &self,
        api_path: &str,
        endpoint: &[&str],
        query: Option<&QueryPairs>,
    ) -> Result<Url, Error> {
        build_endpoint_url(&self.base_url, api_path, endpoint, query)
    }

    /// Attaches the bearer credential, dispatches, and routes non-success
    /// statuses through the error translator. The single composition point
    /// every request goes through; callers cannot opt out of the
    /// credential.
    async fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let request = request.bearer_auth(self.config.auth_token());
        let response = request.send().await.map_err(Error::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(translate_error(status, response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        tracing::debug!("GET {}", url);
        let response = self.send(self.http.get(url)).await?;
        decode_json(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        tracing::debug!("POST {}", url);
        let response = self.send(self.http.post(url).json(body)).await?;
        decode_json(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        tracing::debug!("POST {}", url);
        let response = self.send(self.http.post(url)).await?;
        decode_json(response).await
    }
}

/// Races `operation` against the caller's token at one composition point.
///
/// `biased` so a token that is already cancelled wins before the request is
/// ever observed; dropping the operation future aborts the in-flight
/// request.
async fn with_cancellation<T>(
    cancel: Option<&CancellationToken>,
    operation: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(Error::Cancelled),
                result = operation => result,
            }
        }
        None => operation.await,
    }
}

/// Translates a failed response into the uniform client error.
///
/// Ordered fallback chain for the message: the structured `{"error": ...}`
/// body when it decodes to a non-empty message, otherwise the HTTP reason
/// phrase. Body decoding failures are swallowed, never re-raised.
async fn translate_error(status: StatusCode, response: Response) -> Error {
    let reason = status
        .canonical_reason()
        .map(str::to_owned)
        .unwrap_or_else(|| status.to_string());
    let message = match response.bytes().await {
        Ok(body) => match serde_json::from_slice::<ErrorData>(&body) {
            Ok(ErrorData {
                error: Some(message),
            }) if !message.is_empty() => message,
            _ => reason,
        },
        Err(_) => reason,
    };
    tracing::debug!("request failed with {}: {}", status, message);
    Error::Api { status, message }
}

/// Decodes a successful JSON body into the caller's expected shape.
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let body = response.bytes().await.map_err(Error::Transport)?;
    serde_json::from_slice(&body).map_err(Error::Decode)
}
