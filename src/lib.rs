//
//  reportal-client
//  lib.rs
//

//! # Reportal Client Library
//!
//! An async, typed client for the Reportal reporting service: list reports
//! and workspaces, build preview/download URLs, fetch rendered report PDFs,
//! and stage large JSON payloads ("temporary data") out-of-band so they can
//! be referenced by a short identifier instead of being embedded in a URL.
//!
//! ## Overview
//!
//! Every operation shares one request pipeline: the bearer credential is
//! attached to each outgoing request, non-success responses are translated
//! into a uniform [`Error::Api`] carrying the server's structured error
//! message (or the HTTP reason phrase when there is none), and successful
//! JSON bodies are decoded into typed models using the service's camelCase
//! wire convention. PDF downloads bypass JSON decoding and return the raw
//! response handle.
//!
//! ## Module Structure
//!
//! - [`client`]: The [`ReportalClient`] and its request pipeline
//! - [`config`]: Immutable client configuration
//! - [`params`]: Workspace/report identification and query encoding
//! - [`models`]: Server-returned records
//! - [`error`]: The unified error type
//!
//! ## Example
//!
//! ```rust,no_run
//! use reportal_client::{ClientConfig, ReportParams, ReportRef, ReportalClient, WorkspaceRef};
//!
//! # async fn example() -> Result<(), reportal_client::Error> {
//! let config = ClientConfig::new("https://reports.example.com", "secret-token");
//! let client = ReportalClient::new(config)?;
//!
//! // List what's available.
//! let workspaces = client.list_workspaces(None).await?;
//! println!("{} workspaces", workspaces.len());
//!
//! // Fetch a rendered PDF.
//! let response = client
//!     .download_report_pdf(
//!         &ReportParams {
//!             workspace: Some(WorkspaceRef::code("acme")),
//!             report: ReportRef::type_code("invoice"),
//!             query: None,
//!         },
//!         None,
//!     )
//!     .await?;
//! let pdf = response.bytes().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Large payloads
//!
//! Render inputs can be inlined into a URL via
//! [`ReportQueryParams::data`](crate::ReportQueryParams), but URLs have
//! length limits. For anything sizable, stage the payload once with
//! [`ReportalClient::push_temporary_data`] and reference it by the returned
//! id:
//!
//! ```rust,no_run
//! use reportal_client::{ClientConfig, ReportParams, ReportQueryParams, ReportRef, ReportalClient};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), reportal_client::Error> {
//! # let client = ReportalClient::new(ClientConfig::new("https://h", "t"))?;
//! let staged = client
//!     .push_temporary_data(json!({"rows": [1, 2, 3]}), None, None, None)
//!     .await?;
//! let url = client.report_preview_url(&ReportParams {
//!     workspace: None,
//!     report: ReportRef::type_code("invoice"),
//!     query: Some(ReportQueryParams {
//!         temp_data_id: Some(staged.temp_data_id),
//!         ..Default::default()
//!     }),
//! })?;
//! # Ok(())
//! # }
//! ```

/// Core client and request pipeline.
pub mod client;

/// Immutable client configuration.
pub mod config;

/// Unified error type for all operations.
pub mod error;

/// Server-returned records.
pub mod models;

/// Workspace/report identification and query encoding.
pub mod params;

mod endpoint;

pub use client::ReportalClient;
pub use config::ClientConfig;
pub use error::Error;
pub use models::{NonceToken, Report, TemporaryData, Workspace};
pub use params::{ReportListQuery, ReportParams, ReportQueryParams, ReportRef, WorkspaceRef};

/// Cancellation signal accepted by every async operation.
pub use tokio_util::sync::CancellationToken;

/// Crate version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
