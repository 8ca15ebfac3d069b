//
//  reportal-client
//  error.rs
//

//! Error types for Reportal API operations.
//!
//! Every public operation surfaces a single [`Error`] to its immediate
//! caller. There is no local recovery, no silent retry, and no sentinel
//! return value anywhere in the client; a failed call is always a raised
//! error with a human-readable message.
//!
//! # Example
//!
//! ```rust,no_run
//! use reportal_client::Error;
//!
//! fn handle<T>(result: Result<T, Error>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(Error::MissingWorkspaceId) => println!("Configure a default workspace first"),
//!         Err(Error::Api { status, message }) => println!("Server said ({}): {}", status, message),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all Reportal client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No workspace could be identified for the call.
    ///
    /// Raised when neither the per-call workspace reference nor the
    /// configured defaults yield a workspace identifier.
    #[error("workspace id is missing; provide a workspace argument or set a default in the client configuration")]
    MissingWorkspaceId,

    /// The report reference carried neither an id nor a type code.
    #[error("invalid report identification; missing either a report id or a report type code")]
    InvalidReportIdentification,

    /// The server responded with a non-success status.
    ///
    /// `message` is produced by the error translator: the structured
    /// `{"error": "..."}` body when one decodes, otherwise the HTTP reason
    /// phrase. The display form is exactly that message.
    #[error("{message}")]
    Api {
        /// HTTP status the server returned.
        status: StatusCode,
        /// Best-effort human-readable message.
        message: String,
    },

    /// A transport-level failure: connection, TLS, timeout, or request
    /// construction. Not server-originated and never translated.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A successful response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The operation was aborted by the caller's cancellation token.
    #[error("operation cancelled")]
    Cancelled,

    /// The configured base URL cannot be parsed or cannot serve as a base
    /// for endpoint paths.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
