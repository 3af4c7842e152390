//! Error types shared by the resolver, the fetcher and the download orchestrator.

use std::path::PathBuf;

use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required input is missing or malformed. Raised before any network activity.
    #[error("{0}")]
    Usage(String),

    /// The transport could not complete the exchange (DNS, connect, TLS, timeout).
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 200 OK.
    #[error("{body}")]
    Response {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The release manifest did not have the expected shape.
    #[error("failed to decode release manifest")]
    Decode(#[from] serde_json::Error),

    #[error("failed to write {path:?}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The download was stopped because a sibling failed or the user interrupted.
    #[error("download of {0} cancelled")]
    Cancelled(String),

    #[error("download task for {name} did not complete")]
    Join {
        name: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("{} asset(s) failed to download:\n{}", .0.len(), format_failures(.0))]
    Batch(Vec<AssetFailure>),
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }
}

/// One asset that failed as part of a batch.
#[derive(Debug)]
pub struct AssetFailure {
    pub name: String,
    pub error: Error,
}

fn format_failures(failures: &[AssetFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  {}: {}", f.name, chain(&f.error)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render an error followed by its sources, `: `-separated.
fn chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
