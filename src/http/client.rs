//! Single-shot authenticated GET that buffers the whole response body.

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

use crate::error::{Error, Result};

/// Media type requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Release metadata.
    Json,
    /// Raw asset bytes.
    OctetStream,
}

impl Accept {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accept::Json => "application/json",
            Accept::OctetStream => "application/octet-stream",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `url` and return the full body. Anything but 200 OK is an error
    /// carrying the response body.
    async fn fetch(&self, url: &str, accept: Accept) -> Result<Vec<u8>>;
}

/// HTTP client used for both manifest and asset requests.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for HttpClient {
    #[tracing::instrument(skip(self, url))]
    async fn fetch(&self, url: &str, accept: Accept) -> Result<Vec<u8>> {
        debug!("GET {} ({})...", redact_userinfo(url), accept.as_str());

        // reqwest moves userinfo from the URL into a Basic Authorization header.
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept.as_str())
            .send()
            .await
            .map_err(|source| Error::Request {
                url: redact_userinfo(url),
                source,
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| Error::Request {
            url: redact_userinfo(url),
            source,
        })?;

        if status != StatusCode::OK {
            debug!("GET {} returned {}", redact_userinfo(url), status);
            return Err(Error::Response {
                url: redact_userinfo(url),
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        debug!("Received {} bytes", body.len());
        Ok(body.to_vec())
    }
}

/// Strip any `user:password@` part from a URL so it can be logged or shown.
pub(crate) fn redact_userinfo(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 3;
    let rest = &url[authority_start..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}***@{}", &url[..authority_start], &rest[at + 1..]),
        None => url.to_string(),
    }
}
