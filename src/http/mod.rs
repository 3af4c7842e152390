//! HTTP access to the release API.

mod client;

pub use client::{Accept, Fetch, HttpClient};
pub(crate) use client::redact_userinfo;

#[cfg(test)]
pub use client::MockFetch;
