//! Construction of the API base URL and the endpoints built on it.

use log::debug;

use crate::runtime::Runtime;

use super::{RepoId, VersionSelector};

/// Public GitHub API host used when no override is configured.
pub const DEFAULT_API_HOST: &str = "api.github.com";

/// Environment variable holding the access token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the API host override.
pub const API_HOST_ENV: &str = "GITHUB_API";

/// Scheme + authority prefix for every API request, possibly carrying the
/// access token as URL userinfo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base: String,
}

impl ApiEndpoint {
    /// Build the base URL from an optional host override and an optional token.
    ///
    /// Empty values count as absent. A bare host gets `https://`; an override
    /// that already has a scheme keeps it, with the token placed after it.
    pub fn new(host: Option<&str>, token: Option<&str>) -> Self {
        let host = host
            .map(|h| h.trim_end_matches('/'))
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_API_HOST);

        let (scheme, authority) = match host.split_once("://") {
            Some((scheme, rest)) => (scheme, rest),
            None => ("https", host),
        };

        let base = match token.filter(|t| !t.is_empty()) {
            Some(token) => format!("{}://{}@{}", scheme, token, authority),
            None => format!("{}://{}", scheme, authority),
        };

        Self { base }
    }

    /// Build the endpoint from the token in the environment and the configured host.
    pub fn from_runtime<R: Runtime + ?Sized>(runtime: &R, host: Option<&str>) -> Self {
        let token = runtime.env_var(TOKEN_ENV).ok();
        if let Some(token) = token.as_deref().filter(|t| !t.is_empty()) {
            debug!("Using {} for authentication: {}", TOKEN_ENV, mask_token(token));
        }
        Self::new(host, token.as_deref())
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/repos/{repo}/releases/{latest|tags/<tag>}`
    pub fn release_url(&self, repo: &RepoId, selector: &VersionSelector) -> String {
        format!("{}/repos/{}/releases/{}", self.base, repo, selector.path())
    }

    /// `{base}/repos/{repo}/releases/assets/{id}`
    pub fn asset_url(&self, repo: &RepoId, asset_id: u64) -> String {
        format!("{}/repos/{}/releases/assets/{}", self.base, repo, asset_id)
    }
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}****{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn repo() -> RepoId {
        "octo/tool".parse().unwrap()
    }

    #[test]
    fn test_default_host_without_token() {
        assert_eq!(ApiEndpoint::new(None, None).base(), "https://api.github.com");
    }

    #[test]
    fn test_default_host_with_token() {
        assert_eq!(
            ApiEndpoint::new(None, Some("abc123")).base(),
            "https://abc123@api.github.com"
        );
    }

    #[test]
    fn test_host_override() {
        assert_eq!(
            ApiEndpoint::new(Some("github.example.com/api/v3"), None).base(),
            "https://github.example.com/api/v3"
        );
        assert_eq!(
            ApiEndpoint::new(Some("github.example.com"), Some("tok")).base(),
            "https://tok@github.example.com"
        );
    }

    #[test]
    fn test_empty_values_are_absent() {
        assert_eq!(
            ApiEndpoint::new(Some(""), Some("")).base(),
            "https://api.github.com"
        );
    }

    #[test]
    fn test_host_with_scheme_keeps_scheme() {
        assert_eq!(
            ApiEndpoint::new(Some("http://127.0.0.1:1234/"), None).base(),
            "http://127.0.0.1:1234"
        );
        assert_eq!(
            ApiEndpoint::new(Some("http://127.0.0.1:1234"), Some("tok")).base(),
            "http://tok@127.0.0.1:1234"
        );
    }

    #[test]
    fn test_release_url_latest() {
        let endpoint = ApiEndpoint::new(None, None);
        assert_eq!(
            endpoint.release_url(&repo(), &VersionSelector::Latest),
            "https://api.github.com/repos/octo/tool/releases/latest"
        );
    }

    #[test]
    fn test_release_url_tag() {
        let endpoint = ApiEndpoint::new(None, Some("tok"));
        assert_eq!(
            endpoint.release_url(&repo(), &VersionSelector::Tag("v1.2.3".into())),
            "https://tok@api.github.com/repos/octo/tool/releases/tags/v1.2.3"
        );
    }

    #[test]
    fn test_asset_url() {
        let endpoint = ApiEndpoint::new(None, None);
        assert_eq!(
            endpoint.asset_url(&repo(), 42),
            "https://api.github.com/repos/octo/tool/releases/assets/42"
        );
    }

    #[test]
    fn test_from_runtime_reads_token() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(TOKEN_ENV))
            .returning(|_| Ok("ghp_0123456789abcdef".to_string()));

        let endpoint = ApiEndpoint::from_runtime(&runtime, None);
        assert_eq!(endpoint.base(), "https://ghp_0123456789abcdef@api.github.com");
    }

    #[test]
    fn test_from_runtime_without_token() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(TOKEN_ENV))
            .returning(|_| Err(std::env::VarError::NotPresent));

        let endpoint = ApiEndpoint::from_runtime(&runtime, Some("ghe.local"));
        assert_eq!(endpoint.base(), "https://ghe.local");
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("ghp_0123456789abcdef"), "ghp_****cdef");
        assert_eq!(mask_token("short"), "*****");
    }
}
