//! Release manifest resolution.

use log::{debug, info};

use crate::error::Result;
use crate::http::{Accept, Fetch, redact_userinfo};

use super::{ApiEndpoint, RepoId, VersionSelector};

/// GitHub API response types (internal).
mod api {
    use serde::Deserialize;

    /// Only `assets` is read; every other release field is ignored.
    #[derive(Deserialize, Debug)]
    pub struct Release {
        pub assets: Vec<Asset>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Asset {
        pub id: u64,
        pub name: String,
    }
}

/// One downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: u64,
    pub name: String,
}

impl From<api::Asset> for Asset {
    fn from(a: api::Asset) -> Self {
        Asset {
            id: a.id,
            name: a.name,
        }
    }
}

/// Decode a release response body into its assets, in manifest order.
pub fn decode_manifest(body: &[u8]) -> Result<Vec<Asset>> {
    let release: api::Release = serde_json::from_slice(body)?;
    Ok(release.assets.into_iter().map(Asset::from).collect())
}

/// Resolves `(repository, selector)` to the list of release assets.
pub struct ReleaseResolver<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    endpoint: &'a ApiEndpoint,
}

impl<'a, F: Fetch + ?Sized> ReleaseResolver<'a, F> {
    pub fn new(fetcher: &'a F, endpoint: &'a ApiEndpoint) -> Self {
        Self { fetcher, endpoint }
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, repo: &RepoId, selector: &VersionSelector) -> Result<Vec<Asset>> {
        let url = self.endpoint.release_url(repo, selector);
        info!("Resolving {} of {}...", selector, repo);
        debug!("Fetching release manifest from {}", redact_userinfo(&url));

        let body = self.fetcher.fetch(&url, Accept::Json).await?;
        let assets = decode_manifest(&body)?;

        debug!("Release has {} asset(s)", assets.len());
        Ok(assets)
    }
}
