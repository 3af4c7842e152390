//! GitHub release API: endpoints, repository ids and manifest resolution.

mod endpoint;
mod release;
mod repo;

pub use endpoint::{API_HOST_ENV, ApiEndpoint, DEFAULT_API_HOST, TOKEN_ENV};
pub use release::{Asset, ReleaseResolver, decode_manifest};
pub use repo::{RepoId, VersionSelector};
