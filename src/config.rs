use anyhow::{Context, Result};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    asset::{AssetSelector, MatchMode},
    download::{DEFAULT_JOBS, DownloadOptions},
    github::{ApiEndpoint, RepoId, VersionSelector},
    http::{Fetch, HttpClient},
    runtime::Runtime,
};

/// Sent with every request; the GitHub API rejects requests without a User-Agent.
pub const USER_AGENT: &str = concat!("ghfetch/", env!("GHFETCH_VERSION"));

/// Raw settings as collected from the command line and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub repo: String,
    pub directory: Option<PathBuf>,
    pub version: Option<String>,
    pub include: Option<String>,
    pub match_mode: MatchMode,
    pub jobs: usize,
    pub keep_going: bool,
    pub api_host: Option<String>,
}

impl RunOptions {
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            directory: None,
            version: None,
            include: None,
            match_mode: MatchMode::default(),
            jobs: DEFAULT_JOBS,
            keep_going: false,
            api_host: None,
        }
    }
}

/// Everything one run needs, resolved up front and passed explicitly.
pub struct Config<R: Runtime, F: Fetch> {
    pub runtime: Arc<R>,
    pub fetcher: Arc<F>,
    pub endpoint: ApiEndpoint,
    pub repo: RepoId,
    pub selector: VersionSelector,
    pub assets: AssetSelector,
    pub download: DownloadOptions,
}

impl<R: Runtime> Config<R, HttpClient> {
    pub fn new(runtime: R, options: RunOptions) -> Result<Self> {
        let repo = options.repo.parse::<RepoId>()?;
        let endpoint = ApiEndpoint::from_runtime(&runtime, options.api_host.as_deref());

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            runtime: Arc::new(runtime),
            fetcher: Arc::new(HttpClient::new(client)),
            endpoint,
            repo,
            selector: VersionSelector::from_version(options.version.as_deref()),
            assets: AssetSelector::new(options.include, options.match_mode),
            download: DownloadOptions {
                directory: options.directory,
                jobs: options.jobs,
                keep_going: options.keep_going,
            },
        })
    }
}
