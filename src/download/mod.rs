//! Concurrent download of selected release assets.
//!
//! Every asset gets its own tokio task. A semaphore caps how many run at once
//! and a shared [`CancellationToken`] stops the siblings once one of them
//! fails (unless `keep_going` is set) or the user interrupts the run.
//! All tasks are joined before [`Downloader::download_all`] returns.

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use futures_util::future::join_all;
use log::{debug, warn};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::error::{AssetFailure, Error, Result};
use crate::github::{ApiEndpoint, Asset, RepoId};
use crate::http::{Accept, Fetch};
use crate::runtime::Runtime;

/// Default number of assets downloaded at the same time.
pub const DEFAULT_JOBS: usize = 8;

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Directory the assets are written to. Must already exist.
    pub directory: Option<PathBuf>,
    /// Maximum concurrent downloads; `0` means no limit.
    pub jobs: usize,
    /// Keep downloading the other assets when one fails.
    pub keep_going: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            directory: None,
            jobs: DEFAULT_JOBS,
            keep_going: false,
        }
    }
}

/// Paths written by a successful batch, in manifest order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub stored: Vec<PathBuf>,
}

/// `{directory}/{name}`, or just `{name}` relative to the working directory.
///
/// The asset name comes from the server, so it must be a single plain file
/// name; anything that could resolve outside the directory is rejected.
pub fn target_path(directory: Option<&Path>, name: &str) -> Result<PathBuf> {
    let path = match directory {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    };
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(path),
        _ => Err(Error::Filesystem {
            path,
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("asset name {:?} is not a plain file name", name),
            ),
        }),
    }
}

pub struct Downloader<R: Runtime, F: Fetch> {
    runtime: Arc<R>,
    fetcher: Arc<F>,
    endpoint: ApiEndpoint,
    options: DownloadOptions,
}

impl<R: Runtime + 'static, F: Fetch + 'static> Downloader<R, F> {
    pub fn new(
        runtime: Arc<R>,
        fetcher: Arc<F>,
        endpoint: ApiEndpoint,
        options: DownloadOptions,
    ) -> Self {
        Self {
            runtime,
            fetcher,
            endpoint,
            options,
        }
    }

    /// Download every asset concurrently and wait for all of them.
    ///
    /// A single failure is returned as is; several are aggregated into
    /// [`Error::Batch`]. Siblings stopped by cancellation are not reported as
    /// failures of their own.
    #[tracing::instrument(skip(self, assets, cancel))]
    pub async fn download_all(
        &self,
        repo: &RepoId,
        assets: Vec<Asset>,
        cancel: CancellationToken,
    ) -> Result<DownloadReport> {
        let permits = match self.options.jobs {
            0 => Semaphore::MAX_PERMITS,
            n => n,
        };
        let semaphore = Arc::new(Semaphore::new(permits));
        debug!(
            "Downloading {} asset(s) from {} with {} concurrent job(s)",
            assets.len(),
            repo,
            self.options.jobs
        );

        let mut report = DownloadReport::default();
        let mut failures = Vec::new();
        let mut cancelled = 0;

        let mut names = Vec::with_capacity(assets.len());
        let mut handles = Vec::with_capacity(assets.len());
        for asset in assets {
            let path = match target_path(self.options.directory.as_deref(), &asset.name) {
                Ok(path) => path,
                Err(error) => {
                    warn!("Refusing to download {}: {}", asset.name, error);
                    if !self.options.keep_going {
                        cancel.cancel();
                    }
                    failures.push(AssetFailure {
                        name: asset.name,
                        error,
                    });
                    continue;
                }
            };
            let task = AssetTask {
                url: self.endpoint.asset_url(repo, asset.id),
                path,
                name: asset.name.clone(),
                runtime: Arc::clone(&self.runtime),
                fetcher: Arc::clone(&self.fetcher),
                semaphore: Arc::clone(&semaphore),
                cancel: cancel.clone(),
                keep_going: self.options.keep_going,
            };
            names.push(asset.name);
            handles.push(tokio::spawn(task.run()));
        }

        for (name, joined) in names.into_iter().zip(join_all(handles).await) {
            let result = joined.unwrap_or_else(|source| {
                Err(Error::Join {
                    name: name.clone(),
                    source,
                })
            });
            match result {
                Ok(path) => report.stored.push(path),
                Err(e) if e.is_cancelled() => cancelled += 1,
                Err(error) => {
                    warn!("Failed to download {}: {}", name, error);
                    failures.push(AssetFailure { name, error });
                }
            }
        }

        match failures.len() {
            0 if cancelled > 0 => Err(Error::Cancelled(format!("{} asset(s)", cancelled))),
            0 => Ok(report),
            1 => Err(failures.remove(0).error),
            _ => Err(Error::Batch(failures)),
        }
    }
}

/// Everything one spawned download owns.
struct AssetTask<R: Runtime, F: Fetch> {
    url: String,
    path: PathBuf,
    name: String,
    runtime: Arc<R>,
    fetcher: Arc<F>,
    semaphore: Arc<Semaphore>,
    cancel: CancellationToken,
    keep_going: bool,
}

impl<R: Runtime, F: Fetch> AssetTask<R, F> {
    async fn run(self) -> Result<PathBuf> {
        let result = self.download().await;
        if let Err(e) = &result {
            if !e.is_cancelled() && !self.keep_going {
                debug!("Cancelling remaining downloads after failure of {}", self.name);
                self.cancel.cancel();
            }
        }
        result
    }

    async fn download(&self) -> Result<PathBuf> {
        let _permit = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Error::Cancelled(self.name.clone())),
            permit = Arc::clone(&self.semaphore).acquire_owned() => {
                permit.map_err(|_| Error::Cancelled(self.name.clone()))?
            }
        };

        println!("Downloading {}...", self.name);

        let body = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Error::Cancelled(self.name.clone())),
            body = self.fetcher.fetch(&self.url, Accept::OctetStream) => body?,
        };

        self.write(&body)?;
        println!("{} stored to {}", self.name, self.path.display());
        Ok(self.path.clone())
    }

    fn write(&self, body: &[u8]) -> Result<()> {
        let to_error = |source: std::io::Error| Error::Filesystem {
            path: self.path.clone(),
            source,
        };
        let mut file = self.runtime.create_file(&self.path).map_err(to_error)?;
        file.write_all(body).map_err(to_error)?;
        file.flush().map_err(to_error)?;
        debug!("Wrote {} bytes to {:?}", body.len(), self.path);
        Ok(())
    }
}
