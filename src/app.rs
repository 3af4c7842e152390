//! Resolve a release, pick its assets and download them.

use anyhow::Result;
use log::info;
use tokio_util::sync::CancellationToken;

use crate::{
    config::{Config, RunOptions},
    download::{DownloadReport, Downloader},
    github::ReleaseResolver,
    http::Fetch,
    runtime::Runtime,
};

#[tracing::instrument(skip(runtime))]
pub async fn download<R: Runtime + 'static>(runtime: R, options: RunOptions) -> Result<DownloadReport> {
    let config = Config::new(runtime, options)?;
    run(config).await
}

#[tracing::instrument(skip(config))]
pub async fn run<R: Runtime + 'static, F: Fetch + 'static>(
    config: Config<R, F>,
) -> Result<DownloadReport> {
    let resolver = ReleaseResolver::new(config.fetcher.as_ref(), &config.endpoint);
    let assets = resolver.resolve(&config.repo, &config.selector).await?;
    let selected = config.assets.select(assets);
    info!("Downloading {} asset(s) of {}", selected.len(), config.repo);

    let cancel = CancellationToken::new();
    let ctrl_c_handler = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nInterrupted, cancelling downloads...");
                cancel.cancel();
            }
        })
    };

    let downloader = Downloader::new(
        config.runtime,
        config.fetcher,
        config.endpoint,
        config.download,
    );
    let result = downloader.download_all(&config.repo, selected, cancel).await;

    ctrl_c_handler.abort();

    Ok(result?)
}
