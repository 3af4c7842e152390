use log::{debug, warn};

use crate::github::Asset;

/// Platform token matched by [`MatchMode::Platform`].
pub const LEGACY_PLATFORM_TOKEN: &str = "darwin";

/// How a non-empty name filter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatchMode {
    /// Select assets whose name contains the filter value.
    #[default]
    Filter,
    /// Ignore the filter value and select assets whose name contains `darwin`.
    Platform,
}

/// Decides which assets of a release get downloaded.
#[derive(Debug, Clone, Default)]
pub struct AssetSelector {
    filter: Option<String>,
    mode: MatchMode,
}

impl AssetSelector {
    pub fn new(filter: Option<String>, mode: MatchMode) -> Self {
        Self {
            filter: filter.filter(|f| !f.is_empty()),
            mode,
        }
    }

    /// The substring an asset name must contain, or `None` when everything is selected.
    pub fn needle(&self) -> Option<&str> {
        let filter = self.filter.as_deref()?;
        Some(match self.mode {
            MatchMode::Filter => filter,
            MatchMode::Platform => LEGACY_PLATFORM_TOKEN,
        })
    }

    pub fn matches(&self, asset: &Asset) -> bool {
        self.needle().is_none_or(|needle| asset.name.contains(needle))
    }

    /// Keep matching assets in manifest order. Duplicates are not removed.
    pub fn select(&self, assets: Vec<Asset>) -> Vec<Asset> {
        let Some(needle) = self.needle() else {
            return assets;
        };

        let total = assets.len();
        let (selected, skipped): (Vec<Asset>, Vec<Asset>) =
            assets.into_iter().partition(|asset| self.matches(asset));

        debug!(
            "Selected {}/{} asset(s) containing {:?}",
            selected.len(),
            total,
            needle
        );

        if selected.is_empty() && !skipped.is_empty() {
            let mut names: Vec<&str> = skipped.iter().map(|a| a.name.as_str()).collect();
            names.sort();
            warn!(
                "No assets matched {:?}. Available assets:\n  {}",
                needle,
                names.join("\n  ")
            );
        }

        selected
    }
}
