//! Asset selection module
//!
//! Decides which assets of a resolved release are downloaded, based on the
//! optional `-include` filter.

mod selection;

pub use selection::{AssetSelector, LEGACY_PLATFORM_TOKEN, MatchMode};
