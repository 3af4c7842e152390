pub mod app;
pub mod asset;
pub mod config;
pub mod download;
pub mod error;
pub mod github;
pub mod http;
pub mod runtime;
