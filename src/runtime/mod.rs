//! Runtime abstraction for system operations.
//!
//! The download pipeline reaches the environment and the filesystem only
//! through the [`Runtime`] trait, so tests can substitute a mock.
//!
//! # Structure
//!
//! - `env` - Environment variables
//! - `fs` - Creating asset files on disk

mod env;
mod fs;

use std::env as std_env;
use std::io;
use std::path::Path;

/// Permission bits for downloaded assets: owner read/write/execute.
pub const ASSET_FILE_MODE: u32 = 0o700;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // Environment
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError>;

    // File System

    /// Open `path` for writing, creating it if needed and truncating any previous
    /// content. On Unix the file is created with [`ASSET_FILE_MODE`].
    fn create_file(&self, path: &Path) -> io::Result<Box<dyn io::Write + Send>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn env_var(&self, key: &str) -> Result<String, std_env::VarError> {
        self.env_var_impl(key)
    }

    fn create_file(&self, path: &Path) -> io::Result<Box<dyn io::Write + Send>> {
        self.create_file_impl(path)
    }
}
