//! Shared building blocks for mcpdevops.
//!
//! - [`error`]: the error taxonomy every crate reports through
//! - [`config`]: process configuration (token, API base URL, downloads root)
//! - [`path`]: validation of user-supplied relative paths

pub mod config;
pub mod error;
pub mod path;

pub use config::Config;
pub use error::{DevopsError, ResultExt};

pub type Result<T> = std::result::Result<T, DevopsError>;
