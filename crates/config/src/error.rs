//! Error types for settings loading.

use std::path::PathBuf;

use quill_exec::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a settings file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	/// The file is not valid TOML or has the wrong shape.
	#[error("failed to parse {path}: {error}")]
	Parse {
		path: PathBuf,
		error: toml::de::Error,
	},

	/// A `[commands]` override breaks the command table rules.
	#[error(transparent)]
	Table(#[from] TableError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
