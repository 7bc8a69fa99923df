//! User settings for quill.
//!
//! Settings are read once at startup from `$XDG_CONFIG_HOME/quill/config.toml`
//! (or `~/.config/quill/config.toml`). A missing file means defaults.
//!
//! ```toml
//! # Echo the full joined command line instead of the program name.
//! compiler_show_path = true
//!
//! # Replace or add a language's command sequence.
//! [commands]
//! py = ["pypy3 {url}"]
//! go = ["go run {url}"]
//! ```

pub mod error;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use error::{ConfigError, Result};
use quill_exec::{CommandTable, EchoStyle};
use serde::Deserialize;

/// Parsed settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Show every resolved command in the echo line.
	pub compiler_show_path: bool,
	/// Per-language command sequence overrides.
	pub commands: BTreeMap<String, Vec<String>>,
}

impl Settings {
	/// Default settings file location.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("quill").join("config.toml"))
	}

	/// Loads settings from the default location.
	pub fn load_default() -> Result<Self> {
		match Self::default_path() {
			Some(path) => Self::load(&path),
			None => {
				tracing::debug!("no config directory; using default settings");
				Ok(Self::default())
			}
		}
	}

	/// Loads settings from `path`, returning defaults if it does not exist.
	pub fn load(path: &Path) -> Result<Self> {
		let content = match std::fs::read_to_string(path) {
			Ok(content) => content,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "settings file not found; using defaults");
				return Ok(Self::default());
			}
			Err(error) => {
				return Err(ConfigError::Io {
					path: path.to_path_buf(),
					error,
				});
			}
		};
		let settings = Self::parse(&content).map_err(|error| ConfigError::Parse {
			path: path.to_path_buf(),
			error,
		})?;
		tracing::info!(
			path = %path.display(),
			overrides = settings.commands.len(),
			show_path = settings.compiler_show_path,
			"settings loaded"
		);
		Ok(settings)
	}

	pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
		toml::from_str(content)
	}

	pub fn echo_style(&self) -> EchoStyle {
		EchoStyle::from_show_path(self.compiler_show_path)
	}

	/// The builtin command table with this file's overrides merged in.
	pub fn command_table(&self) -> Result<CommandTable> {
		let overrides = self.commands.iter().map(|(language, templates)| (language.as_str(), templates.clone()));
		Ok(CommandTable::builtin().with_overrides(overrides)?)
	}
}
