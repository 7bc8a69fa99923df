//! Language to command sequence resolution.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quill_primitives::LanguageId;

use crate::table::CommandTable;
use crate::template::{Argv, CommandTemplate, escape_path};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("no commands configured for language '{0}'")]
	UnsupportedLanguage(LanguageId),
	/// Substituting a lossy rendering would name a different file.
	#[error("path is not valid UTF-8: {}", .0.display())]
	NonUtf8Path(PathBuf),
}

/// Pure resolver over an immutable [`CommandTable`].
#[derive(Debug, Clone)]
pub struct CommandResolver {
	table: Arc<CommandTable>,
}

impl Default for CommandResolver {
	fn default() -> Self {
		Self::new(CommandTable::builtin())
	}
}

impl CommandResolver {
	pub fn new(table: CommandTable) -> Self {
		Self { table: Arc::new(table) }
	}

	pub fn table(&self) -> &CommandTable {
		&self.table
	}

	pub fn supports(&self, language: &str) -> bool {
		self.table.supports(language)
	}

	/// Resolves shell command lines for running `path` as `language`.
	///
	/// Spaces in the path are escaped before substitution. The output has one
	/// line per configured template, in table order.
	pub fn resolve(&self, language: &str, path: &Path) -> Result<Vec<String>, ResolveError> {
		let templates = self.templates(language)?;
		let escaped = escape_path(utf8(path)?);
		Ok(templates.iter().map(|t| t.render(&escaped)).collect())
	}

	/// Resolves the same sequence as program + argument lists.
	///
	/// The path is substituted unescaped; no shell is involved.
	pub fn resolve_argv(&self, language: &str, path: &Path) -> Result<Vec<Argv>, ResolveError> {
		let templates = self.templates(language)?;
		let raw = utf8(path)?;
		Ok(templates.iter().filter_map(|t| t.argv(raw)).collect())
	}

	fn templates(&self, language: &str) -> Result<&[CommandTemplate], ResolveError> {
		self.table
			.templates(language)
			.ok_or_else(|| ResolveError::UnsupportedLanguage(language.into()))
	}
}

fn utf8(path: &Path) -> Result<&str, ResolveError> {
	path.to_str().ok_or_else(|| ResolveError::NonUtf8Path(path.to_path_buf()))
}
