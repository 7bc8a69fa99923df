use std::collections::BTreeMap;
use std::sync::Arc;

use quill_primitives::LanguageId;

use crate::template::CommandTemplate;

/// Command sequences shipped with the editor.
pub const BUILTIN_COMMANDS: &[(&str, &[&str])] = &[
	("py", &["python3 -u {url}"]),
	("js", &["node {url}"]),
	("c", &["clang {url}", "wasm a.out"]),
	("cpp", &["clang {url}", "wasm a.out"]),
	("php", &["php {url}"]),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
	/// Every language needs at least one command.
	#[error("language '{0}' has an empty command sequence")]
	EmptySequence(LanguageId),
	#[error("language '{language}' has a blank command at position {index}")]
	BlankCommand { language: LanguageId, index: usize },
}

/// Immutable mapping from language to its ordered, non-empty command templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTable {
	entries: BTreeMap<LanguageId, Arc<[CommandTemplate]>>,
}

impl CommandTable {
	/// The table built from [`BUILTIN_COMMANDS`].
	pub fn builtin() -> Self {
		let entries = BUILTIN_COMMANDS
			.iter()
			.map(|(language, templates)| {
				let templates: Arc<[CommandTemplate]> = templates.iter().copied().map(CommandTemplate::from).collect();
				(LanguageId::from(*language), templates)
			})
			.collect();
		Self { entries }
	}

	/// Builds a table, validating every sequence.
	pub fn from_entries<I, L, T>(entries: I) -> Result<Self, TableError>
	where
		I: IntoIterator<Item = (L, Vec<T>)>,
		L: Into<LanguageId>,
		T: Into<CommandTemplate>,
	{
		Self::default().with_overrides(entries)
	}

	/// Returns a new table where each given language replaces the existing entry.
	pub fn with_overrides<I, L, T>(mut self, overrides: I) -> Result<Self, TableError>
	where
		I: IntoIterator<Item = (L, Vec<T>)>,
		L: Into<LanguageId>,
		T: Into<CommandTemplate>,
	{
		for (language, templates) in overrides {
			let language = language.into();
			let templates: Vec<CommandTemplate> = templates.into_iter().map(Into::into).collect();
			if templates.is_empty() {
				return Err(TableError::EmptySequence(language));
			}
			if let Some(index) = templates.iter().position(|t| t.as_str().trim().is_empty()) {
				return Err(TableError::BlankCommand { language, index });
			}
			self.entries.insert(language, templates.into());
		}
		Ok(self)
	}

	pub fn templates(&self, language: &str) -> Option<&[CommandTemplate]> {
		self.entries.get(language).map(|t| &**t)
	}

	pub fn supports(&self, language: &str) -> bool {
		self.entries.contains_key(language)
	}

	/// Entries in language order.
	pub fn iter(&self) -> impl Iterator<Item = (&LanguageId, &[CommandTemplate])> {
		self.entries.iter().map(|(language, templates)| (language, &**templates))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
