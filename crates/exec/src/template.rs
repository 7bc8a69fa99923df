//! Command templates and path substitution.
//!
//! Substitution is textual. The only character escaped in the path is the
//! space (as `\ `); every other shell metacharacter passes through unchanged.
//! Hosts that can spawn programs directly should use [`CommandTemplate::argv`]
//! instead, which never goes through a shell.

use std::fmt;

/// Token standing for the active file path.
pub const PLACEHOLDER: &str = "{url}";

/// Escapes `path` for a shell-like interpreter: each space becomes `\ `.
pub fn escape_path(path: &str) -> String {
	path.replace(' ', "\\ ")
}

/// One step of a language's command sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandTemplate(String);

impl CommandTemplate {
	pub fn new(raw: impl Into<String>) -> Self {
		Self(raw.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn has_placeholder(&self) -> bool {
		self.0.contains(PLACEHOLDER)
	}

	/// Substitutes an already escaped path into the template.
	pub fn render(&self, escaped_path: &str) -> String {
		self.0.replace(PLACEHOLDER, escaped_path)
	}

	/// Splits the template on whitespace and substitutes the raw path per word.
	///
	/// Returns `None` for a template with no words.
	pub fn argv(&self, raw_path: &str) -> Option<Argv> {
		let mut words = self.0.split_whitespace().map(|word| word.replace(PLACEHOLDER, raw_path));
		let program = words.next()?;
		Some(Argv {
			program,
			args: words.collect(),
		})
	}
}

impl fmt::Display for CommandTemplate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for CommandTemplate {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}

impl From<String> for CommandTemplate {
	fn from(raw: String) -> Self {
		Self(raw)
	}
}

/// A program plus its argument list, for direct spawning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argv {
	pub program: String,
	pub args: Vec<String>,
}

impl fmt::Display for Argv {
	/// Debug-style rendering: arguments containing spaces are quoted.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.program)?;
		for arg in &self.args {
			if arg.contains(' ') {
				write!(f, " {arg:?}")?;
			} else {
				write!(f, " {arg}")?;
			}
		}
		Ok(())
	}
}
