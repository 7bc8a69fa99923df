//! Keyboard shortcut descriptors.

mod modifiers;

use core::fmt;
use core::str::FromStr;

pub use modifiers::Modifiers;

/// A key plus modifier set that activates a contributed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
	/// The unmodified key character, stored lowercase.
	pub key: char,
	/// Modifiers that must be held.
	pub modifiers: Modifiers,
}

impl Shortcut {
	/// Creates a shortcut for `key` with the given modifiers.
	pub fn new(key: char, modifiers: Modifiers) -> Self {
		Self {
			key: key.to_ascii_lowercase(),
			modifiers,
		}
	}
}

impl fmt::Display for Shortcut {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Modifiers {
			command,
			shift,
			control,
			option,
		} = self.modifiers;
		for (held, name) in [(command, "cmd"), (control, "ctrl"), (option, "opt"), (shift, "shift")] {
			if held {
				write!(f, "{name}+")?;
			}
		}
		write!(f, "{}", self.key)
	}
}

/// Error returned when a shortcut string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortcutParseError {
	#[error("empty shortcut")]
	Empty,
	#[error("unknown modifier '{0}'")]
	UnknownModifier(String),
	#[error("shortcut key must be a single character, got '{0}'")]
	InvalidKey(String),
}

impl FromStr for Shortcut {
	type Err = ShortcutParseError;

	/// Parses `cmd+shift+r` style descriptors. The last segment is the key.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
		let key = parts.pop().filter(|k| !k.is_empty()).ok_or(ShortcutParseError::Empty)?;

		let mut chars = key.chars();
		let (Some(ch), None) = (chars.next(), chars.next()) else {
			return Err(ShortcutParseError::InvalidKey(key.to_string()));
		};

		let modifiers = parts.into_iter().try_fold(Modifiers::NONE, |mods, name| {
			mods.with_name(&name.to_ascii_lowercase())
				.ok_or_else(|| ShortcutParseError::UnknownModifier(name.to_string()))
		})?;

		Ok(Self::new(ch, modifiers))
	}
}
