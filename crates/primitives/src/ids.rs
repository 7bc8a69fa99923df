//! Identifier newtypes shared between the host, registries and extensions.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub struct $name(Arc<str>);

		impl $name {
			/// Creates the identifier from any string-like value.
			pub fn new(id: impl Into<Arc<str>>) -> Self {
				Self(id.into())
			}

			/// Returns the identifier as a string slice.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(id: &str) -> Self {
				Self::new(id)
			}
		}

		impl From<String> for $name {
			fn from(id: String) -> Self {
				Self::new(id)
			}
		}

		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}

		impl PartialEq<str> for $name {
			fn eq(&self, other: &str) -> bool {
				&*self.0 == other
			}
		}
	};
}

string_id! {
	/// Process-unique identity of an extension.
	ExtensionId
}

string_id! {
	/// Key of a contributed item, unique within its owning extension and category.
	ItemKey
}

string_id! {
	/// Host panel identifier (e.g. `TERMINAL`).
	PanelId
}

string_id! {
	/// Opaque icon name; the host decides how to draw it.
	Icon
}

string_id! {
	/// Language identifier of an editor buffer (`py`, `cpp`, ...).
	LanguageId
}
