//! Read-only view of host state handed to visibility predicates.

use std::path::{Path, PathBuf};

use crate::ids::{LanguageId, PanelId};

/// The active text editor as seen by contributions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
	/// Location of the buffer. For remote buffers this is the remote path.
	pub path: PathBuf,
	/// Language of the buffer.
	pub language: LanguageId,
	/// Whether the buffer is backed by a file on the local file system.
	pub is_local: bool,
}

impl EditorView {
	/// Creates a view of a local file.
	pub fn local(path: impl Into<PathBuf>, language: impl Into<LanguageId>) -> Self {
		Self {
			path: path.into(),
			language: language.into(),
			is_local: true,
		}
	}

	/// Creates a view of a buffer that does not live on the local file system.
	pub fn remote(path: impl Into<PathBuf>, language: impl Into<LanguageId>) -> Self {
		Self {
			is_local: false,
			..Self::local(path, language)
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

/// Snapshot of the host state that visibility predicates may read.
///
/// Built fresh by the host for every render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSnapshot {
	/// The active editor, if any.
	pub active_editor: Option<EditorView>,
	/// The panel currently holding focus, if any.
	pub focused_panel: Option<PanelId>,
}

impl HostSnapshot {
	/// Snapshot with `editor` active and nothing focused.
	pub fn with_editor(editor: EditorView) -> Self {
		Self {
			active_editor: Some(editor),
			focused_panel: None,
		}
	}

	pub fn active_editor(&self) -> Option<&EditorView> {
		self.active_editor.as_ref()
	}
}
