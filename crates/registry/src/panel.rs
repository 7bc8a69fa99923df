//! Panel contributions.

use std::fmt;
use std::sync::Arc;

use quill_primitives::{ExtensionId, HostSnapshot, Icon, ItemKey, PanelId, Shortcut};

use crate::item::{Contributed, VisibilityFn, always_visible};

/// Binds an extension-owned entry to a host panel.
#[derive(Clone)]
pub struct PanelBinding {
	pub extension_id: ExtensionId,
	pub key: ItemKey,
	pub panel: PanelId,
	pub title: String,
	pub icon: Option<Icon>,
	/// Shortcut that focuses the panel.
	pub shortcut: Option<Shortcut>,
	visibility: VisibilityFn,
}

impl PanelBinding {
	pub fn new(
		extension_id: impl Into<ExtensionId>,
		key: impl Into<ItemKey>,
		panel: impl Into<PanelId>,
		title: impl Into<String>,
	) -> Self {
		Self {
			extension_id: extension_id.into(),
			key: key.into(),
			panel: panel.into(),
			title: title.into(),
			icon: None,
			shortcut: None,
			visibility: always_visible(),
		}
	}

	pub fn with_icon(mut self, icon: impl Into<Icon>) -> Self {
		self.icon = Some(icon.into());
		self
	}

	pub fn with_shortcut(mut self, shortcut: Shortcut) -> Self {
		self.shortcut = Some(shortcut);
		self
	}

	pub fn visible_when<P>(mut self, predicate: P) -> Self
	where
		P: Fn(&HostSnapshot) -> bool + Send + Sync + 'static,
	{
		self.visibility = Arc::new(predicate);
		self
	}
}

impl Contributed for PanelBinding {
	fn extension_id(&self) -> &ExtensionId {
		&self.extension_id
	}

	fn key(&self) -> &ItemKey {
		&self.key
	}

	fn is_visible(&self, snapshot: &HostSnapshot) -> bool {
		(self.visibility)(snapshot)
	}
}

impl fmt::Debug for PanelBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PanelBinding")
			.field("extension_id", &self.extension_id)
			.field("key", &self.key)
			.field("panel", &self.panel)
			.field("title", &self.title)
			.finish_non_exhaustive()
	}
}
