//! Toolbar contributions.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use quill_primitives::{BoxFutureStatic, ExtensionId, HostSnapshot, Icon, ItemKey, PanelId, Shortcut};

use crate::index::ContributionRegistry;
use crate::item::{ActivateFn, Contributed, VisibilityFn, always_visible, boxed_activation};

/// A toolbar button contributed by an extension.
#[derive(Clone)]
pub struct ToolbarItem {
	pub extension_id: ExtensionId,
	pub key: ItemKey,
	pub icon: Icon,
	/// Keyboard shortcut that activates the item while it is visible.
	pub shortcut: Option<Shortcut>,
	/// Panel the host focuses when the item activates.
	pub focus_panel: Option<PanelId>,
	on_activate: ActivateFn,
	visibility: VisibilityFn,
}

impl ToolbarItem {
	/// Creates an always-visible item with no shortcut and no focus target.
	pub fn new<F, Fut>(
		extension_id: impl Into<ExtensionId>,
		key: impl Into<ItemKey>,
		icon: impl Into<Icon>,
		on_activate: F,
	) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		Self {
			extension_id: extension_id.into(),
			key: key.into(),
			icon: icon.into(),
			shortcut: None,
			focus_panel: None,
			on_activate: boxed_activation(on_activate),
			visibility: always_visible(),
		}
	}

	pub fn with_shortcut(mut self, shortcut: Shortcut) -> Self {
		self.shortcut = Some(shortcut);
		self
	}

	pub fn with_focus_panel(mut self, panel: impl Into<PanelId>) -> Self {
		self.focus_panel = Some(panel.into());
		self
	}

	/// Replaces the visibility predicate.
	pub fn visible_when<P>(mut self, predicate: P) -> Self
	where
		P: Fn(&HostSnapshot) -> bool + Send + Sync + 'static,
	{
		self.visibility = Arc::new(predicate);
		self
	}

	/// Runs the activation callback. The returned future must be driven by the host.
	pub fn activate(&self) -> BoxFutureStatic<()> {
		(self.on_activate)()
	}
}

impl Contributed for ToolbarItem {
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

impl fmt::Debug for ToolbarItem {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ToolbarItem")
			.field("extension_id", &self.extension_id)
			.field("key", &self.key)
			.field("icon", &self.icon)
			.field("shortcut", &self.shortcut)
			.field("focus_panel", &self.focus_panel)
			.finish_non_exhaustive()
	}
}

impl ContributionRegistry<ToolbarItem> {
	/// Finds the first visible item bound to `shortcut`, in registration order.
	pub fn find_shortcut(&self, snapshot: &HostSnapshot, shortcut: Shortcut) -> Option<Arc<ToolbarItem>> {
		self.visible_items(snapshot)
			.find(|item| item.shortcut == Some(shortcut))
	}
}
