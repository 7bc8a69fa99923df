//! Extension ownership and startup lifecycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quill_primitives::{BoxFutureStatic, ExtensionId, HostSnapshot, ItemKey, PanelId, Shortcut};
use rustc_hash::FxHashSet;

use crate::error::ExtensionError;
use crate::extension::Extension;
use crate::index::VisibleItems;
use crate::item::Contributed;
use crate::panel::PanelBinding;
use crate::surface::{Contribution, Contributions};
use crate::toolbar::ToolbarItem;

#[cfg(test)]
mod tests;

/// What the host should do when a toolbar item fires.
pub struct Activation {
	/// Panel to focus before awaiting the callback, if the item requests one.
	pub focus_panel: Option<PanelId>,
	/// The item's activation future.
	pub future: BoxFutureStatic<()>,
}

impl Activation {
	fn of(item: &ToolbarItem) -> Self {
		Self {
			focus_panel: item.focus_panel.clone(),
			future: item.activate(),
		}
	}
}

/// Owns registered extensions and the registries they contribute to.
///
/// Construct one per process, register every extension, then call
/// [`Self::initialize_all`] once.
pub struct ExtensionManager<H: ?Sized> {
	extensions: Vec<Box<dyn Extension<H>>>,
	ids: FxHashSet<ExtensionId>,
	contributions: Arc<Contributions>,
	initialized: AtomicBool,
}

impl<H: ?Sized> Default for ExtensionManager<H> {
	fn default() -> Self {
		Self::new()
	}
}

impl<H: ?Sized> ExtensionManager<H> {
	pub fn new() -> Self {
		Self {
			extensions: Vec::new(),
			ids: FxHashSet::default(),
			contributions: Arc::new(Contributions::new()),
			initialized: AtomicBool::new(false),
		}
	}

	/// Adds an extension. Identities must be unique.
	pub fn register<E>(&mut self, extension: E) -> Result<(), ExtensionError>
	where
		E: Extension<H> + 'static,
	{
		let id = extension.id();
		if self.is_initialized() {
			return Err(ExtensionError::LateRegistration(id));
		}
		if !self.ids.insert(id.clone()) {
			return Err(ExtensionError::Duplicate(id));
		}
		tracing::debug!(extension = %id, "extension registered");
		self.extensions.push(Box::new(extension));
		Ok(())
	}

	/// Runs every extension's initialization hook, in registration order.
	///
	/// Fails with [`ExtensionError::AlreadyInitialized`] on any call after the first.
	pub fn initialize_all(&self, host: &Arc<H>) -> Result<(), ExtensionError> {
		if self
			.initialized
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			return Err(ExtensionError::AlreadyInitialized);
		}

		for extension in &self.extensions {
			let id = extension.id();
			let span = tracing::debug_span!("extension.initialize", extension = %id);
			let _enter = span.enter();
			extension.initialize(host, Contribution::new(id, Arc::clone(&self.contributions)));
		}

		tracing::info!(
			extensions = self.extensions.len(),
			toolbar_items = self.contributions.toolbar.len(),
			panel_bindings = self.contributions.panels.len(),
			"extensions initialized"
		);
		Ok(())
	}

	pub fn is_initialized(&self) -> bool {
		self.initialized.load(Ordering::Acquire)
	}

	/// Identities in registration order.
	pub fn extension_ids(&self) -> Vec<ExtensionId> {
		self.extensions.iter().map(|ext| ext.id()).collect()
	}

	pub fn contributions(&self) -> &Arc<Contributions> {
		&self.contributions
	}

	/// Toolbar items to render for `snapshot`.
	pub fn toolbar_items<'s>(&self, snapshot: &'s HostSnapshot) -> VisibleItems<'s, ToolbarItem> {
		self.contributions.toolbar.visible_items(snapshot)
	}

	/// Panel bindings to render for `snapshot`.
	pub fn panel_bindings<'s>(&self, snapshot: &'s HostSnapshot) -> VisibleItems<'s, PanelBinding> {
		self.contributions.panels.visible_items(snapshot)
	}

	/// Activates a toolbar item by identity if it is currently visible.
	pub fn activate(&self, snapshot: &HostSnapshot, extension_id: &ExtensionId, key: &ItemKey) -> Option<Activation> {
		let item = self.contributions.toolbar.get(extension_id, key)?;
		if !item.is_visible(snapshot) {
			tracing::debug!(extension = %extension_id, key = %key, "activation of hidden item ignored");
			return None;
		}
		Some(Activation::of(&item))
	}

	/// Activates the visible toolbar item bound to `shortcut`, if any.
	pub fn activate_shortcut(&self, snapshot: &HostSnapshot, shortcut: Shortcut) -> Option<Activation> {
		let item = self.contributions.toolbar.find_shortcut(snapshot, shortcut)?;
		tracing::debug!(extension = %item.extension_id, key = %item.key, %shortcut, "shortcut activated");
		Some(Activation::of(&item))
	}
}
