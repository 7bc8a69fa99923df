use std::sync::Arc;

use quill_primitives::ExtensionId;

use crate::index::{ContributionRegistry, InsertAction};
use crate::panel::PanelBinding;
use crate::toolbar::ToolbarItem;

/// All contribution categories the host renders from.
pub struct Contributions {
	pub toolbar: ContributionRegistry<ToolbarItem>,
	pub panels: ContributionRegistry<PanelBinding>,
}

impl Contributions {
	pub fn new() -> Self {
		Self {
			toolbar: ContributionRegistry::new("toolbar"),
			panels: ContributionRegistry::new("panels"),
		}
	}
}

impl Default for Contributions {
	fn default() -> Self {
		Self::new()
	}
}

/// Registration surface handed to an extension, scoped to its identity.
///
/// Cheap to clone; extensions may keep it and register lazily after
/// initialization.
#[derive(Clone)]
pub struct Contribution {
	extension_id: ExtensionId,
	registries: Arc<Contributions>,
}

impl Contribution {
	pub(crate) fn new(extension_id: ExtensionId, registries: Arc<Contributions>) -> Self {
		Self {
			extension_id,
			registries,
		}
	}

	/// Identity every registration through this surface is filed under.
	pub fn extension_id(&self) -> &ExtensionId {
		&self.extension_id
	}

	/// Registers a toolbar item under this extension's identity.
	pub fn register_toolbar_item(&self, mut item: ToolbarItem) -> InsertAction {
		self.scope(&mut item.extension_id);
		self.registries.toolbar.register(item)
	}

	/// Registers a panel binding under this extension's identity.
	pub fn register_panel_binding(&self, mut binding: PanelBinding) -> InsertAction {
		self.scope(&mut binding.extension_id);
		self.registries.panels.register(binding)
	}

	fn scope(&self, owner: &mut ExtensionId) {
		if *owner != self.extension_id {
			tracing::warn!(
				extension = %self.extension_id,
				claimed = %owner,
				"contribution claimed a foreign extension id; rescoping"
			);
			*owner = self.extension_id.clone();
		}
	}
}
