//! Binds the terminal panel into the panel bar.

use std::sync::Arc;

use quill_primitives::{ExtensionId, Modifiers, Shortcut};
use quill_registry::{Contribution, Extension, PanelBinding};

use crate::host::Workbench;
use crate::local_execution::TERMINAL_PANEL;

pub const EXTENSION_ID: &str = "TERMINAL";

/// Contributes the always-visible `Terminal` panel entry, focused with ctrl+backtick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPanel;

impl<H: Workbench> Extension<H> for TerminalPanel {
	fn id(&self) -> ExtensionId {
		EXTENSION_ID.into()
	}

	fn initialize(&self, _host: &Arc<H>, contribution: Contribution) {
		contribution.register_panel_binding(
			PanelBinding::new(EXTENSION_ID, "terminal", TERMINAL_PANEL, "Terminal")
				.with_icon("terminal")
				.with_shortcut(Shortcut::new('`', Modifiers::CONTROL)),
		);
	}
}
