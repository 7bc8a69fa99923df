//! Built-in extensions for quill.
//!
//! Each extension implements [`quill_registry::Extension`] over any host that
//! implements [`Workbench`]; [`register_builtins`] adds all of them to a
//! manager.

mod host;
pub mod local_execution;
pub mod terminal;

pub use host::{NotifyLevel, SaveError, Workbench};
pub use local_execution::{LocalExecution, RunAttempt, SkipReason, run_active_file};
use quill_exec::CommandResolver;
use quill_registry::{ExtensionError, ExtensionManager};
pub use terminal::TerminalPanel;

/// Registers every built-in extension, in display order.
pub fn register_builtins<H: Workbench>(manager: &mut ExtensionManager<H>, resolver: CommandResolver) -> Result<(), ExtensionError> {
	manager.register(TerminalPanel)?;
	manager.register(LocalExecution::new(resolver))?;
	Ok(())
}
