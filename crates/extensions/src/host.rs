//! What built-in extensions need from the host application.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use quill_exec::{EchoStyle, Executor};
use quill_primitives::HostSnapshot;

/// The active file could not be written before a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to save {}: {reason}", path.display())]
pub struct SaveError {
	pub path: PathBuf,
	pub reason: String,
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
	Info,
	Warning,
	Error,
}

impl fmt::Display for NotifyLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Info => "info",
			Self::Warning => "warning",
			Self::Error => "error",
		})
	}
}

/// Host handle passed to built-in extensions.
#[async_trait]
pub trait Workbench: Send + Sync + 'static {
	/// Fresh read-only view of host state.
	fn snapshot(&self) -> HostSnapshot;

	/// The shared command executor.
	fn executor(&self) -> &Executor;

	/// Echo line style for local runs.
	fn echo_style(&self) -> EchoStyle {
		EchoStyle::default()
	}

	/// Persists the active editor's buffer.
	async fn save_active_file(&self) -> Result<(), SaveError>;

	/// Shows a message to the user.
	fn notify(&self, level: NotifyLevel, message: String);
}
