//! The CLI's workbench: one file, opened from the command line.

use async_trait::async_trait;
use quill_exec::{EchoStyle, Executor};
use quill_extensions::{NotifyLevel, SaveError, Workbench};
use quill_primitives::{EditorView, HostSnapshot};

pub struct CliHost {
	snapshot: HostSnapshot,
	executor: Executor,
	echo_style: EchoStyle,
}

impl CliHost {
	pub fn new(editor: Option<EditorView>, executor: Executor, echo_style: EchoStyle) -> Self {
		Self {
			snapshot: HostSnapshot {
				active_editor: editor,
				focused_panel: None,
			},
			executor,
			echo_style,
		}
	}
}

#[async_trait]
impl Workbench for CliHost {
	fn snapshot(&self) -> HostSnapshot {
		self.snapshot.clone()
	}

	fn executor(&self) -> &Executor {
		&self.executor
	}

	fn echo_style(&self) -> EchoStyle {
		self.echo_style
	}

	/// There is no unsaved buffer; the file only has to exist on disk.
	async fn save_active_file(&self) -> Result<(), SaveError> {
		let Some(editor) = self.snapshot.active_editor() else {
			return Ok(());
		};
		match tokio::fs::metadata(editor.path()).await {
			Ok(meta) if meta.is_file() => Ok(()),
			Ok(_) => Err(SaveError {
				path: editor.path.clone(),
				reason: "not a regular file".into(),
			}),
			Err(error) => Err(SaveError {
				path: editor.path.clone(),
				reason: error.to_string(),
			}),
		}
	}

	fn notify(&self, level: NotifyLevel, message: String) {
		match level {
			NotifyLevel::Info => tracing::info!(%message, "notification"),
			NotifyLevel::Warning => tracing::warn!(%message, "notification"),
			NotifyLevel::Error => tracing::error!(%message, "notification"),
		}
		eprintln!("quill: {level}: {message}");
	}
}
