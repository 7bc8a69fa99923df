//! Runs the active file with a local toolchain.
//!
//! Contributes a `play` toolbar item (`cmd+r`) that is visible while the active
//! editor is a local file in a language with a command table entry. Activating
//! it saves the file, resolves the language's command sequence, echoes a
//! summary line and hands the sequence to the shared executor.

use std::path::PathBuf;
use std::sync::{Arc, Weak};

use quill_exec::{CommandResolver, CommandSequence, ExecError, ResolveError, RunHandle, Script, echo_line};
use quill_primitives::{ExtensionId, HostSnapshot, LanguageId, Modifiers, Shortcut};
use quill_registry::{Contribution, Extension, ToolbarItem};

use crate::host::{NotifyLevel, Workbench};

pub const EXTENSION_ID: &str = "LOCAL_EXECUTION";
pub const RUN_ITEM: &str = "run";
pub const RUN_ICON: &str = "play";
pub const TERMINAL_PANEL: &str = "TERMINAL";

/// `cmd+r`.
pub fn run_shortcut() -> Shortcut {
	Shortcut::new('r', Modifiers::COMMAND)
}

/// Result of one run trigger.
#[derive(Debug)]
pub enum RunAttempt {
	/// The executor accepted the sequence.
	Submitted(RunHandle),
	/// Nothing was submitted.
	Skipped(SkipReason),
}

impl RunAttempt {
	pub fn skip_reason(&self) -> Option<&SkipReason> {
		match self {
			Self::Submitted(_) => None,
			Self::Skipped(reason) => Some(reason),
		}
	}

	pub fn into_handle(self) -> Option<RunHandle> {
		match self {
			Self::Submitted(handle) => Some(handle),
			Self::Skipped(_) => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
	/// Another sequence is in flight.
	Busy,
	/// No active editor, or it is not a local file.
	NoActiveTarget,
	UnsupportedLanguage(LanguageId),
	/// Saving failed; the user has been notified.
	SaveFailed,
	/// The path cannot be spelled in a command line; the user has been notified.
	NonUtf8Path(PathBuf),
	/// The executor refused the sequence for a reason other than being busy.
	Rejected(ExecError),
}

/// The local-execution extension.
#[derive(Debug, Clone, Default)]
pub struct LocalExecution {
	resolver: CommandResolver,
}

impl LocalExecution {
	pub fn new(resolver: CommandResolver) -> Self {
		Self { resolver }
	}

	pub fn resolver(&self) -> &CommandResolver {
		&self.resolver
	}

	/// Whether the run item should be shown for `snapshot`.
	pub fn can_run(&self, snapshot: &HostSnapshot) -> bool {
		can_run(&self.resolver, snapshot)
	}

	/// Runs the host's active file.
	pub async fn run_active_file<H: Workbench + ?Sized>(&self, host: &H) -> RunAttempt {
		run_active_file(host, &self.resolver).await
	}
}

impl<H: Workbench> Extension<H> for LocalExecution {
	fn id(&self) -> ExtensionId {
		EXTENSION_ID.into()
	}

	fn initialize(&self, host: &Arc<H>, contribution: Contribution) {
		let host: Weak<H> = Arc::downgrade(host);
		let resolver = self.resolver.clone();
		let visibility = self.resolver.clone();

		let item = ToolbarItem::new(EXTENSION_ID, RUN_ITEM, RUN_ICON, move || {
			let host = host.clone();
			let resolver = resolver.clone();
			async move {
				let Some(host) = host.upgrade() else {
					return;
				};
				if let RunAttempt::Submitted(handle) = run_active_file(&*host, &resolver).await {
					tracing::debug!(run = handle.id(), "local execution submitted");
				}
			}
		})
		.with_shortcut(run_shortcut())
		.with_focus_panel(TERMINAL_PANEL)
		.visible_when(move |snapshot| can_run(&visibility, snapshot));

		contribution.register_toolbar_item(item);
	}
}

fn can_run(resolver: &CommandResolver, snapshot: &HostSnapshot) -> bool {
	snapshot
		.active_editor()
		.is_some_and(|editor| editor.is_local && resolver.supports(editor.language.as_str()))
}

/// Saves, resolves, echoes and submits the active file's command sequence.
///
/// Every early exit is silent except a failed save or an unrepresentable path,
/// which are reported through [`Workbench::notify`].
pub async fn run_active_file<H: Workbench + ?Sized>(host: &H, resolver: &CommandResolver) -> RunAttempt {
	let executor = host.executor();
	if !executor.is_idle() {
		tracing::debug!("run ignored: executor busy");
		return RunAttempt::Skipped(SkipReason::Busy);
	}

	let snapshot = host.snapshot();
	let Some(editor) = snapshot.active_editor().filter(|editor| editor.is_local) else {
		tracing::debug!("run ignored: no local active file");
		return RunAttempt::Skipped(SkipReason::NoActiveTarget);
	};
	let language = editor.language.clone();
	if !resolver.supports(language.as_str()) {
		tracing::debug!(%language, "run ignored: unsupported language");
		return RunAttempt::Skipped(SkipReason::UnsupportedLanguage(language));
	}

	if let Err(error) = host.save_active_file().await {
		tracing::warn!(%error, "run aborted: save failed");
		host.notify(NotifyLevel::Error, error.to_string());
		return RunAttempt::Skipped(SkipReason::SaveFailed);
	}

	let commands = match resolver.resolve(language.as_str(), editor.path()) {
		Ok(commands) => commands,
		Err(ResolveError::UnsupportedLanguage(_)) => {
			return RunAttempt::Skipped(SkipReason::UnsupportedLanguage(language));
		}
		Err(ResolveError::NonUtf8Path(path)) => {
			tracing::warn!(path = %path.display(), "run aborted: path is not valid UTF-8");
			host.notify(
				NotifyLevel::Error,
				format!("cannot run {}: path is not valid UTF-8", path.display()),
			);
			return RunAttempt::Skipped(SkipReason::NonUtf8Path(path));
		}
	};
	let echo = echo_line(&commands, language.as_str(), host.echo_style());
	let sequence = CommandSequence::new(commands).with_preamble(Script::echo_then_pause(echo));

	let count = sequence.commands.len();
	match executor.run(sequence) {
		Ok(handle) => {
			tracing::info!(%language, path = %editor.path().display(), commands = count, "running active file");
			RunAttempt::Submitted(handle)
		}
		Err(ExecError::Busy) => {
			tracing::debug!("run ignored: executor became busy during save");
			RunAttempt::Skipped(SkipReason::Busy)
		}
		Err(error) => {
			tracing::warn!(%error, "executor rejected run");
			RunAttempt::Skipped(SkipReason::Rejected(error))
		}
	}
}
