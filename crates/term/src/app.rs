//! Subcommand implementations.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use quill_config::Settings;
use quill_exec::{CommandResolver, EchoStyle, Executor, RunOutcome};
use quill_extensions::local_execution::run_shortcut;
use quill_extensions::{Workbench, register_builtins};
use quill_primitives::{EditorView, LanguageId};
use quill_registry::ExtensionManager;

use crate::bridge::ProcessBridge;
use crate::cli::Target;
use crate::host::CliHost;

/// Settings plus the resolver built from them, loaded once per invocation.
pub struct Workspace {
	settings: Settings,
	resolver: CommandResolver,
}

struct Session {
	host: Arc<CliHost>,
	manager: ExtensionManager<CliHost>,
}

impl Workspace {
	pub fn load(config: Option<&Path>) -> anyhow::Result<Self> {
		let settings = match config {
			Some(path) => Settings::load(path)?,
			None => Settings::load_default()?,
		};
		Ok(Self::new(settings)?)
	}

	pub fn new(settings: Settings) -> quill_config::Result<Self> {
		let resolver = CommandResolver::new(settings.command_table()?);
		Ok(Self { settings, resolver })
	}

	fn open(&self, target: &Target, bridge: ProcessBridge, echo_style: EchoStyle) -> anyhow::Result<Session> {
		let language = language_of(target)?;
		let path = std::path::absolute(&target.file).unwrap_or_else(|_| target.file.clone());
		let executor = Executor::new(Arc::new(bridge));
		let host = Arc::new(CliHost::new(Some(EditorView::local(path, language)), executor, echo_style));

		let mut manager = ExtensionManager::new();
		register_builtins(&mut manager, self.resolver.clone())?;
		manager.initialize_all(&host)?;
		Ok(Session { host, manager })
	}

	/// Activates the run item for `target` and waits for the executor to go idle.
	///
	/// Returns `None` when nothing was submitted.
	pub async fn run(&self, target: &Target, show_path: bool, pause: bool) -> anyhow::Result<Option<RunOutcome>> {
		let echo_style = if show_path {
			EchoStyle::FullCommand
		} else {
			self.settings.echo_style()
		};
		let Session { host, manager } = self.open(target, ProcessBridge::default().with_pause(pause), echo_style)?;

		let snapshot = host.snapshot();
		let Some(activation) = manager.activate_shortcut(&snapshot, run_shortcut()) else {
			bail!(
				"nothing to run for {}: no commands for language '{}'",
				target.file.display(),
				language_of(target)?
			);
		};
		if let Some(panel) = &activation.focus_panel {
			tracing::debug!(%panel, "focus panel");
		}

		let executor = host.executor().clone();
		let interrupt = tokio::spawn(async move {
			if tokio::signal::ctrl_c().await.is_ok() {
				executor.cancel();
			}
		});
		activation.future.await;
		host.executor().wait_idle().await;
		interrupt.abort();

		Ok(host.executor().last_outcome())
	}

	pub fn toolbar(&self, target: &Target) -> anyhow::Result<()> {
		let Session { host, manager } = self.open(target, ProcessBridge::default(), self.settings.echo_style())?;
		let snapshot = host.snapshot();

		for item in manager.toolbar_items(&snapshot) {
			println!(
				"toolbar\t{}/{}\ticon={}\tshortcut={}\tfocus={}",
				item.extension_id,
				item.key,
				item.icon,
				item.shortcut.map_or_else(|| "-".to_string(), |s| s.to_string()),
				item.focus_panel.as_ref().map_or("-", |p| p.as_str()),
			);
		}
		for binding in manager.panel_bindings(&snapshot) {
			println!(
				"panel\t{}/{}\t{}\ttitle={}",
				binding.extension_id, binding.key, binding.panel, binding.title
			);
		}
		Ok(())
	}

	pub fn languages(&self) {
		for (language, templates) in self.resolver.table().iter() {
			let joined: Vec<&str> = templates.iter().map(|t| t.as_str()).collect();
			println!("{language}\t{}", joined.join(" && "));
		}
	}

	pub fn resolve(&self, target: &Target) -> anyhow::Result<()> {
		let language = language_of(target)?;
		let lines = self.resolver.resolve(language.as_str(), &target.file)?;
		for line in &lines {
			println!("{line}");
		}
		for argv in self.resolver.resolve_argv(language.as_str(), &target.file)? {
			tracing::debug!(program = %argv.program, args = argv.args.len(), "argv");
			println!("# argv: {argv}");
		}
		Ok(())
	}
}

fn language_of(target: &Target) -> anyhow::Result<LanguageId> {
	target
		.language()
		.with_context(|| format!("cannot infer a language for {}; pass --language", target.file.display()))
}

/// Maps a run outcome onto the process exit status.
pub fn exit_code(outcome: Option<RunOutcome>) -> ExitCode {
	match outcome {
		Some(RunOutcome::Completed) => ExitCode::SUCCESS,
		Some(RunOutcome::Failed { index, code }) => {
			eprintln!("quill: command {} failed{}", index + 1, code.map(|c| format!(" with exit code {c}")).unwrap_or_default());
			code.and_then(|c| u8::try_from(c).ok())
				.filter(|c| *c != 0)
				.map_or(ExitCode::FAILURE, ExitCode::from)
		}
		Some(RunOutcome::Cancelled) => ExitCode::from(130),
		None => ExitCode::FAILURE,
	}
}
