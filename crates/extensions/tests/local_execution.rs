use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use quill_exec::{CancellationToken, CommandResolver, EchoStyle, Executor, RunOutcome, Script, TerminalBridge};
use quill_extensions::local_execution::{self, RUN_ICON, TERMINAL_PANEL};
use quill_extensions::{LocalExecution, NotifyLevel, SaveError, SkipReason, Workbench, register_builtins};
use quill_primitives::{EditorView, ExtensionId, HostSnapshot, ItemKey};
use quill_registry::{ExtensionError, ExtensionManager};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
	Script(String),
	Evaluate(Vec<String>),
}

/// Records bridge traffic. When gated, each sequence waits for `release`.
#[derive(Default)]
struct Bridge {
	events: Mutex<Vec<Event>>,
	gated: bool,
	release: Notify,
}

impl Bridge {
	fn gated() -> Self {
		Self {
			gated: true,
			..Self::default()
		}
	}

	fn events(&self) -> Vec<Event> {
		self.events.lock().clone()
	}
}

#[async_trait]
impl TerminalBridge for Bridge {
	async fn run_script(&self, script: &Script) {
		self.events.lock().push(Event::Script(script.render()));
	}

	async fn evaluate(&self, commands: &[String], cancel: CancellationToken) -> RunOutcome {
		self.events.lock().push(Event::Evaluate(commands.to_vec()));
		if !self.gated {
			return RunOutcome::Completed;
		}
		tokio::select! {
			_ = self.release.notified() => RunOutcome::Completed,
			_ = cancel.cancelled() => RunOutcome::Cancelled,
		}
	}
}

struct Bench {
	snapshot: Mutex<HostSnapshot>,
	executor: Executor,
	style: EchoStyle,
	fail_save: bool,
	saves: AtomicUsize,
	notifications: Mutex<Vec<(NotifyLevel, String)>>,
}

impl Bench {
	fn new(bridge: Arc<Bridge>) -> Self {
		Self {
			snapshot: Mutex::new(HostSnapshot::default()),
			executor: Executor::new(bridge),
			style: EchoStyle::CommandName,
			fail_save: false,
			saves: AtomicUsize::new(0),
			notifications: Mutex::new(Vec::new()),
		}
	}

	fn open(self, editor: EditorView) -> Self {
		*self.snapshot.lock() = HostSnapshot::with_editor(editor);
		self
	}

	fn saves(&self) -> usize {
		self.saves.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Workbench for Bench {
	fn snapshot(&self) -> HostSnapshot {
		self.snapshot.lock().clone()
	}

	fn executor(&self) -> &Executor {
		&self.executor
	}

	fn echo_style(&self) -> EchoStyle {
		self.style
	}

	async fn save_active_file(&self) -> Result<(), SaveError> {
		self.saves.fetch_add(1, Ordering::SeqCst);
		if self.fail_save {
			return Err(SaveError {
				path: "/tmp/a.py".into(),
				reason: "read-only file system".into(),
			});
		}
		Ok(())
	}

	fn notify(&self, level: NotifyLevel, message: String) {
		self.notifications.lock().push((level, message));
	}
}

fn manager(host: &Arc<Bench>) -> ExtensionManager<Bench> {
	let mut manager = ExtensionManager::new();
	register_builtins(&mut manager, CommandResolver::default()).unwrap();
	manager.initialize_all(host).unwrap();
	manager
}

fn cpp_with_space() -> EditorView {
	EditorView::local("/tmp/My File.cpp", "cpp")
}

fn evaluated(lines: &[&str]) -> Event {
	Event::Evaluate(lines.iter().map(|line| line.to_string()).collect())
}

#[tokio::test]
async fn shortcut_runs_the_active_file_through_the_executor() {
	let bridge = Arc::new(Bridge::default());
	let host = Arc::new(Bench::new(bridge.clone()).open(cpp_with_space()));
	let manager = manager(&host);
	let snapshot = host.snapshot();

	let items: Vec<_> = manager.toolbar_items(&snapshot).collect();
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].icon.as_str(), RUN_ICON);
	assert_eq!(items[0].shortcut, Some(local_execution::run_shortcut()));

	let activation = manager
		.activate_shortcut(&snapshot, local_execution::run_shortcut())
		.expect("run item bound to cmd+r");
	assert_eq!(activation.focus_panel.as_ref().map(|p| p.as_str()), Some(TERMINAL_PANEL));
	activation.future.await;
	host.executor().wait_idle().await;

	assert_eq!(host.saves(), 1);
	assert_eq!(host.executor().last_outcome(), Some(RunOutcome::Completed));
	assert_eq!(
		bridge.events(),
		vec![
			Event::Script("localEcho.println(`clang`);readLine('');".into()),
			evaluated(&["clang /tmp/My\\ File.cpp", "wasm a.out"]),
		]
	);
}

#[tokio::test]
async fn show_path_echoes_the_joined_sequence() {
	let bridge = Arc::new(Bridge::default());
	let mut bench = Bench::new(bridge.clone()).open(EditorView::local("/tmp/a.py", "py"));
	bench.style = EchoStyle::FullCommand;

	let attempt = LocalExecution::default().run_active_file(&bench).await;
	let handle = attempt.into_handle().expect("submitted");
	assert_eq!(handle.outcome().await, RunOutcome::Completed);
	assert_eq!(
		bridge.events(),
		vec![
			Event::Script("localEcho.println(`python3 -u /tmp/a.py`);readLine('');".into()),
			evaluated(&["python3 -u /tmp/a.py"]),
		]
	);
}

#[tokio::test]
async fn second_trigger_while_running_is_silently_skipped() {
	let bridge = Arc::new(Bridge::gated());
	let bench = Bench::new(bridge.clone()).open(EditorView::local("/tmp/a.py", "py"));
	let extension = LocalExecution::default();

	let first = extension.run_active_file(&bench).await.into_handle().expect("submitted");
	let second = extension.run_active_file(&bench).await;
	assert_eq!(second.skip_reason(), Some(&SkipReason::Busy));
	assert_eq!(bench.saves(), 1);
	assert!(bench.notifications.lock().is_empty());

	tokio::task::yield_now().await;
	bridge.release.notify_one();
	assert_eq!(first.outcome().await, RunOutcome::Completed);
	assert_eq!(
		bridge.events().iter().filter(|event| matches!(event, Event::Evaluate(_))).count(),
		1
	);
}

#[tokio::test]
async fn failed_save_notifies_and_submits_nothing() {
	let bridge = Arc::new(Bridge::default());
	let mut bench = Bench::new(bridge.clone()).open(EditorView::local("/tmp/a.py", "py"));
	bench.fail_save = true;

	let attempt = LocalExecution::default().run_active_file(&bench).await;
	assert_eq!(attempt.skip_reason(), Some(&SkipReason::SaveFailed));
	assert!(bench.executor().is_idle());
	assert!(bridge.events().is_empty());
	assert_eq!(
		*bench.notifications.lock(),
		vec![(
			NotifyLevel::Error,
			"failed to save /tmp/a.py: read-only file system".to_string()
		)]
	);
}

#[tokio::test]
async fn missing_or_unsupported_targets_are_no_ops() {
	let bridge = Arc::new(Bridge::default());
	let extension = LocalExecution::default();

	let empty = Bench::new(bridge.clone());
	assert_eq!(
		extension.run_active_file(&empty).await.skip_reason(),
		Some(&SkipReason::NoActiveTarget)
	);

	let remote = Bench::new(bridge.clone()).open(EditorView::remote("/srv/a.py", "py"));
	assert_eq!(
		extension.run_active_file(&remote).await.skip_reason(),
		Some(&SkipReason::NoActiveTarget)
	);

	let rust = Bench::new(bridge.clone()).open(EditorView::local("/tmp/main.rs", "rs"));
	assert_eq!(
		extension.run_active_file(&rust).await.skip_reason(),
		Some(&SkipReason::UnsupportedLanguage("rs".into()))
	);
	assert_eq!(rust.saves(), 0);
	assert!(bridge.events().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn non_utf8_path_is_reported_instead_of_run() {
	use std::ffi::OsStr;
	use std::os::unix::ffi::OsStrExt;
	use std::path::PathBuf;

	let path = PathBuf::from(OsStr::from_bytes(b"/tmp/bad\xff.py"));
	let bridge = Arc::new(Bridge::default());
	let bench = Bench::new(bridge.clone()).open(EditorView::local(path.clone(), "py"));

	let attempt = LocalExecution::default().run_active_file(&bench).await;
	assert_eq!(attempt.skip_reason(), Some(&SkipReason::NonUtf8Path(path)));
	assert!(bench.executor().is_idle());
	assert!(bridge.events().is_empty());

	let notifications = bench.notifications.lock();
	assert_eq!(notifications.len(), 1);
	assert_eq!(notifications[0].0, NotifyLevel::Error);
	assert!(notifications[0].1.contains("not valid UTF-8"));
}

#[tokio::test]
async fn run_item_is_hidden_for_unsupported_files() {
	let bridge = Arc::new(Bridge::default());
	let host = Arc::new(Bench::new(bridge.clone()).open(EditorView::local("/tmp/main.rs", "rs")));
	let manager = manager(&host);
	let snapshot = host.snapshot();

	assert_eq!(manager.toolbar_items(&snapshot).count(), 0);
	assert!(
		manager
			.activate(&snapshot, &ExtensionId::from(local_execution::EXTENSION_ID), &ItemKey::from("run"))
			.is_none()
	);
	assert!(manager.activate_shortcut(&snapshot, local_execution::run_shortcut()).is_none());

	let panels: Vec<_> = manager.panel_bindings(&snapshot).collect();
	assert_eq!(panels.len(), 1);
	assert_eq!(panels[0].panel.as_str(), TERMINAL_PANEL);
}

#[test]
fn builtins_cannot_be_registered_twice() {
	let mut manager: ExtensionManager<Bench> = ExtensionManager::new();
	register_builtins(&mut manager, CommandResolver::default()).unwrap();
	assert_eq!(
		register_builtins(&mut manager, CommandResolver::default()),
		Err(ExtensionError::Duplicate("TERMINAL".into()))
	);
}
