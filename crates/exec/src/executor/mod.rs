//! The shared command executor.
//!
//! One executor wraps one [`TerminalBridge`]. At most one command sequence is
//! in flight at a time: [`Executor::run`] performs the idle to running
//! transition as a single compare-and-set on the state channel and rejects
//! every request that loses it. A sequence is never queued.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::bridge::{RunOutcome, TerminalBridge};
use crate::script::Script;


/// Executor state. Failure and cancellation are outcomes, not states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecState {
	#[default]
	Idle,
	Running,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
	/// Another sequence is in flight.
	#[error("executor is busy")]
	Busy,
	#[error("refusing to run an empty command sequence")]
	EmptySequence,
	#[error("no tokio runtime available to drive the run")]
	NoRuntime,
}

/// An ordered command sequence plus the script shown before it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSequence {
	pub preamble: Option<Script>,
	pub commands: Vec<String>,
}

impl CommandSequence {
	pub fn new(commands: Vec<String>) -> Self {
		Self { preamble: None, commands }
	}

	pub fn with_preamble(mut self, script: Script) -> Self {
		self.preamble = Some(script);
		self
	}
}

impl From<Vec<String>> for CommandSequence {
	fn from(commands: Vec<String>) -> Self {
		Self::new(commands)
	}
}

struct ActiveRun {
	id: u64,
	cancel: CancellationToken,
}

struct Inner {
	bridge: Arc<dyn TerminalBridge>,
	state: watch::Sender<ExecState>,
	active: Mutex<Option<ActiveRun>>,
	last_outcome: Mutex<Option<RunOutcome>>,
	next_id: AtomicU64,
}

/// Cheaply cloneable handle to the shared executor.
#[derive(Clone)]
pub struct Executor {
	inner: Arc<Inner>,
}

impl fmt::Debug for Executor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Executor")
			.field("state", &self.state())
			.field("last_outcome", &self.last_outcome())
			.finish_non_exhaustive()
	}
}

impl Executor {
	pub fn new(bridge: Arc<dyn TerminalBridge>) -> Self {
		let (state, _) = watch::channel(ExecState::Idle);
		Self {
			inner: Arc::new(Inner {
				bridge,
				state,
				active: Mutex::new(None),
				last_outcome: Mutex::new(None),
				next_id: AtomicU64::new(0),
			}),
		}
	}

	pub fn state(&self) -> ExecState {
		*self.inner.state.borrow()
	}

	pub fn is_idle(&self) -> bool {
		self.state() == ExecState::Idle
	}

	/// Receiver notified on every state transition.
	pub fn subscribe(&self) -> watch::Receiver<ExecState> {
		self.inner.state.subscribe()
	}

	/// Outcome of the most recently finished run.
	pub fn last_outcome(&self) -> Option<RunOutcome> {
		*self.inner.last_outcome.lock()
	}

	/// Waits until no sequence is in flight.
	pub async fn wait_idle(&self) {
		let mut rx = self.subscribe();
		let _ = rx.wait_for(|state| *state == ExecState::Idle).await;
	}

	/// Accepts `sequence` if idle and drives it through the bridge on a
	/// spawned task.
	///
	/// A rejected request leaves the state untouched and forwards nothing.
	pub fn run(&self, sequence: impl Into<CommandSequence>) -> Result<RunHandle, ExecError> {
		let sequence = sequence.into();
		let runtime = tokio::runtime::Handle::try_current().map_err(|_| ExecError::NoRuntime)?;
		if sequence.commands.is_empty() {
			return Err(ExecError::EmptySequence);
		}

		let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
		let cancel = CancellationToken::new();
		let accepted = self.inner.state.send_if_modified(|state| {
			if *state != ExecState::Idle {
				return false;
			}
			*state = ExecState::Running;
			*self.inner.active.lock() = Some(ActiveRun {
				id,
				cancel: cancel.clone(),
			});
			true
		});
		if !accepted {
			tracing::debug!(commands = sequence.commands.len(), "executor.run.rejected_busy");
			return Err(ExecError::Busy);
		}

		tracing::debug!(run = id, commands = sequence.commands.len(), "executor.run.accepted");
		let guard = RunGuard {
			inner: Arc::clone(&self.inner),
			id,
			outcome: None,
		};
		let bridge = Arc::clone(&self.inner.bridge);
		let join = runtime.spawn(drive(bridge, sequence, cancel, guard));
		Ok(RunHandle { id, join })
	}

	/// Cancels the in-flight sequence, if any.
	///
	/// The bridge is signalled through the run's cancellation token; the state
	/// returns to idle once the run task has observed it.
	pub fn cancel(&self) -> bool {
		let Some(active) = self.inner.active.lock().take() else {
			return false;
		};
		tracing::debug!(run = active.id, "executor.run.cancel");
		active.cancel.cancel();
		true
	}
}

async fn drive(bridge: Arc<dyn TerminalBridge>, sequence: CommandSequence, cancel: CancellationToken, guard: RunGuard) -> RunOutcome {
	if let Some(script) = &sequence.preamble {
		tokio::select! {
			_ = bridge.run_script(script) => {}
			_ = cancel.cancelled() => return guard.finish(RunOutcome::Cancelled),
		}
	}

	let outcome = tokio::select! {
		outcome = bridge.evaluate(&sequence.commands, cancel.clone()) => outcome,
		_ = cancel.cancelled() => RunOutcome::Cancelled,
	};
	guard.finish(outcome)
}

/// Returns the executor to idle when the run task ends, however it ends.
struct RunGuard {
	inner: Arc<Inner>,
	id: u64,
	outcome: Option<RunOutcome>,
}

impl RunGuard {
	fn finish(mut self, outcome: RunOutcome) -> RunOutcome {
		self.outcome = Some(outcome);
		outcome
	}
}

impl Drop for RunGuard {
	fn drop(&mut self) {
		// A task dropped before finishing (runtime shutdown, panic) counts as cancelled.
		let outcome = self.outcome.unwrap_or(RunOutcome::Cancelled);
		{
			let mut active = self.inner.active.lock();
			if active.as_ref().is_some_and(|run| run.id == self.id) {
				*active = None;
			}
		}
		*self.inner.last_outcome.lock() = Some(outcome);
		match outcome {
			RunOutcome::Completed => tracing::info!(run = self.id, "executor.run.completed"),
			RunOutcome::Failed { index, code } => {
				tracing::warn!(run = self.id, index, ?code, "executor.run.failed")
			}
			RunOutcome::Cancelled => tracing::info!(run = self.id, "executor.run.cancelled"),
		}
		self.inner.state.send_replace(ExecState::Idle);
	}
}

/// Handle to an accepted run.
#[derive(Debug)]
pub struct RunHandle {
	id: u64,
	join: JoinHandle<RunOutcome>,
}

impl RunHandle {
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Waits for the sequence to finish.
	pub async fn outcome(self) -> RunOutcome {
		self.join.await.unwrap_or(RunOutcome::Cancelled)
	}
}
