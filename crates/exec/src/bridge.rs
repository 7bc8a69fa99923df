use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::script::Script;

/// How a command sequence ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
	/// Every command exited successfully.
	Completed,
	/// The command at `index` failed; later commands did not run.
	Failed { index: usize, code: Option<i32> },
	/// The sequence was cancelled while in flight.
	Cancelled,
}

impl RunOutcome {
	pub fn is_success(self) -> bool {
		self == Self::Completed
	}
}

/// The terminal-like channel commands are executed through.
#[async_trait]
pub trait TerminalBridge: Send + Sync {
	/// Feeds a pre-rendered script (echo line plus blocking read) to the terminal.
	async fn run_script(&self, script: &Script);

	/// Executes `commands` strictly in order, each exiting before the next starts.
	///
	/// Must stop the in-flight command and return [`RunOutcome::Cancelled`]
	/// promptly once `cancel` fires.
	async fn evaluate(&self, commands: &[String], cancel: CancellationToken) -> RunOutcome;
}
