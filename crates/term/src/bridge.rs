//! Terminal bridge backed by child processes.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use quill_exec::{BridgeInstruction, CancellationToken, RunOutcome, Script, TerminalBridge};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs each command line with `sh -c`, one after another, inheriting stdio.
///
/// Read-line instructions only block when pausing is enabled with
/// [`ProcessBridge::with_pause`]; otherwise they are skipped. The pause line is
/// read from fd 0 without buffering, so everything after it stays on stdin for
/// the commands.
#[derive(Debug, Clone)]
pub struct ProcessBridge {
	shell: PathBuf,
	pause: bool,
}

impl Default for ProcessBridge {
	fn default() -> Self {
		Self {
			shell: PathBuf::from("sh"),
			pause: false,
		}
	}
}

impl ProcessBridge {
	/// Makes read-line instructions wait for a line on stdin.
	pub fn with_pause(mut self, pause: bool) -> Self {
		self.pause = pause;
		self
	}

	async fn read_line(&self) {
		if !self.pause {
			tracing::debug!("pause skipped");
			return;
		}
		match tokio::task::spawn_blocking(read_pause_line).await {
			Ok(Ok(())) => {}
			Ok(Err(error)) => tracing::warn!(%error, "failed to read pause line"),
			Err(error) => tracing::warn!(%error, "pause reader failed"),
		}
	}
}

/// Consumes stdin up to and including the next newline, one byte at a time.
#[cfg(unix)]
fn read_pause_line() -> std::io::Result<()> {
	let stdin = std::io::stdin();
	let mut byte = [0u8; 1];
	loop {
		match rustix::io::read(&stdin, &mut byte[..]) {
			Ok(0) => return Ok(()),
			Ok(_) if byte[0] == b'\n' => return Ok(()),
			Ok(_) => {}
			Err(rustix::io::Errno::INTR) => {}
			Err(errno) => return Err(errno.into()),
		}
	}
}

#[cfg(not(unix))]
fn read_pause_line() -> std::io::Result<()> {
	std::io::stdin().read_line(&mut String::new()).map(drop)
}

#[async_trait]
impl TerminalBridge for ProcessBridge {
	async fn run_script(&self, script: &Script) {
		let mut stdout = tokio::io::stdout();
		for instruction in script.instructions() {
			match instruction {
				BridgeInstruction::Echo(line) => {
					let echoed = format!("{line}\n");
					if let Err(error) = stdout.write_all(echoed.as_bytes()).await {
						tracing::warn!(%error, "failed to echo");
					}
					if let Err(error) = stdout.flush().await {
						tracing::warn!(%error, "failed to flush echo");
					}
				}
				BridgeInstruction::ReadLine => self.read_line().await,
			}
		}
	}

	async fn evaluate(&self, commands: &[String], cancel: CancellationToken) -> RunOutcome {
		for (index, line) in commands.iter().enumerate() {
			tracing::debug!(index, command = %line, "spawning");
			let mut child = match Command::new(&self.shell)
				.arg("-c")
				.arg(line)
				.stdin(Stdio::inherit())
				.kill_on_drop(true)
				.spawn()
			{
				Ok(child) => child,
				Err(error) => {
					tracing::error!(%error, command = %line, "failed to spawn");
					return RunOutcome::Failed { index, code: None };
				}
			};

			let waited = tokio::select! {
				status = child.wait() => Some(status),
				_ = cancel.cancelled() => None,
			};
			let Some(status) = waited else {
				if let Err(error) = child.start_kill() {
					tracing::warn!(%error, "failed to kill cancelled command");
				}
				if let Err(error) = child.wait().await {
					tracing::warn!(%error, "failed to reap cancelled command");
				}
				return RunOutcome::Cancelled;
			};

			match status {
				Ok(status) if status.success() => {}
				Ok(status) => {
					tracing::debug!(index, code = ?status.code(), "command failed");
					return RunOutcome::Failed {
						index,
						code: status.code(),
					};
				}
				Err(error) => {
					tracing::error!(%error, command = %line, "failed to wait for command");
					return RunOutcome::Failed { index, code: None };
				}
			}
		}
		RunOutcome::Completed
	}
}
