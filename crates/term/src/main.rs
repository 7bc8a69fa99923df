mod app;
mod bridge;
mod cli;
mod host;
mod logging;

use std::process::ExitCode;

use app::Workspace;
use clap::Parser;
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	logging::setup_tracing(cli.verbose);

	let workspace = Workspace::load(cli.config.as_deref())?;
	match cli.command {
		Command::Run {
			target,
			show_path,
			pause,
		} => {
			let outcome = workspace.run(&target, show_path, pause).await?;
			Ok(app::exit_code(outcome))
		}
		Command::Toolbar { target } => {
			workspace.toolbar(&target)?;
			Ok(ExitCode::SUCCESS)
		}
		Command::Languages => {
			workspace.languages();
			Ok(ExitCode::SUCCESS)
		}
		Command::Resolve { target } => {
			workspace.resolve(&target)?;
			Ok(ExitCode::SUCCESS)
		}
	}
}
