use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "QUILL_LOG";
/// Environment variable selecting a directory for log files instead of stderr.
const LOG_DIR_ENV: &str = "QUILL_LOG_DIR";

fn filter(verbose: bool) -> EnvFilter {
	EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("quill=debug,quill_exec=debug,quill_extensions=debug,quill_registry=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	})
}

pub fn setup_tracing(verbose: bool) {
	if let Some(log_dir) = std::env::var_os(LOG_DIR_ENV).map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("quill.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry()
				.with(filter(verbose))
				.with(file_layer)
				.init();

			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter(verbose))
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
