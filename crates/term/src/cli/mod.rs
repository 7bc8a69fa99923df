//! CLI schema and parsing helpers for the quill binary.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use quill_primitives::LanguageId;


#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Run source files through the local toolchain")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Settings file (defaults to $XDG_CONFIG_HOME/quill/config.toml)
	#[arg(long, global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Save, echo and run FILE through its language's command sequence
	Run {
		#[command(flatten)]
		target: Target,

		/// Echo every resolved command instead of just the program name
		#[arg(long)]
		show_path: bool,

		/// Wait for a line on stdin after the echo, before the commands run
		/// (without this flag the pause is skipped)
		#[arg(long)]
		pause: bool,
	},
	/// List the toolbar items and panels visible with FILE active
	Toolbar {
		#[command(flatten)]
		target: Target,
	},
	/// Print the effective command table
	Languages,
	/// Print the commands FILE would run, without running them
	Resolve {
		#[command(flatten)]
		target: Target,
	},
}

/// The file made active for a subcommand.
#[derive(Args, Debug, Clone)]
pub struct Target {
	/// Source file
	pub file: PathBuf,

	/// Language id (inferred from the file extension when omitted)
	#[arg(long, short = 'l', value_name = "ID")]
	pub language: Option<String>,
}

impl Target {
	pub fn language(&self) -> Option<LanguageId> {
		infer_language(&self.file, self.language.as_deref())
	}
}

/// Resolves the language id for `path`.
///
/// An explicit id wins. Otherwise the lowercased extension is used, with a few
/// common aliases folded onto their table key.
pub fn infer_language(path: &Path, explicit: Option<&str>) -> Option<LanguageId> {
	if let Some(language) = explicit {
		return Some(language.into());
	}
	let extension = path.extension()?.to_str()?.to_ascii_lowercase();
	let language = match extension.as_str() {
		"" => return None,
		"cc" | "cxx" | "c++" | "hpp" | "hh" => "cpp",
		"h" => "c",
		"mjs" | "cjs" => "js",
		other => other,
	};
	Some(language.into())
}
