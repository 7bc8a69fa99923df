//! Drives the `quill` binary end to end through `sh`.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn quill_cmd() -> String {
	env!("CARGO_BIN_EXE_quill").to_string()
}

/// A temp dir holding a settings file that maps `sh` onto `sh {url}`.
struct Fixture {
	dir: tempfile::TempDir,
}

impl Fixture {
	fn new() -> Self {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("config.toml"), "[commands]\nsh = [\"sh {url}\"]\n").unwrap();
		Self { dir }
	}

	fn script(&self, name: impl AsRef<Path>, body: &str) -> PathBuf {
		let path = self.dir.path().join(name);
		std::fs::write(&path, body).unwrap();
		path
	}

	fn quill(&self, args: &[&OsStr], stdin: &[u8]) -> Output {
		let mut child = Command::new(quill_cmd())
			.arg("--config")
			.arg(self.dir.path().join("config.toml"))
			.args(args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.spawn()
			.unwrap();
		child.stdin.take().unwrap().write_all(stdin).unwrap();
		child.wait_with_output().unwrap()
	}
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).into_owned()
}

const READ_ONE: &str = "read l; echo \"got:[$l]\"\n";

#[test]
fn pause_consumes_only_its_own_line() {
	let fixture = Fixture::new();
	let script = fixture.script("read.sh", READ_ONE);

	let output = fixture.quill(&[OsStr::new("run"), OsStr::new("--pause"), script.as_os_str()], b"\nhello\n");
	assert!(output.status.success(), "{output:?}");
	assert_eq!(stdout(&output), "sh\ngot:[hello]\n");
}

#[test]
fn without_pause_stdin_goes_straight_to_the_command() {
	let fixture = Fixture::new();
	let script = fixture.script("read.sh", READ_ONE);

	let output = fixture.quill(&[OsStr::new("run"), script.as_os_str()], b"hello\n");
	assert!(output.status.success(), "{output:?}");
	assert_eq!(stdout(&output), "sh\ngot:[hello]\n");
}

#[test]
fn failing_command_sets_the_exit_code() {
	let fixture = Fixture::new();
	let script = fixture.script("fail.sh", "exit 5\n");

	let output = fixture.quill(&[OsStr::new("run"), script.as_os_str()], b"");
	assert_eq!(output.status.code(), Some(5));
}

#[cfg(unix)]
#[test]
fn non_utf8_paths_are_refused() {
	use std::os::unix::ffi::OsStrExt;

	let fixture = Fixture::new();
	let script = fixture.script(OsStr::from_bytes(b"bad\xff.sh"), "echo ran\n");

	let output = fixture.quill(&[OsStr::new("run"), script.as_os_str()], b"");
	assert!(!output.status.success());
	assert!(!stdout(&output).contains("ran"));
	assert!(String::from_utf8_lossy(&output.stderr).contains("not valid UTF-8"));

	let output = fixture.quill(&[OsStr::new("resolve"), script.as_os_str()], b"");
	assert!(!output.status.success());
	assert_eq!(stdout(&output), "");
}
