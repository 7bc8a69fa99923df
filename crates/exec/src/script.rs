//! Pre-rendered terminal scripts: the echo line shown before a run.

/// One instruction for the terminal bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeInstruction {
	/// Print one line of display text.
	Echo(String),
	/// Hold further bridge output until one input line is read.
	ReadLine,
}

/// How much of the resolved sequence the echo line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EchoStyle {
	/// Only the leading program name.
	#[default]
	CommandName,
	/// Every command, joined with ` && `.
	FullCommand,
}

impl EchoStyle {
	pub fn from_show_path(show_path: bool) -> Self {
		if show_path { Self::FullCommand } else { Self::CommandName }
	}
}

/// Builds the echo line for `commands`.
///
/// With [`EchoStyle::CommandName`] this is the first word of the first command,
/// falling back to `language` when there is none.
pub fn echo_line(commands: &[String], language: &str, style: EchoStyle) -> String {
	match style {
		EchoStyle::FullCommand => commands.join(" && "),
		EchoStyle::CommandName => commands
			.first()
			.and_then(|command| command.split(' ').next())
			.filter(|name| !name.is_empty())
			.unwrap_or(language)
			.to_string(),
	}
}

/// Ordered list of bridge instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
	instructions: Vec<BridgeInstruction>,
}

impl Script {
	/// Echoes `line`, then pauses for one input line.
	pub fn echo_then_pause(line: impl Into<String>) -> Self {
		Self {
			instructions: vec![BridgeInstruction::Echo(line.into()), BridgeInstruction::ReadLine],
		}
	}

	pub fn push(&mut self, instruction: BridgeInstruction) {
		self.instructions.push(instruction);
	}

	pub fn instructions(&self) -> &[BridgeInstruction] {
		&self.instructions
	}

	/// Renders the script for the web terminal's local echo addon.
	///
	/// Echo text is placed in a template literal, so backslashes, backticks and
	/// `${` are escaped.
	pub fn render(&self) -> String {
		let mut out = String::new();
		for instruction in &self.instructions {
			match instruction {
				BridgeInstruction::Echo(line) => {
					out.push_str("localEcho.println(`");
					out.push_str(&escape_template_literal(line));
					out.push_str("`);");
				}
				BridgeInstruction::ReadLine => out.push_str("readLine('');"),
			}
		}
		out
	}
}

fn escape_template_literal(text: &str) -> String {
	text.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}
