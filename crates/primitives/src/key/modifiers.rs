//! Key modifier types (Command, Shift, Control, Option).

/// Key modifiers (Command, Shift, Control, Option).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Command is held.
	pub command: bool,
	/// Whether Shift is held.
	pub shift: bool,
	/// Whether Control is held.
	pub control: bool,
	/// Whether Option is held.
	pub option: bool,
}

impl Modifiers {
	/// No modifiers pressed.
	pub const NONE: Self = Self {
		command: false,
		shift: false,
		control: false,
		option: false,
	};

	/// Only Command pressed.
	pub const COMMAND: Self = Self {
		command: true,
		..Self::NONE
	};

	/// Only Shift pressed.
	pub const SHIFT: Self = Self {
		shift: true,
		..Self::NONE
	};

	/// Only Control pressed.
	pub const CONTROL: Self = Self {
		control: true,
		..Self::NONE
	};

	/// Only Option pressed.
	pub const OPTION: Self = Self {
		option: true,
		..Self::NONE
	};

	/// Returns a copy with Command added.
	pub fn command(self) -> Self {
		Self { command: true, ..self }
	}

	/// Returns a copy with Shift added.
	pub fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns a copy with Control added.
	pub fn control(self) -> Self {
		Self { control: true, ..self }
	}

	/// Returns a copy with Option added.
	pub fn option(self) -> Self {
		Self { option: true, ..self }
	}

	/// Returns true if no modifiers are set.
	pub fn is_empty(self) -> bool {
		!self.command && !self.shift && !self.control && !self.option
	}

	/// Parses a single modifier name (`cmd`, `shift`, `ctrl`, `opt` and long forms).
	pub(crate) fn with_name(self, name: &str) -> Option<Self> {
		match name {
			"cmd" | "command" => Some(self.command()),
			"shift" => Some(self.shift()),
			"ctrl" | "control" => Some(self.control()),
			"opt" | "option" | "alt" => Some(self.option()),
			_ => None,
		}
	}
}
