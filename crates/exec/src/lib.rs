//! Command resolution and the shared command executor.
//!
//! [`CommandResolver`] turns a language id and a file path into an ordered list
//! of shell lines; [`Executor`] serializes those sequences through a single
//! [`TerminalBridge`].

mod bridge;
mod executor;
mod resolver;
mod script;
mod table;
mod template;

pub use bridge::{RunOutcome, TerminalBridge};
pub use executor::{CommandSequence, ExecError, ExecState, Executor, RunHandle};
pub use resolver::{CommandResolver, ResolveError};
pub use script::{BridgeInstruction, EchoStyle, Script, echo_line};
pub use table::{BUILTIN_COMMANDS, CommandTable, TableError};
pub use template::{Argv, CommandTemplate, PLACEHOLDER, escape_path};
pub use tokio_util::sync::CancellationToken;
