//! Emulated terminal app: a line-oriented command dispatcher over an in-memory file table.

mod builtins;
pub mod commands;
pub mod config;
pub mod expr;
pub mod session;
pub mod vfs;

pub use commands::{Command, CommandOutput, CommandRegistry, ShellEnv, ShellError};
pub use config::{TerminalConfig, DEFAULT_HOME_DIR};
pub use session::{TerminalSession, WELCOME_BANNER};
pub use vfs::VirtualFileTable;
