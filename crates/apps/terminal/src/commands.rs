//! Command trait, registry, and dispatch.

use platform_host::{KeyValueStore, StorageError};
use thiserror::Error;

use crate::{builtins, config::TerminalConfig, vfs::VirtualFileTable};

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Lines appended to the scrollback, in order.
    Lines(Vec<String>),
    /// Signal to wipe the scrollback.
    Clear,
}

impl CommandOutput {
    pub fn line(text: impl Into<String>) -> Self {
        Self::Lines(vec![text.into()])
    }

    pub fn none() -> Self {
        Self::Lines(Vec::new())
    }
}

/// Failures a command reports instead of output. The registry prints them as one line.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{command}: {source}")]
    Storage {
        command: &'static str,
        #[source]
        source: StorageError,
    },
}

/// Mutable environment handed to every command.
pub struct ShellEnv<'a> {
    pub vfs: &'a mut VirtualFileTable,
    /// Durable store used by `save` and `load`.
    pub store: &'a dyn KeyValueStore,
    pub config: &'a TerminalConfig,
}

/// A single executable command.
pub trait Command {
    /// What the user types.
    fn name(&self) -> &str;

    /// One-line description.
    fn summary(&self) -> &str;

    fn execute(&self, args: &[&str], env: &mut ShellEnv<'_>) -> Result<CommandOutput, ShellError>;
}

/// Closed table of commands, extensible through [`CommandRegistry::register`].
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for command in builtins::all() {
            registry.register(command);
        }
        registry
    }

    /// Adds `command`, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn Command>) {
        match self
            .commands
            .iter_mut()
            .find(|existing| existing.name() == command.name())
        {
            Some(existing) => *existing = command,
            None => self.commands.push(command),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands
            .iter()
            .find(|command| command.name() == name)
            .map(|command| &**command)
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|command| command.name()).collect()
    }

    /// Tokenizes `line` on spaces and runs the named command.
    ///
    /// Unknown commands and command failures both come back as a single diagnostic line.
    pub fn execute(&self, line: &str, env: &mut ShellEnv<'_>) -> CommandOutput {
        let mut tokens = line.split(' ').filter(|token| !token.is_empty());
        let Some(name) = tokens.next() else {
            return CommandOutput::none();
        };
        let args: Vec<&str> = tokens.collect();

        let Some(command) = self.get(name) else {
            return CommandOutput::line(format!("comando no encontrado: {name}"));
        };
        match command.execute(&args, env) {
            Ok(output) => output,
            Err(err) => {
                log::warn!("terminal command `{name}` failed: {err}");
                CommandOutput::line(err.to_string())
            }
        }
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use platform_host::MemoryKeyValueStore;
    use pretty_assertions::assert_eq;

    use super::*;

    struct Shout;

    impl Command for Shout {
        fn name(&self) -> &str {
            "echo"
        }

        fn summary(&self) -> &str {
            "uppercase echo"
        }

        fn execute(
            &self,
            args: &[&str],
            _env: &mut ShellEnv<'_>,
        ) -> Result<CommandOutput, ShellError> {
            Ok(CommandOutput::line(args.join(" ").to_uppercase()))
        }
    }

    fn run(registry: &CommandRegistry, line: &str) -> CommandOutput {
        let mut vfs = VirtualFileTable::new();
        let store = MemoryKeyValueStore::default();
        let config = TerminalConfig::default();
        let mut env = ShellEnv {
            vfs: &mut vfs,
            store: &store,
            config: &config,
        };
        registry.execute(line, &mut env)
    }

    #[test]
    fn builtins_register_in_help_order() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec![
                "help", "echo", "date", "ls", "cat", "touch", "rm", "clear", "runjs", "save",
                "load", "ssh"
            ]
        );
    }

    #[test]
    fn tokens_split_on_runs_of_spaces() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(
            run(&registry, "echo   hola    mundo"),
            CommandOutput::line("hola mundo")
        );
    }

    #[test]
    fn unknown_command_yields_one_diagnostic() {
        let registry = CommandRegistry::with_builtins();
        assert_eq!(
            run(&registry, "sudo rm -rf"),
            CommandOutput::line("comando no encontrado: sudo")
        );
        assert_eq!(run(&registry, ""), CommandOutput::none());
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = CommandRegistry::with_builtins();
        registry.register(Box::new(Shout));
        assert_eq!(registry.names().len(), 12);
        assert_eq!(run(&registry, "echo hey"), CommandOutput::line("HEY"));
        assert_eq!(registry.get("echo").map(|c| c.summary()), Some("uppercase echo"));
    }
}
