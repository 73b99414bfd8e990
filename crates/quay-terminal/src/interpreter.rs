//! Command trait, registry, and dispatch logic.

use std::collections::BTreeMap;

use log::debug;

use quay_types::error::Result;
use quay_vfs::Vfs;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to clear the terminal surface. The store is untouched.
    Clear,
}

/// Mutable state handed to every command.
pub struct Environment<'a> {
    /// The virtual file system commands operate on.
    pub vfs: &'a mut dyn Vfs,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "ls \[path\]").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    // Sorted by name so `help` output is stable.
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Parse a line and dispatch it.
    ///
    /// The line is split on whitespace into a command name (matched
    /// case-insensitively) and its arguments. An empty line is a no-op. An
    /// unrecognized name is ordinary terminal output, not an error; real
    /// failures come from the command handlers and propagate to the
    /// caller.
    pub fn dispatch(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(CommandOutput::None);
        }

        let mut parts = trimmed.split_whitespace();
        let Some(typed) = parts.next() else {
            return Ok(CommandOutput::None);
        };
        let args: Vec<&str> = parts.collect();
        let name = typed.to_ascii_lowercase();
        debug!("dispatch: {name} ({} args)", args.len());

        // `help` reads the registry itself, so it is intercepted here.
        if name == "help" {
            return Ok(CommandOutput::Text(self.render_help()));
        }

        match self.commands.get(&name) {
            Some(cmd) => cmd.execute(&args, env),
            None => Ok(CommandOutput::Text(format!(
                "Command not found: {typed}\nType \"help\" for available commands"
            ))),
        }
    }

    fn render_help(&self) -> String {
        let mut lines = vec!["Available commands:".to_string()];
        for (category, header) in [
            ("filesystem", "File System Commands:"),
            ("toolchain", "Node.js Commands:"),
        ] {
            lines.push(String::new());
            lines.push(header.to_string());
            for cmd in self.commands.values().filter(|c| c.category() == category) {
                lines.push(format!("  {:<20} {}", cmd.usage(), cmd.description()));
            }
        }
        lines.join("\n")
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
