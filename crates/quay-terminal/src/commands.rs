//! Built-in workbench commands.
//!
//! The filesystem commands address the store from the root: `cd` validates
//! its target and acknowledges, but no working directory is tracked, and
//! `pwd` always reports `/`. That stateless behavior is observable and
//! kept as-is.

use quay_types::error::{QuayError, Result};
use quay_vfs::path::{join, normalize};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register the built-in command set into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(ClearCmd));
    crate::toolchain::register_toolchain_commands(reg);
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List directory contents"
    }
    fn usage(&self) -> &str {
        "ls [path]"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let path = match args.first() {
            Some(arg) => normalize(arg).into_owned(),
            None => "/".to_string(),
        };
        let names = env.vfs.readdir(&path)?;
        if names.is_empty() {
            return Ok(CommandOutput::None);
        }
        let mut lines = Vec::with_capacity(names.len());
        for name in &names {
            let meta = env.vfs.stat(&join(&path, name))?;
            let prefix = if meta.is_dir() { "d " } else { "- " };
            lines.push(format!("{prefix}{name}"));
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change directory"
    }
    fn usage(&self) -> &str {
        "cd <path>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(arg) = args.first() else {
            return Err(QuayError::MissingArgument("cd <path>".to_string()));
        };
        let target = normalize(arg).into_owned();
        let meta = env.vfs.stat(&target)?;
        if !meta.is_dir() {
            return Err(QuayError::NotADirectory(target));
        }
        // Cosmetic acknowledgment only; the next command still starts at /.
        Ok(CommandOutput::Text(format!("Changed directory to {arg}")))
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Display file contents"
    }
    fn usage(&self) -> &str {
        "cat <file>"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(arg) = args.first() else {
            return Err(QuayError::MissingArgument("cat <file>".to_string()));
        };
        let content = env.vfs.read_file(&normalize(arg))?;
        Ok(CommandOutput::Text(content))
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text("/".to_string()))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear terminal screen"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn category(&self) -> &str {
        "filesystem"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}
