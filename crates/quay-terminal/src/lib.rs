//! Terminal command layer.
//!
//! A registry-based dispatch system: commands implement the [`Command`]
//! trait and are registered by name. The [`TerminalSession`] buffers raw
//! input into whole lines, dispatches them one at a time, and renders
//! every failure as terminal text, so no command can take the session
//! down.

mod commands;
mod interpreter;
mod session;
pub mod toolchain;

/// Register the built-in command set (filesystem + toolchain) into a registry.
pub use commands::register_builtins;
/// A single executable command.
pub use interpreter::Command;
/// Output produced by a command (text, nothing, or a clear signal).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Mutable state handed to every command.
pub use interpreter::Environment;
/// Events a session emits for the presentation surface.
pub use session::TermEvent;
/// Line-buffered interactive session over a registry.
pub use session::{SessionState, TerminalSession};
