//! Interactive terminal session: line buffering and one-at-a-time dispatch.
//!
//! Raw input arrives in arbitrary chunks; the session only hands whole
//! lines to the registry, and only one at a time. Command failures are
//! rendered as terminal text at this boundary, so a failed command never
//! ends the session.

use std::collections::VecDeque;

use quay_vfs::Vfs;

use crate::commands::register_builtins;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment};

/// Events for the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermEvent {
    /// One line of output to append.
    Line(String),
    /// Wipe the visible terminal surface.
    Clear,
}

/// Whether a command is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Executing,
}

/// A terminal session over a command registry.
pub struct TerminalSession {
    registry: CommandRegistry,
    state: SessionState,
    /// Raw input not yet terminated by a newline.
    buffer: String,
    /// Complete lines awaiting dispatch.
    pending: VecDeque<String>,
}

impl TerminalSession {
    /// A session with the built-in command set registered.
    pub fn new() -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        Self::with_registry(registry)
    }

    /// A session over a caller-assembled registry.
    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self {
            registry,
            state: SessionState::Idle,
            buffer: String::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Feed a chunk of raw input. Completed lines (newline-terminated) are
    /// dispatched in order; the unterminated tail stays buffered.
    pub fn feed(&mut self, vfs: &mut dyn Vfs, chunk: &str) -> Vec<TermEvent> {
        self.buffer.push_str(chunk);
        while let Some(pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=pos).collect();
            self.pending
                .push_back(line.trim_end_matches(['\n', '\r']).to_string());
        }
        self.drain(vfs)
    }

    /// Submit one full line, bypassing the raw buffer.
    pub fn submit(&mut self, vfs: &mut dyn Vfs, line: &str) -> Vec<TermEvent> {
        self.pending.push_back(line.to_string());
        self.drain(vfs)
    }

    fn drain(&mut self, vfs: &mut dyn Vfs) -> Vec<TermEvent> {
        let mut events = Vec::new();
        if self.state == SessionState::Executing {
            // A command is already in flight; the queued lines run when it
            // finishes.
            return events;
        }
        while let Some(line) = self.pending.pop_front() {
            self.state = SessionState::Executing;
            let result = self
                .registry
                .dispatch(&line, &mut Environment { vfs });
            match result {
                Ok(CommandOutput::Text(text)) => {
                    events.extend(text.lines().map(|l| TermEvent::Line(l.to_string())));
                },
                Ok(CommandOutput::Clear) => events.push(TermEvent::Clear),
                Ok(CommandOutput::None) => {},
                Err(e) => events.push(TermEvent::Line(format!("Error: {e}"))),
            }
            self.state = SessionState::Idle;
        }
        events
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}
