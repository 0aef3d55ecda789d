//! Command registry
//!
//! Maps case-sensitive command names to either a built-in or a plain
//! function value. Command lines are whitespace-delimited tokens: the first
//! is the command name, the rest are positional arguments. There is no
//! quoting, escaping or flag syntax.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::Console;

/// Error returned by a command handler
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

pub type CommandResult = Result<(), CommandError>;

/// User command handler. Receives the console (to log or inspect) and the
/// positional arguments.
pub type CommandFn = Arc<dyn Fn(&mut Console, &[String]) -> CommandResult + Send + Sync>;

/// Commands implemented by the console itself
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Help,
    Clear,
    Echo,
    Quit,
    History,
    Filter,
}

impl Builtin {
    pub const ALL: [Self; 6] = [
        Self::Help,
        Self::Clear,
        Self::Echo,
        Self::Quit,
        Self::History,
        Self::Filter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Clear => "clear",
            Self::Echo => "echo",
            Self::Quit => "quit",
            Self::History => "history",
            Self::Filter => "filter",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Help => "List commands, or describe one: help [command]",
            Self::Clear => "Clear the log",
            Self::Echo => "Log the arguments: echo <text...>",
            Self::Quit => "Ask the host application to exit",
            Self::History => "Show command history",
            Self::Filter => "Show or hide a log level: filter <level> <on|off>",
        }
    }
}

/// What a binding runs
#[derive(Clone)]
pub enum CommandKind {
    Builtin(Builtin),
    Handler(CommandFn),
}

impl fmt::Debug for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(b) => f.debug_tuple("Builtin").field(b).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// A registered command
#[derive(Clone, Debug)]
pub struct CommandBinding {
    pub description: String,
    pub kind: CommandKind,
}

/// Name -> binding table
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    bindings: HashMap<String, CommandBinding>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name, replacing any previous binding
    pub fn register(&mut self, name: impl Into<String>, binding: CommandBinding) {
        self.bindings.insert(name.into(), binding);
    }

    /// Remove a binding. Returns whether it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.bindings.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&CommandBinding> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All command names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names starting with `partial` (case-sensitive), sorted
    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        let mut matches: Vec<String> = self
            .bindings
            .keys()
            .filter(|name| name.starts_with(partial))
            .cloned()
            .collect();
        matches.sort_unstable();
        matches
    }

    /// The sole suggestion, or `partial` unchanged on zero or many
    pub fn complete(&self, partial: &str) -> String {
        let mut matches = self.suggestions(partial);
        if matches.len() == 1 {
            matches.remove(0)
        } else {
            partial.to_string()
        }
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

/// Split a command line into tokens
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Positional argument `index`, or a `MissingArgument` error naming it
pub fn require_arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
}
