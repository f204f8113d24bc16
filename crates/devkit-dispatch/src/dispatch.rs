//! Command dispatch logic.
//!
//! The [`Dispatcher`] resolves a raw argument list against a command tree,
//! runs the matched action and renders its [`Envelope`].
//!
//! ```text
//! raw args
//!   → strip -json/--json (switches OutputMode::Json)
//!   → empty or -help/--help?  → help listing for this level
//!   → first token names a group? → recurse into its children
//!   → first token names a leaf?  → action(rest, ctx)
//!   → otherwise                  → "command <token> not found"
//! ```
//!
//! The dispatcher holds mutable state (the active output mode). Every method
//! that can change it takes `&mut self`, so sharing one dispatcher across
//! threads needs external locking.

use std::io::Write;
use std::process::ExitCode;

use crate::command::Command;
use crate::envelope::{record, Envelope};
use crate::output::OutputMode;
use crate::render::RenderError;

/// Title of the help listing.
pub const HELP_TITLE: &str = "Available commands";

/// Message returned when a level has no commands.
pub const NO_COMMANDS: &str = "No commands found";

/// Errors raised while resolving a command line.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No command at the current level matched the token
    #[error("command {0} not found")]
    CommandNotFound(String),

    /// A leaf command was matched but has no action attached
    #[error("command {0} has no action")]
    NoAction(String),

    /// The action itself failed
    #[error(transparent)]
    Action(#[from] anyhow::Error),
}

/// Outcome of [`Dispatcher::run_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The command succeeded and its output went to the output channel
    Success,
    /// The command failed and the error went to the error channel
    Failure,
}

impl RunStatus {
    /// Returns true for [`RunStatus::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Success => ExitCode::SUCCESS,
            RunStatus::Failure => ExitCode::FAILURE,
        }
    }
}

/// Root of a command tree together with its context and output mode.
pub struct Dispatcher<T> {
    context: T,
    commands: Vec<Command<T>>,
    mode: OutputMode,
}

impl<T> Dispatcher<T> {
    /// Creates a dispatcher in text mode.
    pub fn new(context: T, commands: Vec<Command<T>>) -> Self {
        Self {
            context,
            commands,
            mode: OutputMode::default(),
        }
    }

    /// Starts a builder with the given context.
    pub fn builder(context: T) -> DispatcherBuilder<T> {
        DispatcherBuilder {
            context,
            commands: Vec::new(),
            mode: OutputMode::default(),
        }
    }

    /// The active output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Overrides the active output mode.
    pub fn set_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    /// The context forwarded to actions.
    pub fn context(&self) -> &T {
        &self.context
    }

    /// The top-level commands.
    pub fn commands(&self) -> &[Command<T>] {
        &self.commands
    }

    /// Resolves an argument list and runs the matched action.
    ///
    /// Seeing `-json` or `--json` switches this dispatcher to JSON output
    /// for the rest of its lifetime.
    pub fn resolve<I, S>(&mut self, args: I) -> Result<Envelope, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        resolve_level(&self.commands, &self.context, &mut self.mode, args)
    }

    /// Splits a command line on whitespace and resolves it.
    ///
    /// There is no quoting: `users create -name "Max M"` yields the tokens
    /// `-name`, `"Max` and `M"`.
    pub fn run_with_command_line(
        &mut self,
        command_line: &str,
    ) -> Result<Envelope, DispatchError> {
        self.resolve(command_line.split_whitespace())
    }

    /// Runs against the process arguments, writing to stdout and stderr.
    pub fn run(&mut self) -> ExitCode {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        self.run_from(
            std::env::args().skip(1),
            &mut stdout.lock(),
            &mut stderr.lock(),
        )
        .into()
    }

    /// Runs against the given arguments, writing to the given channels.
    ///
    /// On success the rendered envelope goes to `out`; a render failure here
    /// is dropped. On failure the error is rendered as an
    /// [`Envelope::Error`] to `err`; if that render fails too, the raw
    /// error text is written instead. Either failure path returns
    /// [`RunStatus::Failure`].
    pub fn run_from<I, S>(
        &mut self,
        args: I,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> RunStatus
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let outcome = self.resolve(args);
        let mode = self.mode;
        deliver(outcome, |envelope| envelope.render(mode), out, err)
    }
}

/// Writes a dispatch outcome to the matching channel.
///
/// With the built-in modes rendering an [`Envelope`] cannot fail, so the
/// two fallback branches only fire for a renderer that can.
fn deliver<F>(
    outcome: Result<Envelope, DispatchError>,
    render: F,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> RunStatus
where
    F: Fn(&Envelope) -> Result<String, RenderError>,
{
    match outcome {
        Ok(envelope) => {
            match render(&envelope) {
                Ok(text) => {
                    let _ = writeln!(out, "{}", text);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "dropping output that failed to render");
                }
            }
            RunStatus::Success
        }
        Err(error) => {
            let message = error.to_string();
            tracing::debug!(error = %message, "command failed");
            match render(&Envelope::error(message.clone())) {
                Ok(text) => {
                    let _ = writeln!(err, "{}", text);
                }
                Err(_) => {
                    let _ = writeln!(err, "{}", message);
                }
            }
            RunStatus::Failure
        }
    }
}

/// Builder for [`Dispatcher`].
pub struct DispatcherBuilder<T> {
    context: T,
    commands: Vec<Command<T>>,
    mode: OutputMode,
}

impl<T> DispatcherBuilder<T> {
    /// Adds a top-level command.
    pub fn command(mut self, command: Command<T>) -> Self {
        self.commands.push(command);
        self
    }

    /// Adds several top-level commands.
    pub fn commands(mut self, commands: impl IntoIterator<Item = Command<T>>) -> Self {
        self.commands.extend(commands);
        self
    }

    /// Sets the initial output mode.
    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds the dispatcher.
    pub fn build(self) -> Dispatcher<T> {
        Dispatcher {
            context: self.context,
            commands: self.commands,
            mode: self.mode,
        }
    }
}

/// Builds the help listing for one level of the tree.
///
/// Each record has a `name` and a `short` entry, in declaration order.
pub fn help<T>(commands: &[Command<T>]) -> Envelope {
    if commands.is_empty() {
        return Envelope::message(NO_COMMANDS);
    }

    let items = commands
        .iter()
        .map(|cmd| record([("name", cmd.name.as_str()), ("short", cmd.short.as_str())]))
        .collect();

    Envelope::list(HELP_TITLE, items)
}

/// Removes global flags from the argument list, returning the mode they
/// select (if any) and the remaining tokens in order.
pub fn strip_global_flags(args: Vec<String>) -> (Option<OutputMode>, Vec<String>) {
    let mut mode = None;
    let mut filtered = Vec::with_capacity(args.len());

    for arg in args {
        match OutputMode::from_flag(&arg) {
            Some(selected) => mode = Some(selected),
            None => filtered.push(arg),
        }
    }

    (mode, filtered)
}

/// Returns true if the token asks for the help listing.
pub fn is_help_flag(token: &str) -> bool {
    token == "-help" || token == "--help"
}

fn resolve_level<T>(
    commands: &[Command<T>],
    context: &T,
    mode: &mut OutputMode,
    args: Vec<String>,
) -> Result<Envelope, DispatchError> {
    let (selected, filtered) = strip_global_flags(args);
    if let Some(selected) = selected {
        *mode = selected;
    }

    let Some(first) = filtered.first() else {
        return Ok(help(commands));
    };

    if is_help_flag(first) {
        return Ok(help(commands));
    }

    let Some(cmd) = commands.iter().find(|c| c.name == *first) else {
        return Err(DispatchError::CommandNotFound(first.clone()));
    };

    let rest: Vec<String> = filtered[1..].to_vec();

    if cmd.is_group() {
        tracing::debug!(command = %cmd.name, "descending into group");
        return resolve_level(cmd.children(), context, mode, rest);
    }

    tracing::debug!(command = %cmd.name, args = ?rest, "invoking action");
    match cmd.invoke(&rest, context) {
        Some(result) => Ok(result?),
        None => Err(DispatchError::NoAction(cmd.name.clone())),
    }
}
