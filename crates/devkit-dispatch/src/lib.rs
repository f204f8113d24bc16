//! Command tree dispatch for small CLIs.
//!
//! `devkit-dispatch` resolves a raw argument list against a tree of
//! [`Command`]s, runs the matched action with an application context, and
//! renders the action's [`Envelope`] as plain text or JSON.
//!
//! # Features
//!
//! - **Command tree**: leaf commands run actions, groups delegate to children
//! - **Envelopes**: a closed set of result shapes (message, list, details, error)
//! - **Output modes**: plain text by default, JSON when `-json`/`--json` is given
//! - **Help**: an empty command line or `-help`/`--help` lists the current level
//!
//! # Usage
//!
//! ```rust
//! use devkit_dispatch::{record, Command, Dispatcher, Envelope};
//!
//! struct Context;
//!
//! let mut cli = Dispatcher::new(
//!     Context,
//!     vec![
//!         Command::new("version")
//!             .short("Print the version")
//!             .action(|_, _, _| Ok(Envelope::message("Version: 1.0.0"))),
//!         Command::new("users").short("Manage users").subcommand(
//!             Command::new("list").short("List users").action(|_, _, _| {
//!                 Ok(Envelope::list(
//!                     "Users",
//!                     vec![record([("id", "1"), ("email", "max@example.com")])],
//!                 ))
//!             }),
//!         ),
//!     ],
//! );
//!
//! let result = cli.run_with_command_line("users list").unwrap();
//! assert!(result.is_list());
//! ```
//!
//! In a binary, call [`Dispatcher::run`] and return its exit code from
//! `main`.

mod command;
mod dispatch;
mod envelope;
mod output;
mod render;

pub use command::{ActionFn, ActionResult, Command};

pub use dispatch::{
    help, is_help_flag, strip_global_flags, DispatchError, Dispatcher, DispatcherBuilder,
    RunStatus, HELP_TITLE, NO_COMMANDS,
};

pub use envelope::{record, Envelope, Record};

pub use output::OutputMode;

pub use render::RenderError;
