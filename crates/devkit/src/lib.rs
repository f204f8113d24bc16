//! # devkit - building blocks for command-line tools
//!
//! devkit bundles a handful of small crates that command-line tools tend to
//! need together:
//!
//! - [`dispatch`]: a command tree resolved from raw arguments, with results
//!   rendered as text or JSON
//! - [`input`]: binding `-name value` flags onto typed records, prompting for
//!   anything missing
//! - [`signal`]: in-process signals with concurrently run callbacks
//! - [`humanize`]: compact durations and relative times
//! - [`captcha`]: server-side CAPTCHA verification
//!
//! The most used types are re-exported at the crate root.
//!
//! ## Quick Start
//!
//! ```rust
//! use devkit::{record, Command, Dispatcher, Envelope};
//!
//! struct Store {
//!     names: Vec<&'static str>,
//! }
//!
//! let commands = vec![
//!     Command::new("version")
//!         .short("Print the version")
//!         .action(|_, _, _| Ok(Envelope::message("1.0.0"))),
//!     Command::new("names")
//!         .short("Work with names")
//!         .subcommand(Command::new("list").action(|_, _, store: &Store| {
//!             let items = store.names.iter().map(|n| record([("name", *n)])).collect();
//!             Ok(Envelope::list("Names", items))
//!         })),
//! ];
//!
//! let mut cli = Dispatcher::new(Store { names: vec!["ada", "max"] }, commands);
//!
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let status = cli.run_from(["names", "list"], &mut out, &mut err);
//! assert!(status.is_success());
//! assert_eq!(String::from_utf8(out).unwrap(), "Names\nname: ada\nname: max\n");
//! ```
//!
//! ## Logging
//!
//! The crates log through `tracing`. Binaries call [`init_logging`] once at
//! startup to print those events on stderr.

pub mod logging;

pub use devkit_captcha as captcha;
pub use devkit_dispatch as dispatch;
pub use devkit_humanize as humanize;
pub use devkit_input as input;
pub use devkit_signal as signal;

pub use logging::{init_logging, init_logging_with};

pub use devkit_dispatch::{
    record, ActionResult, Command, DispatchError, Dispatcher, Envelope, OutputMode, Record,
    RunStatus,
};
pub use devkit_humanize::{humanize_duration, humanize_relative};
pub use devkit_input::{bind, bind_with_terminal, input, parse_args, Bindable, Field, InputError};
pub use devkit_signal::{EmitReport, Signal, SignalDispatcher};
