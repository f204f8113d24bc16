//! Command tree types.
//!
//! A [`Command`] is one node in the command hierarchy. It is either a
//! *leaf* that runs an action, or a *group* whose children are searched
//! when the node is matched. The tree is built once at startup and only
//! read during dispatch.
//!
//! # Actions
//!
//! An action receives the matched node, the arguments left after the
//! command path, and the application context:
//!
//! ```rust
//! use devkit_dispatch::{Command, Envelope};
//!
//! struct Ctx {
//!     version: &'static str,
//! }
//!
//! let version = Command::<Ctx>::new("version")
//!     .short("Print the version")
//!     .action(|_cmd, _args, ctx| Ok(Envelope::message(format!("Version: {}", ctx.version))));
//! ```
//!
//! The context is opaque to the dispatcher. It is only forwarded to actions.

use std::fmt;

use crate::envelope::Envelope;

/// The result type for command actions.
///
/// Enables use of the `?` operator for error propagation.
pub type ActionResult = Result<Envelope, anyhow::Error>;

/// Boxed action stored on a leaf command.
pub type ActionFn<T> = Box<dyn Fn(&Command<T>, &[String], &T) -> ActionResult>;

/// One node of the command tree.
pub struct Command<T> {
    /// Name matched against the command-line token
    pub name: String,
    /// One-line description shown in help listings
    pub short: String,
    /// Longer description
    pub long: String,
    /// Example invocation
    pub example: String,
    action: Option<ActionFn<T>>,
    children: Option<Vec<Command<T>>>,
}

impl<T> Command<T> {
    /// Creates a new command with the given name and no action.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: String::new(),
            long: String::new(),
            example: String::new(),
            action: None,
            children: None,
        }
    }

    /// Sets the short description.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    /// Sets the long description.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    /// Sets the example invocation.
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    /// Sets the action run when this command is matched as a leaf.
    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn(&Command<T>, &[String], &T) -> ActionResult + 'static,
    {
        self.action = Some(Box::new(f));
        self
    }

    /// Adds a child command, turning this node into a group.
    pub fn subcommand(mut self, child: Command<T>) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Adds several child commands at once.
    pub fn subcommands(mut self, children: impl IntoIterator<Item = Command<T>>) -> Self {
        self.children.get_or_insert_with(Vec::new).extend(children);
        self
    }

    /// Marks this node as a group even if it has no children yet.
    ///
    /// Matching an empty group lists "No commands found" instead of
    /// running an action.
    pub fn group(mut self) -> Self {
        self.children.get_or_insert_with(Vec::new);
        self
    }

    /// Returns true if this node delegates to children.
    pub fn is_group(&self) -> bool {
        self.children.is_some()
    }

    /// Returns true if this node runs an action when matched.
    pub fn is_leaf(&self) -> bool {
        !self.is_group()
    }

    /// Children of a group node, or an empty slice for a leaf.
    pub fn children(&self) -> &[Command<T>] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns true if an action is attached.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Runs the action, if any.
    ///
    /// Returns `None` when the node has no action attached.
    pub fn invoke(&self, args: &[String], ctx: &T) -> Option<ActionResult> {
        self.action.as_ref().map(|f| f(self, args, ctx))
    }
}

impl<T> fmt::Debug for Command<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("has_action", &self.action.is_some())
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}
