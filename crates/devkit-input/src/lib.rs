//! Bind command-line flags and interactive prompts onto typed records.
//!
//! `devkit-input` fills the required fields of a record from `-name value`
//! arguments, prompting on the terminal for anything that was not supplied.
//!
//! # Quick Start
//!
//! ```no_run
//! use devkit_input::{input, Bindable, Field};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! impl Bindable for User {
//!     fn fields() -> Vec<Field<Self>> {
//!         vec![
//!             Field::text("Name", |u: &mut User, v| u.name = v).required(),
//!             Field::integer("Age", |u: &mut User, v| u.age = v).required(),
//!         ]
//!     }
//! }
//!
//! let mut user = User::default();
//! // "Age" is missing, so the user is asked with "Enter Age: ".
//! input(&mut user, &["-name", "ada"])?;
//! # Ok::<(), devkit_input::InputError>(())
//! ```
//!
//! # Binding rules
//!
//! For each required field, in declaration order:
//!
//! 1. the lower-cased field name is looked up in the supplied values, then
//!    the exact field name, then the smallest key matching it
//!    case-insensitively;
//! 2. if nothing was supplied, the terminal is prompted and the answer is
//!    trimmed;
//! 3. the value is coerced to the field's [`FieldKind`].
//!
//! The first failure aborts binding.
//!
//! # Testing
//!
//! Prompts go through [`TerminalIO`]. Use [`MockTerminal`] to script answers:
//!
//! ```
//! use std::collections::HashMap;
//! use devkit_input::{bind_with_terminal, Bindable, Field, MockTerminal};
//!
//! #[derive(Default)]
//! struct Login { user: String }
//!
//! impl Bindable for Login {
//!     fn fields() -> Vec<Field<Self>> {
//!         vec![Field::text("User", |l: &mut Login, v| l.user = v).required()]
//!     }
//! }
//!
//! let mut login = Login::default();
//! let term = MockTerminal::with_response("root");
//! bind_with_terminal(&mut login, &HashMap::new(), &term).unwrap();
//! assert_eq!(login.user, "root");
//! ```

mod args;
mod binder;
mod error;
mod terminal;

pub use args::parse_args;
pub use binder::{bind, bind_fields, bind_with_terminal, input, Bindable, Field, FieldKind};
pub use error::InputError;
pub use terminal::{MockTerminal, RealTerminal, TerminalIO};
