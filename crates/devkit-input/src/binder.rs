//! Binding supplied values and prompt answers onto records.
//!
//! A record describes its bindable fields through [`Bindable::fields`]. Each
//! [`Field`] carries a name, a [`FieldKind`], a required marker, and a setter.
//! Only required fields are touched by the binder.

use std::collections::HashMap;
use std::fmt;

use crate::args::parse_args;
use crate::error::InputError;
use crate::terminal::{RealTerminal, TerminalIO};

/// The value types the binder can coerce into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    OptionalText,
    OptionalInteger,
    /// A field whose type the binder cannot fill. Holds the type's name.
    Unsupported(&'static str),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "string"),
            FieldKind::Integer => write!(f, "int"),
            FieldKind::OptionalText => write!(f, "optional string"),
            FieldKind::OptionalInteger => write!(f, "optional int"),
            FieldKind::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

enum Setter<R> {
    Text(fn(&mut R, String)),
    Integer(fn(&mut R, i64)),
    OptionalText(fn(&mut R, Option<String>)),
    OptionalInteger(fn(&mut R, Option<i64>)),
    Unsupported(&'static str),
}

/// Describes one field of a bindable record.
///
/// ```rust
/// use devkit_input::{Field, FieldKind};
///
/// #[derive(Default)]
/// struct User { age: i64 }
///
/// let field = Field::integer("Age", |u: &mut User, v| u.age = v).required();
/// assert_eq!(field.name(), "Age");
/// assert_eq!(field.kind(), FieldKind::Integer);
/// assert!(field.is_required());
/// ```
pub struct Field<R> {
    name: &'static str,
    required: bool,
    setter: Setter<R>,
}

impl<R> Field<R> {
    fn new(name: &'static str, setter: Setter<R>) -> Self {
        Self {
            name,
            required: false,
            setter,
        }
    }

    /// A text field, assigned verbatim.
    pub fn text(name: &'static str, set: fn(&mut R, String)) -> Self {
        Self::new(name, Setter::Text(set))
    }

    /// A signed integer field, parsed in base 10.
    pub fn integer(name: &'static str, set: fn(&mut R, i64)) -> Self {
        Self::new(name, Setter::Integer(set))
    }

    /// An optional text field. Binding always stores `Some`.
    pub fn optional_text(name: &'static str, set: fn(&mut R, Option<String>)) -> Self {
        Self::new(name, Setter::OptionalText(set))
    }

    /// An optional integer field. Binding always stores `Some`.
    pub fn optional_integer(name: &'static str, set: fn(&mut R, Option<i64>)) -> Self {
        Self::new(name, Setter::OptionalInteger(set))
    }

    /// A field of a type the binder cannot fill.
    ///
    /// Marking it required makes binding fail once a value has been obtained
    /// for it.
    pub fn unsupported(name: &'static str, type_name: &'static str) -> Self {
        Self::new(name, Setter::Unsupported(type_name))
    }

    /// Mark the field as required so the binder fills it.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn kind(&self) -> FieldKind {
        match self.setter {
            Setter::Text(_) => FieldKind::Text,
            Setter::Integer(_) => FieldKind::Integer,
            Setter::OptionalText(_) => FieldKind::OptionalText,
            Setter::OptionalInteger(_) => FieldKind::OptionalInteger,
            Setter::Unsupported(name) => FieldKind::Unsupported(name),
        }
    }

    fn assign(&self, record: &mut R, value: String) -> Result<(), InputError> {
        match self.setter {
            Setter::Text(set) => set(record, value),
            Setter::Integer(set) => set(record, self.parse_integer(&value)?),
            Setter::OptionalText(set) => set(record, Some(value)),
            Setter::OptionalInteger(set) => set(record, Some(self.parse_integer(&value)?)),
            Setter::Unsupported(type_name) => {
                return Err(InputError::UnsupportedType {
                    field: self.name.to_string(),
                    type_name,
                })
            }
        }
        Ok(())
    }

    fn parse_integer(&self, value: &str) -> Result<i64, InputError> {
        value
            .parse::<i64>()
            .map_err(|e| InputError::parse(self.name, e.to_string()))
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("required", &self.required)
            .finish()
    }
}

/// A record whose fields can be filled by the binder.
///
/// ```rust
/// use devkit_input::{Bindable, Field};
///
/// #[derive(Debug, Default)]
/// struct User {
///     name: String,
///     nickname: Option<String>,
/// }
///
/// impl Bindable for User {
///     fn fields() -> Vec<Field<Self>> {
///         vec![
///             Field::text("Name", |u: &mut User, v| u.name = v).required(),
///             Field::optional_text("Nickname", |u: &mut User, v| u.nickname = v),
///         ]
///     }
/// }
/// ```
pub trait Bindable: Sized {
    fn fields() -> Vec<Field<Self>>;
}

/// Bind `supplied` values onto `record`, prompting on the real terminal for
/// anything missing.
pub fn bind<R: Bindable>(
    record: &mut R,
    supplied: &HashMap<String, String>,
) -> Result<(), InputError> {
    bind_with_terminal(record, supplied, &RealTerminal)
}

/// Bind `supplied` values onto `record`, prompting on `terminal` for
/// anything missing.
pub fn bind_with_terminal<R: Bindable, T: TerminalIO + ?Sized>(
    record: &mut R,
    supplied: &HashMap<String, String>,
    terminal: &T,
) -> Result<(), InputError> {
    bind_fields(record, &R::fields(), supplied, terminal)
}

/// Bind using an explicit field list.
///
/// Required fields are processed in order. The first error stops binding;
/// fields assigned before it keep their new values.
pub fn bind_fields<R, T: TerminalIO + ?Sized>(
    record: &mut R,
    fields: &[Field<R>],
    supplied: &HashMap<String, String>,
    terminal: &T,
) -> Result<(), InputError> {
    for field in fields.iter().filter(|f| f.is_required()) {
        let value = match lookup(supplied, field.name()) {
            Some(value) => value.to_string(),
            None => prompt(terminal, field.name())?,
        };
        field.assign(record, value)?;
    }
    Ok(())
}

/// Parse raw `-name value` arguments and bind them onto `record`.
pub fn input<R: Bindable, S: AsRef<str>>(record: &mut R, args: &[S]) -> Result<(), InputError> {
    bind(record, &parse_args(args))
}

fn lookup<'a>(supplied: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    if let Some(value) = supplied
        .get(&name.to_lowercase())
        .or_else(|| supplied.get(name))
    {
        return Some(value.as_str());
    }
    // Smallest matching key wins when spellings collide.
    supplied
        .iter()
        .filter(|(key, _)| key.eq_ignore_ascii_case(name))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, value)| value.as_str())
}

fn prompt<T: TerminalIO + ?Sized>(terminal: &T, name: &str) -> Result<String, InputError> {
    tracing::debug!(field = name, "prompting for missing value");

    terminal
        .write_prompt(&format!("Enter {}: ", name))
        .map_err(InputError::PromptFailed)?;

    let line = terminal.read_line().map_err(InputError::PromptFailed)?;

    // EOF
    if line.is_empty() {
        return Err(InputError::PromptCancelled);
    }

    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::MockTerminal;

    #[derive(Debug, Default)]
    struct Sample {
        text: String,
        count: i64,
        note: Option<String>,
        limit: Option<i64>,
    }

    impl Bindable for Sample {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::text("Text", |p: &mut Sample, v| p.text = v).required(),
                Field::integer("Count", |p: &mut Sample, v| p.count = v).required(),
                Field::optional_text("Note", |p: &mut Sample, v| p.note = v).required(),
                Field::optional_integer("Limit", |p: &mut Sample, v| p.limit = v).required(),
            ]
        }
    }

    fn supplied(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn binds_every_kind() {
        let mut sample = Sample::default();
        let values = supplied(&[("text", "hi"), ("count", "-3"), ("note", "n"), ("limit", "9")]);
        bind_with_terminal(&mut sample, &values, &MockTerminal::eof()).unwrap();
        assert_eq!(sample.text, "hi");
        assert_eq!(sample.count, -3);
        assert_eq!(sample.note.as_deref(), Some("n"));
        assert_eq!(sample.limit, Some(9));
    }

    #[test]
    fn lookup_prefers_lowercase_then_any_case() {
        let values = supplied(&[("NAME", "upper")]);
        assert_eq!(lookup(&values, "Name"), Some("upper"));

        let values = supplied(&[("NAME", "upper"), ("name", "lower")]);
        assert_eq!(lookup(&values, "Name"), Some("lower"));

        assert_eq!(lookup(&values, "Email"), None);
    }

    #[test]
    fn lookup_with_colliding_spellings_is_deterministic() {
        let values = supplied(&[("NAME", "upper"), ("Name", "title")]);
        assert_eq!(lookup(&values, "Name"), Some("title"));

        for _ in 0..50 {
            let values = supplied(&[("NAME", "upper"), ("nAme", "odd")]);
            assert_eq!(lookup(&values, "Name"), Some("upper"));
        }
    }

    #[test]
    fn prompt_trims_answer() {
        let term = MockTerminal::with_response("  padded \r");
        assert_eq!(prompt(&term, "Name").unwrap(), "padded");
        assert_eq!(term.prompts(), vec!["Enter Name: "]);
    }

    #[test]
    fn prompt_eof_is_cancelled() {
        let err = prompt(&MockTerminal::eof(), "Name").unwrap_err();
        assert!(matches!(err, InputError::PromptCancelled));
    }

    #[test]
    fn prompt_read_failure() {
        let err = prompt(&MockTerminal::failing(), "Name").unwrap_err();
        assert!(matches!(err, InputError::PromptFailed(_)));
    }

    #[test]
    fn empty_answer_is_kept_for_text() {
        let mut sample = Sample::default();
        let term = MockTerminal::with_responses(["", "1", "", "2"]);
        bind_with_terminal(&mut sample, &HashMap::new(), &term).unwrap();
        assert_eq!(sample.text, "");
        assert_eq!(sample.note.as_deref(), Some(""));
    }

    #[test]
    fn kind_display() {
        assert_eq!(FieldKind::Integer.to_string(), "int");
        assert_eq!(FieldKind::Unsupported("f64").to_string(), "f64");
    }
}
