//! Integration tests for devkit-input.
//!
//! Binding runs against `MockTerminal` so prompts behave the same in
//! interactive and CI environments.

use std::collections::HashMap;

use devkit_input::{
    bind_fields, bind_with_terminal, parse_args, Bindable, Field, FieldKind, InputError,
    MockTerminal,
};
use proptest::prelude::*;

#[derive(Debug, Default, PartialEq)]
struct User {
    name: String,
    email: String,
    age: i64,
    bio: String,
}

impl Bindable for User {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Name", |u: &mut User, v| u.name = v).required(),
            Field::text("Email", |u: &mut User, v| u.email = v).required(),
            Field::integer("Age", |u: &mut User, v| u.age = v).required(),
            // Not required: the binder never touches it.
            Field::text("Bio", |u: &mut User, v| u.bio = v),
        ]
    }
}

#[derive(Debug, Default)]
struct Tagged {
    title: String,
}

impl Bindable for Tagged {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("Title", |t: &mut Tagged, v| t.title = v).required(),
            Field::unsupported("Tags", "Vec<String>").required(),
        ]
    }
}

fn supplied(args: &[&str]) -> HashMap<String, String> {
    parse_args(args)
}

// ============================================================================
// Supplied values
// ============================================================================

#[test]
fn all_values_supplied_no_prompt() {
    let mut user = User::default();
    let term = MockTerminal::eof();
    let values = supplied(&["-name", "test", "-email", "test@example.com", "-age", "20"]);

    bind_with_terminal(&mut user, &values, &term).unwrap();

    assert_eq!(
        user,
        User {
            name: "test".into(),
            email: "test@example.com".into(),
            age: 20,
            bio: String::new(),
        }
    );
    assert!(term.prompts().is_empty());
}

#[test]
fn keys_match_case_insensitively() {
    let mut user = User::default();
    let values = supplied(&["-NAME", "n", "-Email", "e", "-aGe", "1"]);
    bind_with_terminal(&mut user, &values, &MockTerminal::eof()).unwrap();
    assert_eq!(user.name, "n");
    assert_eq!(user.email, "e");
    assert_eq!(user.age, 1);
}

#[test]
fn non_required_field_is_ignored() {
    let mut user = User {
        bio: "keep".into(),
        ..User::default()
    };
    let values = supplied(&["-name", "n", "-email", "e", "-age", "1", "-bio", "new"]);
    bind_with_terminal(&mut user, &values, &MockTerminal::eof()).unwrap();
    assert_eq!(user.bio, "keep");
}

// ============================================================================
// Prompting
// ============================================================================

#[test]
fn missing_values_are_prompted_in_order() {
    let mut user = User::default();
    let term = MockTerminal::with_responses(["test@example.com", " 42 "]);
    let values = supplied(&["-name", "test"]);

    bind_with_terminal(&mut user, &values, &term).unwrap();

    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.age, 42);
    assert_eq!(term.prompts(), vec!["Enter Email: ", "Enter Age: "]);
}

#[test]
fn eof_while_prompting_is_cancelled() {
    let mut user = User::default();
    let err = bind_with_terminal(&mut user, &HashMap::new(), &MockTerminal::eof()).unwrap_err();
    assert!(matches!(err, InputError::PromptCancelled));
    assert!(err.is_io());
}

#[test]
fn read_failure_while_prompting() {
    let mut user = User::default();
    let err =
        bind_with_terminal(&mut user, &HashMap::new(), &MockTerminal::failing()).unwrap_err();
    assert!(matches!(err, InputError::PromptFailed(_)));
    assert!(err.to_string().starts_with("error reading input"));
}

// ============================================================================
// Coercion
// ============================================================================

#[test]
fn invalid_integer_names_field() {
    let mut user = User::default();
    let values = supplied(&["-name", "n", "-email", "e", "-age", "twenty"]);
    let err = bind_with_terminal(&mut user, &values, &MockTerminal::eof()).unwrap_err();

    match err {
        InputError::ParseError { ref name, .. } => assert_eq!(name, "Age"),
        other => panic!("expected parse error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Failed to parse field 'Age'"));
}

#[test]
fn first_error_keeps_earlier_assignments() {
    let mut user = User::default();
    let values = supplied(&["-name", "n", "-email", "e", "-age", "x"]);
    assert!(bind_with_terminal(&mut user, &values, &MockTerminal::eof()).is_err());
    assert_eq!(user.name, "n");
    assert_eq!(user.email, "e");
    assert_eq!(user.age, 0);
}

#[test]
fn unsupported_type_fails_after_lookup() {
    let mut tagged = Tagged::default();
    let values = supplied(&["-title", "t", "-tags", "a,b"]);
    let err = bind_with_terminal(&mut tagged, &values, &MockTerminal::eof()).unwrap_err();

    match err {
        InputError::UnsupportedType { field, type_name } => {
            assert_eq!(field, "Tags");
            assert_eq!(type_name, "Vec<String>");
        }
        other => panic!("expected unsupported type, got {:?}", other),
    }
    assert_eq!(tagged.title, "t");
}

#[test]
fn unsupported_type_is_prompted_before_failing() {
    let mut tagged = Tagged::default();
    let term = MockTerminal::with_response("a,b");
    let values = supplied(&["-title", "t"]);
    let err = bind_with_terminal(&mut tagged, &values, &term).unwrap_err();
    assert!(matches!(err, InputError::UnsupportedType { .. }));
    assert_eq!(term.prompts(), vec!["Enter Tags: "]);
}

#[test]
fn explicit_field_list() {
    let mut user = User::default();
    let fields = vec![Field::integer("Age", |u: &mut User, v| u.age = v).required()];
    assert_eq!(fields[0].kind(), FieldKind::Integer);
    bind_fields(&mut user, &fields, &supplied(&["-age", "7"]), &MockTerminal::eof()).unwrap();
    assert_eq!(user.age, 7);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn flag_value_pairs_are_collected(
        pairs in prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{1,8}", 0..6)
    ) {
        let mut args = Vec::new();
        for (k, v) in &pairs {
            args.push(format!("-{}", k));
            args.push(v.clone());
        }
        let parsed = parse_args(&args);
        prop_assert_eq!(parsed.len(), pairs.len());
        for (k, v) in &pairs {
            prop_assert_eq!(&parsed[k], v);
        }
    }

    #[test]
    fn lone_flags_map_to_empty(names in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let args: Vec<String> = names.iter().map(|n| format!("-{}", n)).collect();
        let parsed = parse_args(&args);
        for name in &names {
            prop_assert_eq!(parsed[name].as_str(), "");
        }
    }

    #[test]
    fn integers_bind_exactly(age in any::<i64>()) {
        let mut user = User::default();
        let age_text = age.to_string();
        let mut values = supplied(&["-name", "n", "-email", "e"]);
        values.insert("age".into(), age_text);
        bind_with_terminal(&mut user, &values, &MockTerminal::eof()).unwrap();
        prop_assert_eq!(user.age, age);
    }
}
