//! Flag parsing for action arguments.

use std::collections::HashMap;

/// Collects `-name value` pairs from an argument list.
///
/// A token starting with `-` is a flag; one leading `-` is stripped to get
/// its name. If the next token exists and does not start with `-`, it is the
/// flag's value and is consumed. Otherwise the flag maps to an empty string.
/// Tokens that are neither flags nor consumed values are ignored, and a
/// repeated flag keeps its last value.
///
/// ```rust
/// use devkit_input::parse_args;
///
/// let args = parse_args(&["-name", "test", "-verbose", "-age", "20"]);
/// assert_eq!(args["name"], "test");
/// assert_eq!(args["verbose"], "");
/// assert_eq!(args["age"], "20");
/// ```
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        if let Some(name) = args[i].as_ref().strip_prefix('-') {
            match args.get(i + 1).map(AsRef::as_ref) {
                Some(value) if !value.starts_with('-') => {
                    map.insert(name.to_string(), value.to_string());
                    i += 1;
                }
                _ => {
                    map.insert(name.to_string(), String::new());
                }
            }
        }
        i += 1;
    }

    map
}
