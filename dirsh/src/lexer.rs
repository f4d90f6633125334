//! Line tokenizer
//!
//! Splits a command segment into its name and the raw parameter string.
//! There is no quoting: the first whitespace run is the only separator.

use crate::ast::Invocation;

pub fn tokenize(segment: &str) -> Invocation {
    let segment = segment.trim();
    match segment.split_once(char::is_whitespace) {
        Some((name, rest)) => Invocation {
            name: name.to_string(),
            params: rest.trim_start().to_string(),
        },
        None => Invocation {
            name: segment.to_string(),
            params: String::new(),
        },
    }
}
