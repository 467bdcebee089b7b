#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use envfile_rs::{Entry, TokenKind, tokenize};

/// Path of a file under `tests/fixtures/`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Tokens as `(line, column, kind, literal)` tuples for compact tables.
pub fn lex(input: &str) -> Vec<(usize, usize, TokenKind, String)> {
    tokenize(input)
        .into_iter()
        .map(|t| (t.span.line, t.span.column, t.kind, t.literal))
        .collect()
}

pub fn entry(key: &str, value: &str, raw: bool) -> Entry {
    Entry::new(key, value, raw)
}

/// Build an environment map from `KEY=VALUE` strings.
pub fn env_of(pairs: &[&str]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .unwrap_or_else(|| panic!("not a KEY=VALUE pair: {pair}"));
            (key.to_string(), value.to_string())
        })
        .collect()
}
