//! Lexer, parser, and variable expander for `.env` files.
//!
//! The core turns `.env` text into an ordered list of [`Entry`] values
//! and expands `$NAME` / `${NAME}` references through a caller-supplied
//! lookup. Loading files into an [`Environment`] and typed accessors sit
//! on top of it.
//!
//! # Quick start
//!
//! ## Parse and expand
//!
//! ```
//! use envfile_rs::{expand, parse};
//!
//! let entries = parse("export HOST=localhost\nURL=\"http://${HOST}:8080\" # api\n");
//! assert_eq!(entries[0].key, "HOST");
//! assert_eq!(entries[1].value, "http://${HOST}:8080");
//!
//! let url = expand(&entries[1].value, |name| {
//!     (name == "HOST").then(|| entries[0].value.clone())
//! });
//! assert_eq!(url, "http://localhost:8080");
//! ```
//!
//! ## Strict validation
//!
//! ```
//! use envfile_rs::parse_strict;
//!
//! let err = parse_strict("just some words\n").into_result().unwrap_err();
//! assert_eq!(err.to_string(), "Unexpected token IDENT value=some line=0 pos=6");
//! ```
//!
//! ## Apply to an environment
//!
//! ```
//! use std::collections::BTreeMap;
//! use envfile_rs::{apply, parse};
//!
//! let mut env: BTreeMap<String, String> = BTreeMap::new();
//! apply(&parse("VALUE=inserted\nREPLACE=${VALUE}\nRAW='${VALUE}'\n"), &mut env, false);
//! assert_eq!(env["REPLACE"], "inserted");
//! assert_eq!(env["RAW"], "${VALUE}");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use std::io;
use std::path::PathBuf;

pub mod entry;
pub mod env;
pub mod expand;
pub mod lexer;
pub mod loader;
pub mod parser;
pub mod token;
pub mod var;

pub use entry::Entry;
pub use env::{Environment, ProcessEnv};
pub use expand::{expand, is_special_name};
pub use lexer::{Lexer, tokenize};
pub use loader::{
    DEFAULT_PATH, LoadReport, Loader, apply, load, load_strict, overload, overload_strict,
    parse_file, parse_file_strict,
};
pub use parser::{
    ParseError, ParseErrorKind, StrictParse, parse, parse_strict, parse_tokens,
    parse_tokens_strict,
};
pub use token::{Span, Token, TokenKind};
pub use var::{BoolVar, FloatVar, FromEnvStr, IntVar, StringVar, Var};

/// Error from reading or strictly parsing a `.env` file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be read.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file failed strict parsing.
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
