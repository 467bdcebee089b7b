//! Typed accessors for environment variables.

use std::fmt;
use std::marker::PhantomData;

use crate::env::Environment;

/// Conversion from the raw text of a variable.
pub trait FromEnvStr: Sized {
    /// `None` when `raw` is not a valid representation.
    fn from_env_str(raw: &str) -> Option<Self>;
}

impl FromEnvStr for String {
    fn from_env_str(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }
}

/// Accepts an optional sign, `0x`/`0o`/`0b` prefixes, a leading `0` for
/// octal, and `_` between digits.
impl FromEnvStr for i64 {
    fn from_env_str(raw: &str) -> Option<Self> {
        let (negative, unsigned) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };

        let (radix, digits) = split_radix(unsigned);
        if digits.is_empty()
            || digits.starts_with('_')
            || digits.ends_with('_')
            || digits.contains("__")
        {
            return None;
        }

        let digits: String = digits.chars().filter(|&c| c != '_').collect();
        if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }

        let magnitude = i128::from(u64::from_str_radix(&digits, radix).ok()?);
        let value = if negative { -magnitude } else { magnitude };
        Self::try_from(value).ok()
    }
}

impl FromEnvStr for f64 {
    fn from_env_str(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl FromEnvStr for bool {
    fn from_env_str(raw: &str) -> Option<Self> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
            _ => None,
        }
    }
}

/// Split a base prefix off an unsigned integer literal.
fn split_radix(text: &str) -> (u32, &str) {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return (10, text);
    }

    let (radix, rest) = match bytes[1] {
        b'x' | b'X' => (16, &text[2..]),
        b'o' | b'O' => (8, &text[2..]),
        b'b' | b'B' => (2, &text[2..]),
        _ => (8, &text[1..]),
    };
    // a separator may follow the prefix directly
    (radix, rest.strip_prefix('_').unwrap_or(rest))
}

/// A named variable read as `T`.
///
/// ```
/// use std::collections::BTreeMap;
/// use envfile_rs::IntVar;
///
/// let env = BTreeMap::from([("PORT".to_string(), "0x1F90".to_string())]);
/// assert_eq!(IntVar::new("PORT").get_or(&env, 80), 8080);
/// assert_eq!(IntVar::new("WORKERS").get_or(&env, 4), 4);
/// ```
pub struct Var<T> {
    name: String,
    value: PhantomData<fn() -> T>,
}

pub type StringVar = Var<String>;
pub type IntVar = Var<i64>;
pub type FloatVar = Var<f64>;
pub type BoolVar = Var<bool>;

impl<T> Var<T> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PhantomData,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for Var<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<T> fmt::Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var").field("name", &self.name).finish()
    }
}

impl<T> Var<T>
where
    T: FromEnvStr + Default,
{
    /// The parsed value, or `T::default()` when the variable is unset,
    /// empty, or invalid.
    #[must_use]
    pub fn get<E>(&self, env: &E) -> T
    where
        E: Environment + ?Sized,
    {
        self.non_empty(env).unwrap_or_default()
    }

    /// The parsed value, or `fallback` when the variable is unset, empty,
    /// or invalid.
    #[must_use]
    pub fn get_or<E>(&self, env: &E, fallback: T) -> T
    where
        E: Environment + ?Sized,
    {
        self.non_empty(env).unwrap_or(fallback)
    }

    /// The parsed value whenever the variable is set (`T::default()` if it
    /// does not parse), `T::default()` when unset.
    #[must_use]
    pub fn lookup<E>(&self, env: &E) -> T
    where
        E: Environment + ?Sized,
    {
        env.var(&self.name)
            .and_then(|raw| T::from_env_str(&raw))
            .unwrap_or_default()
    }

    /// Like [`Var::lookup`], but `fallback` is returned when the variable
    /// is unset.
    #[must_use]
    pub fn lookup_or<E>(&self, env: &E, fallback: T) -> T
    where
        E: Environment + ?Sized,
    {
        env.var(&self.name).map_or(fallback, |raw| {
            T::from_env_str(&raw).unwrap_or_default()
        })
    }

    fn non_empty<E>(&self, env: &E) -> Option<T>
    where
        E: Environment + ?Sized,
    {
        env.var(&self.name)
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| T::from_env_str(&raw))
    }
}
