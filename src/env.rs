use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A key/value store that loaded entries are applied to and that
/// expansion and typed accessors read from.
pub trait Environment {
    /// Current value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;

    /// Set `key` to `value`, replacing any existing value.
    fn set_var(&mut self, key: &str, value: &str);

    fn contains(&self, key: &str) -> bool {
        self.var(key).is_some()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        self.insert(key.to_owned(), value.to_owned());
    }

    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }
}

/// The environment of the current process.
///
/// Writes go through [`std::env::set_var`], which mutates global process
/// state and is not thread-safe.
#[derive(Debug)]
pub struct ProcessEnv {
    _private: (),
}

impl ProcessEnv {
    /// Create a handle to the process environment.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other thread reads or writes the process
    /// environment while this handle is used to set variables.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
    }

    fn set_var(&mut self, key: &str, value: &str) {
        // SAFETY: guaranteed by the contract of `ProcessEnv::new`.
        unsafe { std::env::set_var(key, value) }
    }
}
