//! Reading `.env` files and applying their entries to an [`Environment`].

use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::Error;
use crate::entry::Entry;
use crate::env::Environment;
use crate::parser::{parse, parse_strict};

/// File loaded when no path is given.
pub const DEFAULT_PATH: &str = ".env";

/// Summary of a load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped_existing: usize,
    pub files_read: usize,
}

impl LoadReport {
    const fn merge(&mut self, other: Self) {
        self.loaded += other.loaded;
        self.skipped_existing += other.skipped_existing;
        self.files_read += other.files_read;
    }
}

/// Builder-style `.env` loader.
///
/// Files are processed in order. Each entry is expanded against the
/// target environment just before it is assigned, so later entries and
/// later files see the values set by earlier ones.
///
/// ```
/// use std::collections::BTreeMap;
/// use envfile_rs::Loader;
///
/// let mut env: BTreeMap<String, String> = BTreeMap::new();
/// let err = Loader::new()
///     .path("does/not/exist.env")
///     .load_into(&mut env)
///     .unwrap_err();
/// assert!(matches!(err, envfile_rs::Error::Io { .. }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Loader {
    paths: Vec<PathBuf>,
    overwrite: bool,
    strict: bool,
}

impl Loader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.paths.push(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.paths
            .extend(paths.into_iter().map(|path| path.as_ref().to_path_buf()));
        self
    }

    /// Replace variables that already exist in the target.
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Stop at the first file with a syntax error.
    ///
    /// Entries of the failing file are not applied; files before it stay
    /// applied and files after it are skipped.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Load every configured file into `env`.
    pub fn load_into<E>(&self, env: &mut E) -> Result<LoadReport, Error>
    where
        E: Environment + ?Sized,
    {
        let fallback = [PathBuf::from(DEFAULT_PATH)];
        let paths = if self.paths.is_empty() {
            &fallback[..]
        } else {
            &self.paths[..]
        };

        let mut report = LoadReport::default();
        for path in paths {
            let entries = if self.strict {
                parse_file_strict(path)?
            } else {
                parse_file(path)?
            };
            report.files_read += 1;
            report.merge(apply(&entries, env, self.overwrite));
        }

        Ok(report)
    }
}

/// Load files into `env`, keeping variables that are already set.
pub fn load<I, P, E>(paths: I, env: &mut E) -> Result<LoadReport, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    E: Environment + ?Sized,
{
    Loader::new().paths(paths).load_into(env)
}

/// Like [`load`], but stop at the first file with a syntax error.
pub fn load_strict<I, P, E>(paths: I, env: &mut E) -> Result<LoadReport, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    E: Environment + ?Sized,
{
    Loader::new().paths(paths).strict(true).load_into(env)
}

/// Load files into `env`, replacing variables that are already set.
pub fn overload<I, P, E>(paths: I, env: &mut E) -> Result<LoadReport, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    E: Environment + ?Sized,
{
    Loader::new().paths(paths).overwrite(true).load_into(env)
}

/// Like [`overload`], but stop at the first file with a syntax error.
pub fn overload_strict<I, P, E>(paths: I, env: &mut E) -> Result<LoadReport, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    E: Environment + ?Sized,
{
    Loader::new()
        .paths(paths)
        .overwrite(true)
        .strict(true)
        .load_into(env)
}

/// Read and permissively parse a single file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Entry>, Error> {
    let path = path.as_ref();
    let entries = parse(&read_source(path)?);
    debug!("parsed {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Read and strictly parse a single file.
pub fn parse_file_strict(path: impl AsRef<Path>) -> Result<Vec<Entry>, Error> {
    let path = path.as_ref();
    let entries = parse_strict(&read_source(path)?)
        .into_result()
        .map_err(|source| {
            debug!("{}: {source}", path.display());
            Error::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
    debug!("parsed {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Apply entries to `env` in order.
///
/// Existing keys are skipped unless `overwrite` is set. Non-raw, non-empty
/// values are expanded against `env` as it stands when the entry is reached.
pub fn apply<E>(entries: &[Entry], env: &mut E, overwrite: bool) -> LoadReport
where
    E: Environment + ?Sized,
{
    let mut report = LoadReport::default();

    for entry in entries {
        if !overwrite && env.contains(&entry.key) {
            debug!("skipping {}: already set", entry.key);
            report.skipped_existing += 1;
            continue;
        }

        let value = entry.resolve(|name| env.var(name));
        trace!("setting {}", entry.key);
        env.set_var(&entry.key, &value);
        report.loaded += 1;
    }

    report
}

fn read_source(path: &Path) -> Result<String, Error> {
    debug!("reading {}", path.display());
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
