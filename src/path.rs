// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine where the task store lives. The user's home directory is never
//! looked up behind the caller's back. Instead, the lookup is supplied through
//! the [`HomeDir`] trait so that store logic can be pointed at any location
//! without touching the real environment.

use std::path::PathBuf;

/// Name of the task store file placed in the user's home directory.
pub const STORE_FILE_NAME: &str = "tasker_store.toml";

/// Source of the user's home directory.
pub trait HomeDir {
    /// Absolute path to home directory, or `None` if it cannot be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Home directory lookup through the operating system.
///
/// # See Also
///
/// - [`dirs::home_dir`](https://docs.rs/dirs/latest/dirs/fn.home_dir.html)
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHome;

impl HomeDir for SystemHome {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

impl<F> HomeDir for F
where
    F: Fn() -> Option<PathBuf>,
{
    fn home_dir(&self) -> Option<PathBuf> {
        self()
    }
}

/// Determine default absolute path to task store file.
///
/// Uses `$HOME/tasker_store.toml`. Does not check if the path returned
/// actually exists.
///
/// # Errors
///
/// - Return [`PathError::NoWayHome`] if home directory cannot be determined.
pub fn default_store_path(home: &impl HomeDir) -> Result<PathBuf> {
    home.home_dir()
        .map(|path| path.join(STORE_FILE_NAME))
        .ok_or(PathError::NoWayHome)
}

/// Expand user supplied store location.
///
/// Performs shell expansion on `raw`, such that `~` becomes the home directory
/// supplied by `home`, and `$VAR` or `${VAR}` are replaced by the value of
/// the matching environment variable.
///
/// # Errors
///
/// - Return [`PathError::EmptyPath`] if `raw` is empty.
/// - Return [`PathError::NoWayHome`] if `raw` starts with `~`, but home
///   directory cannot be determined.
/// - Return [`PathError::ShellExpansion`] if a variable is not set.
pub fn expand_store_path(raw: impl AsRef<str>, home: &impl HomeDir) -> Result<PathBuf> {
    let raw = raw.as_ref().trim();
    if raw.is_empty() {
        return Err(PathError::EmptyPath);
    }

    // INVARIANT: Never leave a literal `~` behind, it would land in the
    //   current directory.
    let home_dir = home.home_dir();
    if home_dir.is_none() && (raw == "~" || raw.starts_with("~/")) {
        return Err(PathError::NoWayHome);
    }

    let expanded = shellexpand::full_with_context(
        raw,
        || home_dir.map(|path| path.to_string_lossy().into_owned()),
        |var| std::env::var(var).map(Some),
    )?;

    Ok(PathBuf::from(expanded.into_owned()))
}

/// Resolve store location from optional user override.
///
/// # Errors
///
/// - Return [`PathError`] if either the override or the default location
///   cannot be resolved.
pub fn resolve_store_path(custom: Option<&str>, home: &impl HomeDir) -> Result<PathBuf> {
    match custom {
        Some(raw) => expand_store_path(raw, home),
        None => default_store_path(home),
    }
}

/// Path resolution error types.
#[derive(Clone, Debug, thiserror::Error)]
pub enum PathError {
    /// No way to determine user's home directory.
    #[error("cannot determine absolute path to user's home directory")]
    NoWayHome,

    /// Store location given but empty.
    #[error("task store path cannot be empty")]
    EmptyPath,

    /// Failed to perform shell expansion on store location.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

/// Friendly result alias :3
pub type Result<T, E = PathError> = std::result::Result<T, E>;
