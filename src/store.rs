// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Task store management and manipulation.
//!
//! Tasker keeps all of a user's tasks in one file called the __task store__.
//! Every invocation loads the whole store, applies at most one mutation, and
//! writes the whole store back. There is no partial update, and no locking
//! between processes.
//!
//! # Task Store Location
//!
//! The task store can generally be placed anywhere on the user's file system.
//! However, the default location is `$HOME/tasker_store.toml`. A missing
//! task store file is treated as an empty store, so the first run of Tasker
//! does not need any setup.
//!
//! # Writing
//!
//! Saving never truncates the task store in place. The new document is first
//! written to a hidden sibling file, which is then renamed over the task store
//! file. An interrupted save thus leaves either the old or the new document
//! behind, never a partial one. A task store file that is a symbolic link,
//! e.g., one deployed from a dotfile repository, stays a link. The file it
//! points to is what gets replaced.

use crate::{
    layout::{self, LayoutError},
    path::{resolve_store_path, HomeDir, PathError},
    task::{Task, TaskError, TaskId, TaskList},
};

use std::{
    fs::{canonicalize, read, read_link, remove_file, rename, symlink_metadata, File},
    io::{ErrorKind as IoErrorKind, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// Load task list from task store file.
///
/// Returns tasks exactly as stored. No sorting, no deduplication, and no
/// renumbering of identifiers.
///
/// # Errors
///
/// - Return [`StoreError::Read`] if file exists but cannot be read.
/// - Return [`StoreError::Encoding`] if file is not valid UTF-8.
/// - Return [`StoreError::Parse`] if file is not well-formed TOML.
/// - Return [`StoreError::Schema`] if file does not match task layout.
#[instrument(skip(path), level = "debug")]
pub fn load(path: impl AsRef<Path>) -> Result<TaskList> {
    let path = path.as_ref();
    let bytes = match read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == IoErrorKind::NotFound => {
            debug!("no task store at {:?}, start empty", path.display());
            return Ok(TaskList::new());
        }
        Err(error) => {
            return Err(StoreError::Read {
                source: error,
                store_path: path.into(),
            })
        }
    };

    let data = String::from_utf8(bytes).map_err(|error| StoreError::Encoding {
        source: error,
        store_path: path.into(),
    })?;
    let tasks = layout::decode(data).map_err(|error| layout_error(error, path))?;
    debug!("loaded {} tasks from {:?}", tasks.len(), path.display());

    Ok(tasks)
}

/// Save task list to task store file.
///
/// Serializes the entire task list, and replaces the task store file with it.
/// Parent directories are not created. If the task store file is a symbolic
/// link, then the file it points to gets replaced, and the link is kept.
///
/// # Errors
///
/// - Return [`StoreError::Serialize`] if task list cannot be serialized.
/// - Return [`StoreError::Write`] if task store file cannot be written.
#[instrument(skip(path, tasks), level = "debug")]
pub fn save(path: impl AsRef<Path>, tasks: &TaskList) -> Result<()> {
    let path = path.as_ref();
    let data = layout::encode(tasks).map_err(|error| layout_error(error, path))?;
    let target = resolve_link(path).map_err(|error| StoreError::Write {
        source: error,
        store_path: path.into(),
    })?;
    let staging = staging_path(&target);

    // INVARIANT: Never leave staging file behind.
    if let Err(error) = write_staging(&staging, &data) {
        if staging.is_file() {
            let _ = remove_file(&staging);
        }
        return Err(StoreError::Write {
            source: error,
            store_path: path.into(),
        });
    }

    if let Err(error) = rename(&staging, &target) {
        let _ = remove_file(&staging);
        return Err(StoreError::Write {
            source: error,
            store_path: path.into(),
        });
    }
    debug!("saved {} tasks to {:?}", tasks.len(), target.display());

    Ok(())
}

fn write_staging(staging: &Path, data: &str) -> std::io::Result<()> {
    let mut file = File::create(staging)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()
}

fn resolve_link(path: &Path) -> std::io::Result<PathBuf> {
    match symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match canonicalize(path) {
            Ok(target) => Ok(target),
            // Dangling link, so write where it points.
            Err(error) if error.kind() == IoErrorKind::NotFound => {
                let target = read_link(path)?;
                Ok(match path.parent() {
                    Some(dir) => dir.join(target),
                    None => target,
                })
            }
            Err(error) => Err(error),
        },
        _ => Ok(path.into()),
    }
}

fn layout_error(error: LayoutError, path: &Path) -> StoreError {
    match error {
        LayoutError::Parse(source) => StoreError::Parse {
            source,
            store_path: path.into(),
        },
        LayoutError::Schema(source) => StoreError::Schema {
            source,
            store_path: path.into(),
        },
        LayoutError::Serialize(source) => StoreError::Serialize(source),
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Task store bound to its file.
///
/// Holds the task list loaded from the task store file, until it gets saved
/// back to that same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    store_path: PathBuf,
    tasks: TaskList,
}

impl Store {
    /// Open task store at target path.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError`] if task store file cannot be loaded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store_path = path.into();
        let tasks = load(&store_path)?;

        Ok(Self { store_path, tasks })
    }

    /// Resolve task store location, and open it.
    ///
    /// Uses `custom` location if given, or the default location in the home
    /// directory supplied by `home`.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Path`] if location cannot be resolved.
    /// - Return [`StoreError`] if task store file cannot be loaded.
    pub fn locate(custom: Option<&str>, home: &impl HomeDir) -> Result<Self> {
        Self::open(resolve_store_path(custom, home)?)
    }

    pub fn path(&self) -> &Path {
        self.store_path.as_path()
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Add new unfinished task.
    pub fn add(&mut self, description: impl Into<String>) -> &Task {
        self.tasks.add(description)
    }

    /// Flip completion flag of task.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Task`] if task does not exist.
    pub fn toggle(&mut self, id: TaskId) -> Result<&Task> {
        Ok(self.tasks.toggle(id)?)
    }

    /// Remove task.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError::Task`] if task does not exist.
    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        Ok(self.tasks.remove(id)?)
    }

    /// List tasks in ascending order of identifier.
    pub fn list(&self) -> Vec<&Task> {
        self.tasks.list()
    }

    /// Write task list back to task store file.
    ///
    /// # Errors
    ///
    /// - Return [`StoreError`] if task store file cannot be saved.
    pub fn save(self) -> Result<()> {
        save(&self.store_path, &self.tasks)
    }
}

/// Broad category of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Cannot determine where task store lives.
    PathResolution,

    /// Task store file cannot be read or written.
    Io,

    /// Task store file is not well-formed.
    Parse,

    /// Task store file is well-formed, but does not hold tasks.
    Schema,

    /// Mutation refers to absent task.
    NotFound,
}

/// All possible error types for task store interaction.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Task store location cannot be resolved.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Task store file cannot be read.
    #[error("failed to read task store at {:?}", store_path.display())]
    Read {
        #[source]
        source: std::io::Error,
        store_path: PathBuf,
    },

    /// Task store file cannot be written.
    #[error("failed to write task store at {:?}", store_path.display())]
    Write {
        #[source]
        source: std::io::Error,
        store_path: PathBuf,
    },

    /// Task store file is not valid UTF-8.
    #[error("task store at {:?} is not valid UTF-8", store_path.display())]
    Encoding {
        #[source]
        source: std::string::FromUtf8Error,
        store_path: PathBuf,
    },

    /// Task store file is not valid TOML.
    #[error("failed to parse task store at {:?}", store_path.display())]
    Parse {
        #[source]
        source: toml::de::Error,
        store_path: PathBuf,
    },

    /// Task store file does not match task layout.
    #[error("task store at {:?} does not contain valid tasks", store_path.display())]
    Schema {
        #[source]
        source: toml::de::Error,
        store_path: PathBuf,
    },

    /// Task list cannot be serialized.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Task list mutation fails.
    #[error(transparent)]
    Task(#[from] TaskError),
}

impl StoreError {
    /// Categorize error so callers can branch without inspecting messages.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Path(_) => ErrorKind::PathResolution,
            Self::Read { .. } | Self::Write { .. } => ErrorKind::Io,
            Self::Encoding { .. } | Self::Parse { .. } => ErrorKind::Parse,
            Self::Schema { .. } | Self::Serialize(_) => ErrorKind::Schema,
            Self::Task(_) => ErrorKind::NotFound,
        }
    }
}

/// Friendly result alias :3
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
