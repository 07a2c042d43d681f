// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Task store document layout.
//!
//! Specify the layout of the task store file to simplify the process of
//! serialization and deserialization. File I/O is left to the caller to
//! figure out.
//!
//! # General Layout
//!
//! The task store is a TOML document holding an ordered array of `task`
//! tables. Each table carries a numeric `id`, a text `desc`, and a boolean
//! `done` flag. There is no version field. Top-level keys other than `task`
//! are rejected, so a foreign document is never mistaken for an empty task
//! store.
//!
//! ```toml
//! [[task]]
//! id = 1
//! desc = "buy milk"
//! done = false
//! ```

use crate::task::TaskList;

use toml::{Table, Value};

/// Decode task store document.
///
/// Empty documents decode into an empty task list.
///
/// # Errors
///
/// - Return [`LayoutError::Parse`] if `data` is not well-formed TOML.
/// - Return [`LayoutError::Schema`] if `data` is well-formed but does not
///   match the task layout.
pub fn decode(data: impl AsRef<str>) -> Result<TaskList> {
    let table: Table = data.as_ref().parse().map_err(LayoutError::Parse)?;
    Value::Table(table).try_into().map_err(LayoutError::Schema)
}

/// Encode task list into task store document.
///
/// # Errors
///
/// - Return [`LayoutError::Serialize`] if task list cannot be represented in
///   TOML.
pub fn encode(tasks: &TaskList) -> Result<String> {
    toml::ser::to_string_pretty(tasks).map_err(LayoutError::Serialize)
}

/// Layout error types.
#[derive(Clone, Debug, thiserror::Error)]
pub enum LayoutError {
    /// Document is not well-formed TOML.
    #[error("malformed document: {0}")]
    Parse(#[source] toml::de::Error),

    /// Document does not match task layout.
    #[error("unexpected document layout: {0}")]
    Schema(#[source] toml::de::Error),

    /// Failed to serialize task list.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),
}

/// Friendly result alias :3
pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
