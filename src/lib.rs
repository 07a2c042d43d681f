// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Minimalist personal task tracker.
//!
//! Tasker records short textual tasks, marks them finished or unfinished,
//! lists them, and deletes them. Every invocation is a fresh process, so all
//! state lives in the __task store__, a single TOML file in the user's home
//! directory.
//!
//! # See Also
//!
//! 1. [`store`] for loading and saving the task store.
//! 2. [`task`] for the in-memory task list and its mutations.
//! 3. [`layout`] for the task store document format.
//! 4. [`path`] for locating the task store.

pub mod layout;
pub mod path;
pub mod store;
pub mod task;

pub use path::{HomeDir, SystemHome};
pub use store::{ErrorKind, Store, StoreError};
pub use task::{Task, TaskId, TaskList};
