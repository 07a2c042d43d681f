// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! In-memory task collection.
//!
//! A __task list__ is the complete set of a user's tasks, kept in insertion
//! order. It is loaded wholesale from the task store, mutated at most once,
//! and written back wholesale. Nothing here touches the file system.
//!
//! # Task Identifiers
//!
//! Each new task receives the largest identifier currently in the list plus
//! one, or 1 if the list is empty. Identifiers of removed tasks are never
//! handed out again unless they were the largest ones, and removing a task
//! never renumbers the tasks that remain.

use serde::{Deserialize, Serialize};

/// Identifier of a task.
pub type TaskId = u64;

/// One user-visible to-do item.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Task {
    /// Identifier unique among all tasks of a task list.
    pub id: TaskId,

    /// What needs doing.
    #[serde(rename = "desc")]
    pub description: String,

    /// Completion flag.
    pub done: bool,
}

impl Task {
    /// Construct new unfinished task.
    pub fn new(id: TaskId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            done: false,
        }
    }
}

/// Ordered collection of tasks.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TaskList {
    #[serde(rename = "task", default, skip_serializing_if = "Vec::is_empty")]
    tasks: Vec<Task>,
}

impl TaskList {
    /// Construct new empty task list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier the next added task will receive.
    pub fn next_id(&self) -> TaskId {
        // INVARIANT: Loaded identifiers never exceed i64::MAX, because TOML
        //   integers are signed 64-bit. So this cannot overflow. Though an
        //   identifier past i64::MAX cannot be saved back to TOML.
        self.tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
    }

    /// Append new unfinished task.
    ///
    /// Does not validate the description. See [`parse_description`] for that.
    pub fn add(&mut self, description: impl Into<String>) -> &Task {
        let task = Task::new(self.next_id(), description);
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    /// Flip completion flag of task.
    ///
    /// If more than one task shares `id`, the last one in insertion order is
    /// flipped.
    ///
    /// # Errors
    ///
    /// - Return [`TaskError::NotFound`] if no task has `id`.
    pub fn toggle(&mut self, id: TaskId) -> Result<&Task> {
        let task = self
            .tasks
            .iter_mut()
            .rev()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;
        task.done = !task.done;
        Ok(task)
    }

    /// Remove task, preserving order of remaining tasks.
    ///
    /// If more than one task shares `id`, the last one in insertion order is
    /// removed.
    ///
    /// # Errors
    ///
    /// - Return [`TaskError::NotFound`] if no task has `id`.
    pub fn remove(&mut self, id: TaskId) -> Result<Task> {
        let index = self
            .tasks
            .iter()
            .rposition(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(index))
    }

    /// List tasks in ascending order of identifier.
    pub fn list(&self) -> Vec<&Task> {
        let mut tasks = self.tasks.iter().collect::<Vec<_>>();
        tasks.sort_by_key(|task| task.id);
        tasks
    }

    /// Find task by identifier.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().rev().find(|task| task.id == id)
    }

    /// Iterate over tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

/// Validate user supplied task description.
///
/// Trims surrounding whitespace.
///
/// # Errors
///
/// - Return [`EmptyDescription`] if nothing is left after trimming.
pub fn parse_description(description: &str) -> Result<String, EmptyDescription> {
    let description = description.trim();
    if description.is_empty() {
        return Err(EmptyDescription);
    }

    Ok(description.to_string())
}

/// Task list error types.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// No task has the requested identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// Task description is blank.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("task description cannot be empty")]
pub struct EmptyDescription;

/// Friendly result alias :3
pub type Result<T, E = TaskError> = std::result::Result<T, E>;
