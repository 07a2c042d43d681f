// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use tasker::{
    store::{ErrorKind, Store, StoreError},
    task::{parse_description, Task, TaskId},
    SystemHome,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::exit;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "tasker [options] <command>",
    subcommand_help_heading = "Commands",
    arg_required_else_help = true,
    version
)]
struct Cli {
    /// Path to task store file instead of the one in the home directory.
    #[arg(global = true, short, long, env = "TASKER_STORE", value_name = "path")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    fn run(self) -> Result<()> {
        match self.command {
            Command::Add(opts) => run_add(self.store, opts),
            Command::List => run_list(self.store),
            Command::Check(opts) => run_check(self.store, opts),
            Command::Remove(opts) => run_remove(self.store, opts),
            Command::Version => {
                println!("tasker {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Add a new task.
    #[command(override_usage = "tasker add [options] <description>...")]
    Add(AddOptions),

    /// List all tasks.
    #[command(visible_alias = "ls")]
    List,

    /// Mark a task as done, or as not done if it already is.
    #[command(override_usage = "tasker check [options] <task_id>", visible_alias = "done")]
    Check(TaskOptions),

    /// Delete a task.
    #[command(
        override_usage = "tasker remove [options] <task_id>",
        visible_aliases = ["delete", "rm"]
    )]
    Remove(TaskOptions),

    /// Show version information.
    Version,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct AddOptions {
    /// What needs doing.
    #[arg(required = true, num_args = 1.., value_name = "description")]
    pub words: Vec<String>,
}

#[derive(Parser, Clone, Debug)]
#[command(author, about, long_about)]
struct TaskOptions {
    /// Identifier of target task.
    #[arg(value_name = "task_id", value_parser = clap::value_parser!(u64).range(1..))]
    pub id: TaskId,
}

fn main() {
    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = run() {
        report(&error);
        exit(1);
    }

    exit(0)
}

fn run() -> Result<()> {
    Cli::parse().run()
}

fn report(error: &anyhow::Error) {
    error!("{error:?}");
    let hint = match error.downcast_ref::<StoreError>().map(StoreError::kind) {
        Some(ErrorKind::PathResolution) => "set HOME, or pass --store <path>",
        Some(ErrorKind::Io) => "check that the task store directory exists and is writable",
        Some(ErrorKind::Parse) | Some(ErrorKind::Schema) => {
            "fix or move the task store file; it was left untouched"
        }
        Some(ErrorKind::NotFound) => "use `tasker list` to see task ids",
        None => return,
    };
    info!("hint: {hint}");
}

fn run_add(store: Option<String>, opts: AddOptions) -> Result<()> {
    let description = parse_description(&opts.words.join(" "))?;
    let mut store = Store::locate(store.as_deref(), &SystemHome)?;
    let task = store.add(description);
    info!("added task {}: {}", task.id, task.description);
    store.save()?;

    Ok(())
}

fn run_list(store: Option<String>) -> Result<()> {
    let store = Store::locate(store.as_deref(), &SystemHome)?;
    let tasks = store.list();
    if tasks.is_empty() {
        println!("no tasks");
        return Ok(());
    }

    let width = tasks
        .iter()
        .map(|task| task.id.to_string().len())
        .max()
        .unwrap_or(1);
    for task in tasks {
        println!("{}", render(task, width));
    }

    Ok(())
}

fn run_check(store: Option<String>, opts: TaskOptions) -> Result<()> {
    let mut store = Store::locate(store.as_deref(), &SystemHome)?;
    let task = store.toggle(opts.id)?;
    if task.done {
        info!("task {} done: {}", task.id, task.description);
    } else {
        info!("task {} not done: {}", task.id, task.description);
    }
    store.save()?;

    Ok(())
}

fn run_remove(store: Option<String>, opts: TaskOptions) -> Result<()> {
    let mut store = Store::locate(store.as_deref(), &SystemHome)?;
    let task = store.remove(opts.id)?;
    info!("removed task {}: {}", task.id, task.description);
    store.save()?;

    Ok(())
}

fn render(task: &Task, width: usize) -> String {
    let mark = if task.done { 'x' } else { ' ' };
    format!("[{mark}] {:>width$}  {}", task.id, task.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind as ClapErrorKind;
    use simple_test_case::test_case;

    #[test]
    fn parse_add_joins_words() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["tasker", "add", "buy", "milk"])?;
        match cli.command {
            Command::Add(opts) => pretty_assertions::assert_eq!(opts.words.join(" "), "buy milk"),
            command => panic!("unexpected command {command:?}"),
        }
        Ok(())
    }

    #[test_case("check"; "check")]
    #[test_case("done"; "done alias")]
    #[test]
    fn parse_check(name: &str) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["tasker", name, "3"])?;
        assert!(matches!(cli.command, Command::Check(TaskOptions { id: 3 })));
        Ok(())
    }

    #[test_case("remove"; "remove")]
    #[test_case("delete"; "delete alias")]
    #[test_case("rm"; "rm alias")]
    #[test]
    fn parse_remove(name: &str) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["tasker", name, "12", "--store", "/tmp/x.toml"])?;
        assert!(matches!(cli.command, Command::Remove(TaskOptions { id: 12 })));
        pretty_assertions::assert_eq!(cli.store.as_deref(), Some("/tmp/x.toml"));
        Ok(())
    }

    #[test_case("abc"; "not numeric")]
    #[test_case("0"; "zero")]
    #[test_case("-4"; "negative")]
    #[test_case("99999999999999999999999"; "out of range")]
    #[test]
    fn parse_rejects_bad_ids(id: &str) {
        assert!(Cli::try_parse_from(["tasker", "check", id]).is_err());
        assert!(Cli::try_parse_from(["tasker", "remove", id]).is_err());
    }

    #[test]
    fn parse_requires_command() {
        let result = Cli::try_parse_from(["tasker"]).map(|_| ());
        pretty_assertions::assert_eq!(
            result.map_err(|error| error.kind()),
            Err(ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand)
        );

        let result = Cli::try_parse_from(["tasker", "frobnicate"]).map(|_| ());
        pretty_assertions::assert_eq!(
            result.map_err(|error| error.kind()),
            Err(ClapErrorKind::InvalidSubcommand)
        );

        assert!(Cli::try_parse_from(["tasker", "add"]).is_err());
    }

    #[test]
    fn render_aligns_ids() {
        let mut task = Task::new(7, "walk dog");
        pretty_assertions::assert_eq!(render(&task, 2), "[ ]  7  walk dog");
        task.done = true;
        pretty_assertions::assert_eq!(render(&task, 1), "[x] 7  walk dog");
    }
}
