// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::HomeFixture;

use anyhow::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use sealed_test::prelude::*;
use tasker::{
    store::{load, save},
    ErrorKind, Store, Task, TaskList,
};

fn descriptions(store: &Store) -> Vec<(u64, String, bool)> {
    store
        .list()
        .into_iter()
        .map(|task| (task.id, task.description.clone(), task.done))
        .collect()
}

#[sealed_test]
fn one_command_per_process_scenario() -> Result<()> {
    let fixture = HomeFixture::new("home")?;
    let home = fixture.home();

    let mut store = Store::locate(None, &home)?;
    assert!(store.list().is_empty());
    store.add("buy milk");
    store.save()?;
    let store = Store::locate(None, &home)?;
    assert_eq!(descriptions(&store), vec![(1, "buy milk".into(), false)]);

    let mut store = Store::locate(None, &home)?;
    store.add("walk dog");
    store.save()?;

    let mut store = Store::locate(None, &home)?;
    store.toggle(1)?;
    store.save()?;
    let store = Store::locate(None, &home)?;
    assert_eq!(
        descriptions(&store),
        vec![(1, "buy milk".into(), true), (2, "walk dog".into(), false)]
    );

    let mut store = Store::locate(None, &home)?;
    store.remove(1)?;
    store.save()?;

    let mut store = Store::locate(None, &home)?;
    store.toggle(2)?;
    store.save()?;
    let store = Store::locate(None, &home)?;
    assert_eq!(descriptions(&store), vec![(2, "walk dog".into(), true)]);

    let expect = indoc! {r#"
        [[task]]
        id = 2
        desc = "walk dog"
        done = true
    "#};
    assert_eq!(fixture.read_store()?, expect);

    Ok(())
}

#[sealed_test]
fn removed_ids_are_not_reused() -> Result<()> {
    let fixture = HomeFixture::new("home")?;
    let home = fixture.home();

    let mut store = Store::locate(None, &home)?;
    for description in ["a", "b", "c"] {
        store.add(description);
    }
    store.save()?;

    let mut store = Store::locate(None, &home)?;
    store.remove(2)?;
    store.save()?;

    let mut store = Store::locate(None, &home)?;
    assert_eq!(store.add("d").id, 4);
    store.save()?;

    let ids = load(fixture.store_path())?
        .iter()
        .map(|task| task.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 3, 4]);

    Ok(())
}

#[sealed_test]
fn hand_edited_store_keeps_file_order() -> Result<()> {
    let fixture = HomeFixture::new("home")?;
    fixture.write_store(indoc! {r#"
        [[task]]
        id = 5
        desc = "later"
        done = false

        [[task]]
        id = 2
        desc = "sooner"
        done = true
    "#})?;

    let tasks = load(fixture.store_path())?;
    let mut sooner = Task::new(2, "sooner");
    sooner.done = true;
    assert_eq!(tasks, TaskList::from(vec![Task::new(5, "later"), sooner]));

    let store = Store::locate(None, &fixture.home())?;
    let listed = store.list().into_iter().map(|task| task.id).collect::<Vec<_>>();
    assert_eq!(listed, vec![2, 5]);

    Ok(())
}

#[sealed_test]
fn corrupt_store_is_never_overwritten() -> Result<()> {
    let fixture = HomeFixture::new("home")?;
    let corrupt = "[[task]]\nid = 1\ndesc = \"no done flag\"\n";
    fixture.write_store(corrupt)?;

    let result = Store::locate(None, &fixture.home());
    assert_eq!(result.err().map(|error| error.kind()), Some(ErrorKind::Schema));
    assert_eq!(fixture.read_store()?, corrupt);

    fixture.write_store("this is = = not toml")?;
    let result = Store::locate(None, &fixture.home());
    assert_eq!(result.err().map(|error| error.kind()), Some(ErrorKind::Parse));

    Ok(())
}

#[sealed_test(env = [("TASKER_TEST_DIR", "elsewhere")])]
fn custom_location_is_expanded() -> Result<()> {
    let fixture = HomeFixture::new("home")?;
    std::fs::create_dir("elsewhere")?;

    let mut store = Store::locate(Some("$TASKER_TEST_DIR/tasks.toml"), &fixture.home())?;
    store.add("buy milk");
    store.save()?;

    let tasks = load("elsewhere/tasks.toml")?;
    assert_eq!(tasks.len(), 1);
    assert!(!fixture.store_path().exists());

    let mut store = Store::locate(Some("~/mine.toml"), &fixture.home())?;
    store.add("walk dog");
    store.save()?;
    assert!(store_exists(&fixture, "mine.toml"));

    Ok(())
}

#[sealed_test]
fn save_without_directory_fails() -> Result<()> {
    let mut tasks = TaskList::new();
    tasks.add("buy milk");

    let result = save("missing/tasks.toml", &tasks);
    assert_eq!(result.err().map(|error| error.kind()), Some(ErrorKind::Io));
    assert!(!std::path::Path::new("missing").exists());

    Ok(())
}

fn store_exists(fixture: &HomeFixture, name: &str) -> bool {
    fixture
        .store_path()
        .with_file_name(name)
        .exists()
}
