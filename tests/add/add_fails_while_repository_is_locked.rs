use crate::common::command::{init_repository_dir, kit_commit, run_kit_command};
use crate::common::read_head;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use kit::areas::lockfile::{LOCK_FILE_NAME, RepositoryLock};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_fails_while_repository_is_locked(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let index_path = dir.join(".kit").join("index");
    let index_before = std::fs::read_to_string(&index_path)?;
    init_repository_dir.child("new.txt").write_str("new")?;

    // the kit binary runs in its own process, so this lock conflicts with it
    let lock = RepositoryLock::acquire(&dir.join(".kit").join(LOCK_FILE_NAME))?;

    run_kit_command(dir, &["add", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("repository is locked"));
    assert_eq!(std::fs::read_to_string(&index_path)?, index_before);

    drop(lock);

    run_kit_command(dir, &["add", "."]).assert().success();
    assert!(std::fs::read_to_string(&index_path)?.contains("new.txt"));

    Ok(())
}

#[rstest]
fn commit_fails_while_repository_is_locked(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = read_head(dir);
    init_repository_dir.child("1.txt").write_str("changed")?;

    let _lock = RepositoryLock::acquire(&dir.join(".kit").join(LOCK_FILE_NAME))?;

    kit_commit(dir, "blocked")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("repository is locked"));
    assert_eq!(read_head(dir), head);

    Ok(())
}
