use crate::common::command::{init_repository_dir, kit_commit, repository_dir, run_kit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::rstest;

#[rstest]
fn status_modified_file(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("a.txt").write_str("1")?;
    run_kit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    kit_commit(repository_dir.path(), "first").assert().success();

    repository_dir.child("a.txt").write_str("2")?;

    run_kit_command(repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("A  a.txt\n M a.txt\n");

    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout("Staged files:\n\ta.txt\n\nModified files:\n\ta.txt\n\n");

    // staging the new content settles it
    run_kit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    run_kit_command(repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("A  a.txt\n");

    Ok(())
}

#[rstest]
fn status_deleted_file(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::remove_file(init_repository_dir.child("a/b/3.txt").path())?;
    init_repository_dir.child("1.txt").write_str("uno")?;

    run_kit_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("A  1.txt\nA  a/2.txt\nA  a/b/3.txt\n M 1.txt\n D a/b/3.txt\n");

    Ok(())
}
