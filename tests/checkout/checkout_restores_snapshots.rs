use crate::common::command::{init_repository_dir, kit_commit, run_kit_command};
use crate::common::file::snapshot_files;
use crate::common::read_head;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_restores_snapshots(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = read_head(dir);
    let first_files = snapshot_files(dir);

    init_repository_dir.child("1.txt").write_str("one, revised")?;
    init_repository_dir.child("new/file.txt").write_str("brand new")?;
    std::fs::remove_file(init_repository_dir.child("a/b/3.txt").path())?;
    kit_commit(dir, "Second commit").assert().success();
    let second = read_head(dir);
    let second_files = snapshot_files(dir);

    run_kit_command(dir, &["checkout", &first])
        .assert()
        .success()
        .stdout(format!("HEAD is now at {} Initial commit\n", &first[..7]));

    assert_eq!(snapshot_files(dir), first_files);
    assert_eq!(read_head(dir), first);
    init_repository_dir.child("new").assert(predicate::path::missing());

    run_kit_command(dir, &["checkout", &second[..10]])
        .assert()
        .success();

    assert_eq!(snapshot_files(dir), second_files);
    assert_eq!(read_head(dir), second);

    Ok(())
}

#[rstest]
fn status_is_clean_after_checkout(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = read_head(dir);

    init_repository_dir.child("extra.txt").write_str("extra")?;
    run_kit_command(dir, &["add", "."]).assert().success();
    kit_commit(dir, "Second commit").assert().success();

    run_kit_command(dir, &["checkout", &first])
        .assert()
        .success();

    // the index follows the checked out tree
    run_kit_command(dir, &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("A  1.txt\nA  a/2.txt\nA  a/b/3.txt\n");

    Ok(())
}

#[rstest]
fn checkout_of_unknown_commit_leaves_files_alone(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let before = snapshot_files(dir);

    run_kit_command(dir, &["checkout", "0123456789abcdef0123456789abcdef01234567"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));

    assert_eq!(snapshot_files(dir), before);
}
