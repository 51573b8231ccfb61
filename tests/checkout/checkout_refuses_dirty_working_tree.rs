use crate::common::command::{init_repository_dir, kit_commit, run_kit_command};
use crate::common::file::snapshot_files;
use crate::common::read_head;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn second_commit(dir: &TempDir) -> Result<String, Box<dyn std::error::Error>> {
    dir.child("1.txt").write_str("one, revised")?;
    kit_commit(dir.path(), "Second commit").assert().success();

    Ok(read_head(dir.path()))
}

#[rstest]
#[case::modified_file("a/2.txt", "unsaved work")]
#[case::untracked_file("scratch.txt", "notes")]
fn checkout_refuses_dirty_working_tree(
    init_repository_dir: TempDir,
    #[case] path: &str,
    #[case] content: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = read_head(dir);
    let second = second_commit(&init_repository_dir)?;

    init_repository_dir.child(path).write_str(content)?;
    let before = snapshot_files(dir);

    run_kit_command(dir, &["checkout", &first])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("would be overwritten by checkout"))
        .stderr(predicate::str::contains(path));

    assert_eq!(snapshot_files(dir), before);
    assert_eq!(read_head(dir), second);

    Ok(())
}

#[rstest]
fn checkout_with_force_discards_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = read_head(dir);
    second_commit(&init_repository_dir)?;

    init_repository_dir.child("a/2.txt").write_str("unsaved work")?;
    init_repository_dir.child("scratch.txt").write_str("notes")?;

    run_kit_command(dir, &["checkout", "--force", &first])
        .assert()
        .success();

    init_repository_dir.child("a/2.txt").assert("two");
    init_repository_dir.child("1.txt").assert("one");
    init_repository_dir
        .child("scratch.txt")
        .assert(predicate::path::missing());

    Ok(())
}
