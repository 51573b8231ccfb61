use crate::common::command::{kit_output, repository_dir, run_kit_command};
use crate::common::read_head;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::rstest;

#[rstest]
#[case::without_flag(&["commit"])]
#[case::empty_message(&["commit", "-m", ""])]
#[case::blank_message(&["commit", "-m", "   "])]
fn commit_default_message(
    repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("file.txt").write_str("hello")?;

    run_kit_command(repository_dir.path(), args)
        .assert()
        .success();

    let head = read_head(repository_dir.path());
    let commit = kit_output(repository_dir.path(), &["cat-file", "-p", &head]);
    assert!(commit.ends_with("\nDefault commit message\n"));

    Ok(())
}
