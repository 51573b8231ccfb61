use crate::common::command::{init_repository_dir, repository_dir, run_kit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn status_untracked_files_are_sorted(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("b.txt").write_str("b")?;
    repository_dir.child("dir/c.txt").write_str("c")?;
    repository_dir.child("a.txt").write_str("a")?;

    run_kit_command(repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("?? a.txt\n?? b.txt\n?? dir/c.txt\n");

    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No commits yet\n"))
        .stdout(predicate::str::contains(
            "Untracked files:\n\ta.txt\n\tb.txt\n\tdir/c.txt\n",
        ));

    Ok(())
}

#[rstest]
fn status_skips_ignored_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child(".kitignore").write_str("build/\n*.tmp\n")?;
    init_repository_dir.child("build/output.bin").write_str("bin")?;
    init_repository_dir.child("a/scratch.tmp").write_str("tmp")?;
    init_repository_dir.child("notes.md").write_str("notes")?;

    run_kit_command(init_repository_dir.path(), &["status", "--porcelain"])
        .assert()
        .success()
        .stdout("A  1.txt\nA  a/2.txt\nA  a/b/3.txt\n?? .kitignore\n?? notes.md\n");

    Ok(())
}
