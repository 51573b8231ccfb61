use crate::common::command::{kit_commit, repository_dir, run_kit_command};
use crate::common::read_head;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn checkout_keeps_ignored_files(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    repository_dir.child(".kitignore").write_str("*.log\ntarget\n")?;
    repository_dir.child("main.txt").write_str("v1")?;
    kit_commit(dir, "v1").assert().success();
    let first = read_head(dir);

    repository_dir.child("main.txt").write_str("v2")?;
    kit_commit(dir, "v2").assert().success();

    repository_dir.child("build.log").write_str("log output")?;
    repository_dir.child("target/debug/app").write_str("binary")?;

    run_kit_command(dir, &["checkout", &first])
        .assert()
        .success();

    repository_dir.child("main.txt").assert("v1");
    repository_dir.child("build.log").assert("log output");
    repository_dir.child("target/debug/app").assert("binary");
    repository_dir
        .child(".kit/objects")
        .assert(predicate::path::is_dir());

    Ok(())
}
