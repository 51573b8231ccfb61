use crate::common::command::{repository_dir, run_kit_command};
use crate::common::HELLO_BLOB_ID;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn cat_file_resolves_abbreviated_ids(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("hello.txt").write_str("hello")?;
    run_kit_command(repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["cat-file", "-t", &HELLO_BLOB_ID[..7]])
        .assert()
        .success()
        .stdout("blob\n");

    Ok(())
}

#[rstest]
#[case::too_short("b6f", "shorter than 4")]
#[case::not_hex("not-an-id", "malformed object reference")]
#[case::unknown("0123456789abcdef0123456789abcdef01234567", "not found")]
fn cat_file_rejects_bad_references(
    repository_dir: TempDir,
    #[case] reference: &str,
    #[case] message: &str,
) {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["cat-file", "-p", reference])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(message));
}
