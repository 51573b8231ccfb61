use crate::common::command::{repository_dir, run_kit_command};
use crate::common::{HELLO_BLOB_ID, object_path};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn corrupt_objects_are_reported(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("hello.txt").write_str("hello")?;
    run_kit_command(repository_dir.path(), &["hash-object", "-w", "hello.txt"])
        .assert()
        .success();

    // compressed flag followed by bytes that are not a zlib stream
    std::fs::write(
        object_path(repository_dir.path(), HELLO_BLOB_ID),
        b"\x01definitely not zlib",
    )?;

    run_kit_command(repository_dir.path(), &["cat-file", "-p", HELLO_BLOB_ID])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("corrupt object"));

    Ok(())
}

#[rstest]
fn raw_objects_are_read_verbatim(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let object = object_path(repository_dir.path(), HELLO_BLOB_ID);
    std::fs::create_dir_all(object.parent().expect("fan-out directory"))?;
    std::fs::write(&object, b"\x00blob 5\0hello")?;

    run_kit_command(repository_dir.path(), &["cat-file", "-p", HELLO_BLOB_ID])
        .assert()
        .success()
        .stdout("hello");

    Ok(())
}
