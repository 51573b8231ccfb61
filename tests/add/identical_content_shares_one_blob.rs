use crate::common::command::{kit_output, repository_dir, run_kit_command};
use crate::common::HELLO_BLOB_ID;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn identical_content_shares_one_blob(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("first.txt").write_str("hello")?;
    repository_dir.child("copy/second.txt").write_str("hello")?;

    run_kit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    let index = std::fs::read_to_string(repository_dir.child(".kit/index").path())?;
    // a second add of unchanged files leaves the index untouched
    run_kit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(repository_dir.child(".kit/index").path())?,
        index
    );
    assert_eq!(
        index.lines().collect::<Vec<_>>(),
        vec![
            format!("{} copy/second.txt", HELLO_BLOB_ID),
            format!("{} first.txt", HELLO_BLOB_ID),
        ]
    );

    let objects = walkdir::WalkDir::new(repository_dir.child(".kit/objects").path())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .count();
    assert_eq!(objects, 1);

    assert_eq!(
        kit_output(repository_dir.path(), &["cat-file", "-s", HELLO_BLOB_ID]),
        "5\n"
    );

    Ok(())
}
