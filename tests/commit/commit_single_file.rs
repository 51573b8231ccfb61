use crate::common::command::{kit_commit, kit_output, repository_dir, run_kit_command};
use crate::common::{HELLO_BLOB_ID, read_head};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_single_file(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("file.txt").write_str("hello")?;
    run_kit_command(repository_dir.path(), &["add", "file.txt"])
        .assert()
        .success();

    kit_commit(repository_dir.path(), "first")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[\(root-commit\) [0-9a-f]{7}\] first\n$")?);

    let head = read_head(repository_dir.path());
    assert_eq!(
        kit_output(repository_dir.path(), &["ls-tree", &head]),
        format!("100644 blob {}\tfile.txt\n", HELLO_BLOB_ID)
    );

    let commit = kit_output(repository_dir.path(), &["cat-file", "-p", &head]);
    assert!(commit.contains("author fake_user <fake_email@email.com> 1672574400 +0000"));
    assert!(!commit.contains("parent "));
    assert!(commit.ends_with("\nfirst\n"));

    Ok(())
}

#[rstest]
fn commit_uses_author_from_environment(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    use crate::common::command::generate_random_author;

    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    repository_dir.child("file.txt").write_str("hello")?;
    let author = generate_random_author();

    run_kit_command(repository_dir.path(), &["commit", "-m", "first"])
        .env("KIT_AUTHOR_NAME", &author.name)
        .env("KIT_AUTHOR_EMAIL", &author.email)
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "Author: {} <{}>",
            author.name, author.email
        )));

    Ok(())
}
