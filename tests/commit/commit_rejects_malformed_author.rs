use crate::common::command::{init_repository_dir, kit_output, run_kit_command};
use crate::common::read_head;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case::newline_in_name("KIT_AUTHOR_NAME", "Jane\nDoe")]
#[case::brackets_in_name("KIT_AUTHOR_NAME", "Jane <jd>")]
#[case::newline_in_email("KIT_AUTHOR_EMAIL", "jane@example.com\nx")]
fn commit_rejects_malformed_author(
    init_repository_dir: TempDir,
    #[case] variable: &str,
    #[case] value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = read_head(dir);
    init_repository_dir.child("1.txt").write_str("changed")?;

    run_kit_command(dir, &["commit", "-m", "rejected"])
        .env(variable, value)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(variable));

    assert_eq!(read_head(dir), head);
    // history stays readable
    assert!(kit_output(dir, &["log"]).contains("Initial commit"));

    Ok(())
}
