use crate::common::command::{repository_dir, run_kit_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
#[case::unknown_command(&["frobnicate"])]
#[case::unknown_flag(&["status", "--bogus"])]
#[case::missing_argument(&["show"])]
#[case::cat_file_without_mode(&["cat-file", "abcd"])]
#[case::cat_file_with_two_modes(&["cat-file", "-p", "-t", "abcd"])]
fn invalid_usage_exits_with_one(repository_dir: TempDir, #[case] args: &[&str]) {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), args).assert().code(1);
}

#[rstest]
fn help_exits_successfully(repository_dir: TempDir) {
    run_kit_command(repository_dir.path(), &["--help"])
        .assert()
        .success();
}
