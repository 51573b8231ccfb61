use crate::common::command::{get_tree_id, init_repository_dir, kit_output, run_kit_command};
use crate::common::read_head;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn ls_tree_lists_entries(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let head = read_head(dir);
    let tree = get_tree_id(dir, &head);

    // a commit peels to its tree
    assert_eq!(
        kit_output(dir, &["ls-tree", &head]),
        kit_output(dir, &["ls-tree", &tree])
    );

    run_kit_command(dir, &["ls-tree", &tree])
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^100644 blob [0-9a-f]{40}\t1\.txt\n040000 tree [0-9a-f]{40}\ta\n$",
        )?);

    assert_eq!(kit_output(dir, &["ls-tree", "--name-only", &tree]), "1.txt\na\n");

    Ok(())
}

#[rstest]
fn ls_tree_descends_into_subtrees(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let tree = get_tree_id(dir, &read_head(dir));

    let subtree = kit_output(dir, &["ls-tree", &tree])
        .lines()
        .find(|line| line.ends_with("\ta"))
        .and_then(|line| line.split_whitespace().nth(2))
        .expect("subtree entry")
        .to_string();

    assert_eq!(
        kit_output(dir, &["ls-tree", "--name-only", &subtree]),
        "2.txt\nb\n"
    );
}

#[rstest]
fn ls_tree_rejects_blobs(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let blob = kit_output(dir, &["hash-object", "1.txt"]).trim().to_string();

    run_kit_command(dir, &["ls-tree", &blob])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a tree"));
}
