use crate::common::command::{repository_dir, run_kit_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use rstest::rstest;

#[cfg(unix)]
fn set_mode(path: &std::path::Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .unwrap_or_else(|e| panic!("Failed to chmod {:?}: {}", path, e));
}

#[cfg(unix)]
#[rstest]
fn add_skips_unreadable_directories(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_kit_command(dir, &["init"]).assert().success();
    repository_dir.child("a.txt").write_str("a")?;
    repository_dir.child("locked/secret.txt").write_str("secret")?;
    run_kit_command(dir, &["add", "."]).assert().success();

    repository_dir.child("a.txt").write_str("a, revised")?;
    repository_dir.child("z.txt").write_str("z")?;
    let locked = repository_dir.child("locked");
    set_mode(locked.path(), 0o000);
    if std::fs::read_dir(locked.path()).is_ok() {
        // running as root: permissions are not enforced
        set_mode(locked.path(), 0o755);
        return Ok(());
    }

    let assert = run_kit_command(dir, &["add", "."]).assert();
    let index = std::fs::read_to_string(dir.join(".kit").join("index"));
    set_mode(locked.path(), 0o755);

    assert
        .code(1)
        .stderr(predicate::str::contains("add failed for 1 path(s)"))
        .stderr(predicate::str::contains("locked"));

    let index = index?;
    let a_oid = run_kit_command(dir, &["hash-object", "a.txt"]).output()?.stdout;
    let a_oid = String::from_utf8(a_oid)?;
    assert!(index.contains(&format!("{} a.txt", a_oid.trim())));
    assert!(index.contains("z.txt"));
    // tracked files behind the unreadable directory are not unstaged
    assert!(index.contains("locked/secret.txt"));

    Ok(())
}
