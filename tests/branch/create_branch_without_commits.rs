use crate::common::command::{repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn create_branch_without_commits(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_minigit_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("error: no commits yet"));

    assert!(
        !repository_dir
            .path()
            .join(".minigit/refs/heads/feature")
            .exists()
    );

    Ok(())
}
