use crate::common::command::{init_repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn create_duplicate_branch(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(init_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_minigit_command(init_repository_dir.path(), &["branch", "feature"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "error: a branch named 'feature' already exists\n",
        ));

    Ok(())
}
