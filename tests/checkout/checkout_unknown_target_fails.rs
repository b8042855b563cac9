use crate::common::command::{init_repository_dir, read_ref, repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn checkout_unknown_target_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(init_repository_dir.path(), &["checkout", "nowhere"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "error: 'nowhere' did not match any file, branch or commit\n",
        ));

    assert_eq!(
        read_ref(init_repository_dir.path(), "HEAD"),
        "ref: refs/heads/main"
    );

    Ok(())
}

#[rstest]
fn checkout_branch_without_commits_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_minigit_command(repository_dir.path(), &["checkout", "main"])
        .assert()
        .success()
        .stdout(predicate::eq("error: branch 'main' has no commits yet\n"));

    Ok(())
}
