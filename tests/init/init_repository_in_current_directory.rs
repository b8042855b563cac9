use crate::common::command::{repository_dir, run_minigit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_repository_in_current_directory(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty Minigit repository in",
        ));

    assert!(repository_dir.path().join(".minigit").join("HEAD").is_file());

    Ok(())
}

#[rstest]
fn init_with_djb2_hashes_records_the_choice(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(repository_dir.path(), &["init"])
        .env("MINIGIT_HASH_ALGORITHM", "djb2")
        .assert()
        .success();

    let config = std::fs::read_to_string(repository_dir.path().join(".minigit").join("config"))?;
    assert!(config.contains("hash = \"djb2\""));

    Ok(())
}
