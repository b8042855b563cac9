use crate::common::command::{repository_dir, run_minigit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn adding_outside_a_repository_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "a".to_string(),
    ));

    // failures are reported on stdout, the exit status stays 0
    run_minigit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "error: not a minigit repository",
        ));

    assert!(!repository_dir.path().join(".minigit").exists());

    Ok(())
}
