use crate::common::command::{repository_dir, run_minigit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use fake::Fake;
use fake::faker::lorem::en::Sentences;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn show_diff_for_identical_files(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let content = Sentences(3..6).fake::<Vec<String>>().join("\n");
    write_file(FileSpec::new(repository_dir.path().join("left.txt"), content.clone()));
    write_file(FileSpec::new(repository_dir.path().join("right.txt"), content));

    // no repository needed
    run_minigit_command(repository_dir.path(), &["diff", "left.txt", "right.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("Files are identical.\n"));

    Ok(())
}

#[rstest]
fn show_diff_line_by_line(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        repository_dir.path().join("left.txt"),
        "one\ntwo\nthree\n".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("right.txt"),
        "one\n2\nthree\nfour\n".to_string(),
    ));

    run_minigit_command(repository_dir.path(), &["diff", "left.txt", "right.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("Line 2:\n- two\n+ 2\nLine 4:\n+ four\n"));

    Ok(())
}

#[rstest]
fn show_diff_with_a_missing_file(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        repository_dir.path().join("left.txt"),
        "one\n".to_string(),
    ));

    run_minigit_command(repository_dir.path(), &["diff", "left.txt", "missing.txt"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "error: 'missing.txt' did not match any file, branch or commit\n",
        ));

    Ok(())
}
