use crate::common::command::{repository_dir, run_minigit_command};
use crate::common::file::write_generated_files;
use assert_fs::TempDir;
use fake::Fake;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn add_files_from_nested_directories_to_index(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let top = write_generated_files(repository_dir.path(), (1..=3).fake::<usize>());
    let nested = write_generated_files(
        &repository_dir.path().join("src").join("deep"),
        (1..=3).fake::<usize>(),
    );

    run_minigit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    let index = std::fs::read_to_string(repository_dir.path().join(".minigit").join("index"))?;
    let staged = index
        .lines()
        .filter_map(|line| line.split_once(' ').map(|(name, _)| name.to_string()))
        .collect::<Vec<_>>();

    let mut expected = top
        .iter()
        .chain(nested.iter())
        .map(|spec| {
            spec.path
                .strip_prefix(repository_dir.path())
                .map(|relative| relative.to_string_lossy().replace('\\', "/"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    expected.sort();

    assert_eq!(staged, expected);

    Ok(())
}
