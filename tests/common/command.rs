use crate::common::REPOSITORY_DIR;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

/// Fixed so commit ids are reproducible between runs
pub const COMMITTER_DATE: &str = "2024-03-01 12:30:00";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Repository whose `main` holds one commit with `a.txt` = `hello`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_minigit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));
    run_minigit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    minigit_commit(repository_dir.path(), "first")
        .assert()
        .success();

    repository_dir
}

pub fn run_minigit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("minigit").expect("Failed to find minigit binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("MINIGIT_LOG");
    cmd.env_remove("MINIGIT_HASH_ALGORITHM");
    cmd.current_dir(dir);
    cmd.args(args);
    cmd
}

pub fn minigit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_minigit_command(dir, &["commit", "-m", message]);
    cmd.env("MINIGIT_COMMITTER_DATE", COMMITTER_DATE);
    cmd
}

/// Stage `content` as `name` and commit it
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_minigit_command(dir, &["add", name]).assert().success();
    minigit_commit(dir, message).assert().success();
}

pub fn read_ref(dir: &Path, ref_path: &str) -> String {
    std::fs::read_to_string(dir.join(REPOSITORY_DIR).join(ref_path))
        .expect("Failed to read ref file")
        .trim()
        .to_string()
}

/// Commit id HEAD resolves to, empty if the branch has no commits yet
pub fn head_commit_id(dir: &Path) -> String {
    let head = read_ref(dir, "HEAD");

    match head.strip_prefix("ref: ") {
        Some(ref_path) => read_ref(dir, ref_path),
        None => head,
    }
}

pub fn read_commit_object(dir: &Path, commit_id: &str) -> String {
    let (object_dir, object_file) = commit_id.split_at(2);
    let raw = std::fs::read(
        dir.join(REPOSITORY_DIR)
            .join("objects")
            .join(object_dir)
            .join(object_file),
    )
    .expect("Failed to read commit object");

    let payload_start = raw
        .iter()
        .position(|byte| *byte == 0)
        .expect("Object header is not terminated")
        + 1;
    String::from_utf8(raw[payload_start..].to_vec()).expect("Commit object is not UTF-8")
}

/// Value of a `key:value` line of a commit object
pub fn commit_field(commit_text: &str, key: &str) -> String {
    commit_text
        .lines()
        .find_map(|line| line.strip_prefix(&format!("{key}:")))
        .unwrap_or_default()
        .to_string()
}
