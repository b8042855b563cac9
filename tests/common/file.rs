use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    let mut specs: Vec<FileSpec> = Vec::new();
    while specs.len() < files_count {
        let file_name = format!("{}{}.txt", Word().fake::<String>(), specs.len());
        let file_path = dir.join(&file_name);
        let file_content = Words(5..10).fake::<Vec<String>>().join(" ");

        let file_spec = FileSpec::new(file_path, file_content);
        write_file(file_spec.clone());
        specs.push(file_spec);
    }

    specs
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }

    std::fs::write(&file_spec.path, file_spec.content).expect("Failed to write file");
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).expect("Failed to read file")
}

/// Every regular file below `dir` as sorted `/` separated relative names,
/// leaving out the repository directory
pub fn list_worktree_files(dir: &Path) -> Vec<String> {
    let mut files = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != crate::common::REPOSITORY_DIR)
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(dir)
                .expect("Entry outside the working tree")
                .components()
                .map(|component| component.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect::<Vec<_>>();

    files.sort();
    files
}
