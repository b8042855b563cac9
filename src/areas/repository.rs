use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::storage::{FileStorage, Storage};
use crate::areas::workspace::{REPOSITORY_DIR, Workspace};
use crate::artifacts::core::config::Config;
use crate::errors::RepositoryError;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub struct Repository {
    /// Working tree root
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    storage: Rc<dyn Storage>,
    config: Config,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository rooted at `path` on the real file system
    pub fn new(path: &str, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("failed to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve {}", path.display()))?;
        let executable = std::env::current_exe()
            .and_then(|exe| exe.canonicalize())
            .ok();

        Self::with_storage(path, Rc::new(FileStorage), writer, executable)
    }

    /// Open a repository over any storage; `path` must be absolute
    pub fn with_storage(
        path: PathBuf,
        storage: Rc<dyn Storage>,
        writer: Box<dyn Write>,
        executable: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let repository_path = path.join(REPOSITORY_DIR);

        // before `init` there is no config file and the environment decides
        let config_path = repository_path.join("config");
        let config = if storage.exists(&config_path) {
            Config::load(storage.as_ref(), &config_path)?
        } else {
            Config::from_env()?
        };

        let index = Index::new(
            repository_path.join("index").into_boxed_path(),
            storage.clone(),
        );
        let database = Database::new(
            repository_path.join("objects").into_boxed_path(),
            storage.clone(),
            config.hash_algorithm(),
        );
        let workspace = Workspace::new(path.clone().into_boxed_path(), storage.clone(), executable);
        let refs = Refs::new(repository_path.into_boxed_path(), storage.clone());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            storage,
            config,
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repository_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.repository_path().join("config")
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn is_initialized(&self) -> bool {
        self.storage.exists(&self.refs.head_path())
    }

    /// Fail before touching anything when there is no repository here
    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RepositoryError::RepoNotInitialized.into())
        }
    }

    /// Print a non-fatal problem and keep going
    pub(crate) fn warn(&self, message: impl std::fmt::Display) -> anyhow::Result<()> {
        tracing::warn!("{message}");
        writeln!(self.writer(), "warning: {message}")?;

        Ok(())
    }

    /// Empty the staging area after a commit or checkout
    ///
    /// The preceding work already happened, so a failure here is only a warning.
    pub(crate) fn clear_staging_area(&self, context: &str) -> anyhow::Result<()> {
        let result = {
            let mut index = self.index();
            index.clear();
            index.write_updates()
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => self.warn(format!("Couldn't clear staging area after {context}: {e:#}")),
        }
    }
}
