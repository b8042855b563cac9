use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::RepositoryError;
use anyhow::Context;

pub const REF_PREFIX: &str = "refs/heads/";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(RepositoryError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(RepositoryError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }

    /// Parse the target of a symbolic ref, e.g. `refs/heads/feature/x`
    pub fn try_parse_ref_path(ref_path: &str) -> anyhow::Result<Self> {
        match ref_path.strip_prefix(REF_PREFIX) {
            Some(name) => Self::try_parse(name.to_string()),
            None => anyhow::bail!(
                "symbolic ref must start with '{}', got '{}'",
                REF_PREFIX,
                ref_path
            ),
        }
    }

    pub fn to_ref_path(&self) -> String {
        format!("{REF_PREFIX}{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where HEAD points: a branch, or a bare commit when detached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Branch(BranchName),
    Detached(ObjectId),
}

impl Head {
    pub fn branch(&self) -> Option<&BranchName> {
        match self {
            Head::Branch(name) => Some(name),
            Head::Detached(_) => None,
        }
    }
}

impl std::fmt::Display for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Head::Branch(name) => write!(f, "{name}"),
            Head::Detached(_) => write!(f, "detached HEAD"),
        }
    }
}
