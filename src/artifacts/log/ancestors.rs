use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Lazy walk from a commit back to the root through the single parent link
///
/// Yields the starting commit first. A commit that cannot be loaded ends the
/// walk after the error is yielded, so the sequence is always finite.
#[derive(Debug, Clone)]
pub struct Ancestors<'d> {
    database: &'d Database,
    next_oid: Option<ObjectId>,
}

impl<'d> Ancestors<'d> {
    pub fn new(database: &'d Database, start: Option<ObjectId>) -> Self {
        Ancestors {
            database,
            next_oid: start,
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = anyhow::Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_oid.take()?;

        match self.database.load_commit(&commit_oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                Some(Ok(commit))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
