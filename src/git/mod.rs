//! Git operations abstraction layer
//!
//! The core never talks to git directly; it goes through the [Repository]
//! trait. [repository::Git2Repository] is the real implementation backed by
//! the `git2` crate, [mock::MockRepository] is an in-memory implementation
//! for tests. All operations are blocking and invoked sequentially; one run
//! owns the repository for its duration.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// One commit as retrieved from history, oldest-first within a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Full-length commit hash
    pub hash: String,
    /// Author date, ISO-8601
    pub date: String,
    /// Full commit message
    pub message: String,
    pub author_name: String,
    pub author_email: String,
}

/// Operations the release workflow needs from version control.
pub trait Repository {
    /// Whether the working tree has no uncommitted or untracked changes.
    fn is_clean(&self) -> Result<bool>;

    /// Name of the currently checked-out branch.
    fn current_branch(&self) -> Result<String>;

    /// Check out a local branch, or create a tracking branch from the given
    /// remote when it only exists there. Fails with a branch error when
    /// neither exists.
    fn checkout_branch(&self, branch: &str, remote: &str) -> Result<()>;

    /// Most recent tag matching the prefix, by semantic-version order of the
    /// suffix. `None` when no tag matches.
    fn latest_tag(&self, prefix: &str) -> Result<Option<String>>;

    /// Commits after `tag` (exclusive) up to HEAD (inclusive), oldest first.
    /// With no tag the entire history is returned.
    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitRecord>>;

    /// Stage the given workdir-relative paths.
    fn stage(&self, paths: &[String]) -> Result<()>;

    /// Create a commit from the staged index on HEAD.
    fn commit(&self, message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD.
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push the branch (and all tags when `with_tags`) to the remote.
    fn push(&self, remote: &str, branch: &str, with_tags: bool) -> Result<()>;
}
