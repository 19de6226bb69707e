use std::sync::Mutex;

use crate::domain::version;
use crate::error::{AutoVersionError, Result};
use crate::git::{CommitRecord, Repository};

/// In-memory repository for testing the workflow without git.
///
/// Mutating operations are recorded in an operation log so tests can assert
/// on the sequence of side effects.
pub struct MockRepository {
    clean: bool,
    branches: Vec<String>,
    tags: Vec<String>,
    commits: Vec<CommitRecord>,
    fail_push: bool,
    log: Mutex<Vec<String>>,
}

impl MockRepository {
    pub fn new() -> Self {
        MockRepository {
            clean: true,
            branches: vec!["main".to_string()],
            tags: Vec::new(),
            commits: Vec::new(),
            fail_push: false,
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_commit(mut self, hash: &str, message: &str) -> Self {
        self.commits.push(CommitRecord {
            hash: hash.to_string(),
            date: "2024-03-01T00:00:00+00:00".to_string(),
            message: message.to_string(),
            author_name: "Test Author".to_string(),
            author_email: "test@example.com".to_string(),
        });
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branches.push(branch.to_string());
        self
    }

    pub fn dirty(mut self) -> Self {
        self.clean = false;
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Mutating operations performed so far, in order.
    pub fn operations(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, operation: String) {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(operation);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self
            .branches
            .first()
            .cloned()
            .unwrap_or_else(|| "main".to_string()))
    }

    fn checkout_branch(&self, branch: &str, remote: &str) -> Result<()> {
        if !self.branches.iter().any(|b| b == branch) {
            return Err(AutoVersionError::branch(format!(
                "branch '{}' does not exist locally or on '{}'",
                branch, remote
            )));
        }
        self.record(format!("checkout {}", branch));
        Ok(())
    }

    fn latest_tag(&self, prefix: &str) -> Result<Option<String>> {
        Ok(self
            .tags
            .iter()
            .filter(|tag| tag.starts_with(prefix))
            .filter_map(|tag| {
                version::parse(&tag[prefix.len()..])
                    .ok()
                    .map(|v| (v, tag.clone()))
            })
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, tag)| tag))
    }

    fn commits_since(&self, _tag: Option<&str>) -> Result<Vec<CommitRecord>> {
        Ok(self.commits.clone())
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        self.record(format!("stage {}", paths.join(" ")));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {}", message));
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(format!("tag {} ({})", name, message));
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str, with_tags: bool) -> Result<()> {
        if self.fail_push {
            return Err(AutoVersionError::repository(format!(
                "cannot reach remote '{}'",
                remote
            )));
        }
        self.record(format!(
            "push {} {}{}",
            remote,
            branch,
            if with_tags { " +tags" } else { "" }
        ));
        Ok(())
    }
}
