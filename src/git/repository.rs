use std::path::{Path, PathBuf};

use git2::{BranchType, ObjectType, Oid, Repository as Git2Repo, StatusOptions};

use crate::domain::version;
use crate::error::{AutoVersionError, Result};
use crate::git::CommitRecord;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at or above the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            AutoVersionError::repository(format!("not a git repository: {}", e))
        })?;
        Ok(Git2Repository { repo })
    }

    /// Root of the working tree; bare repositories are rejected.
    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| AutoVersionError::repository("repository has no working tree"))
    }

    fn tag_oid(&self, tag: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag))
            .map_err(|e| {
                AutoVersionError::repository(format!("cannot resolve tag '{}': {}", tag, e))
            })?;
        Ok(reference.peel_to_commit()?.id())
    }
}

impl super::Repository for Git2Repository {
    fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| AutoVersionError::branch("HEAD is not on a named branch"))
    }

    fn checkout_branch(&self, branch: &str, remote: &str) -> Result<()> {
        if let Ok(local) = self.repo.find_branch(branch, BranchType::Local) {
            let object = local.get().peel(ObjectType::Commit)?;
            self.repo.checkout_tree(&object, None)?;
            let name = local.get().name().ok_or_else(|| {
                AutoVersionError::branch(format!("branch '{}' has an invalid name", branch))
            })?;
            self.repo.set_head(name)?;
            return Ok(());
        }

        // No local branch: try to create a tracking branch from the remote
        let remote_name = format!("{}/{}", remote, branch);
        let remote_branch = self
            .repo
            .find_branch(&remote_name, BranchType::Remote)
            .map_err(|_| {
                AutoVersionError::branch(format!(
                    "branch '{}' does not exist locally or on '{}'",
                    branch, remote
                ))
            })?;
        let commit = remote_branch.get().peel_to_commit()?;
        let mut local = self.repo.branch(branch, &commit, false)?;
        local.set_upstream(Some(&remote_name))?;

        let object = local.get().peel(ObjectType::Commit)?;
        self.repo.checkout_tree(&object, None)?;
        let name = local.get().name().ok_or_else(|| {
            AutoVersionError::branch(format!("branch '{}' has an invalid name", branch))
        })?;
        self.repo.set_head(name)?;
        Ok(())
    }

    fn latest_tag(&self, prefix: &str) -> Result<Option<String>> {
        let tags = self.repo.tag_names(None)?;

        let latest = tags
            .iter()
            .flatten()
            .filter(|tag| tag.starts_with(prefix))
            .filter_map(|tag| {
                version::parse(&tag[prefix.len()..])
                    .ok()
                    .map(|v| (v, tag.to_string()))
            })
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, tag)| tag);

        Ok(latest)
    }

    fn commits_since(&self, tag: Option<&str>) -> Result<Vec<CommitRecord>> {
        let stop_at = tag.map(|t| self.tag_oid(t)).transpose()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            if Some(oid) == stop_at {
                break;
            }

            let commit = self.repo.find_commit(oid)?;
            let author = commit.author();
            let date = chrono::DateTime::from_timestamp(commit.time().seconds(), 0)
                .map(|d| d.to_rfc3339())
                .unwrap_or_default();

            commits.push(CommitRecord {
                hash: oid.to_string(),
                date,
                message: commit.message().unwrap_or("(empty message)").to_string(),
                author_name: author.name().unwrap_or("unknown").to_string(),
                author_email: author.email().unwrap_or("").to_string(),
            });
        }

        commits.reverse();
        Ok(commits)
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            index.add_path(Path::new(path))?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let signature = self.repo.signature()?;
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        let signature = self.repo.signature()?;
        let target = self.repo.head()?.peel(ObjectType::Commit)?;
        self.repo.tag(name, &target, &signature, message, false)?;
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str, with_tags: bool) -> Result<()> {
        let mut remote = self.repo.find_remote(remote).map_err(|e| {
            AutoVersionError::repository(format!("cannot find remote: {}", e))
        })?;

        let mut refspecs = vec![format!("refs/heads/{}:refs/heads/{}", branch, branch)];
        if with_tags {
            refspecs.push("refs/tags/*:refs/tags/*".to_string());
        }
        let refspec_strs: Vec<&str> = refspecs.iter().map(String::as_str).collect();

        remote.push(&refspec_strs, None)?;
        Ok(())
    }
}
