use crate::error::{GitVersionError, Result};
use git2::{Commit, Oid, Repository as Git2Repo};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn repo(&self) -> MutexGuard<'_, Git2Repo> {
        self.repo
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn head_commit(repo: &Git2Repo) -> Result<Commit<'_>> {
    repo.head()
        .and_then(|head| head.peel_to_commit())
        .map_err(|e| GitVersionError::commit_lookup(format!("Cannot resolve HEAD: {}", e)))
}

/// Commit a tag ultimately points at; `None` for tags on trees or blobs
fn tag_target(repo: &Git2Repo, tag_name: &str) -> Option<Oid> {
    repo.find_reference(&format!("refs/tags/{}", tag_name))
        .and_then(|reference| reference.peel_to_commit())
        .map(|commit| commit.id())
        .ok()
}

fn tag_names(repo: &Git2Repo) -> Result<Vec<String>> {
    let tags = repo
        .tag_names(None)
        .map_err(|e| GitVersionError::tag(format!("Cannot list tags: {}", e)))?;

    Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
}

impl super::Repository for Git2Repository {
    fn list_tags(&self, merged: bool) -> Result<Vec<String>> {
        let repo = self.repo();
        let tags = tag_names(&repo)?;
        if !merged {
            return Ok(tags);
        }

        let head = head_commit(&repo)?.id();
        let mut reachable = Vec::new();
        for tag in tags {
            let Some(target) = tag_target(&repo, &tag) else {
                continue;
            };
            if target == head || repo.graph_descendant_of(head, target)? {
                reachable.push(tag);
            }
        }

        Ok(reachable)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let repo = self.repo();
        let head = head_commit(&repo)?;

        repo.tag_lightweight(name, head.as_object(), false)
            .map_err(|e| GitVersionError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn is_head_tagged(&self) -> Result<bool> {
        let repo = self.repo();
        let head = head_commit(&repo)?.id();

        Ok(tag_names(&repo)?
            .iter()
            .any(|tag| tag_target(&repo, tag) == Some(head)))
    }

    fn last_commit_message(&self) -> Result<String> {
        let repo = self.repo();
        let head = head_commit(&repo)?;

        Ok(head.message().unwrap_or_default().trim_end().to_string())
    }

    fn last_commit_id(&self, short: bool) -> Result<String> {
        let repo = self.repo();
        let head = head_commit(&repo)?;
        if !short {
            return Ok(head.id().to_string());
        }

        let buf = head
            .as_object()
            .short_id()
            .map_err(|e| GitVersionError::commit_lookup(format!("Cannot abbreviate HEAD: {}", e)))?;
        buf.as_str()
            .map(str::to_string)
            .ok_or_else(|| GitVersionError::commit_lookup("HEAD id is not valid UTF-8"))
    }
}
