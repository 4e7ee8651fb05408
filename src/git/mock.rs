use crate::error::{GitVersionError, Result};
use crate::git::Repository;
use std::sync::{Mutex, MutexGuard};

/// Mock repository for testing without actual git operations.
///
/// Records every created tag and every collaborator call so tests can assert
/// on what the engine asked for.
pub struct MockRepository {
    tags: Vec<String>,
    merged_tags: Option<Vec<String>>,
    head_tags: Vec<String>,
    message: String,
    commit_id: Option<String>,
    list_failure: Option<String>,
    created: Mutex<Vec<String>>,
    calls: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            merged_tags: None,
            head_tags: Vec::new(),
            message: String::new(),
            commit_id: None,
            list_failure: None,
            created: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock repository holding the given tags
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut repo = Self::new();
        for tag in tags {
            repo.add_tag(tag);
        }
        repo
    }

    /// Add a tag to the full tag list
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Restrict what `list_tags(true)` returns
    pub fn set_merged_tags<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.merged_tags = Some(tags.into_iter().map(Into::into).collect());
    }

    /// Mark a tag as pointing at HEAD
    pub fn tag_head(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.tags.contains(&name) {
            self.tags.push(name.clone());
        }
        self.head_tags.push(name);
    }

    /// Set the HEAD commit message
    pub fn set_last_commit_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Set the HEAD commit id; `last_commit_id` fails until this is set
    pub fn set_last_commit_id(&mut self, id: impl Into<String>) {
        self.commit_id = Some(id.into());
    }

    /// Make `list_tags` fail with the given reason
    pub fn fail_listing(&mut self, reason: impl Into<String>) {
        self.list_failure = Some(reason.into());
    }

    /// Tags created through [Repository::create_tag], in call order
    pub fn created_tags(&self) -> Vec<String> {
        lock(&self.created).clone()
    }

    /// Names of the collaborator methods called so far, in call order
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: impl Into<String>) {
        lock(&self.calls).push(call.into());
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self, merged: bool) -> Result<Vec<String>> {
        self.record(format!("list_tags({})", merged));
        if let Some(reason) = &self.list_failure {
            return Err(GitVersionError::tag(reason.clone()));
        }
        match (&self.merged_tags, merged) {
            (Some(merged_tags), true) => Ok(merged_tags.clone()),
            _ => Ok(self.tags.clone()),
        }
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(format!("create_tag({})", name));
        let mut created = lock(&self.created);
        if self.tags.iter().any(|t| t == name) || created.iter().any(|t| t == name) {
            return Err(GitVersionError::tag(format!("tag '{}' already exists", name)));
        }
        created.push(name.to_string());
        Ok(())
    }

    fn is_head_tagged(&self) -> Result<bool> {
        self.record("is_head_tagged");
        Ok(!self.head_tags.is_empty())
    }

    fn last_commit_message(&self) -> Result<String> {
        self.record("last_commit_message");
        Ok(self.message.clone())
    }

    fn last_commit_id(&self, short: bool) -> Result<String> {
        self.record(format!("last_commit_id({})", short));
        self.commit_id
            .clone()
            .ok_or_else(|| GitVersionError::commit_lookup("no HEAD commit"))
    }
}
