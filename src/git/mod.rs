//! Git operations abstraction layer
//!
//! The bump engine never talks to git directly. It is handed a [Repository]
//! at construction time, which keeps the engine free of global state and
//! lets tests substitute an in-memory implementation.
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for testing
//!
//! ```rust
//! # use gitversion::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> gitversion::Result<()> {
//! if !repo.is_head_tagged()? {
//!     println!("{}", repo.last_commit_message()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// The repository operations the bump engine consumes.
///
/// Implementations map their underlying failures to
/// [crate::error::GitVersionError]: listing and creation failures to `Tag`,
/// HEAD resolution failures to `CommitLookup`.
pub trait Repository: Send + Sync {
    /// List raw tag names.
    ///
    /// With `merged` set, only tags reachable from the current HEAD are
    /// returned.
    fn list_tags(&self, merged: bool) -> Result<Vec<String>>;

    /// Create a lightweight tag pointing at HEAD.
    ///
    /// Fails if a tag with that name already exists.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Whether at least one tag points at the HEAD commit
    fn is_head_tagged(&self) -> Result<bool>;

    /// Full message of the HEAD commit
    fn last_commit_message(&self) -> Result<String>;

    /// Hexadecimal id of the HEAD commit, abbreviated when `short` is set
    fn last_commit_id(&self, short: bool) -> Result<String>;
}

impl<R: Repository + ?Sized> Repository for &R {
    fn list_tags(&self, merged: bool) -> Result<Vec<String>> {
        (**self).list_tags(merged)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        (**self).create_tag(name)
    }

    fn is_head_tagged(&self) -> Result<bool> {
        (**self).is_head_tagged()
    }

    fn last_commit_message(&self) -> Result<String> {
        (**self).last_commit_message()
    }

    fn last_commit_id(&self, short: bool) -> Result<String> {
        (**self).last_commit_id(short)
    }
}
