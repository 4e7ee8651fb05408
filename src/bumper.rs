//! Bump engine
//!
//! Reads the version tags through a [Repository], picks the latest one,
//! decides which field to increment and creates the next tag.

use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{GitVersionError, Result};
use crate::git::Repository;
use crate::version::{Field, Version};

/// Matches `[major]`, `[Minor bump]`, ... anywhere in a commit message
const DIRECTIVE_PATTERN: &str = r"(?i)\[(major|minor|patch|prerelease)( bump)?\]";

/// Options for a single bump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpOptions {
    /// Prepended to the new tag and required on existing ones
    pub prefix: String,
    /// Field to increment; `Auto` decides from commit metadata
    pub field: Field,
    /// Only consider tags merged into the current branch
    pub merged: bool,
    /// Compute the tag without creating it
    pub dry_run: bool,
}

impl BumpOptions {
    pub fn new(field: Field) -> Self {
        BumpOptions {
            field,
            ..Default::default()
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn merged(mut self, merged: bool) -> Self {
        self.merged = merged;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Version bump engine over a repository collaborator.
///
/// Holds no state between calls; every query reads the tags afresh.
pub struct Bumper<R: Repository> {
    repo: R,
}

impl<R: Repository> Bumper<R> {
    pub fn new(repo: R) -> Self {
        Bumper { repo }
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// All tags that parse as versions under `prefix`, in listing order.
    ///
    /// Tags without the prefix, tags equal to the prefix and tags that do not
    /// parse are skipped silently.
    ///
    /// # Errors
    /// * `NoVersionTags` - if no tag survives filtering
    /// * `Tag` - if the tags cannot be listed
    pub fn versions(&self, prefix: &str, merged: bool) -> Result<Vec<Version>> {
        let tags = self
            .repo
            .list_tags(merged)
            .map_err(|e| GitVersionError::tag(format!("fetching git tags: {}", e)))?;

        let versions: Vec<Version> = tags
            .iter()
            .filter(|tag| tag.len() > prefix.len())
            .filter_map(|tag| match Version::parse(prefix, tag) {
                Ok(version) => Some(version),
                Err(e) => {
                    debug!("Skipping tag {}: {}", tag, e);
                    None
                }
            })
            .collect();

        if versions.is_empty() {
            return Err(GitVersionError::NoVersionTags);
        }
        Ok(versions)
    }

    /// All version tags, latest first
    pub fn sorted_versions(&self, prefix: &str, merged: bool) -> Result<Vec<Version>> {
        let mut versions = self.versions(prefix, merged)?;
        versions.sort_by(|a, b| b.cmp(a));
        Ok(versions)
    }

    /// The highest version tag under `prefix`
    pub fn latest_version(&self, prefix: &str, merged: bool) -> Result<Version> {
        self.sorted_versions(prefix, merged)?
            .into_iter()
            .next()
            .ok_or(GitVersionError::NoVersionTags)
    }

    /// Resolve `Auto` to a concrete field; other fields pass through.
    ///
    /// An already tagged HEAD always resolves to `Patch`. Otherwise a
    /// directive in the last commit message wins, defaulting to `Patch`.
    pub fn resolve_field(&self, requested: Field) -> Result<Field> {
        if requested != Field::Auto {
            return Ok(requested);
        }

        let tagged = self
            .repo
            .is_head_tagged()
            .map_err(|e| GitVersionError::commit_lookup(format!("determining auto field: {}", e)))?;
        if tagged {
            debug!("HEAD is already tagged, bumping patch");
            return Ok(Field::Patch);
        }

        let message = self
            .repo
            .last_commit_message()
            .map_err(|e| GitVersionError::commit_lookup(format!("determining auto field: {}", e)))?;
        let field = field_from_commit_message(&message).unwrap_or(Field::Patch);
        debug!("Resolved auto field to {}", field);
        Ok(field)
    }

    /// Increment `field` of `version`, returning the new version.
    ///
    /// `Prerelease` keeps the numbers and labels the version with the short
    /// HEAD commit id.
    ///
    /// # Errors
    /// * `UnknownField` - for an unresolved `Auto`
    /// * `Parse` - if the incremented component does not fit in a `u64`
    /// * `CommitLookup` - if the HEAD commit id cannot be read
    pub fn apply_increment(&self, version: &Version, field: Field) -> Result<Version> {
        let increment = |value: u64| {
            value.checked_add(1).ok_or_else(|| {
                GitVersionError::parse(format!("{} of version {} overflows", field, version))
            })
        };

        match field {
            Field::Major => Ok(Version::new(increment(version.major)?, 0, 0)),
            Field::Minor => Ok(Version::new(version.major, increment(version.minor)?, 0)),
            Field::Patch => Ok(Version::new(
                version.major,
                version.minor,
                increment(version.patch)?,
            )),
            Field::Prerelease => {
                let commit = self.repo.last_commit_id(true).map_err(|e| {
                    GitVersionError::commit_lookup(format!("getting current commit sha: {}", e))
                })?;
                Ok(version.with_prerelease(commit))
            }
            Field::Auto => Err(GitVersionError::unknown_field(field.as_str())),
        }
    }

    /// Compute the next version tag and create it unless `dry_run` is set.
    ///
    /// Returns the new tag name. With no version tags at all the bump starts
    /// from an implicit `0.0.0`.
    pub fn bump(&self, options: &BumpOptions) -> Result<String> {
        let current = match self.latest_version(&options.prefix, options.merged) {
            Ok(version) => version,
            Err(GitVersionError::NoVersionTags) => {
                let baseline = Version::default();
                warn!("No valid version tags found. Using {}", baseline);
                baseline
            }
            Err(e) => return Err(e),
        };

        info!("Bumping {} for version {}", options.field, current);
        let field = self.resolve_field(options.field)?;
        let next = self.apply_increment(&current, field)?;
        let tag = next.render(&options.prefix);

        if options.dry_run {
            info!("Dry run; not creating git tag {}", tag);
        } else {
            self.repo
                .create_tag(&tag)
                .map_err(|e| GitVersionError::tag(format!("creating new tag {}: {}", tag, e)))?;
        }

        Ok(tag)
    }
}

/// Find a bump directive such as `[minor]` or `[Major bump]` in a commit message
pub fn field_from_commit_message(message: &str) -> Option<Field> {
    let captures = Regex::new(DIRECTIVE_PATTERN)
        .ok()
        .and_then(|re| re.captures(message))?;

    captures.get(1).and_then(|m| m.as_str().parse().ok())
}
