use crate::error::{GitVersionError, Result};
use std::fmt;
use std::str::FromStr;

/// A version of the form `major.minor.patch[-prerelease]`.
///
/// Ordering compares `(major, minor, patch, prerelease)` as a tuple, with the
/// prerelease label compared as a plain string. A labelled version therefore
/// sorts *above* the same numeric version without a label.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Empty means no prerelease label.
    pub prerelease: String,
}

impl Version {
    /// Create a new version without a prerelease label
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: String::new(),
        }
    }

    /// Returns a copy of this version carrying `label` as its prerelease
    pub fn with_prerelease(&self, label: impl Into<String>) -> Self {
        Version {
            prerelease: label.into(),
            ..self.clone()
        }
    }

    /// Parse a version from a raw tag, stripping `prefix` first.
    ///
    /// The remainder is split on its first `-`: the left side must be exactly
    /// three dot-separated non-negative integers, the right side (if any) is
    /// kept verbatim as the prerelease label.
    ///
    /// # Example
    /// ```
    /// # use gitversion::version::Version;
    /// let v = Version::parse("v", "v1.2.3-rc-1").unwrap();
    /// assert_eq!(v, Version::new(1, 2, 3).with_prerelease("rc-1"));
    /// assert!(Version::parse("v", "1.2.3").is_err());
    /// ```
    pub fn parse(prefix: &str, raw: &str) -> Result<Self> {
        let rest = raw.strip_prefix(prefix).ok_or_else(|| {
            GitVersionError::parse(format!(
                "'{}' does not start with prefix '{}'",
                raw, prefix
            ))
        })?;

        let (numbers, prerelease) = match rest.split_once('-') {
            Some((numbers, label)) => (numbers, label),
            None => (rest, ""),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() != 3 {
            return Err(GitVersionError::parse(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                rest
            )));
        }

        Ok(Version {
            major: parse_component(parts[0], "major")?,
            minor: parse_component(parts[1], "minor")?,
            patch: parse_component(parts[2], "patch")?,
            prerelease: prerelease.to_string(),
        })
    }

    /// Render the version as a tag name with `prefix` prepended
    pub fn render(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self)
    }
}

fn parse_component(part: &str, name: &str) -> Result<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GitVersionError::parse(format!(
            "Invalid {} version: '{}'",
            name, part
        )));
    }
    part.parse::<u64>()
        .map_err(|e| GitVersionError::parse(format!("Invalid {} version '{}': {}", name, part, e)))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            write!(f, "-{}", self.prerelease)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = GitVersionError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse("", s)
    }
}

/// Which component of a version a bump increments.
///
/// `Auto` is a request to decide at bump time; the engine always resolves it
/// to one of the other four before incrementing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Field {
    Major,
    Minor,
    Patch,
    Prerelease,
    #[default]
    Auto,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Major => "major",
            Field::Minor => "minor",
            Field::Patch => "patch",
            Field::Prerelease => "prerelease",
            Field::Auto => "auto",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = GitVersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(Field::Major),
            "minor" => Ok(Field::Minor),
            "patch" => Ok(Field::Patch),
            "prerelease" => Ok(Field::Prerelease),
            "auto" => Ok(Field::Auto),
            _ => Err(GitVersionError::unknown_field(s)),
        }
    }
}
