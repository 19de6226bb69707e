use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{AutoVersionError, Result};

/// Version bump magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpType {
    Major,
    Minor,
    Patch,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpType::Major => write!(f, "major"),
            BumpType::Minor => write!(f, "minor"),
            BumpType::Patch => write!(f, "patch"),
        }
    }
}

impl FromStr for BumpType {
    type Err = AutoVersionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(BumpType::Major),
            "minor" => Ok(BumpType::Minor),
            "patch" => Ok(BumpType::Patch),
            other => Err(AutoVersionError::version(format!(
                "unknown bump type '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}

/// Decomposed view of a semantic version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionParts {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
}

/// The patch/minor/major candidates reachable from one version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextVersions {
    pub patch: Version,
    pub minor: Version,
    pub major: Version,
}

/// Strip surrounding whitespace and a leading `v`/`V`/`=` marker.
pub fn clean(version: &str) -> String {
    version
        .trim()
        .trim_start_matches(['=', 'v', 'V'])
        .to_string()
}

/// Parse a version string, tolerating a `v` prefix.
pub fn parse(version: &str) -> Result<Version> {
    Version::parse(&clean(version)).map_err(|e| {
        AutoVersionError::version(format!("'{}' is not a semantic version: {}", version, e))
    })
}

/// Whether a string parses as a semantic version.
pub fn is_valid(version: &str) -> bool {
    parse(version).is_ok()
}

/// Compare two version strings under semantic-version ordering.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    Ok(parse(a)?.cmp(&parse(b)?))
}

/// Decompose a version string into its components.
pub fn decompose(version: &str) -> Result<VersionParts> {
    let v = parse(version)?;
    Ok(VersionParts {
        major: v.major,
        minor: v.minor,
        patch: v.patch,
        prerelease: if v.pre.is_empty() {
            None
        } else {
            Some(v.pre.to_string())
        },
    })
}

/// Increment a version by the given bump type.
///
/// Standard rules: patch bumps the third component, minor bumps the second
/// and zeros the third, major bumps the first and zeros the rest. Prerelease
/// and build metadata are cleared; a version that already carries a
/// prerelease is promoted to its release form first, so
/// `1.2.3-alpha.1 + patch` yields `1.2.3`.
pub fn increment(version: &str, bump: BumpType) -> Result<Version> {
    let v = parse(version)?;
    Ok(bump_parsed(&v, bump))
}

pub(crate) fn bump_parsed(v: &Version, bump: BumpType) -> Version {
    let has_pre = !v.pre.is_empty();
    let mut next = Version::new(v.major, v.minor, v.patch);

    match bump {
        BumpType::Major => {
            if !(has_pre && v.minor == 0 && v.patch == 0) {
                next.major += 1;
            }
            next.minor = 0;
            next.patch = 0;
        }
        BumpType::Minor => {
            if !(has_pre && v.patch == 0) {
                next.minor += 1;
            }
            next.patch = 0;
        }
        BumpType::Patch => {
            if !has_pre {
                next.patch += 1;
            }
        }
    }
    next
}

/// Increment the prerelease component.
///
/// `1.2.3` becomes `1.2.4-<id>.0`; `1.2.4-<id>.N` becomes `1.2.4-<id>.N+1`;
/// a different identifier resets to `<id>.0`.
pub fn increment_prerelease(version: &str, identifier: &str) -> Result<Version> {
    let mut v = parse(version)?;

    let next_pre = if v.pre.is_empty() {
        v.patch += 1;
        format!("{}.0", identifier)
    } else {
        let parts: Vec<&str> = v.pre.as_str().split('.').collect();
        match (parts.first(), parts.last()) {
            (Some(&id), Some(last)) if id == identifier && parts.len() > 1 => {
                match last.parse::<u64>() {
                    Ok(n) => format!("{}.{}", identifier, n + 1),
                    Err(_) => format!("{}.0", identifier),
                }
            }
            _ => format!("{}.0", identifier),
        }
    };

    v.pre = Prerelease::new(&next_pre).map_err(|e| {
        AutoVersionError::increment(format!("invalid prerelease '{}': {}", next_pre, e))
    })?;
    v.build = BuildMetadata::EMPTY;
    Ok(v)
}

/// All three bump candidates for a current version.
pub fn next_versions(current: &str) -> Result<NextVersions> {
    Ok(NextVersions {
        patch: increment(current, BumpType::Patch)?,
        minor: increment(current, BumpType::Minor)?,
        major: increment(current, BumpType::Major)?,
    })
}
