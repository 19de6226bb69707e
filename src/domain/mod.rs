//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod version;

pub use commit::{extract_issues, has_breaking_change, CommitParser, ParsedCommit};
pub use version::{BumpType, NextVersions, VersionParts};
