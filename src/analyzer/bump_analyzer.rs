use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::domain::commit::ParsedCommit;
use crate::domain::version::{self, BumpType};
use crate::error::{AutoVersionError, Result};

/// Bump requested on the command line: a fixed magnitude, or automatic
/// detection from the commit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedBump {
    Auto,
    Explicit(BumpType),
}

impl FromStr for RequestedBump {
    type Err = AutoVersionError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(RequestedBump::Auto)
        } else {
            Ok(RequestedBump::Explicit(s.parse()?))
        }
    }
}

impl fmt::Display for RequestedBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestedBump::Auto => write!(f, "auto"),
            RequestedBump::Explicit(bump) => write!(f, "{}", bump),
        }
    }
}

/// One version transition, computed per invocation.
///
/// Invariant: `next` is strictly greater than `current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDecision {
    pub current: Version,
    pub next: Version,
    pub bump: BumpType,
}

/// Decides the next version from the current version and the parsed commits.
pub struct BumpAnalyzer;

impl BumpAnalyzer {
    pub fn new() -> Self {
        BumpAnalyzer
    }

    /// Compute the version decision.
    ///
    /// An explicit request increments by that magnitude directly. Under
    /// automatic detection the rule is a maximum over the commit set: any
    /// breaking commit forces a major bump, otherwise any `feat` commit
    /// forces minor, otherwise patch. Non-conventional commits contribute
    /// only the patch floor.
    pub fn decide(
        &self,
        current: &str,
        commits: &[ParsedCommit],
        requested: RequestedBump,
    ) -> Result<VersionDecision> {
        let current = version::parse(current)?;

        let bump = match requested {
            RequestedBump::Explicit(bump) => bump,
            RequestedBump::Auto => self.auto_bump(commits),
        };

        let next = version::bump_parsed(&current, bump);
        if next <= current {
            return Err(AutoVersionError::increment(format!(
                "bumping {} by {} did not advance the version",
                current, bump
            )));
        }

        Ok(VersionDecision {
            current,
            next,
            bump,
        })
    }

    /// The maximum bump implied by a commit set.
    pub fn auto_bump(&self, commits: &[ParsedCommit]) -> BumpType {
        let mut bump = BumpType::Patch;
        for commit in commits {
            if commit.breaking {
                return BumpType::Major;
            }
            if commit.r#type.as_deref() == Some("feat") {
                bump = BumpType::Minor;
            }
        }
        bump
    }
}

impl Default for BumpAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::commit::CommitParser;

    fn parse_all(messages: &[&str]) -> Vec<ParsedCommit> {
        let parser = CommitParser::new(&Config::default());
        messages
            .iter()
            .enumerate()
            .map(|(i, m)| parser.parse(&format!("{:040x}", i), m))
            .collect()
    }

    #[test]
    fn test_explicit_bump_ignores_commits() {
        let commits = parse_all(&["feat!: breaking change"]);
        let decision = BumpAnalyzer::new()
            .decide("1.2.3", &commits, RequestedBump::Explicit(BumpType::Patch))
            .unwrap();
        assert_eq!(decision.bump, BumpType::Patch);
        assert_eq!(decision.next.to_string(), "1.2.4");
    }

    #[test]
    fn test_auto_major_on_breaking() {
        let commits = parse_all(&["fix: bug", "feat: feature", "refactor!: breaking"]);
        let decision = BumpAnalyzer::new()
            .decide("1.2.3", &commits, RequestedBump::Auto)
            .unwrap();
        assert_eq!(decision.bump, BumpType::Major);
        assert_eq!(decision.next.to_string(), "2.0.0");
    }

    #[test]
    fn test_auto_major_regardless_of_order() {
        let orders: [&[&str]; 3] = [
            &["refactor!: breaking", "fix: bug", "feat: feature"],
            &["feat: feature", "refactor!: breaking", "fix: bug"],
            &["fix: bug", "feat: feature", "refactor!: breaking"],
        ];
        for messages in orders {
            let commits = parse_all(messages);
            assert_eq!(BumpAnalyzer::new().auto_bump(&commits), BumpType::Major);
        }
    }

    #[test]
    fn test_auto_minor_on_feature() {
        let commits = parse_all(&["feat: new feature"]);
        let decision = BumpAnalyzer::new()
            .decide("1.2.3", &commits, RequestedBump::Auto)
            .unwrap();
        assert_eq!(decision.bump, BumpType::Minor);
        assert_eq!(decision.next.to_string(), "1.3.0");
    }

    #[test]
    fn test_auto_patch_on_fix_only() {
        let commits = parse_all(&["fix: bug fix"]);
        let decision = BumpAnalyzer::new()
            .decide("1.2.3", &commits, RequestedBump::Auto)
            .unwrap();
        assert_eq!(decision.bump, BumpType::Patch);
        assert_eq!(decision.next.to_string(), "1.2.4");
    }

    #[test]
    fn test_auto_patch_floor_for_non_conventional() {
        let commits = parse_all(&["Updated stuff", "Fixed things"]);
        assert_eq!(BumpAnalyzer::new().auto_bump(&commits), BumpType::Patch);
    }

    #[test]
    fn test_auto_patch_floor_for_docs_and_chore() {
        let commits = parse_all(&["docs: update readme", "chore: bump deps"]);
        assert_eq!(BumpAnalyzer::new().auto_bump(&commits), BumpType::Patch);
    }

    #[test]
    fn test_auto_breaking_change_via_footer() {
        let commits = parse_all(&["fix: rename field\n\nBREAKING CHANGE: field renamed"]);
        assert_eq!(BumpAnalyzer::new().auto_bump(&commits), BumpType::Major);
    }

    #[test]
    fn test_decide_rejects_invalid_current() {
        let commits = parse_all(&["fix: bug"]);
        let result = BumpAnalyzer::new().decide("not-a-version", &commits, RequestedBump::Auto);
        assert!(matches!(
            result,
            Err(AutoVersionError::Version(_))
        ));
    }

    #[test]
    fn test_decision_advances_version() {
        let commits = parse_all(&["feat: feature"]);
        let decision = BumpAnalyzer::new()
            .decide("0.1.0", &commits, RequestedBump::Auto)
            .unwrap();
        assert!(decision.next > decision.current);
    }

    #[test]
    fn test_requested_bump_from_str() {
        assert_eq!("auto".parse::<RequestedBump>().unwrap(), RequestedBump::Auto);
        assert_eq!(
            "minor".parse::<RequestedBump>().unwrap(),
            RequestedBump::Explicit(BumpType::Minor)
        );
        assert!("whatever".parse::<RequestedBump>().is_err());
    }
}
