use std::fmt;

/// Non-fatal conditions hit while preparing or finishing a release.
/// Reported to the user; never abort the run on their own.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits since the latest release tag
    NoNewCommits {
        latest_tag: String,
    },
    /// No release tag exists yet; the whole history counts as unreleased.
    /// Repeated runs before the first tag will see the same commits again.
    NoPriorTag {
        commit_count: usize,
    },
    /// Configured changelog template could not be read; the built-in
    /// layout is used instead
    TemplateFallback {
        path: String,
        reason: String,
    },
    /// Push to the remote failed after local commit/tag already succeeded
    PushFailed {
        remote: String,
        reason: String,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { latest_tag } => {
                write!(f, "No new commits since tag '{}'", latest_tag)
            }
            BoundaryWarning::NoPriorTag { commit_count } => {
                write!(
                    f,
                    "No release tag found; treating all {} commits as unreleased",
                    commit_count
                )
            }
            BoundaryWarning::TemplateFallback { path, reason } => {
                write!(
                    f,
                    "Cannot read changelog template '{}' ({}); using the built-in layout",
                    path, reason
                )
            }
            BoundaryWarning::PushFailed { remote, reason } => {
                write!(
                    f,
                    "Push to '{}' failed: {}. Local commit and tag were kept; push manually",
                    remote, reason
                )
            }
        }
    }
}
