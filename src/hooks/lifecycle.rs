use std::collections::HashMap;

use crate::config::HooksConfig;

/// Points in the release workflow where a hook command can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookType {
    PreVersion,
    PostVersion,
    PreCommit,
    PostCommit,
}

impl HookType {
    /// Get the hook name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PreVersion => "pre-version",
            HookType::PostVersion => "post-version",
            HookType::PreCommit => "pre-commit",
            HookType::PostCommit => "post-commit",
        }
    }

    /// Configured command for this hook point, if any
    pub fn command<'a>(&self, hooks: &'a HooksConfig) -> Option<&'a str> {
        match self {
            HookType::PreVersion => hooks.pre_version.as_deref(),
            HookType::PostVersion => hooks.post_version.as_deref(),
            HookType::PreCommit => hooks.pre_commit.as_deref(),
            HookType::PostCommit => hooks.post_commit.as_deref(),
        }
    }
}

/// Context information passed to a hook command
#[derive(Debug, Clone)]
pub struct HookContext {
    pub hook_type: HookType,
    /// Branch being released
    pub branch: String,
    /// Version before the bump
    pub current_version: String,
    /// Version after the bump
    pub next_version: String,
    /// Bump magnitude (major, minor, patch)
    pub bump: String,
    /// Number of commits in the release
    pub commit_count: usize,
}

impl HookContext {
    /// Convert context to environment variables for the hook command
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("AUTO_VERSION_HOOK".to_string(), self.hook_type.name().to_string());
        env.insert("AUTO_VERSION_BRANCH".to_string(), self.branch.clone());
        env.insert(
            "AUTO_VERSION_CURRENT".to_string(),
            self.current_version.clone(),
        );
        env.insert("AUTO_VERSION_NEXT".to_string(), self.next_version.clone());
        env.insert("AUTO_VERSION_BUMP".to_string(), self.bump.clone());
        env.insert(
            "AUTO_VERSION_COMMITS".to_string(),
            self.commit_count.to_string(),
        );
        env
    }
}
