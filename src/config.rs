use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{AutoVersionError, Result};

/// Represents the complete configuration for auto-version.
///
/// Built by layering: a fully-populated default value, then field-by-field
/// overrides from an optional TOML file. Components receive an immutable
/// snapshot and never mutate it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub git: GitConfig,
    pub version: VersionConfig,
    pub changelog: ChangelogConfig,
    pub commit_types: HashMap<String, CommitTypeInfo>,
    pub files: FilesConfig,
    pub hooks: HooksConfig,
}

/// Git settings: branch to release from, remote, and tag naming.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    pub default_branch: String,
    pub remote: String,
    pub tag_prefix: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            default_branch: "main".to_string(),
            remote: "origin".to_string(),
            tag_prefix: "v".to_string(),
        }
    }
}

/// Version strategy settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    pub strategy: String,
    pub bump_rules: BumpRules,
    pub prerelease: PrereleaseConfig,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            strategy: "semantic".to_string(),
            bump_rules: BumpRules::default(),
            prerelease: PrereleaseConfig::default(),
        }
    }
}

/// Keywords associated with each bump magnitude.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpRules {
    pub major: Vec<String>,
    pub minor: Vec<String>,
    pub patch: Vec<String>,
}

impl Default for BumpRules {
    fn default() -> Self {
        BumpRules {
            major: vec![
                "feat!".to_string(),
                "fix!".to_string(),
                "BREAKING CHANGE".to_string(),
                "breaking".to_string(),
            ],
            minor: vec!["feat".to_string()],
            patch: vec![
                "fix".to_string(),
                "perf".to_string(),
                "refactor".to_string(),
            ],
        }
    }
}

/// Pre-release settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PrereleaseConfig {
    pub identifier: String,
    pub enable: bool,
}

impl Default for PrereleaseConfig {
    fn default() -> Self {
        PrereleaseConfig {
            identifier: "alpha".to_string(),
            enable: false,
        }
    }
}

/// Changelog generation settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    pub output_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    pub include_types: Vec<String>,
    pub skip_empty_releases: bool,
    pub group_by: GroupBy,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            output_file: "CHANGELOG.md".to_string(),
            template: None,
            include_types: vec![
                "feat".to_string(),
                "fix".to_string(),
                "perf".to_string(),
                "refactor".to_string(),
                "docs".to_string(),
                "style".to_string(),
                "test".to_string(),
                "build".to_string(),
                "ci".to_string(),
                "chore".to_string(),
            ],
            skip_empty_releases: true,
            group_by: GroupBy::Type,
        }
    }
}

/// Grouping strategy for the "other changes" changelog section.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Type,
    Scope,
    None,
}

/// Metadata attached to one commit type.
///
/// The key set is open: configuration may add types the built-in table does
/// not know, and titles for unknown types default to a capitalized key.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitTypeInfo {
    pub title: String,
    pub semver: BumpClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// Bump magnitude a commit type maps to.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BumpClass {
    Major,
    Minor,
    Patch,
    None,
}

/// File locations, resolved against the explicit workspace root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    pub manifest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_file: Option<String>,
    pub changelog: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            manifest: "package.json".to_string(),
            version_file: None,
            changelog: "CHANGELOG.md".to_string(),
        }
    }
}

/// Lifecycle hook commands, run as opaque shell commands.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HooksConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_commit: Option<String>,
}

fn default_commit_types() -> HashMap<String, CommitTypeInfo> {
    let entry = |title: &str, semver: BumpClass, emoji: &str| CommitTypeInfo {
        title: title.to_string(),
        semver,
        emoji: Some(emoji.to_string()),
    };

    let mut types = HashMap::new();
    types.insert("feat".to_string(), entry("Features", BumpClass::Minor, "✨"));
    types.insert("fix".to_string(), entry("Bug Fixes", BumpClass::Patch, "🐛"));
    types.insert(
        "docs".to_string(),
        entry("Documentation", BumpClass::Patch, "📚"),
    );
    types.insert("style".to_string(), entry("Styles", BumpClass::Patch, "💎"));
    types.insert(
        "refactor".to_string(),
        entry("Code Refactoring", BumpClass::Patch, "📦"),
    );
    types.insert(
        "perf".to_string(),
        entry("Performance Improvements", BumpClass::Patch, "🚀"),
    );
    types.insert("test".to_string(), entry("Tests", BumpClass::None, "🚨"));
    types.insert("build".to_string(), entry("Builds", BumpClass::Patch, "🛠"));
    types.insert(
        "ci".to_string(),
        entry("Continuous Integrations", BumpClass::None, "⚙️"),
    );
    types.insert("chore".to_string(), entry("Chores", BumpClass::Patch, "♻️"));
    types
}

impl Default for Config {
    fn default() -> Self {
        Config {
            git: GitConfig::default(),
            version: VersionConfig::default(),
            changelog: ChangelogConfig::default(),
            commit_types: default_commit_types(),
            files: FilesConfig::default(),
            hooks: HooksConfig::default(),
        }
    }
}

impl Config {
    /// Title for a commit type: configured title, or a capitalized key for
    /// types the table does not know.
    pub fn type_title(&self, kind: &str) -> String {
        self.commit_types
            .get(kind)
            .map(|info| info.title.clone())
            .unwrap_or_else(|| capitalize(kind))
    }

    /// Emoji for a commit type, empty for unknown types.
    pub fn type_emoji(&self, kind: &str) -> Option<&str> {
        self.commit_types
            .get(kind)
            .and_then(|info| info.emoji.as_deref())
    }

    /// Commit types the parser recognizes in subject lines.
    pub fn recognized_types(&self) -> Vec<String> {
        self.commit_types.keys().cloned().collect()
    }
}

/// Capitalize the first character of a string.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Partial configuration as read from a TOML file.
///
/// Every field is optional; present fields override the corresponding default
/// field-by-field, with `bump_rules` and `prerelease` merged at their own
/// sub-level rather than wholesale-replaced.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigOverrides {
    pub git: Option<GitOverrides>,
    pub version: Option<VersionOverrides>,
    pub changelog: Option<ChangelogOverrides>,
    pub commit_types: Option<HashMap<String, CommitTypeInfo>>,
    pub files: Option<FilesOverrides>,
    pub hooks: Option<HooksConfig>,
}

#[derive(Debug, Deserialize, Default)]
pub struct GitOverrides {
    pub default_branch: Option<String>,
    pub remote: Option<String>,
    pub tag_prefix: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct VersionOverrides {
    pub strategy: Option<String>,
    pub bump_rules: Option<BumpRulesOverrides>,
    pub prerelease: Option<PrereleaseOverrides>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BumpRulesOverrides {
    pub major: Option<Vec<String>>,
    pub minor: Option<Vec<String>>,
    pub patch: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PrereleaseOverrides {
    pub identifier: Option<String>,
    pub enable: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ChangelogOverrides {
    pub output_file: Option<String>,
    pub template: Option<String>,
    pub include_types: Option<Vec<String>>,
    pub skip_empty_releases: Option<bool>,
    pub group_by: Option<GroupBy>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FilesOverrides {
    pub manifest: Option<String>,
    pub version_file: Option<String>,
    pub changelog: Option<String>,
}

impl ConfigOverrides {
    /// Apply these overrides onto a base configuration.
    pub fn apply(self, base: &mut Config) {
        if let Some(git) = self.git {
            if let Some(v) = git.default_branch {
                base.git.default_branch = v;
            }
            if let Some(v) = git.remote {
                base.git.remote = v;
            }
            if let Some(v) = git.tag_prefix {
                base.git.tag_prefix = v;
            }
        }

        if let Some(version) = self.version {
            if let Some(v) = version.strategy {
                base.version.strategy = v;
            }
            if let Some(rules) = version.bump_rules {
                if let Some(v) = rules.major {
                    base.version.bump_rules.major = v;
                }
                if let Some(v) = rules.minor {
                    base.version.bump_rules.minor = v;
                }
                if let Some(v) = rules.patch {
                    base.version.bump_rules.patch = v;
                }
            }
            if let Some(pre) = version.prerelease {
                if let Some(v) = pre.identifier {
                    base.version.prerelease.identifier = v;
                }
                if let Some(v) = pre.enable {
                    base.version.prerelease.enable = v;
                }
            }
        }

        if let Some(changelog) = self.changelog {
            if let Some(v) = changelog.output_file {
                base.changelog.output_file = v;
            }
            if let Some(v) = changelog.template {
                base.changelog.template = Some(v);
            }
            if let Some(v) = changelog.include_types {
                base.changelog.include_types = v;
            }
            if let Some(v) = changelog.skip_empty_releases {
                base.changelog.skip_empty_releases = v;
            }
            if let Some(v) = changelog.group_by {
                base.changelog.group_by = v;
            }
        }

        if let Some(types) = self.commit_types {
            base.commit_types.extend(types);
        }

        if let Some(files) = self.files {
            if let Some(v) = files.manifest {
                base.files.manifest = v;
            }
            if let Some(v) = files.version_file {
                base.files.version_file = Some(v);
            }
            if let Some(v) = files.changelog {
                base.files.changelog = v;
            }
        }

        if let Some(hooks) = self.hooks {
            if hooks.pre_version.is_some() {
                base.hooks.pre_version = hooks.pre_version;
            }
            if hooks.post_version.is_some() {
                base.hooks.post_version = hooks.post_version;
            }
            if hooks.pre_commit.is_some() {
                base.hooks.pre_commit = hooks.pre_commit;
            }
            if hooks.post_commit.is_some() {
                base.hooks.post_commit = hooks.post_commit;
            }
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `auto-version.toml` in the current directory
/// 3. `auto-version.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        Some(fs::read_to_string(path).map_err(|e| {
            AutoVersionError::config(format!("cannot read {}: {}", path.display(), e))
        })?)
    } else if Path::new("./auto-version.toml").exists() {
        Some(fs::read_to_string("./auto-version.toml")?)
    } else if let Some(config_dir) = dirs::config_dir() {
        let fallback = config_dir.join("auto-version.toml");
        if fallback.exists() {
            Some(fs::read_to_string(fallback)?)
        } else {
            None
        }
    } else {
        None
    };

    let mut config = Config::default();
    if let Some(content) = config_str {
        let overrides: ConfigOverrides = toml::from_str(&content)
            .map_err(|e| AutoVersionError::config(format!("invalid config file: {}", e)))?;
        overrides.apply(&mut config);
    }
    Ok(config)
}

/// Write a default configuration file, annotated for hand-editing.
pub fn write_default_config(path: &Path) -> Result<()> {
    let body = toml::to_string_pretty(&Config::default())
        .map_err(|e| AutoVersionError::config(format!("cannot serialize defaults: {}", e)))?;
    let content = format!(
        "# auto-version configuration\n# Every key is optional; omitted keys keep their defaults.\n\n{}",
        body
    );
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.git.default_branch, "main");
        assert_eq!(config.git.tag_prefix, "v");
        assert_eq!(config.changelog.output_file, "CHANGELOG.md");
        assert_eq!(config.changelog.group_by, GroupBy::Type);
        assert!(config.changelog.include_types.contains(&"feat".to_string()));
        assert!(config.commit_types.contains_key("feat"));
        assert!(config.hooks.pre_version.is_none());
    }

    #[test]
    fn test_type_title_known_and_unknown() {
        let config = Config::default();
        assert_eq!(config.type_title("feat"), "Features");
        assert_eq!(config.type_title("deps"), "Deps");
    }

    #[test]
    fn test_type_emoji() {
        let config = Config::default();
        assert_eq!(config.type_emoji("fix"), Some("🐛"));
        assert_eq!(config.type_emoji("unknown"), None);
    }

    #[test]
    fn test_overrides_merge_nested() {
        let mut config = Config::default();
        let overrides: ConfigOverrides = toml::from_str(
            r#"
[git]
tag_prefix = "release-"

[version.bump_rules]
minor = ["feat", "feature"]

[version.prerelease]
enable = true
"#,
        )
        .unwrap();
        overrides.apply(&mut config);

        assert_eq!(config.git.tag_prefix, "release-");
        // untouched sibling fields keep their defaults
        assert_eq!(config.git.default_branch, "main");
        assert_eq!(config.version.bump_rules.minor.len(), 2);
        assert_eq!(config.version.bump_rules.patch.len(), 3);
        assert!(config.version.prerelease.enable);
        assert_eq!(config.version.prerelease.identifier, "alpha");
    }

    #[test]
    fn test_overrides_extend_commit_types() {
        let mut config = Config::default();
        let overrides: ConfigOverrides = toml::from_str(
            r#"
[commit_types.deps]
title = "Dependencies"
semver = "patch"
"#,
        )
        .unwrap();
        overrides.apply(&mut config);

        assert_eq!(config.type_title("deps"), "Dependencies");
        // built-in entries survive the extension
        assert_eq!(config.type_title("feat"), "Features");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("auth"), "Auth");
        assert_eq!(capitalize(""), "");
    }
}
