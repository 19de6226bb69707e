//! Section rendering for changelog fragments.

use crate::config::{capitalize, Config, GroupBy};
use crate::domain::commit::ParsedCommit;

use super::ChangelogEntry;

/// Render the conditional section tree for one entry. Empty partitions emit
/// nothing, not even their heading.
pub(crate) fn render_sections(config: &Config, entry: &ChangelogEntry) -> String {
    let mut out = String::new();

    push_section(&mut out, config, "⚠ BREAKING CHANGES", &entry.breaking);
    push_section(&mut out, config, "✨ Features", &entry.features);
    push_section(&mut out, config, "🐛 Bug Fixes", &entry.fixes);

    if !entry.others.is_empty() {
        out.push_str("### 📦 Other Changes\n\n");
        match config.changelog.group_by {
            GroupBy::None => {
                for commit in &entry.others {
                    out.push_str(&commit_line(config, commit));
                    out.push('\n');
                }
                out.push('\n');
            }
            _ => {
                for (title, commits) in group_others(config, &entry.others) {
                    out.push_str(&format!("#### {}\n\n", title));
                    for commit in commits {
                        out.push_str(&commit_line(config, commit));
                        out.push('\n');
                    }
                    out.push('\n');
                }
            }
        }
    }

    out
}

fn push_section(out: &mut String, config: &Config, title: &str, commits: &[ParsedCommit]) {
    if commits.is_empty() {
        return;
    }
    out.push_str(&format!("### {}\n\n", title));
    for commit in commits {
        out.push_str(&commit_line(config, commit));
        out.push('\n');
    }
    out.push('\n');
}

/// One bullet line: emoji, bold scope prefix, subject, short hash.
pub(crate) fn commit_line(config: &Config, commit: &ParsedCommit) -> String {
    let short_hash = &commit.hash[..7.min(commit.hash.len())];
    let scope = commit
        .scope
        .as_ref()
        .map(|s| format!("**{}**: ", s))
        .unwrap_or_default();
    let emoji = commit
        .r#type
        .as_deref()
        .and_then(|t| config.type_emoji(t))
        .map(|e| format!("{} ", e))
        .unwrap_or_default();
    format!("* {}{}{} ({})", emoji, scope, commit.subject, short_hash)
}

/// Group the "others" partition, keeping first-encounter order of groups.
fn group_others<'a>(
    config: &Config,
    commits: &'a [ParsedCommit],
) -> Vec<(String, Vec<&'a ParsedCommit>)> {
    let mut groups: Vec<(String, Vec<&ParsedCommit>)> = Vec::new();

    for commit in commits {
        let title = match config.changelog.group_by {
            GroupBy::Scope => commit
                .scope
                .as_deref()
                .map(capitalize)
                .unwrap_or_else(|| "Other".to_string()),
            _ => config.type_title(commit.r#type.as_deref().unwrap_or("other")),
        };

        match groups.iter_mut().find(|(t, _)| *t == title) {
            Some((_, members)) => members.push(commit),
            None => groups.push((title, vec![commit])),
        }
    }

    groups
}
