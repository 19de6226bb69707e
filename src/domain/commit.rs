use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;

/// Subject-line shape: `<type>[(<scope>)][!]: <description>`.
/// Whether the captured type counts as conventional is decided against the
/// configured type table, not the pattern.
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]+)(?:\(([^)]+)\))?(!)?: (.+)$").expect("valid subject pattern")
});

/// Case-insensitive body/footer marker for incompatible changes.
static BREAKING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)BREAKING CHANGE").expect("valid breaking pattern"));

/// Inline breaking marker: `!` immediately before the first colon.
static INLINE_BREAKING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^:\n]+!:").expect("valid marker pattern"));

/// Issue references, optionally introduced by a linking keyword.
static ISSUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:(?:closes?|fixes?|resolves?)\s+)?#(\d+)").expect("valid issue pattern")
});

/// Parsed representation of one commit message.
///
/// Immutable once produced. A message that does not match the conventional
/// format degrades to a non-conventional record: `r#type`, `scope` and
/// `footer` stay absent, `breaking` stays false, and `subject` is the first
/// line verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub hash: String,
    pub raw_message: String,
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub breaking: bool,
    pub subject: String,
    pub body: Option<String>,
    pub footer: Option<String>,
    pub issues: Vec<String>,
}

impl ParsedCommit {
    /// Render `<7-char-hash> <type>[(<scope>)][!]: <subject>` when the commit
    /// is structured, else `<7-char-hash> <raw-first-line>`.
    pub fn format_for_display(&self) -> String {
        let short_hash = &self.hash[..7.min(self.hash.len())];

        match &self.r#type {
            Some(kind) => {
                let mut formatted = format!("{} {}", short_hash, kind);
                if let Some(scope) = &self.scope {
                    formatted.push_str(&format!("({})", scope));
                }
                if self.breaking {
                    formatted.push('!');
                }
                formatted.push_str(": ");
                formatted.push_str(&self.subject);
                formatted
            }
            None => format!("{} {}", short_hash, self.subject),
        }
    }
}

/// Parses raw commit messages into [ParsedCommit] records.
///
/// The recognized type set comes from the configured commit-type table, so
/// configuration can add types without code changes. Parsing never fails;
/// malformed input degrades to a non-conventional record.
pub struct CommitParser {
    types: HashSet<String>,
}

impl CommitParser {
    /// Create a parser recognizing the configured commit types.
    pub fn new(config: &Config) -> Self {
        CommitParser {
            types: config.recognized_types().into_iter().collect(),
        }
    }

    /// Parse one commit message.
    pub fn parse(&self, hash: &str, message: &str) -> ParsedCommit {
        let lines: Vec<&str> = message.lines().collect();
        let first_line = lines.first().copied().unwrap_or("");
        let issues = extract_issues(message);

        let captures = SUBJECT_RE
            .captures(first_line)
            .filter(|caps| self.types.contains(&caps[1]));

        let Some(caps) = captures else {
            let body = non_empty(lines.get(1..).unwrap_or(&[]).join("\n").trim());
            return ParsedCommit {
                hash: hash.to_string(),
                raw_message: message.to_string(),
                r#type: None,
                scope: None,
                breaking: false,
                subject: first_line.to_string(),
                body,
                footer: None,
                issues,
            };
        };

        let kind = caps[1].to_string();
        let scope = caps.get(2).map(|m| m.as_str().to_string());
        let inline_marker = caps.get(3).is_some();
        let subject = caps[4].to_string();

        // Lines between the first and the last form the body; the last line
        // is the footer. Single-line messages have neither.
        let body = if lines.len() > 2 {
            non_empty(lines[1..lines.len() - 1].join("\n").trim())
        } else {
            None
        };
        let footer = if lines.len() > 1 {
            non_empty(lines[lines.len() - 1].trim())
        } else {
            None
        };

        let breaking = inline_marker
            || body.as_deref().is_some_and(|b| BREAKING_RE.is_match(b))
            || footer.as_deref().is_some_and(|f| BREAKING_RE.is_match(f));

        ParsedCommit {
            hash: hash.to_string(),
            raw_message: message.to_string(),
            r#type: Some(kind),
            scope,
            breaking,
            subject,
            body,
            footer,
            issues,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Extract issue references (`#123`) from a commit message, in encounter
/// order, duplicates preserved.
pub fn extract_issues(message: &str) -> Vec<String> {
    ISSUE_RE
        .captures_iter(message)
        .map(|caps| format!("#{}", &caps[1]))
        .collect()
}

/// True when the message carries an inline `!` marker before the colon or a
/// case-insensitive "BREAKING CHANGE" marker anywhere.
pub fn has_breaking_change(message: &str) -> bool {
    INLINE_BREAKING_RE.is_match(message) || BREAKING_RE.is_match(message)
}
