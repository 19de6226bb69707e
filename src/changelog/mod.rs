//! Changelog assembly: partition parsed commits, render one release
//! fragment, and merge it into the existing document without touching
//! prior entries.

pub mod render;

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::analyzer::VersionDecision;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::commit::ParsedCommit;
use crate::error::Result;
use crate::ui::formatter;

/// First release header in an existing changelog document.
static RELEASE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## \[").expect("valid header pattern"));

/// Whole-fragment layout; a configured template file replaces it.
const DEFAULT_TEMPLATE: &str = "## [{{version}}] ({{date}})\n\n{{sections}}";

const DOCUMENT_PREAMBLE: &str = "# Changelog\n\nAll notable changes to this project will be documented in this file.\n\nThe format is based on [Keep a Changelog](https://keepachangelog.com/en/1.0.0/),\nand this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).\n\n";

/// One release's worth of documentation, discarded after rendering.
///
/// The partitions are disjoint by construction: `breaking` takes any commit
/// with the breaking flag regardless of type, `features` and `fixes` take
/// the remainder by type, `others` takes everything else that survived the
/// include-list filter.
#[derive(Debug, Clone)]
pub struct ChangelogEntry {
    pub version: String,
    pub date: NaiveDate,
    pub commits: Vec<ParsedCommit>,
    pub breaking: Vec<ParsedCommit>,
    pub features: Vec<ParsedCommit>,
    pub fixes: Vec<ParsedCommit>,
    pub others: Vec<ParsedCommit>,
}

impl ChangelogEntry {
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Builds, renders and merges changelog entries.
pub struct ChangelogAssembler<'a> {
    config: &'a Config,
    root: PathBuf,
}

impl<'a> ChangelogAssembler<'a> {
    /// Create an assembler rooted at an explicit base path.
    pub fn new(config: &'a Config, root: impl Into<PathBuf>) -> Self {
        ChangelogAssembler {
            config,
            root: root.into(),
        }
    }

    /// Partition commits into a changelog entry.
    ///
    /// Commits without a recognized type, or whose type is not in the
    /// configured include-list, never appear in the changelog (even though
    /// they still feed the patch floor of the version decision).
    pub fn build_entry(
        &self,
        decision: &VersionDecision,
        commits: &[ParsedCommit],
        date: NaiveDate,
    ) -> ChangelogEntry {
        let included: Vec<ParsedCommit> = commits
            .iter()
            .filter(|c| {
                c.r#type
                    .as_ref()
                    .is_some_and(|t| self.config.changelog.include_types.contains(t))
            })
            .cloned()
            .collect();

        let mut breaking = Vec::new();
        let mut features = Vec::new();
        let mut fixes = Vec::new();
        let mut others = Vec::new();

        for commit in &included {
            if commit.breaking {
                breaking.push(commit.clone());
            } else if commit.r#type.as_deref() == Some("feat") {
                features.push(commit.clone());
            } else if commit.r#type.as_deref() == Some("fix") {
                fixes.push(commit.clone());
            } else {
                others.push(commit.clone());
            }
        }

        ChangelogEntry {
            version: decision.next.to_string(),
            date,
            commits: included,
            breaking,
            features,
            fixes,
            others,
        }
    }

    /// Render one entry to a document fragment.
    pub fn render(&self, entry: &ChangelogEntry) -> String {
        let sections = render::render_sections(self.config, entry);
        let fragment = self
            .template_text()
            .replace("{{version}}", &entry.version)
            .replace("{{date}}", &entry.date.format("%Y-%m-%d").to_string())
            .replace("{{sections}}", sections.trim_end());
        format!("{}\n", fragment.trim_end())
    }

    /// Merge a rendered fragment into an existing document.
    ///
    /// The fragment lands immediately before the first release header, so
    /// entries stay newest-first and historical entries are preserved
    /// byte-for-byte. A document without any release header is treated as
    /// empty and gets a fresh preamble.
    pub fn merge(&self, fragment: &str, existing: &str) -> String {
        if existing.trim().is_empty() {
            return format!("{}{}", DOCUMENT_PREAMBLE, fragment);
        }

        match RELEASE_HEADER_RE.find(existing) {
            Some(m) => format!(
                "{}{}\n{}",
                &existing[..m.start()],
                fragment,
                &existing[m.start()..]
            ),
            None => format!("{}{}", DOCUMENT_PREAMBLE, fragment),
        }
    }

    /// Read-modify-write the changelog document for one release.
    ///
    /// Returns false when the entry is empty and empty releases are
    /// configured to be skipped.
    pub fn update(
        &self,
        decision: &VersionDecision,
        commits: &[ParsedCommit],
        date: NaiveDate,
    ) -> Result<bool> {
        let entry = self.build_entry(decision, commits, date);
        if entry.is_empty() && self.config.changelog.skip_empty_releases {
            return Ok(false);
        }

        let fragment = self.render(&entry);
        let path = self.root.join(&self.config.changelog.output_file);
        let existing = if path.exists() {
            fs::read_to_string(&path)?
        } else {
            String::new()
        };
        fs::write(&path, self.merge(&fragment, &existing))?;
        Ok(true)
    }

    fn template_text(&self) -> String {
        if let Some(path) = &self.config.changelog.template {
            let full = self.root.join(path);
            match fs::read_to_string(&full) {
                Ok(text) => return text,
                Err(e) => formatter::display_boundary_warning(&BoundaryWarning::TemplateFallback {
                    path: full.display().to_string(),
                    reason: e.to_string(),
                }),
            }
        }
        DEFAULT_TEMPLATE.to_string()
    }
}
