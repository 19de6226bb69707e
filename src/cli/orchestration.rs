//! Release workflow orchestration
//!
//! Drives one run end to end: precondition checks, commit analysis, the
//! version decision, and the mutation sequence (version files, changelog,
//! release commit, tag, push). Precondition failures abort before any write;
//! a failure during the mutation sequence aborts the remaining steps and
//! reports which steps had already completed. Completed writes are not
//! rolled back.

use std::path::Path;

use chrono::Local;

use crate::analyzer::{BumpAnalyzer, RequestedBump, VersionDecision};
use crate::boundary::BoundaryWarning;
use crate::changelog::ChangelogAssembler;
use crate::config::Config;
use crate::domain::commit::{CommitParser, ParsedCommit};
use crate::domain::version;
use crate::error::{AutoVersionError, Result};
use crate::git::Repository;
use crate::hooks::{HookContext, HookExecutor, HookType};
use crate::manifest::{self, ManifestStore};
use crate::ui::{self, formatter};

/// Options for one bump run, mirroring the CLI surface.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Branch to release from; the configured default branch when absent
    pub branch: Option<String>,
    /// Explicit bump magnitude, or automatic detection
    pub requested: RequestedBump,
    /// Compute and preview without writing anything
    pub dry_run: bool,
    pub skip_changelog: bool,
    pub skip_commit: bool,
    pub skip_tag: bool,
    /// Non-interactive auto-confirm
    pub yes: bool,
    /// Push branch and tags after the release
    pub push: bool,
}

/// Result of a bump run.
#[derive(Debug)]
pub struct BumpOutcome {
    /// The computed transition; absent when there was nothing to release
    pub decision: Option<VersionDecision>,
    /// Whether the release was applied (false for dry runs and cancellations)
    pub released: bool,
    /// Mutation steps that completed
    pub steps: Vec<String>,
}

impl BumpOutcome {
    fn skipped(decision: Option<VersionDecision>) -> Self {
        BumpOutcome {
            decision,
            released: false,
            steps: Vec::new(),
        }
    }
}

/// Run the bump workflow against a repository rooted at `root`.
pub fn run_bump<R: Repository>(
    repo: &R,
    config: &Config,
    root: &Path,
    options: &RunOptions,
) -> Result<BumpOutcome> {
    // Preconditions, all before any mutation
    if !repo.is_clean()? {
        return Err(AutoVersionError::repository(
            "working tree has uncommitted changes; commit or stash them first",
        ));
    }
    let store = ManifestStore::new(root, &config.files);
    let current = store.read_version()?;

    let branch = options
        .branch
        .clone()
        .unwrap_or_else(|| config.git.default_branch.clone());
    repo.checkout_branch(&branch, &config.git.remote)?;

    let latest_tag = repo.latest_tag(&config.git.tag_prefix)?;
    let records = repo.commits_since(latest_tag.as_deref())?;

    if records.is_empty() {
        formatter::display_boundary_warning(&BoundaryWarning::NoNewCommits {
            latest_tag: latest_tag.unwrap_or_else(|| "(none)".to_string()),
        });
        return Ok(BumpOutcome::skipped(None));
    }
    if latest_tag.is_none() {
        formatter::display_boundary_warning(&BoundaryWarning::NoPriorTag {
            commit_count: records.len(),
        });
    }

    let parser = CommitParser::new(config);
    let commits: Vec<ParsedCommit> = records
        .iter()
        .map(|r| parser.parse(&r.hash, &r.message))
        .collect();

    formatter::display_commit_analysis(&commits, &branch);

    let decision = BumpAnalyzer::new().decide(&current, &commits, options.requested)?;
    formatter::display_version_transition(&decision);

    if options.dry_run {
        formatter::display_status("Dry run - no files will be modified");
        let assembler = ChangelogAssembler::new(config, root);
        let entry = assembler.build_entry(&decision, &commits, Local::now().date_naive());
        let fragment = assembler.render(&entry);
        formatter::display_changelog_preview(&truncate(&fragment, 500));
        return Ok(BumpOutcome::skipped(Some(decision)));
    }

    if !options.yes
        && !ui::confirm_proceed(&format!("Release version {}?", decision.next))?
    {
        formatter::display_status("Release cancelled");
        return Ok(BumpOutcome::skipped(Some(decision)));
    }

    let mut steps = Vec::new();
    if let Err(err) = apply_release(
        repo, config, root, &branch, &decision, &commits, options, &mut steps,
    ) {
        if !steps.is_empty() {
            formatter::display_steps_completed(&steps);
        }
        return Err(err);
    }

    formatter::display_success(&format!("Version {} released", decision.next));
    Ok(BumpOutcome {
        decision: Some(decision),
        released: true,
        steps,
    })
}

/// The mutation sequence. Steps completed so far accumulate in `steps` so
/// the caller can report partial state after a failure.
#[allow(clippy::too_many_arguments)]
fn apply_release<R: Repository>(
    repo: &R,
    config: &Config,
    root: &Path,
    branch: &str,
    decision: &VersionDecision,
    commits: &[ParsedCommit],
    options: &RunOptions,
    steps: &mut Vec<String>,
) -> Result<()> {
    let context = |hook_type| HookContext {
        hook_type,
        branch: branch.to_string(),
        current_version: decision.current.to_string(),
        next_version: decision.next.to_string(),
        bump: decision.bump.to_string(),
        commit_count: commits.len(),
    };

    run_hook(config, context(HookType::PreVersion))?;

    let store = ManifestStore::new(root, &config.files);
    store.write_version(&decision.next.to_string())?;
    steps.push(format!("updated {} to {}", config.files.manifest, decision.next));

    if let Some(version_file) = &config.files.version_file {
        manifest::write_version_file(&root.join(version_file), &decision.next.to_string())?;
        steps.push(format!("updated {}", version_file));
    }

    if !options.skip_changelog {
        let assembler = ChangelogAssembler::new(config, root);
        if assembler.update(decision, commits, Local::now().date_naive())? {
            steps.push(format!("updated {}", config.changelog.output_file));
        } else {
            formatter::display_status("No documentable commits; changelog left untouched");
        }
    }

    run_hook(config, context(HookType::PostVersion))?;

    if !options.skip_commit {
        run_hook(config, context(HookType::PreCommit))?;

        let mut paths = vec![config.files.manifest.clone()];
        if !options.skip_changelog && root.join(&config.files.changelog).exists() {
            paths.push(config.files.changelog.clone());
        }
        if let Some(version_file) = &config.files.version_file {
            paths.push(version_file.clone());
        }
        repo.stage(&paths)?;
        repo.commit(&format!(
            "chore(release): bump version to {}",
            decision.next
        ))?;
        steps.push("created release commit".to_string());

        run_hook(config, context(HookType::PostCommit))?;
    }

    if !options.skip_tag {
        let tag = format!("{}{}", config.git.tag_prefix, decision.next);
        repo.create_tag(&tag, &format!("Release version {}", decision.next))?;
        steps.push(format!("created tag {}", tag));
    }

    if options.push {
        match repo.push(&config.git.remote, branch, !options.skip_tag) {
            Ok(()) => steps.push(format!("pushed to {}", config.git.remote)),
            Err(err) => {
                formatter::display_boundary_warning(&BoundaryWarning::PushFailed {
                    remote: config.git.remote.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn run_hook(config: &Config, context: HookContext) -> Result<()> {
    if let Some(command) = context.hook_type.command(&config.hooks) {
        formatter::display_status(&format!("Running {} hook", context.hook_type.name()));
        HookExecutor::execute(command, &context)?;
    }
    Ok(())
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let truncated: String = text.chars().take(limit).collect();
    format!("{}...", truncated)
}

/// Show the current version, latest tag and pending commits for a branch.
pub fn show_status<R: Repository>(
    repo: &R,
    config: &Config,
    root: &Path,
    branch: Option<&str>,
) -> Result<()> {
    let store = ManifestStore::new(root, &config.files);
    let current = store.read_version()?;
    let branch = branch
        .map(str::to_string)
        .unwrap_or_else(|| config.git.default_branch.clone());

    let latest_tag = repo.latest_tag(&config.git.tag_prefix)?;
    let records = repo.commits_since(latest_tag.as_deref())?;

    formatter::display_status_report(&current, &branch, latest_tag.as_deref());

    if records.is_empty() {
        formatter::display_status("No commits pending release");
        return Ok(());
    }

    let parser = CommitParser::new(config);
    let commits: Vec<ParsedCommit> = records
        .iter()
        .map(|r| parser.parse(&r.hash, &r.message))
        .collect();
    formatter::display_commit_analysis(&commits, &branch);
    formatter::display_next_versions(&version::next_versions(&current)?);

    Ok(())
}
