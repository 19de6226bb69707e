//! Pure formatting functions for terminal output.
//!
//! All display logic lives here, separated from user interaction so the
//! workflow stays testable.

use console::style;

use crate::analyzer::VersionDecision;
use crate::boundary::BoundaryWarning;
use crate::domain::commit::ParsedCommit;
use crate::domain::version::NextVersions;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Display the pending commits for a branch.
///
/// Shows up to 10 commits; beyond that, a count of the remainder.
pub fn display_commit_analysis(commits: &[ParsedCommit], branch: &str) {
    println!(
        "\n{}",
        style(format!("Analyzing {} commits on branch '{}'", commits.len(), branch)).bold()
    );

    for (i, commit) in commits.iter().take(10).enumerate() {
        println!("  {}. {}", i + 1, commit.format_for_display());
    }
    if commits.len() > 10 {
        println!("  ... and {} more commits", commits.len() - 10);
    }
}

/// Display the proposed version transition.
pub fn display_version_transition(decision: &VersionDecision) {
    println!(
        "\n{} {} {} {} ({})",
        style("Version:").bold(),
        style(&decision.current).red(),
        style("→").yellow(),
        style(&decision.next).green(),
        decision.bump
    );
}

/// Display the headline lines of the status report.
pub fn display_status_report(current: &str, branch: &str, latest_tag: Option<&str>) {
    println!("\n{}", style("Version status").bold());
    println!("  current version: {}", style(current).green());
    println!("  branch:          {}", branch);
    println!("  latest tag:      {}", latest_tag.unwrap_or("(none)"));
}

/// Display the bump candidates reachable from the current version.
pub fn display_next_versions(next: &NextVersions) {
    println!("\n{}", style("Next version candidates:").bold());
    println!("  patch: {}", style(&next.patch).green());
    println!("  minor: {}", style(&next.minor).green());
    println!("  major: {}", style(&next.major).green());
}

/// Display a truncated changelog preview during a dry run.
pub fn display_changelog_preview(preview: &str) {
    println!("\n{}", style("Changelog preview:").bold());
    println!("{}", "-".repeat(50));
    println!("{}", preview);
}

/// Report which mutation steps completed before a failure, so the user
/// knows what partial state they are left with.
pub fn display_steps_completed(steps: &[String]) {
    eprintln!(
        "{} The following steps had already completed:",
        style("⚠ WARNING:").yellow().bold()
    );
    for step in steps {
        eprintln!("  - {}", step);
    }
}
