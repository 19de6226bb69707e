// tests/workflow_test.rs
use std::fs;
use std::path::Path;

use auto_version::analyzer::RequestedBump;
use auto_version::cli::{run_bump, RunOptions};
use auto_version::config::Config;
use auto_version::error::AutoVersionError;
use auto_version::git::MockRepository;

fn write_manifest(root: &Path, version: &str) {
    fs::write(
        root.join("package.json"),
        format!("{{\n  \"name\": \"demo\",\n  \"version\": \"{}\"\n}}\n", version),
    )
    .unwrap();
}

fn options() -> RunOptions {
    RunOptions {
        branch: None,
        requested: RequestedBump::Auto,
        dry_run: false,
        skip_changelog: false,
        skip_commit: false,
        skip_tag: false,
        yes: true,
        push: false,
    }
}

#[test]
fn test_full_release() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new()
        .with_tag("v1.0.0")
        .with_commit(&"a".repeat(40), "feat(search): add fuzzy matching")
        .with_commit(&"b".repeat(40), "fix: handle empty query");
    let config = Config::default();

    let outcome = run_bump(&repo, &config, dir.path(), &options()).unwrap();

    assert!(outcome.released);
    let decision = outcome.decision.unwrap();
    assert_eq!(decision.next.to_string(), "1.1.0");

    // manifest was bumped
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.1.0\""));

    // changelog was written
    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.contains("## [1.1.0]"));
    assert!(changelog.contains("**search**: add fuzzy matching"));

    // git side effects ran in order
    let ops = repo.operations();
    assert_eq!(ops[0], "checkout main");
    assert!(ops[1].starts_with("stage package.json CHANGELOG.md"));
    assert_eq!(ops[2], "commit chore(release): bump version to 1.1.0");
    assert!(ops[3].starts_with("tag v1.1.0"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new().with_commit(&"a".repeat(40), "feat: something");
    let config = Config::default();

    let mut opts = options();
    opts.dry_run = true;
    let outcome = run_bump(&repo, &config, dir.path(), &opts).unwrap();

    assert!(!outcome.released);
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.0.0\""));
    assert!(!dir.path().join("CHANGELOG.md").exists());
    assert_eq!(repo.operations(), vec!["checkout main".to_string()]);
}

#[test]
fn test_dirty_tree_aborts_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new()
        .dirty()
        .with_commit(&"a".repeat(40), "feat: something");
    let config = Config::default();

    let result = run_bump(&repo, &config, dir.path(), &options());
    assert!(matches!(result, Err(AutoVersionError::Repository(_))));
    assert!(repo.operations().is_empty());
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.0.0\""));
}

#[test]
fn test_missing_manifest_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let repo = MockRepository::new().with_commit(&"a".repeat(40), "fix: bug");
    let config = Config::default();

    let result = run_bump(&repo, &config, dir.path(), &options());
    assert!(matches!(result, Err(AutoVersionError::Manifest(_))));
    assert!(repo.operations().is_empty());
}

#[test]
fn test_unknown_branch_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new().with_commit(&"a".repeat(40), "fix: bug");
    let config = Config::default();

    let mut opts = options();
    opts.branch = Some("release/2.x".to_string());
    let result = run_bump(&repo, &config, dir.path(), &opts);
    assert!(matches!(result, Err(AutoVersionError::Branch(_))));
}

#[test]
fn test_no_commits_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new().with_tag("v1.0.0");
    let config = Config::default();

    let outcome = run_bump(&repo, &config, dir.path(), &options()).unwrap();
    assert!(!outcome.released);
    assert!(outcome.decision.is_none());
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.0.0\""));
}

#[test]
fn test_skip_flags() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new().with_commit(&"a".repeat(40), "fix: bug");
    let config = Config::default();

    let mut opts = options();
    opts.skip_changelog = true;
    opts.skip_tag = true;
    let outcome = run_bump(&repo, &config, dir.path(), &opts).unwrap();

    assert!(outcome.released);
    assert!(!dir.path().join("CHANGELOG.md").exists());
    let ops = repo.operations();
    assert!(ops.iter().any(|op| op.starts_with("commit")));
    assert!(!ops.iter().any(|op| op.starts_with("tag")));
}

#[test]
fn test_explicit_bump_type() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new().with_commit(&"a".repeat(40), "docs: readme");
    let config = Config::default();

    let mut opts = options();
    opts.requested = "major".parse().unwrap();
    let outcome = run_bump(&repo, &config, dir.path(), &opts).unwrap();
    assert_eq!(outcome.decision.unwrap().next.to_string(), "2.0.0");
}

#[test]
fn test_push_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new()
        .failing_push()
        .with_commit(&"a".repeat(40), "fix: bug");
    let config = Config::default();

    let mut opts = options();
    opts.push = true;
    let outcome = run_bump(&repo, &config, dir.path(), &opts).unwrap();

    // local release succeeded even though the push did not
    assert!(outcome.released);
    let ops = repo.operations();
    assert!(ops.iter().any(|op| op.starts_with("tag")));
    assert!(!ops.iter().any(|op| op.starts_with("push")));
}

#[test]
fn test_failing_hook_aborts_before_version_write() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new().with_commit(&"a".repeat(40), "fix: bug");
    let mut config = Config::default();
    config.hooks.pre_version = Some("exit 1".to_string());

    let result = run_bump(&repo, &config, dir.path(), &options());
    assert!(matches!(result, Err(AutoVersionError::Hook(_))));
    let manifest = fs::read_to_string(dir.path().join("package.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.0.0\""));
}

#[test]
fn test_hooks_receive_release_context() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "1.0.0");
    let repo = MockRepository::new().with_commit(&"a".repeat(40), "feat: thing");
    let mut config = Config::default();
    let marker = dir.path().join("hook-ran");
    config.hooks.post_version = Some(format!(
        "echo \"$AUTO_VERSION_CURRENT $AUTO_VERSION_NEXT $AUTO_VERSION_BUMP\" > {}",
        marker.display()
    ));

    run_bump(&repo, &config, dir.path(), &options()).unwrap();
    let recorded = fs::read_to_string(&marker).unwrap();
    assert_eq!(recorded.trim(), "1.0.0 1.1.0 minor");
}
