// tests/changelog_test.rs
use std::fs;

use chrono::NaiveDate;

use auto_version::analyzer::{BumpAnalyzer, RequestedBump};
use auto_version::changelog::ChangelogAssembler;
use auto_version::config::Config;
use auto_version::domain::commit::{CommitParser, ParsedCommit};

fn parse_all(config: &Config, messages: &[&str]) -> Vec<ParsedCommit> {
    let parser = CommitParser::new(config);
    messages
        .iter()
        .enumerate()
        .map(|(i, m)| parser.parse(&format!("{:040x}", i + 1), m))
        .collect()
}

fn release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[test]
fn test_update_creates_document_with_preamble() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let commits = parse_all(&config, &["feat: add search", "fix(ui): align modal"]);
    let decision = BumpAnalyzer::new()
        .decide("1.0.0", &commits, RequestedBump::Auto)
        .unwrap();

    let assembler = ChangelogAssembler::new(&config, dir.path());
    assert!(assembler.update(&decision, &commits, release_date()).unwrap());

    let document = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(document.starts_with("# Changelog\n"));
    assert!(document.contains("Keep a Changelog"));
    assert!(document.contains("## [1.1.0] (2024-03-01)"));
    assert!(document.contains("### ✨ Features"));
    assert!(document.contains("* ✨ add search"));
    assert!(document.contains("### 🐛 Bug Fixes"));
    assert!(document.contains("* 🐛 **ui**: align modal"));
}

#[test]
fn test_update_prepends_release_and_keeps_history() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();

    // first release
    let commits = parse_all(&config, &["feat: first feature"]);
    let decision = BumpAnalyzer::new()
        .decide("1.0.0", &commits, RequestedBump::Auto)
        .unwrap();
    let assembler = ChangelogAssembler::new(&config, dir.path());
    assembler.update(&decision, &commits, release_date()).unwrap();
    let after_first = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();

    // second release lands above the first, first entry untouched
    let commits = parse_all(&config, &["fix: regression"]);
    let decision = BumpAnalyzer::new()
        .decide("1.1.0", &commits, RequestedBump::Auto)
        .unwrap();
    let second_date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    assembler.update(&decision, &commits, second_date).unwrap();

    let document = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    let first_pos = document.find("## [1.1.0]").unwrap();
    let second_pos = document.find("## [1.1.1]").unwrap();
    assert!(second_pos < first_pos);

    // everything from the first release header on is preserved byte-for-byte
    let original_tail = &after_first[after_first.find("## [1.1.0]").unwrap()..];
    assert!(document.ends_with(original_tail));
}

#[test]
fn test_update_excludes_non_conventional_commits() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let commits = parse_all(&config, &["feat: documented", "random undocumented change"]);
    let decision = BumpAnalyzer::new()
        .decide("1.0.0", &commits, RequestedBump::Auto)
        .unwrap();

    let assembler = ChangelogAssembler::new(&config, dir.path());
    assembler.update(&decision, &commits, release_date()).unwrap();

    let document = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(document.contains("documented"));
    assert!(!document.contains("random undocumented change"));
}

#[test]
fn test_versioned_release_can_have_no_changelog_entry() {
    // All commits non-conventional: the version still bumps (patch floor)
    // but the changelog stays untouched.
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let commits = parse_all(&config, &["tweak things", "more tweaks"]);
    let decision = BumpAnalyzer::new()
        .decide("1.0.0", &commits, RequestedBump::Auto)
        .unwrap();
    assert_eq!(decision.next.to_string(), "1.0.1");

    let assembler = ChangelogAssembler::new(&config, dir.path());
    assert!(!assembler.update(&decision, &commits, release_date()).unwrap());
    assert!(!dir.path().join("CHANGELOG.md").exists());
}

#[test]
fn test_breaking_commit_documented_once() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default();
    let commits = parse_all(&config, &["feat(api)!: redesign endpoints"]);
    let decision = BumpAnalyzer::new()
        .decide("1.0.0", &commits, RequestedBump::Auto)
        .unwrap();

    let assembler = ChangelogAssembler::new(&config, dir.path());
    assembler.update(&decision, &commits, release_date()).unwrap();

    let document = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(document.contains("### ⚠ BREAKING CHANGES"));
    assert!(!document.contains("### ✨ Features"));
    assert_eq!(document.matches("redesign endpoints").count(), 1);
}
