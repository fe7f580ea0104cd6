//! End-to-end scans of curriculum trees on disk

use registry::{CurriculumRegistry, DependencyResolver, FileOutcome};
use shared::{ArtifactKind, ScanConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn intro_school(campaign_requires: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "domains/computing/python/basics/module.yaml",
        r#"
id: computing.python.basics
produces:
  - computing.python.basics.apply
requires: []
"#,
    );
    write(
        dir.path(),
        "projects/intro/campaign.yaml",
        &format!(
            r#"
id: proj.intro
sub_goal: "x"
modules:
  - computing.python.basics
requires:
  - {}
"#,
            campaign_requires
        ),
    );
    dir
}

#[test]
fn test_campaign_requirement_produced_by_module() {
    let school = intro_school("computing.python.basics.apply");
    let (registry, report) = CurriculumRegistry::scan(&ScanConfig::for_school_root(school.path()));

    assert!(!report.has_failures());
    assert!(registry.get(ArtifactKind::Module, "computing.python.basics").is_some());
    assert!(registry.get(ArtifactKind::Campaign, "proj.intro").is_some());

    let resolver = DependencyResolver::new(&registry);
    assert!(resolver.unmet_requirements("proj.intro").is_empty());
    assert!(resolver.closure_report().is_closed());
    assert!(resolver.dangling_references().is_empty());
}

#[test]
fn test_campaign_requirement_nobody_produces() {
    let school = intro_school("computing.python.loops.apply");
    let (registry, _) = CurriculumRegistry::scan(&ScanConfig::for_school_root(school.path()));
    let resolver = DependencyResolver::new(&registry);

    assert_eq!(
        resolver.unmet_requirements("proj.intro"),
        vec!["computing.python.loops.apply"]
    );

    let report = resolver.closure_report();
    assert!(!report.is_closed());
    assert!(report.total_missing.contains("computing.python.loops.apply"));
}

#[test]
fn test_numeric_title_keeps_produced_competency_in_graph() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "games/module.yaml",
        "id: computing.games.g2048\ntitle: 2048\nproduces: [computing.games.g2048.apply]\n",
    );
    write(
        dir.path(),
        "games/campaign.yaml",
        "id: proj.games\nsub_goal: x\nmodules: [computing.games.g2048]\nrequires: [computing.games.g2048.apply]\n",
    );

    let (registry, report) = CurriculumRegistry::scan(&ScanConfig::new(vec![dir.path().to_path_buf()]));
    assert!(!report.has_failures());

    let resolver = DependencyResolver::new(&registry);
    assert!(resolver.unmet_requirements("proj.games").is_empty());
    assert!(resolver.closure_report().is_closed());
}

#[test]
fn test_broken_file_does_not_hide_other_artifacts() {
    let school = intro_school("computing.python.basics.apply");
    write(school.path(), "domains/computing/broken/module.yaml", "id: [oops\nproduces: {\n");

    let (registry, report) = CurriculumRegistry::scan(&ScanConfig::for_school_root(school.path()));

    assert_eq!(report.failures().count(), 1);
    assert_eq!(report.loaded().count(), 2);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_scanning_twice_is_idempotent() {
    let school = intro_school("computing.python.basics.apply");
    write(
        school.path(),
        "tracks/python/track.yaml",
        "id: track.python\ngoal: Automate my work\ncampaigns:\n  - id: proj.intro\n    title: Intro\n",
    );
    let config = ScanConfig::for_school_root(school.path()).with_root(school.path().join("tracks"));

    let (first, first_report) = CurriculumRegistry::scan(&config);
    let (second, second_report) = CurriculumRegistry::scan(&config);

    assert_eq!(first_report, second_report);
    for kind in [ArtifactKind::Module, ArtifactKind::Campaign, ArtifactKind::Track] {
        assert_eq!(first.all(kind), second.all(kind));
    }
    assert_eq!(first.len(), 3);
}

#[test]
fn test_duplicate_ids_across_roots_are_flagged() {
    let school = intro_school("computing.python.basics.apply");
    write(
        school.path(),
        "projects/copy/module.yaml",
        "id: computing.python.basics\nproduces: [computing.python.basics.construct]\n",
    );

    let (registry, _) = CurriculumRegistry::scan(&ScanConfig::for_school_root(school.path()));

    // projects/ is scanned after domains/, so its copy wins
    let module = registry.module("computing.python.basics").unwrap();
    assert!(module.produces_competency("computing.python.basics.construct"));
    assert_eq!(registry.collisions().len(), 1);
    assert!(registry.collisions()[0].replacement.ends_with("projects/copy/module.yaml"));
}

#[test]
fn test_learner_state_under_root_is_excluded() {
    let school = intro_school("computing.python.basics.apply");
    write(
        school.path(),
        "projects/learner_state/local_user/student_state.yaml",
        "id: local_user\nproduces: [fake.fake.fake.apply]\n",
    );

    let (registry, report) = CurriculumRegistry::scan(&ScanConfig::for_school_root(school.path()));

    assert!(registry.module("local_user").is_none());
    assert!(report
        .outcomes()
        .iter()
        .any(|o| matches!(o, FileOutcome::Excluded { path } if path.ends_with("student_state.yaml"))));
}
