use super::*;

fn descriptor(name: &str, is_fork: bool) -> RepositoryDescriptor {
    RepositoryDescriptor {
        owner: "alice".to_string(),
        name: name.to_string(),
        is_fork,
        api_url: format!("https://api.github.com/repos/alice/{name}"),
    }
}

#[test]
fn test_delete_target_from_fork() {
    let target = DeleteTarget::from_descriptor(&descriptor("r2", true));

    assert_eq!(
        target,
        Some(DeleteTarget::new("https://api.github.com/repos/alice/r2"))
    );
}

#[test]
fn test_delete_target_from_non_fork() {
    assert_eq!(DeleteTarget::from_descriptor(&descriptor("r1", false)), None);
}

#[test]
fn test_deletion_outcome_constructors() {
    let target = DeleteTarget::new("https://api.github.com/repos/alice/r4");

    let ok = DeletionOutcome::succeeded(target.clone());
    assert!(ok.succeeded);
    assert_eq!(ok.error_detail, None);

    let failed = DeletionOutcome::failed(target, "403");
    assert!(!failed.succeeded);
    assert_eq!(failed.error_detail.as_deref(), Some("403"));
}

#[test]
fn test_run_mode_from_delete_flag() {
    assert_eq!(RunMode::from_delete_flag(false), RunMode::DryRun);
    assert_eq!(RunMode::from_delete_flag(true), RunMode::Execute);
    assert!(RunMode::default().is_dry_run());
}

#[test]
fn test_run_report_counts() {
    let report = RunReport::Deleted(vec![
        DeletionOutcome::succeeded(DeleteTarget::new("u1")),
        DeletionOutcome::failed(DeleteTarget::new("u2"), "boom"),
        DeletionOutcome::succeeded(DeleteTarget::new("u3")),
    ]);

    assert_eq!(report.len(), 3);
    assert_eq!(report.succeeded_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.api_urls(), vec!["u1", "u2", "u3"]);
}

#[test]
fn test_planned_report_has_no_outcomes() {
    let report = RunReport::Planned(vec![DeleteTarget::new("u1")]);

    assert_eq!(report.len(), 1);
    assert_eq!(report.succeeded_count(), 0);
    assert_eq!(report.failed_count(), 0);
    assert!(!report.is_empty());
    assert!(RunReport::Planned(Vec::new()).is_empty());
}

#[test]
fn test_run_report_serialization() {
    let report = RunReport::Planned(vec![DeleteTarget::new("u1")]);

    let value = serde_json::to_value(&report).expect("Failed to serialize report");

    assert_eq!(value["mode"], "planned");
    assert_eq!(value["entries"][0]["api_url"], "u1");
}
