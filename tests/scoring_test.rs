//! Scoring contract tests through the public API

use chrono::{DateTime, Duration, TimeZone, Utc};
use profile_trust::config::TrustConfig;
use profile_trust::models::{Account, BehaviorMetrics, Prompt};
use profile_trust::scoring::{
    compute_behavior_index, compute_completeness, compute_credibility, ScoringOrchestrator,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap()
}

#[test]
fn test_completeness_worked_example() {
    let config = TrustConfig::default();
    let mut account = Account::new("a", now());
    account.name = "Sam".to_string();
    account.age = Some(31);
    account.images = vec!["1.jpg".into(), "2.jpg".into(), "3.jpg".into()];
    account.questionnaire.education = Some("BSc".to_string());
    account.questionnaire.has_children = Some(false);

    let (completeness, age_days) = compute_completeness(&account, now(), &config.completeness);
    assert_eq!(completeness, 40);
    assert_eq!(age_days, 0);
}

#[test]
fn test_credibility_worked_example() {
    let config = TrustConfig::default();
    let mut account = Account::new("a", now() - Duration::days(365));
    account.profile_completeness = 100;
    account.account_age_days = 365;

    assert_eq!(compute_credibility(&account, &config.credibility), 100);
}

#[test]
fn test_behavior_worked_example() {
    let config = TrustConfig::default();
    let metrics = BehaviorMetrics {
        report_count: 2,
        ghosting_incidents: 1,
        positive_interactions: 3,
        conversation_length: 20,
        mutual_matches: 1,
        ..Default::default()
    };
    assert_eq!(compute_behavior_index(&metrics, &config.behavior), 83);
}

#[test]
fn test_scores_stay_in_range_for_extreme_inputs() {
    let orchestrator = ScoringOrchestrator::default();
    let extremes = [
        BehaviorMetrics {
            report_count: u32::MAX,
            ghosting_incidents: u32::MAX,
            inappropriate_messages: u32::MAX,
            response_rate: -1e12,
            average_rating: -1e12,
            ..Default::default()
        },
        BehaviorMetrics {
            positive_interactions: u32::MAX,
            conversation_length: u32::MAX,
            mutual_matches: u32::MAX,
            response_rate: 1e12,
            average_rating: 1e12,
            ..Default::default()
        },
        BehaviorMetrics {
            response_rate: f64::NAN,
            average_rating: f64::INFINITY,
            ..Default::default()
        },
    ];

    for metrics in extremes {
        let mut account = Account::new("x", now() - Duration::days(10_000));
        account.behavior_metrics = metrics;
        let scores = orchestrator.refresh(&mut account, now());
        assert!(scores.credibility_score <= 100);
        assert!(scores.behavior_index <= 100);
        assert!(scores.profile_completeness <= 100);
    }
}

#[test]
fn test_completeness_is_idempotent() {
    let config = TrustConfig::default();
    let mut account = Account::new("a", now() - Duration::days(3));
    account.name = "Lee".to_string();
    account.prompts = vec![
        Prompt::new("Best trip", "Lisbon"),
        Prompt::new("Green flag", "Punctual"),
        Prompt::new("Sunday", "Long walk"),
    ];

    let first = compute_completeness(&account, now(), &config.completeness);
    let second = compute_completeness(&account, now(), &config.completeness);
    assert_eq!(first, second);
}

#[test]
fn test_edit_flow_then_recompute() {
    let orchestrator = ScoringOrchestrator::default();
    let mut account = Account::new("a", now() - Duration::days(73));

    let after_edit = orchestrator.on_account_mutated(&mut account, now());
    assert_eq!(after_edit.profile_completeness, 0);
    assert_eq!(after_edit.account_age_days, 73);
    assert_eq!(after_edit.credibility_score, 70);
    assert_eq!(after_edit.behavior_index, 85);

    // 5*20*0.4 + 100*0.3 + 0*0.2 + 20*0.1 = 72
    let recomputed = orchestrator.recompute_scores(&mut account);
    assert_eq!(recomputed.credibility_score, 72);
    assert_eq!(recomputed.behavior_index, 85);
}

#[test]
fn test_config_from_toml_changes_scores() {
    let config = TrustConfig::from_toml_str(
        r#"
[behavior]
base_score = 50.0
"#,
    )
    .unwrap();
    let orchestrator = ScoringOrchestrator::new(config);
    let mut account = Account::new("a", now());

    assert_eq!(orchestrator.recompute_scores(&mut account).behavior_index, 50);
}
