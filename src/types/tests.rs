use super::*;

#[test]
fn test_effective_tokens_falls_back_to_input_plus_output() {
    let record = SessionRecord {
        updated_at: None,
        input_tokens: Some(100),
        output_tokens: Some(50),
        total_tokens: None,
    };
    assert_eq!(record.effective_tokens(), 150);
}

#[test]
fn test_effective_tokens_prefers_total() {
    let record = SessionRecord {
        updated_at: None,
        input_tokens: Some(100),
        output_tokens: Some(50),
        total_tokens: Some(200),
    };
    assert_eq!(record.effective_tokens(), 200);
}

#[test]
fn test_effective_tokens_missing_counts_as_zero() {
    let only_output = SessionRecord {
        output_tokens: Some(7),
        ..Default::default()
    };
    assert_eq!(only_output.effective_tokens(), 7);
    assert_eq!(SessionRecord::default().effective_tokens(), 0);
}

#[test]
fn test_session_record_parses_camel_case_and_ignores_extra_fields() {
    let json = r#"{
        "updatedAt": 1760000000000,
        "inputTokens": 12,
        "outputTokens": 3,
        "model": "claude-sonnet",
        "label": null
    }"#;
    let record: SessionRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.updated_at, Some(1_760_000_000_000));
    assert_eq!(record.input_tokens, Some(12));
    assert_eq!(record.output_tokens, Some(3));
    assert_eq!(record.total_tokens, None);
}

#[test]
fn test_negative_token_count_is_rejected() {
    let result: Result<SessionRecord, _> = serde_json::from_str(r#"{"inputTokens": -5}"#);
    assert!(result.is_err());
}

#[test]
fn test_reported_status_round_trips_through_str() {
    for status in ReportedStatus::ALL {
        assert_eq!(status.as_str().parse::<ReportedStatus>(), Ok(status));
    }
}

#[test]
fn test_reported_status_rejects_unknown_value_with_valid_list() {
    let err = "paused".parse::<ReportedStatus>().unwrap_err();
    assert!(err.contains("paused"));
    assert!(err.contains("working, idle, offline, unknown"));
}

#[test]
fn test_liveness_status_serializes_lowercase() {
    let json = serde_json::to_string(&LivenessStatus::Idle).unwrap();
    assert_eq!(json, "\"idle\"");
    assert_eq!(LivenessStatus::Working.to_string(), "working");
}

#[test]
fn test_summary_serializes_camel_case() {
    let summary = LivenessSummary::empty("ghost", "ghost");
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["sessionCount"], 0);
    assert_eq!(value["displayName"], "ghost");
    assert!(value["lastActive"].is_null());
    assert_eq!(value["status"], "offline");
}

#[test]
fn test_config_partial_file_uses_defaults() {
    let config: ClawPulseConfig = serde_json::from_str(r#"{"port": 4000}"#).unwrap();
    assert_eq!(config.port, Some(4000));
    assert!(config.data_root.is_none());
    assert!(config.display_names.is_empty());
}

#[test]
fn test_task_row_tolerates_numeric_id_and_missing_fields() {
    let task: Task = serde_json::from_str(r#"{"id": 42, "title": "Ship it"}"#).unwrap();
    assert_eq!(task.id, serde_json::json!(42));
    assert_eq!(task.title.as_deref(), Some("Ship it"));
    assert!(task.status.is_none());
}
