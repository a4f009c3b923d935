use riskchat_core::{
    AgentEnvelope, DuplicateLabelPolicy, Normalizer, NormalizerConfig, RiskLevel, normalize,
};
use serde_json::{Value, json};

fn assert_empty(payload: Value) {
    let message = normalize(&payload);
    assert_eq!(message.display_text, "", "payload: {payload}");
    assert!(message.risk_badges.is_empty());
    assert!(message.risk_chart.is_none());
    assert!(message.tables.is_empty());
    assert!(message.files.is_empty());
    assert!(message.missing_data.is_empty());
    assert!(!message.show_pie_chart);
    assert!(!message.show_table);
}

#[test]
fn payloads_without_optional_fields_normalize_to_empty_message() {
    assert_empty(json!(null));
    assert_empty(json!({}));
    assert_empty(json!([]));
    assert_empty(json!(""));
    assert_empty(json!({"text": "   ", "formatted": null, "missing_data": []}));
}

#[test]
fn wrong_shapes_are_treated_as_absent() {
    let message = normalize(&json!({
        "text": 42,
        "reasoning": ["not", "a", "string"],
        "missing_data": {"unexpected": true},
        "data": "not an object"
    }));
    assert!(message.risk_badges.is_empty());
    assert!(message.missing_data.is_empty());
    assert!(message.files.is_empty());
    assert!(message.tables.is_empty());
}

#[test]
fn percentages_become_chart_in_text_order() {
    let message = normalize(&json!({"text": "ФНС 40%, Арбитраж 50%, Банк 10%"}));
    let chart = message.risk_chart.expect("chart");
    assert_eq!(chart.values, vec![40, 50, 10]);
    assert_eq!(chart.labels, vec!["ФНС", "Арбитраж", "Банк"]);
    assert_eq!(chart.colors.len(), 3);
    assert!(message.show_pie_chart);
}

#[test]
fn duplicate_chart_labels_follow_policy() {
    let payload = json!({"text": "ФНС 40%, Банк 10%, ФНС 70%"});

    let first = normalize(&payload).risk_chart.expect("chart");
    assert_eq!(first.labels, vec!["ФНС", "Банк"]);
    assert_eq!(first.values, vec![40, 10]);

    let normalizer =
        Normalizer::new(NormalizerConfig::default().with_duplicate_labels(DuplicateLabelPolicy::KeepLast));
    let last = normalizer.normalize(&payload).risk_chart.expect("chart");
    assert_eq!(last.labels, vec!["ФНС", "Банк"]);
    assert_eq!(last.values, vec![70, 10]);
}

#[test]
fn reasoning_payload_gets_summary_and_missing_data() {
    let message = normalize(&json!({
        "reasoning": "Компания банкрот с долгами.",
        "tools": ["get_company_data"],
        "missing_data": ["данные о блокировках счетов"],
        "confidence": "высокий"
    }));
    assert!(message.display_text.contains("Резюме"));
    assert!(message.display_text.contains("Компания банкрот с долгами."));
    assert!(message.display_text.contains("get_company_data"));
    assert_eq!(message.missing_data, vec!["данные о блокировках счетов"]);

    let labels: Vec<&str> = message.risk_badges.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Банкротство", "Задолженность"]);
    assert_eq!(message.risk_badges[0].level, RiskLevel::High);
}

#[test]
fn links_and_nested_sequences_become_files_and_tables() {
    let message = normalize(&json!({
        "text": "Скачайте выписку: http://example.com/report.pdf",
        "data": {"deals": [{"id": 1, "status": "open"}, {"id": 2, "status": "closed"}]}
    }));

    assert_eq!(message.files.len(), 1);
    assert!(message.files[0].url.contains("report.pdf"));
    assert_eq!(message.files[0].label.as_deref(), Some("Скачайте выписку"));
    assert!(message.files[0].is_pdf());

    let table = &message.tables[0];
    assert_eq!(table.title.as_deref(), Some("deals"));
    assert!(table.columns.iter().any(|c| c == "id"));
    assert!(table.columns.iter().any(|c| c == "status"));
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.cell(1, "status"), "closed");
    assert!(message.show_table);
}

#[test]
fn normalizing_twice_yields_identical_messages() {
    let payload = json!({
        "reasoning": {"text": "Долги 30%, суды 70%. Отчёт: https://example.com/a.pdf", "tools": ["fns"]},
        "risk_level": "medium",
        "data": {"history": [{"role": "agent"}], "rows": [{"a": 1}, {"b": null}]}
    });
    assert_eq!(normalize(&payload), normalize(&payload));
}

#[test]
fn repeated_file_url_yields_one_file() {
    let message = normalize(&json!({
        "text": "Отчёт: https://example.com/r.pdf и снова https://example.com/r.pdf."
    }));
    assert_eq!(message.files.len(), 1);
    assert_eq!(message.files[0].url, "https://example.com/r.pdf");
}

#[test]
fn reordering_unrelated_keys_keeps_detected_tables() {
    let a: Value = serde_json::from_str(
        r#"{"text": "x", "deals": [{"id": 1}], "meta": {"owners": [{"name": "A"}]}}"#,
    )
    .unwrap();
    let b: Value = serde_json::from_str(
        r#"{"meta": {"owners": [{"name": "A"}]}, "deals": [{"id": 1}], "text": "x"}"#,
    )
    .unwrap();

    let mut titles_a: Vec<Option<String>> = normalize(&a).tables.into_iter().map(|t| t.title).collect();
    let mut titles_b: Vec<Option<String>> = normalize(&b).tables.into_iter().map(|t| t.title).collect();
    assert_eq!(titles_a, vec![Some("deals".to_string()), Some("owners".to_string())]);
    assert_eq!(titles_b, vec![Some("owners".to_string()), Some("deals".to_string())]);

    titles_a.sort();
    titles_b.sort();
    assert_eq!(titles_a, titles_b);
}

#[test]
fn a2a_envelope_is_summarized_with_debug_tables() {
    let body = json!({
        "ok": true,
        "data": {"result": {
            "status": {"state": "completed"},
            "artifacts": [{"parts": [{"kind": "text", "text": "Риск высокий: ликвидация"}]}],
            "history": [{"role": "user", "parts": [{"kind": "text", "text": "проверь ООО"}]}]
        }}
    });
    let payload = AgentEnvelope::parse(&body).into_payload().unwrap();
    let message = normalize(payload);

    assert!(message.display_text.starts_with("Статус: completed"));
    assert!(message.display_text.contains("Риск высокий: ликвидация"));
    assert!(message.tables.iter().any(|t| t.debug));
    assert!(message.user_tables().next().is_none());
    assert!(!message.show_table);
    assert!(message.risk_badges.iter().any(|b| b.label == "Ликвидация"));
}

#[test]
fn message_serializes_with_camel_case_keys() {
    let message = normalize(&json!({"text": "Долг 20%", "missingData": ["ИНН"]}));
    let json = serde_json::to_value(&message).unwrap();
    assert!(json.get("displayText").is_some());
    assert!(json.get("riskBadges").is_some());
    assert!(json.get("riskChart").is_some());
    assert_eq!(json["missingData"], json!(["ИНН"]));
    assert_eq!(json["showPieChart"], json!(true));
}

#[test]
fn joining_words_stay_out_of_chart_labels() {
    let message = normalize(&json!({"text": "ФНС 40% и Арбитраж 60%"}));
    let chart = message.risk_chart.expect("chart");
    assert_eq!(chart.labels, vec!["ФНС", "Арбитраж"]);
    assert_eq!(chart.values, vec![40, 60]);

    let message = normalize(&json!({"text": "Арбитраж 50%, ФНС 40% и Арбитраж 60%"}));
    let chart = message.risk_chart.expect("chart");
    assert_eq!(chart.labels, vec!["Арбитраж", "ФНС"]);
    assert_eq!(chart.values, vec![50, 40]);
}

#[test]
fn backend_response_scans_only_agent_answer() {
    let body = json!({
        "ok": true,
        "text": "Скоринг: ФНС 30%",
        "formatted": "Статус: completed\n\nОтвет:\nСкоринг: ФНС 30%\n\nИстория:\n• user: проверь ликвидацию ООО Ромашка https://example.com/q.pdf 90%",
        "data": {"result": {
            "status": {"state": "completed"},
            "artifacts": [{"parts": [{"kind": "text", "text": "Скоринг: ФНС 30%"}]}],
            "history": [{"role": "user", "parts": [{"kind": "text", "text": "проверь ликвидацию ООО Ромашка https://example.com/q.pdf 90%"}]}]
        }}
    });
    let payload = AgentEnvelope::parse(&body).into_payload().unwrap();
    let message = normalize(payload);

    assert!(message.display_text.contains("История:"));
    assert!(message.risk_badges.is_empty());
    assert!(message.files.is_empty());
    let chart = message.risk_chart.expect("chart");
    assert_eq!(chart.labels, vec!["ФНС"]);
    assert_eq!(chart.values, vec![30]);
}

#[test]
fn fallback_payload_urls_are_not_escaped() {
    let message = normalize(&json!({"foo": "см. http://x.com/a.pdf\nдалее"}));
    assert_eq!(message.files.len(), 1);
    assert_eq!(message.files[0].url, "http://x.com/a.pdf");
    assert_eq!(message.files[0].mime.as_deref(), Some("application/pdf"));
}

#[test]
fn negated_findings_do_not_raise_badges() {
    let message = normalize(&json!({
        "text": "Признаков банкротства не выявлено. Блокировок счетов нет. Низкий риск."
    }));
    let labels: Vec<&str> = message.risk_badges.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Низкий риск"]);
    assert_eq!(message.risk_badges[0].level, RiskLevel::Low);
}
