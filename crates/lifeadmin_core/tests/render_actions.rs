use lifeadmin_core::{
    render_result, ActionLine, ActionOutcome, ActionSignal, EmailResult, LabeledField, Link,
    ProcessResult, TaskSummary, TodoistTask, MISSING_FIELD, NO_OCR_TEXT, NO_STRUCTURED_DATA,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn from_result(result: Value) -> ProcessResult {
    ProcessResult::from_response(&json!({ "result": result }))
}

fn lines_for(result: &ProcessResult, signal: ActionSignal) -> Vec<ActionLine> {
    render_result(result)
        .actions
        .into_iter()
        .filter(|line| line.signal == signal)
        .collect()
}

#[test]
fn email_lines_follow_three_way_law() {
    for code in [200, 202, 400, 500] {
        let result = ProcessResult {
            email_result: Some(EmailResult {
                status_code: Some(code),
            }),
            ..ProcessResult::default()
        };
        let lines = lines_for(&result, ActionSignal::Email);
        assert_eq!(lines.len(), 1);
        let expected = if code == 202 {
            ActionOutcome::Positive
        } else {
            ActionOutcome::Negative
        };
        assert_eq!(lines[0].outcome, expected, "status {code}");
    }

    let shapeless = from_result(json!({"email_result": {"error": "no key"}}));
    let lines = lines_for(&shapeless, ActionSignal::Email);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Email failed or skipped");

    let absent = from_result(json!({}));
    assert!(lines_for(&absent, ActionSignal::Email).is_empty());
}

#[test]
fn task_creation_lines_follow_three_way_law() {
    let created = from_result(json!({"todoist_task": {"url": "https://todoist.com/x", "id": 9}}));
    let lines = lines_for(&created, ActionSignal::TaskCreation);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].outcome, ActionOutcome::Positive);
    assert_eq!(
        lines[0].link,
        Some(Link {
            href: "https://todoist.com/x".to_string(),
            label: "View Task".to_string(),
        })
    );

    let without_url = from_result(json!({"todoist_task": {"error": "quota"}}));
    let lines = lines_for(&without_url, ActionSignal::TaskCreation);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].outcome, ActionOutcome::Negative);
    assert_eq!(lines[0].text, "Todoist task NOT created");
    assert_eq!(lines[0].link, None);

    let absent = ProcessResult {
        todoist_task: None,
        ..ProcessResult::default()
    };
    assert!(lines_for(&absent, ActionSignal::TaskCreation).is_empty());

    let empty_url = ProcessResult {
        todoist_task: Some(TodoistTask { url: None }),
        ..ProcessResult::default()
    };
    assert_eq!(
        lines_for(&empty_url, ActionSignal::TaskCreation)[0].outcome,
        ActionOutcome::Negative
    );
}

#[test]
fn logging_lines_follow_three_way_law() {
    let logged = from_result(json!({"logged": true}));
    let lines = lines_for(&logged, ActionSignal::Logging);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Logged to Database");

    let failed = from_result(json!({"logged": false}));
    let lines = lines_for(&failed, ActionSignal::Logging);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Logging failed");
    assert_eq!(lines[0].outcome, ActionOutcome::Negative);

    let absent = from_result(json!({}));
    assert!(lines_for(&absent, ActionSignal::Logging).is_empty());
}

#[test]
fn full_result_renders_all_fragments() {
    let result = from_result(json!({
        "parsed": {
            "task_type": "bill",
            "provider": "Acme",
            "amount": "50",
            "due_date": "2024-01-01",
            "reminder_days_before": 3,
            "email": "a@b.com"
        },
        "ocr_text": "Invoice text",
        "email_result": {"status_code": 202},
        "todoist_task": {"url": "https://todoist.com/x"},
        "logged": true
    }));
    let rendered = render_result(&result);

    assert_eq!(
        rendered.task_summary,
        TaskSummary::Fields(vec![
            LabeledField { label: "Task Type", value: "bill".to_string() },
            LabeledField { label: "Provider", value: "Acme".to_string() },
            LabeledField { label: "Amount", value: "50".to_string() },
            LabeledField { label: "Due Date", value: "2024-01-01".to_string() },
            LabeledField { label: "Reminder (days before)", value: "3".to_string() },
            LabeledField { label: "Email", value: "a@b.com".to_string() },
        ])
    );
    assert_eq!(rendered.raw_text, "Invoice text");

    let signals: Vec<_> = rendered.actions.iter().map(|line| line.signal).collect();
    assert_eq!(
        signals,
        vec![ActionSignal::Email, ActionSignal::TaskCreation, ActionSignal::Logging]
    );
    assert!(rendered
        .actions
        .iter()
        .all(|line| line.outcome == ActionOutcome::Positive));
    assert_eq!(
        rendered.actions_html(),
        "Email notification sent<br>\
         Todoist task created: <a href=\"https://todoist.com/x\" target=\"_blank\" rel=\"noopener\">View Task</a><br>\
         Logged to Database<br>"
    );
}

#[test]
fn only_explicit_false_logging_yields_single_negative_line() {
    let result = from_result(json!({
        "parsed": {"task_type": "bill"},
        "ocr_text": "Invoice text",
        "logged": false
    }));
    let rendered = render_result(&result);

    assert_eq!(rendered.actions.len(), 1);
    assert_eq!(rendered.actions[0].signal, ActionSignal::Logging);
    assert_eq!(rendered.actions[0].outcome, ActionOutcome::Negative);
}

#[test]
fn placeholders_for_missing_sections() {
    let rendered = render_result(&ProcessResult::default());
    assert_eq!(rendered.task_summary, TaskSummary::NoStructuredData);
    assert_eq!(rendered.task_summary.lines(), vec![NO_STRUCTURED_DATA.to_string()]);
    assert_eq!(rendered.raw_text, NO_OCR_TEXT);
    assert!(rendered.actions.is_empty());
    assert_eq!(rendered.actions_html(), "");
}

#[test]
fn missing_parsed_fields_show_placeholder_value() {
    let result = from_result(json!({"parsed": {"task_type": "renewal"}}));
    let lines = render_result(&result).task_summary.lines();
    assert_eq!(lines[0], "Task Type: renewal");
    assert_eq!(lines[1], format!("Provider: {MISSING_FIELD}"));
}

#[test]
fn rendering_is_idempotent() {
    let result = from_result(json!({
        "ocr_text": "text",
        "email_result": {"status_code": 500},
        "todoist_task": {},
        "logged": false
    }));
    assert_eq!(render_result(&result), render_result(&result));
}

#[test]
fn html_output_escapes_untrusted_text() {
    let result = from_result(json!({
        "ocr_text": "<script>alert(1)</script>",
        "todoist_task": {"url": "https://todoist.com/x\"onmouseover=\"x"}
    }));
    let rendered = render_result(&result);
    assert_eq!(
        rendered.raw_text_html(),
        "<pre>&lt;script&gt;alert(1)&lt;/script&gt;</pre>"
    );
    assert!(rendered.actions_html().contains("href=\"https://todoist.com/x&quot;onmouseover=&quot;x\""));
}

#[test]
fn text_output_inlines_link_target() {
    let result = from_result(json!({"todoist_task": {"url": "https://todoist.com/x"}}));
    assert_eq!(
        render_result(&result).actions[0].to_text(),
        "Todoist task created: View Task <https://todoist.com/x>"
    );
}
