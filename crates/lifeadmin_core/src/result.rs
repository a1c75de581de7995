use serde_json::Value;

/// Decoded `/process` response.
///
/// Every field is independently optional. Presence follows the response's
/// truthiness: `null`, `false`, `0` and `""` count as absent, with the
/// exception of `logged`, where an explicit `false` is kept apart from absence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessResult {
    pub parsed: Option<ParsedTask>,
    pub ocr_text: Option<String>,
    pub email_result: Option<EmailResult>,
    pub todoist_task: Option<TodoistTask>,
    pub logged: Option<bool>,
}

/// Structured task fields as display text. No semantic validation happens
/// client-side; a missing or `null` field is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTask {
    pub task_type: Option<String>,
    pub provider: Option<String>,
    pub amount: Option<String>,
    pub due_date: Option<String>,
    pub reminder_days_before: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailResult {
    /// `None` when the field is missing or not an integral HTTP status.
    pub status_code: Option<u16>,
}

impl EmailResult {
    pub fn accepted(&self) -> bool {
        self.status_code == Some(202)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoistTask {
    pub url: Option<String>,
}

impl ProcessResult {
    /// Reads the `result` object out of a full response body. A body without
    /// one yields a result with every field absent.
    pub fn from_response(body: &Value) -> Self {
        body.get("result")
            .map(Self::from_result_value)
            .unwrap_or_default()
    }

    pub fn from_result_value(result: &Value) -> Self {
        Self {
            parsed: present(result, "parsed").map(parse_task),
            ocr_text: present(result, "ocr_text").map(display_text),
            email_result: present(result, "email_result").map(|email| EmailResult {
                status_code: email.get("status_code").and_then(status_code),
            }),
            todoist_task: present(result, "todoist_task").map(|task| TodoistTask {
                url: present(task, "url").map(display_text),
            }),
            logged: match result.get("logged") {
                Some(Value::Bool(logged)) => Some(*logged),
                _ => None,
            },
        }
    }
}

fn parse_task(parsed: &Value) -> ParsedTask {
    let field = |key: &str| {
        parsed
            .get(key)
            .filter(|value| !value.is_null())
            .map(display_text)
    };
    ParsedTask {
        task_type: field("task_type"),
        provider: field("provider"),
        amount: field("amount"),
        due_date: field("due_date"),
        reminder_days_before: field("reminder_days_before"),
        email: field("email"),
    }
}

fn present<'a>(object: &'a Value, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| is_truthy(value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn status_code(value: &Value) -> Option<u16> {
    let code = value.as_f64()?;
    if code.fract() != 0.0 || !(0.0..=f64::from(u16::MAX)).contains(&code) {
        return None;
    }
    Some(code as u16)
}
