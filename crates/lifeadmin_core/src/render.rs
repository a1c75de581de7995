//! Result rendering: maps a [`ProcessResult`] to three independent display
//! fragments (task summary, raw text, actions summary).
//!
//! Rendering is a pure function and is re-run wholesale for every completed
//! submission; nothing is patched incrementally.

use crate::{ProcessResult, ParsedTask};

pub const NO_STRUCTURED_DATA: &str = "No structured data detected.";
pub const NO_OCR_TEXT: &str = "No OCR text.";
pub const MISSING_FIELD: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub task_summary: TaskSummary,
    pub raw_text: String,
    pub actions: Vec<ActionLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSummary {
    Fields(Vec<LabeledField>),
    NoStructuredData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSignal {
    Email,
    TaskCreation,
    Logging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLine {
    pub signal: ActionSignal,
    pub outcome: ActionOutcome,
    pub text: String,
    pub link: Option<Link>,
}

/// Hyperlink that opens in a new browsing context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub label: String,
}

pub fn render_result(result: &ProcessResult) -> RenderedResult {
    RenderedResult {
        task_summary: task_summary(result.parsed.as_ref()),
        raw_text: result
            .ocr_text
            .clone()
            .unwrap_or_else(|| NO_OCR_TEXT.to_string()),
        actions: [email_line(result), task_line(result), logging_line(result)]
            .into_iter()
            .flatten()
            .collect(),
    }
}

fn task_summary(parsed: Option<&ParsedTask>) -> TaskSummary {
    let Some(parsed) = parsed else {
        return TaskSummary::NoStructuredData;
    };
    let fields = [
        ("Task Type", &parsed.task_type),
        ("Provider", &parsed.provider),
        ("Amount", &parsed.amount),
        ("Due Date", &parsed.due_date),
        ("Reminder (days before)", &parsed.reminder_days_before),
        ("Email", &parsed.email),
    ];
    TaskSummary::Fields(
        fields
            .into_iter()
            .map(|(label, value)| LabeledField {
                label,
                value: value.clone().unwrap_or_else(|| MISSING_FIELD.to_string()),
            })
            .collect(),
    )
}

fn email_line(result: &ProcessResult) -> Option<ActionLine> {
    let email = result.email_result.as_ref()?;
    Some(if email.accepted() {
        ActionLine::plain(ActionSignal::Email, ActionOutcome::Positive, "Email notification sent")
    } else {
        ActionLine::plain(ActionSignal::Email, ActionOutcome::Negative, "Email failed or skipped")
    })
}

fn task_line(result: &ProcessResult) -> Option<ActionLine> {
    let task = result.todoist_task.as_ref()?;
    Some(match &task.url {
        Some(url) => ActionLine {
            signal: ActionSignal::TaskCreation,
            outcome: ActionOutcome::Positive,
            text: "Todoist task created:".to_string(),
            link: Some(Link {
                href: url.clone(),
                label: "View Task".to_string(),
            }),
        },
        None => ActionLine::plain(
            ActionSignal::TaskCreation,
            ActionOutcome::Negative,
            "Todoist task NOT created",
        ),
    })
}

fn logging_line(result: &ProcessResult) -> Option<ActionLine> {
    match result.logged? {
        true => Some(ActionLine::plain(
            ActionSignal::Logging,
            ActionOutcome::Positive,
            "Logged to Database",
        )),
        false => Some(ActionLine::plain(
            ActionSignal::Logging,
            ActionOutcome::Negative,
            "Logging failed",
        )),
    }
}

impl ActionLine {
    fn plain(signal: ActionSignal, outcome: ActionOutcome, text: &str) -> Self {
        Self {
            signal,
            outcome,
            text: text.to_string(),
            link: None,
        }
    }

    pub fn to_text(&self) -> String {
        match &self.link {
            Some(link) => format!("{} {} <{}>", self.text, link.label, link.href),
            None => self.text.clone(),
        }
    }

    pub fn to_html(&self) -> String {
        match &self.link {
            Some(link) => format!(
                "{} <a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                escape_html(&self.text),
                escape_html(&link.href),
                escape_html(&link.label)
            ),
            None => escape_html(&self.text),
        }
    }
}

impl TaskSummary {
    pub fn lines(&self) -> Vec<String> {
        match self {
            TaskSummary::Fields(fields) => fields
                .iter()
                .map(|field| format!("{}: {}", field.label, field.value))
                .collect(),
            TaskSummary::NoStructuredData => vec![NO_STRUCTURED_DATA.to_string()],
        }
    }
}

impl RenderedResult {
    pub fn task_summary_html(&self) -> String {
        match &self.task_summary {
            TaskSummary::Fields(fields) => fields
                .iter()
                .map(|field| {
                    format!(
                        "<p><b>{}:</b> {}</p>",
                        escape_html(field.label),
                        escape_html(&field.value)
                    )
                })
                .collect(),
            TaskSummary::NoStructuredData => format!("<p>{NO_STRUCTURED_DATA}</p>"),
        }
    }

    pub fn raw_text_html(&self) -> String {
        format!("<pre>{}</pre>", escape_html(&self.raw_text))
    }

    /// One `<br>`-terminated line per action; empty when no signal is present.
    pub fn actions_html(&self) -> String {
        self.actions
            .iter()
            .map(|line| format!("{}<br>", line.to_html()))
            .collect()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
