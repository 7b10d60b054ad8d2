use crate::ui;
use chrono::{DateTime, Local};
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Element, Fill, Task};
use reduce_ping::status::SETTING_DESCRIPTION;
use reduce_ping::{AggregateStatus, CollectingReporter, Issue, PassSummary, ToggleError};

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Enable,
    Disable,
    StatusChecked(Report<AggregateStatus>),
    PassFinished(Report<PassSummary>),
    RestartAsAdmin,
}

/// Result of one operation plus whatever it reported along the way.
#[derive(Debug, Clone)]
pub struct Report<T> {
    pub result: Result<T, ToggleError>,
    pub issues: Vec<Issue>,
}

#[derive(Default)]
pub struct State {
    status: Option<AggregateStatus>,
    fatal: Option<String>,
    busy: bool,
    issues: Vec<Issue>,
    status_message: String,
    last_checked: Option<DateTime<Local>>,
    is_admin: bool,
}

impl State {
    pub fn new() -> Self {
        Self {
            is_admin: reduce_ping::is_admin(),
            busy: true,
            ..Default::default()
        }
    }

    fn can_enable(&self) -> bool {
        !self.busy && self.status.is_some_and(|s| s.can_enable())
    }

    fn can_disable(&self) -> bool {
        !self.busy && self.status.is_some_and(|s| s.can_disable())
    }
}

pub fn init() -> (State, Task<Message>) {
    (
        State::new(),
        Task::perform(check_status_async(), Message::StatusChecked),
    )
}

pub fn update(state: &mut State, message: Message) -> Task<Message> {
    match message {
        Message::Refresh => {
            state.busy = true;
            state.issues.clear();
            state.status_message.clear();
            Task::perform(check_status_async(), Message::StatusChecked)
        }
        Message::Enable => {
            state.busy = true;
            Task::perform(enable_async(), Message::PassFinished)
        }
        Message::Disable => {
            state.busy = true;
            Task::perform(disable_async(), Message::PassFinished)
        }
        Message::StatusChecked(report) => {
            state.busy = false;
            state.last_checked = Some(Local::now());
            match report.result {
                Ok(status) => {
                    state.status = Some(status);
                    state.fatal = None;
                }
                Err(e) => {
                    state.status = None;
                    state.fatal = Some(e.user_message());
                }
            }
            state.issues.extend(report.issues);
            Task::none()
        }
        Message::PassFinished(report) => {
            state.issues = report.issues;
            state.status_message = match report.result {
                Ok(summary) => summary.message(),
                // already in the issue list
                Err(_) => String::new(),
            };
            Task::perform(check_status_async(), Message::StatusChecked)
        }
        Message::RestartAsAdmin => {
            if let Err(e) = reduce_ping::restart_as_admin() {
                state.status_message = e.user_message();
            }
            Task::none()
        }
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let mut content = column![view_header()].spacing(5).padding(15);

    if !state.is_admin {
        content = content.push(ui::warning_box(
            "Changing the setting needs administrator rights",
            Message::RestartAsAdmin,
        ));
    }

    content = content.push(Space::with_height(10)).push(view_status_card(state));

    if let Some(fatal) = &state.fatal {
        content = content.push(Space::with_height(10)).push(ui::error_box(fatal));
    }

    if !state.status_message.is_empty() {
        content = content
            .push(Space::with_height(10))
            .push(ui::message_box(&state.status_message));
    }

    if !state.issues.is_empty() {
        content = content
            .push(Space::with_height(10))
            .push(ui::issue_list(&state.issues));
    }

    container(scrollable(content))
        .width(Fill)
        .height(Fill)
        .into()
}

fn view_header() -> Element<'static, Message> {
    row![
        text("ReducePing")
            .size(26)
            .color(iced::Color::from_rgb(0.9, 0.9, 1.0)),
        Space::with_width(Fill),
        button("Refresh")
            .on_press(Message::Refresh)
            .padding([8, 16]),
    ]
    .spacing(10)
    .padding(15)
    .align_y(iced::Alignment::Center)
    .into()
}

fn view_status_card(state: &State) -> Element<'_, Message> {
    let status: Element<'_, Message> = match state.status {
        _ if state.busy => text("Checking...").size(18).into(),
        Some(status) => ui::status_text(status).into(),
        None => text("Unavailable").size(18).into(),
    };

    let mut content = column![
        text("TCP delayed acknowledgment").size(20),
        text(SETTING_DESCRIPTION)
            .size(13)
            .color(iced::Color::from_rgb(0.7, 0.7, 0.7)),
        ui::info_row("TcpAckFrequency:", status),
    ]
    .spacing(10)
    .padding(22);

    if let Some(time) = &state.last_checked {
        content = content.push(ui::info_row(
            "Last checked:",
            text(ui::format_time(time)).size(14),
        ));
    }

    content = content.push(Space::with_height(10)).push(
        row![
            button("Enable")
                .on_press_maybe(state.can_enable().then_some(Message::Enable))
                .padding(10),
            button("Disable")
                .on_press_maybe(state.can_disable().then_some(Message::Disable))
                .padding(10),
        ]
        .spacing(15),
    );

    container(content)
        .width(Fill)
        .style(|theme| {
            ui::card_style(
                theme,
                iced::Color::from_rgb(0.15, 0.2, 0.25),
                iced::Color::from_rgb(0.3, 0.4, 0.5),
            )
        })
        .into()
}

async fn check_status_async() -> Report<AggregateStatus> {
    let reporter = CollectingReporter::new();
    let result = reduce_ping::system_toggle().and_then(|toggle| toggle.query_status(&reporter));
    Report {
        result,
        issues: reporter.into_issues(),
    }
}

async fn enable_async() -> Report<PassSummary> {
    let reporter = CollectingReporter::new();
    let result = reduce_ping::system_toggle().and_then(|toggle| toggle.enable(&reporter));
    Report {
        result,
        issues: reporter.into_issues(),
    }
}

async fn disable_async() -> Report<PassSummary> {
    let reporter = CollectingReporter::new();
    let result = reduce_ping::system_toggle().and_then(|toggle| toggle.disable(&reporter));
    Report {
        result,
        issues: reporter.into_issues(),
    }
}
