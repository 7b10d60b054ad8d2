use chrono::{DateTime, Local};
use iced::widget::{button, column, container, row, text};
use iced::{Color, Element, Fill};
use reduce_ping::{AggregateStatus, Issue, Severity};

pub fn format_time(time: &DateTime<Local>) -> String {
    time.format("%d.%m.%Y %H:%M:%S").to_string()
}

pub fn label_text(label: &str) -> text::Text<'_> {
    text(label).size(15).color(Color::from_rgb(0.7, 0.7, 0.7))
}

pub fn status_text(status: AggregateStatus) -> text::Text<'static> {
    text(status.label()).size(18).color(match status {
        AggregateStatus::Enabled => Color::from_rgb(0.4, 1.0, 0.4),
        AggregateStatus::PartiallyEnabled => Color::from_rgb(1.0, 0.75, 0.3),
        AggregateStatus::Disabled => Color::from_rgb(1.0, 0.4, 0.4),
    })
}

pub fn info_row<'a, M: 'a>(
    label: &'a str,
    value: impl Into<Element<'a, M>>,
) -> iced::widget::Row<'a, M> {
    row![label_text(label).width(130), value.into()].spacing(10)
}

pub fn card_style(_theme: &iced::Theme, bg_color: Color, border_color: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: border_color,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

fn notice_style(bg_color: Color, border_color: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: border_color,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

pub fn warning_box<'a, M: Clone + 'static>(
    message: &'a str,
    on_restart: M,
) -> container::Container<'a, M> {
    container(
        row![
            text(message).size(13).width(Fill),
            restart_button(on_restart).padding([5, 10]),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center),
    )
    .padding(10)
    .style(|_theme| notice_style(Color::from_rgb(0.25, 0.2, 0.15), Color::from_rgb(0.6, 0.5, 0.3)))
}

pub fn message_box<'a, M: 'a>(message: &'a str) -> container::Container<'a, M> {
    container(text(message).size(14))
        .padding(12)
        .width(Fill)
        .style(|_| notice_style(Color::from_rgb(0.2, 0.25, 0.15), Color::from_rgb(0.5, 0.6, 0.3)))
}

pub fn error_box<'a, M: 'a>(message: &'a str) -> container::Container<'a, M> {
    container(
        text(message)
            .size(14)
            .color(Color::from_rgb(1.0, 0.6, 0.6)),
    )
    .padding(12)
    .width(Fill)
    .style(|_| notice_style(Color::from_rgb(0.3, 0.12, 0.12), Color::from_rgb(0.7, 0.3, 0.3)))
}

pub fn issue_list<'a, M: 'a>(issues: &'a [Issue]) -> iced::widget::Column<'a, M> {
    issues.iter().fold(column![].spacing(4), |col, issue| {
        let color = match issue.severity {
            Severity::Warning => Color::from_rgb(1.0, 0.75, 0.3),
            Severity::Aborted | Severity::Fatal => Color::from_rgb(1.0, 0.45, 0.45),
        };
        col.push(text(&issue.message).size(12).color(color))
    })
}

pub fn restart_button<M: Clone>(on_press: M) -> button::Button<'static, M> {
    button("Restart as admin")
        .on_press(on_press)
        .style(|_theme, status| {
            let base_color = match status {
                button::Status::Active => Color::from_rgb(0.4, 0.3, 0.2),
                button::Status::Hovered => Color::from_rgb(0.5, 0.4, 0.3),
                button::Status::Pressed => Color::from_rgb(0.35, 0.25, 0.15),
                _ => Color::from_rgb(0.4, 0.3, 0.2),
            };
            button::Style {
                background: Some(iced::Background::Color(base_color)),
                text_color: Color::WHITE,
                border: iced::Border {
                    radius: 6.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })
}
