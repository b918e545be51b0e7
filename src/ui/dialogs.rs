//! Popup dialog rendering: password entry, notices and completion

use super::popup_area;
use crate::app::{Notice, PasswordDialog};
use crate::logic::validation::MIN_PASSWORD_LEN;
use crate::theme::{Severity, Styles, Theme};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::path::PathBuf;

/// Double password entry; both entries are masked.
pub fn render_password_dialog(f: &mut Frame, dialog: &PasswordDialog) {
    let area = popup_area(f.area(), 60, 40);
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" Root / Bootloader Password ", Styles::title()))
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::panel_bg());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [intro, first, second, hint] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(inner);

    f.render_widget(
        Paragraph::new(format!(
            "Minimum {} characters. Also used as the disk encryption passphrase.",
            MIN_PASSWORD_LEN
        ))
        .style(Styles::text_secondary())
        .wrap(Wrap { trim: true }),
        intro,
    );

    for (rect, title, value, focused) in [
        (first, " Password ", &dialog.first, !dialog.focus_second),
        (second, " Confirm Password ", &dialog.second, dialog.focus_second),
    ] {
        let mut masked = "*".repeat(value.chars().count());
        if focused {
            masked.push('_');
        }
        let entry = Paragraph::new(masked).style(Styles::text()).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(if focused {
                    Styles::border_active()
                } else {
                    Styles::border_inactive()
                }),
        );
        f.render_widget(entry, rect);
    }

    f.render_widget(
        Paragraph::new("Enter: Confirm | Tab: Switch | Esc: Cancel (empty entries also cancel)")
            .style(Styles::nav_hint())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        hint,
    );
}

/// Front notice of the queue; `pending` counts it too.
pub fn render_notice(f: &mut Frame, notice: &Notice, pending: usize) {
    let area = popup_area(f.area(), 50, 35);
    f.render_widget(Clear, area);

    let color = Theme::severity_color(notice.severity);
    let background = match notice.severity {
        Severity::Danger => Styles::panel_bg_danger(),
        _ => Styles::panel_bg(),
    };
    let mut title = format!(" {} ", notice.title);
    if pending > 1 {
        title.push_str(&format!("(1 of {}) ", pending));
    }

    let mut lines: Vec<Line> = notice
        .message
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Theme::severity_style(notice.severity))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[  OK  ]", Styles::button_active())).centered());

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(Span::styled(title, Style::default().fg(color)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .style(background),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Final screen listing the written include files.
pub fn render_complete(f: &mut Frame, written: &[PathBuf]) {
    let area = popup_area(f.area(), 60, 50);
    f.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("Kickstart files written:", Styles::success())),
        Line::from(""),
    ];
    lines.extend(
        written
            .iter()
            .map(|p| Line::from(Span::styled(format!("  {}", p.display()), Styles::text()))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press any key to exit", Styles::nav_hint())).centered());

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Complete ", Styles::title()))
            .borders(Borders::ALL)
            .border_style(Styles::success())
            .style(Styles::panel_bg()),
    );
    f.render_widget(paragraph, area);
}
