//! Header, status line and navigation bar

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles, Theme};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Title plus the informational CPU/memory summary.
pub fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let system = &state.system;
    let summary = if system.cpu_model.is_empty() {
        "System information unavailable".to_string()
    } else {
        system.to_string()
    };

    let header = Paragraph::new(vec![
        Line::from(Span::styled("Hardened System Kickstart", Styles::title())),
        Line::from(Span::styled(summary, Styles::text_secondary())),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Styles::border_inactive()),
    )
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// One-line feedback under the form, led by the selected marking in its
/// banner colors.
pub fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    let level = state.builder.classification;
    let status = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", level), Theme::classification_style(level)),
        Span::styled(" ", Styles::text()),
        Span::styled(state.status_message.clone(), Styles::text_secondary()),
    ]));
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    area: Rect,
    mode: &AppMode,
    keybinding_ctx: &KeybindingContext,
) {
    let mut spans = Vec::new();
    for (i, item) in keybinding_ctx.get_nav_items(mode).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Styles::nav_hint()));
        }
        spans.push(Span::styled(
            item.key_display,
            ratatui::style::Style::default().fg(Colors::PRIMARY),
        ));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
