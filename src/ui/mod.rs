//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - System summary, status line and navigation bar
//! - `form` - The profile form and the partition panel
//! - `dialogs` - Password, notice and completion popups
//!
//! Rendering is a pure function of [`AppState`]; all mutation happens in the
//! state machine.

mod dialogs;
mod form;
mod header;

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
};

/// Draw one frame: form underneath, dialogs stacked on top.
pub fn render(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let [header_area, body_area, status_area, nav_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    header::render_header(f, header_area, state);
    form::render_form(f, body_area, state);
    header::render_status(f, status_area, state);
    header::render_nav_bar(f, nav_area, &state.mode(), keybinding_ctx);

    if let Some(dialog) = &state.password {
        dialogs::render_password_dialog(f, dialog);
    }
    if let Some(notice) = state.notices.front() {
        dialogs::render_notice(f, notice, state.notices.len());
    }
    if let Some(written) = &state.written {
        dialogs::render_complete(f, written);
    }
    if state.help_visible {
        HelpOverlay::new(&state.mode(), keybinding_ctx).render(f, f.area());
    }
}

/// Centered rectangle taking the given share of `area`.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    area
}
