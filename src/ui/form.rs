//! Profile form rendering
//!
//! Left panel: profile, classification, identity and disk choices.
//! Right panel: one row per logical volume, the volume group budget gauge and
//! the OK button.

use crate::app::{AppState, FormField};
use crate::engine::partition::{self, Volume};
use crate::logic::resolver;
use crate::theme::{Colors, Styles, Theme};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use strum::IntoEnumIterator;

const LABEL_WIDTH: usize = 18;

pub fn render_form(f: &mut Frame, area: Rect, state: &AppState) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);
    render_options(f, left, state);
    render_partitions(f, right, state);
}

fn panel(title: &str, active: bool) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), Styles::category()))
        .borders(Borders::ALL)
        .border_style(if active {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        })
}

/// `label  value` with the focus highlight on the value.
fn row(label: &str, value: String, focused: bool, value_style: Style) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    Line::from(vec![
        Span::styled(marker.to_string(), Styles::title()),
        Span::styled(format!("{:<LABEL_WIDTH$}", label), Styles::text_secondary()),
        Span::styled(
            value,
            if focused { Styles::selected() } else { value_style },
        ),
    ])
}

fn checkbox(label: String, checked: bool, focused: bool) -> Line<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    row("", format!("{} {}", mark, label), focused, Styles::text())
}

fn render_options(f: &mut Frame, area: Rect, state: &AppState) {
    let builder = &state.builder;
    let focused = state.focused();
    let spec = builder.profile.spec();
    let resolution = resolver::resolve(builder.profile, state.disk_total_gb());

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut focus_line = 0;
    let mut push = |lines: &mut Vec<Line<'static>>, line: Line<'static>, field: Option<FormField>| {
        if field.is_some() && field == Some(focused) {
            focus_line = lines.len();
        }
        lines.push(line);
    };

    let selector = |text: &str, on: bool| {
        if on {
            format!("< {} >", text)
        } else {
            text.to_string()
        }
    };

    push(
        &mut lines,
        row(
            "System Profile",
            selector(spec.name, focused == FormField::Profile),
            focused == FormField::Profile,
            Styles::text(),
        ),
        Some(FormField::Profile),
    );
    let mut detail = format!(
        "{}Gb recommended, {}Gb detected, {} package entries",
        spec.min_disk_gb,
        state.disk_total_gb(),
        resolution.packages.len()
    );
    if !spec.hardening {
        detail.push_str(", hardening deferred");
    }
    push(
        &mut lines,
        Line::from(Span::styled(
            format!("  {:<LABEL_WIDTH$}{}", "", detail),
            Styles::text_muted(),
        )),
        None,
    );
    push(
        &mut lines,
        row(
            "Classification",
            selector(
                &builder.classification.to_string(),
                focused == FormField::Classification,
            ),
            focused == FormField::Classification,
            Theme::classification_style(builder.classification),
        ),
        Some(FormField::Classification),
    );

    let text_value = |value: &str, field: FormField| {
        if focused == field {
            format!("{}_", value)
        } else {
            value.to_string()
        }
    };
    push(
        &mut lines,
        row(
            "Hostname",
            text_value(&builder.hostname, FormField::Hostname),
            focused == FormField::Hostname,
            Styles::text(),
        ),
        Some(FormField::Hostname),
    );
    if state.fields().contains(&FormField::Ip) {
        push(
            &mut lines,
            row(
                "IP Address",
                text_value(&builder.static_network.ip, FormField::Ip),
                focused == FormField::Ip,
                Styles::text(),
            ),
            Some(FormField::Ip),
        );
        push(
            &mut lines,
            row(
                "Netmask",
                text_value(&builder.static_network.netmask, FormField::Netmask),
                focused == FormField::Netmask,
                Styles::text(),
            ),
            Some(FormField::Netmask),
        );
    }

    push(&mut lines, Line::from(""), None);
    push(
        &mut lines,
        Line::from(Span::styled("  Install Disks", Styles::category())),
        None,
    );
    if builder.disks.is_empty() {
        push(
            &mut lines,
            Line::from(Span::styled("    No disks detected", Styles::error())),
            None,
        );
    }
    for (i, disk) in builder.disks.iter().enumerate() {
        let label = state
            .inventory
            .label(i)
            .unwrap_or_else(|| disk.device.clone());
        let field = FormField::Disk(i);
        push(
            &mut lines,
            checkbox(label, disk.selected, focused == field),
            Some(field),
        );
    }

    push(&mut lines, Line::from(""), None);
    push(
        &mut lines,
        checkbox(
            "Encrypt disks (LUKS)".to_string(),
            builder.encrypt,
            focused == FormField::Encrypt,
        ),
        Some(FormField::Encrypt),
    );
    push(
        &mut lines,
        checkbox(
            "Install TIM configuration".to_string(),
            state.tim,
            focused == FormField::Tim,
        ),
        Some(FormField::Tim),
    );
    push(
        &mut lines,
        checkbox(
            "Install CORE configuration".to_string(),
            state.core,
            focused == FormField::Core,
        ),
        Some(FormField::Core),
    );

    // Keep the focused row visible on short terminals
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (focus_line + 1).saturating_sub(visible);
    let active = !matches!(focused, FormField::Volume(_) | FormField::Submit);
    let paragraph = Paragraph::new(lines)
        .block(panel("System", active))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}

fn render_partitions(f: &mut Frame, area: Rect, state: &AppState) {
    let plan = &state.builder.plan;
    let focused = state.focused();
    let status = partition::validate(plan);

    let [volumes_area, gauge_area, button_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(area);

    let lines: Vec<Line<'static>> = Volume::iter()
        .map(|volume| {
            let field = FormField::Volume(volume);
            let value = plan.get(volume);
            let text = if focused == field {
                format!("< {:>3}% >", value)
            } else {
                format!("  {:>3}%", value)
            };
            let style = if volume.is_optional() && value == 0 {
                Styles::text_muted()
            } else {
                Styles::text()
            };
            row(&volume.label(), text, focused == field, style)
        })
        .collect();

    let active = matches!(focused, FormField::Volume(_));
    f.render_widget(
        Paragraph::new(lines).block(panel("LVM Partitioning (%)", active)),
        volumes_area,
    );

    let (gauge_color, label) = if status.is_over() {
        (Colors::ERROR, format!("{}% used - over budget", status.used()))
    } else {
        (Colors::SUCCESS, format!("{}% used", status.used()))
    };
    let ratio = f64::from(status.used().min(100)) / 100.0;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Volume Group ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(gauge_color)),
        )
        .gauge_style(Style::default().fg(gauge_color).bg(Colors::BG_PRIMARY))
        .ratio(ratio)
        .label(Span::styled(label, Styles::text()));
    f.render_widget(gauge, gauge_area);

    let button_style = if focused == FormField::Submit {
        Styles::button_active()
    } else {
        Styles::button_inactive()
    };
    let button = Paragraph::new(Line::from(Span::styled("[   OK   ]", button_style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(
            if focused == FormField::Submit {
                Styles::border_active()
            } else {
                Styles::border_inactive()
            },
        ));
    f.render_widget(button, button_area);
}
