//! Shared UI components (status bar, placeholder panels, modal helpers).
//!
use std::collections::{BTreeMap, BTreeSet};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::{KeyAction, Keymap};
use crate::app::{AppState, InputMode, Severity};
use crate::store::Status;

/// Render the bottom status bar with mode, counts and the current toast.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let status = match app.store.status() {
        Status::Loading => "loading",
        Status::Ready => "ready",
        Status::Error => "error",
    };
    let base = Style::default().fg(app.theme.status_fg).bg(app.theme.status_bg);
    let mut spans = vec![Span::styled(
        format!(
            "mode: {mode}  status: {status}  users:{}  shown:{}  ?: help  q: quit",
            app.store.users().len(),
            app.store.filtered_view().len(),
        ),
        base,
    )];
    if let Some(toast) = &app.toast {
        let fg = match toast.severity {
            Severity::Success => app.theme.success,
            Severity::Error => app.theme.error,
        };
        spans.push(Span::styled(
            format!("  {}", toast.message),
            base.fg(fg).add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

fn panel<'a>(app: &AppState, title: &'a str) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border))
}

pub fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    let dots = ".".repeat((app.started_at.elapsed().as_millis() / 300 % 4) as usize);
    let p = Paragraph::new(format!("Loading users from {}{dots}", app.endpoint))
        .style(Style::default().fg(app.theme.muted))
        .wrap(Wrap { trim: false })
        .block(panel(app, "Users"));
    f.render_widget(p, area);
}

pub fn render_error(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = vec![
        Line::from(Span::styled(
            app.store.error().unwrap_or("Unknown error").to_string(),
            Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled("Press r to retry.", Style::default().fg(app.theme.muted))),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(panel(app, "Error"));
    f.render_widget(p, area);
}

pub fn render_empty(f: &mut Frame, area: Rect, app: &AppState) {
    let lines = vec![
        Line::from(format!("No results found for \"{}\"", app.store.search_term())),
        Line::raw(""),
        Line::from(Span::styled(
            "Press c to clear the search, n to add a user.",
            Style::default().fg(app.theme.muted),
        )),
    ];
    let p = Paragraph::new(lines)
        .style(Style::default().fg(app.theme.text))
        .block(panel(app, "Users"));
    f.render_widget(p, area);
}

fn action_label(action: KeyAction) -> Option<&'static str> {
    Some(match action {
        KeyAction::Quit => "Quit",
        KeyAction::StartSearch => "Search",
        KeyAction::ClearSearch => "Clear search",
        KeyAction::NewUser => "Add user",
        KeyAction::ViewSelection => "View user",
        KeyAction::EditSelection => "Edit user",
        KeyAction::DeleteSelection => "Remove user",
        KeyAction::Refresh => "Refresh",
        KeyAction::OpenHelp => "Help",
        KeyAction::ToggleKeybindsPane => "Toggle this panel",
        KeyAction::MoveUp => "Move up",
        KeyAction::MoveDown => "Move down",
        KeyAction::PageUp => "Page up",
        KeyAction::PageDown => "Page down",
        KeyAction::Ignore => return None,
    })
}

/// Render the right-side keybinds viewer, grouped by action.
pub fn render_keybinds_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let block = panel(app, "Keybindings");
    let inner = block.inner(area);

    let mut by_action: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings() {
        if let Some(label) = action_label(action) {
            by_action.entry(label).or_default().insert(Keymap::format_key(mods, code));
        }
    }

    let col1_w = by_action.keys().map(|k| k.len()).max().unwrap_or(0);
    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        "Dashboard:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (label, keys) in &by_action {
        let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
        lines.push(Line::from(vec![
            Span::raw(format!("  {:>width$} │ ", label, width = col1_w)),
            Span::styled(joined, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Form:", Style::default().add_modifier(Modifier::BOLD))));
    for (label, value) in [
        ("Next / previous field", "Tab, Shift+Tab"),
        ("Save", "Enter"),
        ("Cancel / Close", "Esc"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("  {label} │ ")),
            Span::styled(value, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the help modal with usage tips.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 72u16.min(area.width.saturating_sub(4)).max(40);
    let height = 20u16.min(area.height.saturating_sub(4)).max(10);
    let rect = centered_rect(width, height, area);

    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let row = |label: &'static str, keys: &'static str| Line::from(vec![Span::raw(label), Span::styled(keys, italic)]);
    let lines: Vec<Line> = vec![
        row("Navigate: ", "↑ ↓ / j k, PageUp PageDown / h l"),
        row("Search by name, email or company: ", "/  (Enter keeps, Esc clears)"),
        row("Clear search: ", "c"),
        row("Add user: ", "n"),
        row("View / edit user: ", "Enter / e"),
        row("Remove user: ", "Delete / d"),
        row("Reload from server: ", "r"),
        row("Keybindings panel: ", "Shift+K"),
        row("Quit: ", "q"),
        Line::raw(""),
        Line::from(Span::styled(
            "Changes are kept in memory only and are lost on reload or exit.",
            Style::default().fg(app.theme.muted),
        )),
        Line::raw(""),
        row("Close help: ", "Esc / Enter"),
    ];

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(panel(app, "Help"));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
