use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::app::{AppState, ModalState};
use crate::form::{FormField, UserForm};
use crate::ui::components::centered_rect;

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    app.clamp_selection();

    let view = app.store.filtered_view();
    let rpp = app.rows_per_page.max(1);
    let start = (app.selected_index / rpp) * rpp;
    let end = (start + rpp).min(view.len());
    let slice = view.get(start..end).unwrap_or_default();

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let style = if start + i == app.selected_index {
            Style::default().fg(app.theme.highlight_fg).bg(app.theme.highlight_bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(u.name.clone()),
            Cell::from(format!("@{}", u.username)),
            Cell::from(u.email.clone()),
            Cell::from(u.company.name.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(14),
        Constraint::Percentage(25),
        Constraint::Percentage(18),
        Constraint::Percentage(32),
        Constraint::Percentage(25),
    ];
    let header = Row::new(vec!["ID", "NAME", "USERNAME", "EMAIL", "COMPANY"])
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let title = format!("Users ({}/{})", view.len(), app.store.users().len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)))
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let label = Style::default().fg(app.theme.muted);
    let lines: Vec<Line> = match app.selected_user() {
        Some(u) => vec![
            Line::from(Span::styled(u.name.clone(), Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))),
            Line::from(format!("@{}", u.username)),
            Line::raw(""),
            Line::from(vec![Span::styled("Email:    ", label), Span::raw(u.email.clone())]),
            Line::from(vec![Span::styled("Phone:    ", label), Span::raw(u.phone.clone())]),
            Line::from(vec![Span::styled("Website:  ", label), Span::raw(u.website.clone())]),
            Line::from(vec![Span::styled("Company:  ", label), Span::raw(u.company.name.clone())]),
            Line::from(Span::styled(format!("          \"{}\"", u.company.catch_phrase), label.add_modifier(Modifier::ITALIC))),
            Line::from(vec![Span::styled("Address:  ", label), Span::raw(u.address_line())]),
            Line::from(vec![Span::styled("Avatar:   ", label), Span::raw(u.image_url.clone())]),
        ],
        None => vec![Line::raw("No user selected")],
    };
    let p = Paragraph::new(lines)
        .style(Style::default().fg(app.theme.text))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Details").borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(p, area);
}

/// Add/edit/view dialog. Required fields are starred; errors render under their field.
pub fn render_user_form(f: &mut Frame, area: Rect, app: &AppState, form: &UserForm) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 30u16.min(area.height.saturating_sub(2)).max(12);
    let rect = centered_rect(width, height, area);

    let mut lines: Vec<Line> = Vec::new();
    if let Some(u) = form.base().filter(|_| form.is_read_only()) {
        lines.push(Line::from(Span::styled(u.name.clone(), Style::default().add_modifier(Modifier::BOLD))));
        lines.push(Line::from(format!("@{}  {}", u.username, u.image_url)));
        lines.push(Line::raw(""));
    }
    for field in FormField::ALL {
        let focused = !form.is_read_only() && field == form.focus;
        let marker = if focused { "▶" } else { " " };
        let star = if field.required() && !form.is_read_only() { "*" } else { " " };
        let value_style = if focused {
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let cursor = if focused { "▏" } else { "" };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} {:<14}{star} ", field.label())),
            Span::styled(format!("{}{cursor}", form.draft.get(field)), value_style),
        ]));
        if let Some(err) = form.error(field) {
            lines.push(Line::from(Span::styled(format!("    {err}"), Style::default().fg(app.theme.error))));
        }
    }
    lines.push(Line::raw(""));
    let hint = if form.is_read_only() {
        "e: edit   Esc/Enter: close"
    } else {
        "Tab/↓: next   Shift+Tab/↑: prev   Enter: save   Esc: cancel"
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(app.theme.muted))));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

pub fn render_delete_confirm(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    if let ModalState::DeleteConfirm { name, selected, .. } = state {
        let rect = centered_rect(56, 8, area);
        let remove = if *selected == 0 { "[Remove]" } else { " Remove " };
        let cancel = if *selected == 1 { "[Cancel]" } else { " Cancel " };
        let body = format!(
            "Are you sure you want to remove '{name}'?\nThis action cannot be undone in the local session.\n\n  {remove}    {cancel}"
        );
        let p = Paragraph::new(body).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Remove Member?")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(p, rect);
    }
}
