pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};
use crate::store::Status;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(root[1]);

    render_header(f, root[0], app);

    match app.store.status() {
        Status::Loading => components::render_loading(f, root[1], app),
        Status::Error => components::render_error(f, root[1], app),
        Status::Ready if app.store.filtered_view().is_empty() => components::render_empty(f, root[1], app),
        Status::Ready => {
            users::render_users_table(f, body[0], app);
            if app.show_keybinds {
                components::render_keybinds_panel(f, body[1], app);
            } else {
                users::render_user_details(f, body[1], app);
            }
        }
    }

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let term = app.store.search_term();
    let search = match (app.input_mode, term.is_empty()) {
        (InputMode::Search, _) => Span::styled(
            format!("Search: {term}▏"),
            Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD),
        ),
        (_, true) => Span::styled(
            "Search by name, email or company... (/)",
            Style::default().fg(app.theme.muted),
        ),
        (_, false) => Span::raw(format!("Search: {term}")),
    };
    let line = Line::from(vec![
        Span::styled("UserCore", Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
        Span::raw("  User Management  "),
        search,
        Span::raw(format!("  {} Active", app.store.filtered_view().len())),
    ]);
    let p = Paragraph::new(line)
        .block(
            Block::default()
                .title("usercore")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::Form(form)) => users::render_user_form(f, area, app, form),
        Some(state @ ModalState::DeleteConfirm { .. }) => users::render_delete_confirm(f, area, app, state),
        Some(ModalState::Help { scroll }) => components::render_help_modal(f, area, app, *scroll),
        None => {}
    }
}
