use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState, Severity};
use crate::store::Status;
use crate::form::{FormMode, UserForm};
use crate::loader::{self, LoadResult, RemoteLoader};
use crate::ui;

/// What the event loop should do after a key was handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Continue,
    Refresh,
    Quit,
}

/// Drive the TUI until the user quits.
///
/// The store is only touched on this thread; loads run on `runtime` and come back
/// through a channel drained once per tick.
pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: AppState,
    loader: RemoteLoader,
    runtime: &Handle,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<LoadResult>();

    app.begin_refresh();
    loader::spawn_fetch(runtime, loader.clone(), tx.clone());

    loop {
        while let Ok(result) = rx.try_recv() {
            app.apply_load_result(result);
        }
        app.expire_toast(Instant::now());

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key(&mut app, key) {
                    Effect::Quit => break,
                    Effect::Refresh => {
                        info!("refresh requested");
                        app.begin_refresh();
                        loader::spawn_fetch(runtime, loader.clone(), tx.clone());
                    }
                    Effect::Continue => {}
                }
            }
        }
    }
    Ok(())
}

/// Route a key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Effect {
    match app.input_mode {
        InputMode::Normal => handle_normal(app, key),
        InputMode::Search => handle_search(app, key),
        InputMode::Modal => {
            handle_modal(app, key.code);
            Effect::Continue
        }
    }
}

fn handle_normal(app: &mut AppState, key: KeyEvent) -> Effect {
    let Some(action) = app.keymap.resolve(&key) else {
        return Effect::Continue;
    };
    debug!(?action, "key action");
    // The table is hidden unless the store is ready; don't act on a row nobody sees.
    let table_shown = app.store.status() == Status::Ready;
    if !table_shown
        && matches!(
            action,
            KeyAction::ViewSelection | KeyAction::EditSelection | KeyAction::DeleteSelection
        )
    {
        return Effect::Continue;
    }
    let len = app.store.filtered_view().len();
    let rpp = app.rows_per_page.max(1);
    match action {
        KeyAction::Quit => return Effect::Quit,
        KeyAction::Refresh => return Effect::Refresh,
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::ClearSearch => app.set_search_term(""),
        KeyAction::NewUser => app.open_modal(ModalState::Form(UserForm::add())),
        KeyAction::ViewSelection => {
            if let Some(form) = app.selected_user().map(UserForm::view) {
                app.open_modal(ModalState::Form(form));
            }
        }
        KeyAction::EditSelection => {
            if let Some(form) = app.selected_user().map(UserForm::edit) {
                app.open_modal(ModalState::Form(form));
            }
        }
        KeyAction::DeleteSelection => {
            if let Some((id, name)) = app.selected_user().map(|u| (u.id, u.name.clone())) {
                app.open_modal(ModalState::DeleteConfirm { id, name, selected: 0 });
            }
        }
        KeyAction::OpenHelp => app.open_modal(ModalState::Help { scroll: 0 }),
        KeyAction::ToggleKeybindsPane => app.show_keybinds = !app.show_keybinds,
        KeyAction::MoveUp => app.selected_index = app.selected_index.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.selected_index + 1 < len {
                app.selected_index += 1;
            }
        }
        KeyAction::PageUp => app.selected_index = app.selected_index.saturating_sub(rpp),
        KeyAction::PageDown => {
            app.selected_index = app.selected_index.saturating_add(rpp).min(len.saturating_sub(1));
        }
        KeyAction::Ignore => {}
    }
    Effect::Continue
}

fn handle_search(app: &mut AppState, key: KeyEvent) -> Effect {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Effect::Quit,
            _ => Effect::Continue,
        };
    }
    match key.code {
        KeyCode::Esc => {
            app.set_search_term("");
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            let mut term = app.store.search_term().to_string();
            term.pop();
            app.set_search_term(term);
        }
        KeyCode::Char(c) => {
            let term = format!("{}{}", app.store.search_term(), c);
            app.set_search_term(term);
        }
        _ => {}
    }
    Effect::Continue
}

fn handle_modal(app: &mut AppState, code: KeyCode) {
    let Some(modal) = app.modal.take() else {
        app.input_mode = InputMode::Normal;
        return;
    };
    // Handlers put the modal back unless it should close.
    match modal {
        ModalState::Form(form) => handle_form(app, form, code),
        ModalState::DeleteConfirm { id, name, selected } => match code {
            KeyCode::Esc | KeyCode::Char('n') => app.close_modal(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                app.modal = Some(ModalState::DeleteConfirm { id, name, selected: 1 - selected.min(1) });
            }
            KeyCode::Char('y') => confirm_delete(app, id),
            KeyCode::Enter => {
                if selected == 0 {
                    confirm_delete(app, id);
                } else {
                    app.close_modal();
                }
            }
            _ => app.modal = Some(ModalState::DeleteConfirm { id, name, selected }),
        },
        ModalState::Help { scroll } => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => app.close_modal(),
            KeyCode::Up | KeyCode::Char('k') => app.modal = Some(ModalState::Help { scroll: scroll.saturating_sub(1) }),
            KeyCode::Down | KeyCode::Char('j') => app.modal = Some(ModalState::Help { scroll: scroll.saturating_add(1) }),
            _ => app.modal = Some(ModalState::Help { scroll }),
        },
    }
}

fn handle_form(app: &mut AppState, mut form: UserForm, code: KeyCode) {
    if form.is_read_only() {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_modal(),
            KeyCode::Char('e') => app.modal = Some(ModalState::Form(form.into_edit())),
            _ => app.modal = Some(ModalState::Form(form)),
        }
        return;
    }
    match code {
        KeyCode::Esc => {
            app.close_modal();
            return;
        }
        KeyCode::Enter => {
            submit_form(app, form);
            return;
        }
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.pop_char(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
    app.modal = Some(ModalState::Form(form));
}

/// Validate, then add or update. An invalid form stays open with its field errors.
fn submit_form(app: &mut AppState, mut form: UserForm) {
    if !form.validate() {
        debug!(errors = form.errors.len(), "form rejected");
        app.modal = Some(ModalState::Form(form));
        return;
    }
    match form.mode {
        FormMode::Add => {
            app.store.add(form.to_new_user());
            app.selected_index = 0;
            app.notify(Severity::Success, "Member added successfully");
        }
        FormMode::Edit => {
            let updated = form.to_user().is_some_and(|user| app.store.update(user));
            if updated {
                app.notify(Severity::Success, "Profile updated successfully");
            } else {
                app.notify(Severity::Error, "Member no longer exists");
            }
        }
        FormMode::View => {}
    }
    app.clamp_selection();
    app.close_modal();
}

fn confirm_delete(app: &mut AppState, id: crate::model::UserId) {
    app.store.delete(id);
    app.clamp_selection();
    app.notify(Severity::Success, "Member removed from team");
    app.close_modal();
}
