//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only Normal mode goes through the keymap. Search input, form editing and
//! confirmation dialogs use fixed keys (see `update`).

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic actions available from the user list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Enter search mode; typing filters live.
    StartSearch,
    /// Drop the current search term.
    ClearSearch,
    /// Open the "Add New User" form.
    NewUser,
    /// Open the selected record read-only.
    ViewSelection,
    /// Open the selected record for editing.
    EditSelection,
    /// Ask to remove the selected record.
    DeleteSelection,
    /// Re-trigger the remote load.
    Refresh,
    OpenHelp,
    ToggleKeybindsPane,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Ignore,
}

#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Arrow keys and vim-style j/k, plus single-letter commands.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('c')), KeyAction::ClearSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Char('a')), KeyAction::NewUser);
        bindings.insert((M::NONE, Enter), KeyAction::ViewSelection);
        bindings.insert((M::NONE, Char('v')), KeyAction::ViewSelection);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('r')), KeyAction::Refresh);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        // Shift+K arrives differently depending on the terminal
        bindings.insert((M::SHIFT, Char('k')), KeyAction::ToggleKeybindsPane);
        bindings.insert((M::SHIFT, Char('K')), KeyAction::ToggleKeybindsPane);
        bindings.insert((M::NONE, Char('K')), KeyAction::ToggleKeybindsPane);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Left), KeyAction::PageUp);
        bindings.insert((M::NONE, Right), KeyAction::PageDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PageUp);
        bindings.insert((M::NONE, Char('l')), KeyAction::PageDown);

        Self { bindings }
    }

    /// Load from `path`, falling back to the platform config dir, else write defaults to `path`.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        if let Some(existing) = crate::app::config_file_read_path("keybinds.conf") {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::debug!(error = %e, path = %path.display(), "could not write default keybinds");
        }
        km
    }

    /// Parse `<Action> = <KeySpec>` lines on top of the defaults.
    ///
    /// Returns `None` only if the file cannot be read. Unknown lines are skipped.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            }
        }
        map
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# usercore keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Up, Down, Left, Right, PageUp, PageDown, Delete, /, ?\n");
        buf.push_str("# Actions: Quit, StartSearch, ClearSearch, NewUser, ViewSelection, EditSelection, DeleteSelection, Refresh, OpenHelp, ToggleKeybindsPane, MoveUp, MoveDown, PageUp, PageDown, Ignore\n\n");

        let mut entries: Vec<(String, KeyAction)> = self
            .bindings
            .iter()
            .map(|((m, c), a)| (Self::format_key(*m, *c), *a))
            .collect();
        entries.sort_by(|a, b| format_action(a.1).cmp(format_action(b.1)).then(a.0.cmp(&b.0)));
        for (k, a) in entries {
            let _ = writeln!(&mut buf, "{} = {}", format_action(a), k);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Human-readable key spec, e.g. "Ctrl+c", "PageDown", "Shift+K".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else if mods.contains(KeyModifiers::SHIFT) {
            format!("Shift+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = if let Some(after) = s.strip_prefix("Ctrl+") {
        (KeyModifiers::CONTROL, after)
    } else if let Some(after) = s.strip_prefix("Shift+") {
        (KeyModifiers::SHIFT, after)
    } else {
        (KeyModifiers::NONE, s)
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "StartSearch" => Some(KeyAction::StartSearch),
        "ClearSearch" => Some(KeyAction::ClearSearch),
        "NewUser" => Some(KeyAction::NewUser),
        "ViewSelection" => Some(KeyAction::ViewSelection),
        "EditSelection" => Some(KeyAction::EditSelection),
        "DeleteSelection" => Some(KeyAction::DeleteSelection),
        "Refresh" => Some(KeyAction::Refresh),
        "OpenHelp" => Some(KeyAction::OpenHelp),
        "ToggleKeybindsPane" => Some(KeyAction::ToggleKeybindsPane),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::StartSearch => "StartSearch",
        KeyAction::ClearSearch => "ClearSearch",
        KeyAction::NewUser => "NewUser",
        KeyAction::ViewSelection => "ViewSelection",
        KeyAction::EditSelection => "EditSelection",
        KeyAction::DeleteSelection => "DeleteSelection",
        KeyAction::Refresh => "Refresh",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::ToggleKeybindsPane => "ToggleKeybindsPane",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::Ignore => "Ignore",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn defaults_resolve_core_actions() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&key(KeyCode::Char('/'), KeyModifiers::NONE)), Some(KeyAction::StartSearch));
        assert_eq!(km.resolve(&key(KeyCode::Delete, KeyModifiers::NONE)), Some(KeyAction::DeleteSelection));
        assert_eq!(km.resolve(&key(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parse_overrides_and_skips_garbage() {
        let km = Keymap::parse("# comment\nRefresh = F\nNotAnAction = x\nQuit = Ctrl+q\nbroken line\n");
        assert_eq!(km.resolve(&key(KeyCode::Char('F'), KeyModifiers::NONE)), Some(KeyAction::Refresh));
        assert_eq!(km.resolve(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn format_key_round_trips_through_parse() {
        for (m, c) in [
            (KeyModifiers::CONTROL, KeyCode::Char('c')),
            (KeyModifiers::SHIFT, KeyCode::Char('K')),
            (KeyModifiers::NONE, KeyCode::PageDown),
        ] {
            assert_eq!(parse_key(&Keymap::format_key(m, c)), Some((m, c)));
        }
    }
}
