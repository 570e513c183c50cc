//! Application state types and entry glue.
//!
//! Defines the UI-side state that wraps the [`Store`], the theme and modal types,
//! and re-exports the event loop as `run`.
//!
pub mod keymap;
pub mod update;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use directories::ProjectDirs;
use ratatui::style::Color;

use crate::error::LoadError;
use crate::form::UserForm;
use crate::model::{User, UserId};
use crate::store::Store;
use keymap::Keymap;

/// How long a toast stays in the status bar.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub error: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            success: Color::Green,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha palette; the default.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    /// Load theme from a key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let Some(color) = Self::parse_color(val) else {
                continue;
            };
            match key.trim() {
                "text" => theme.text = color,
                "muted" => theme.muted = color,
                "title" => theme.title = color,
                "border" => theme.border = color,
                "header_bg" => theme.header_bg = color,
                "header_fg" => theme.header_fg = color,
                "status_bg" => theme.status_bg = color,
                "status_fg" => theme.status_fg = color,
                "highlight_fg" => theme.highlight_fg = color,
                "highlight_bg" => theme.highlight_bg = color,
                "success" => theme.success = color,
                "error" => theme.error = color,
                _ => {}
            }
        }
        theme
    }

    /// Parse "#RRGGBB", "RRGGBB" or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let rgb = u32::from_str_radix(hex, 16).ok()?;
        let [_, r, g, b] = rgb.to_be_bytes();
        Some(Color::Rgb(r, g, b))
    }

    fn color_to_str(c: Color) -> String {
        match c {
            Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
            Color::Reset => "reset".to_string(),
            // Named colors: best-effort hex approximation
            Color::Black => "#000000".to_string(),
            Color::Red => "#FF0000".to_string(),
            Color::Green => "#00FF00".to_string(),
            Color::Yellow => "#FFFF00".to_string(),
            Color::Blue => "#0000FF".to_string(),
            Color::Magenta => "#FF00FF".to_string(),
            Color::Cyan => "#00FFFF".to_string(),
            Color::Gray => "#B3B3B3".to_string(),
            Color::DarkGray => "#4D4D4D".to_string(),
            Color::LightRed => "#FF6666".to_string(),
            Color::LightGreen => "#66FF66".to_string(),
            Color::LightYellow => "#FFFF66".to_string(),
            Color::LightBlue => "#6666FF".to_string(),
            Color::LightMagenta => "#FF66FF".to_string(),
            Color::LightCyan => "#66FFFF".to_string(),
            Color::White => "#FFFFFF".to_string(),
            Color::Indexed(_) => "reset".to_string(),
        }
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# usercore theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        for (k, v) in [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("success", self.success),
            ("error", self.error),
        ] {
            let _ = writeln!(&mut buf, "{} = {}", k, Self::color_to_str(v));
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, buf)
    }

    /// Load `path` if present, else the copy in the config dir, else write `mocha` to `path`.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        if let Some(existing) = config_file_read_path("theme.conf") {
            return Self::from_file(&existing).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::debug!(error = %e, path = %path.display(), "could not write default theme");
        }
        t
    }
}

/// Platform config directory for usercore, if one can be determined.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "usercore").map(|d| d.config_dir().to_path_buf())
}

/// Path of `name` in the config directory, if that file exists.
pub fn config_file_read_path(name: &str) -> Option<PathBuf> {
    let p = config_dir()?.join(name);
    p.exists().then_some(p)
}

/// Where `name` should be written: the config dir, or the working directory as a fallback.
pub fn config_file_write_path(name: &str) -> PathBuf {
    config_dir().map_or_else(|| PathBuf::from(name), |d| d.join(name))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Transient message shown in the status bar.
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub shown_at: Instant,
}

/// Modal dialogs drawn over the dashboard.
#[derive(Clone, Debug)]
pub enum ModalState {
    Form(UserForm),
    DeleteConfirm {
        id: UserId,
        name: String,
        /// 0 = Remove, 1 = Cancel
        selected: usize,
    },
    Help {
        scroll: u16,
    },
}

pub struct AppState {
    pub started_at: Instant,
    pub store: Store,
    /// Index into the filtered view.
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub show_keybinds: bool,
    pub toast: Option<Toast>,
    pub endpoint: String,
}

impl AppState {
    pub fn new(theme: Theme, keymap: Keymap, endpoint: impl Into<String>) -> Self {
        Self {
            started_at: Instant::now(),
            store: Store::new(),
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            theme,
            keymap,
            modal: None,
            show_keybinds: false,
            toast: None,
            endpoint: endpoint.into(),
        }
    }

    /// Currently selected record in the filtered view.
    pub fn selected_user(&self) -> Option<&User> {
        self.store.filtered_view().get(self.selected_index).copied()
    }

    /// Keep the selection inside the filtered view.
    pub fn clamp_selection(&mut self) {
        let len = self.store.filtered_view().len();
        self.selected_index = self.selected_index.min(len.saturating_sub(1));
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.store.set_search_term(term);
        self.selected_index = 0;
    }

    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            severity,
            shown_at: Instant::now(),
        });
    }

    /// Drop the toast once it has been visible for [`TOAST_TTL`].
    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= TOAST_TTL)
        {
            self.toast = None;
        }
    }

    /// Mark a load as in flight. A previous error stays but is superseded by the loading status.
    pub fn begin_refresh(&mut self) {
        self.store.set_loading(true);
    }

    /// Fold a finished load into the store.
    pub fn apply_load_result(&mut self, result: Result<Vec<User>, LoadError>) {
        match result {
            Ok(users) => {
                self.store.load(users);
                self.clamp_selection();
            }
            Err(e) => {
                let message = e.to_string();
                self.store.set_error(Some(message.clone()));
                self.notify(Severity::Error, message);
            }
        }
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::mocha(), Keymap::default(), crate::loader::DEFAULT_ENDPOINT)
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
