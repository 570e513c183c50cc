use std::path::PathBuf;

use clap::Parser;

use crate::app::config_file_write_path;
use crate::loader::DEFAULT_ENDPOINT;

#[derive(Parser, Debug)]
#[command(name = "usercore", version, about = "Browse, search and edit users from a REST endpoint")]
pub struct Cli {
    /// URL returning the JSON list of users
    #[arg(long, env = "USERCORE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, env = "USERCORE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "usercore=debug"
    #[arg(long, env = "USERCORE_LOG", default_value = "info")]
    pub log_level: String,

    /// Theme file (key = value)
    #[arg(long)]
    pub theme: Option<PathBuf>,

    /// Keybindings file (Action = Key)
    #[arg(long)]
    pub keybinds: Option<PathBuf>,
}

impl Cli {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| config_file_write_path("usercore.log"))
    }

    pub fn theme_path(&self) -> PathBuf {
        self.theme.clone().unwrap_or_else(|| config_file_write_path("theme.conf"))
    }

    pub fn keybinds_path(&self) -> PathBuf {
        self.keybinds
            .clone()
            .unwrap_or_else(|| config_file_write_path("keybinds.conf"))
    }
}
