use crate::outline::PasteOptions;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const RC_FILE_NAME: &str = ".outlinerc";
const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq)]
pub struct RcConfig {
    pub column_gap: usize,
    pub tab_stop: usize,
    pub show_whitespace: bool,
    pub log_level: String,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            column_gap: 2,
            tab_stop: 4,
            show_whitespace: false,
            log_level: "info".to_string(),
        }
    }
}

impl RcConfig {
    pub fn paste_options(&self) -> PasteOptions {
        PasteOptions {
            column_gap: self.column_gap,
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .outlinerc in:
    /// 1. Current directory
    /// 2. Home directory (~/.outlinerc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load from the default locations, falling back to defaults.
    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(path) => Self::load_from(&path),
            None => RcConfig::default(),
        }
    }

    /// Load a specific file. An unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> RcConfig {
        let mut config = RcConfig::default();

        // Silently fall back to defaults if we can't read the file
        if let Ok(content) = fs::read_to_string(path) {
            Self::parse_config_content(&content, &mut config);
        }

        config
    }

    fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        let setting = line.strip_prefix("set ").map(str::trim).unwrap_or(line);

        match setting {
            "list" => config.show_whitespace = true,
            "nolist" => config.show_whitespace = false,
            _ => {
                if let Some((key, value)) = setting.split_once('=') {
                    Self::apply_setting(key.trim(), value.trim(), config);
                }
            }
        }
    }

    fn apply_setting(key: &str, value: &str, config: &mut RcConfig) {
        match key {
            "column_gap" | "columngap" | "gap" => {
                if let Ok(gap) = value.parse::<usize>() {
                    if (1..=8).contains(&gap) {
                        config.column_gap = gap;
                    }
                }
            }
            "tabstop" | "tab_stop" | "ts" => {
                if let Ok(tab_stop) = value.parse::<usize>() {
                    if (1..=16).contains(&tab_stop) {
                        config.tab_stop = tab_stop;
                    }
                }
            }
            "list" | "whitespace" | "show_whitespace" => {
                config.show_whitespace = value == "true" || value == "1" || value == "yes";
            }
            "log_level" | "loglevel" => {
                let level = value.to_ascii_lowercase();
                if LOG_LEVELS.contains(&level.as_str()) {
                    config.log_level = level;
                }
            }
            _ => {} // Unknown setting, ignore
        }
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# outline-notes configuration file (.outlinerc)
# Lines starting with # or " are comments

# Spaces between aligned columns when pasting spreadsheet rows
set column_gap=2

# Display settings
set tabstop=4          # Width of a literal tab in the editor view
set nolist             # Show whitespace markers (set list to enable)

# Diagnostics: error, warn, info, debug or trace
log_level=info
"#
        .to_string()
    }
}
