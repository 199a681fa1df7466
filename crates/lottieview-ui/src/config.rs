// crates/lottieview-ui/src/config.rs
//
// Startup configuration, read once from the environment and argv and then
// passed by value into the app. Nothing reads env vars after startup.
//
// Parsing runs before the log subscriber exists, so problems are collected in
// `warnings` and main() logs them once logging is up.

use std::path::{Path, PathBuf};

use crate::theme::ThemeMode;

pub const THEME_ENV: &str = "LOTTIEVIEW_THEME";
pub const LOG_FILE:  &str = "lottieview.log";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub theme:        ThemeMode,
    /// "Open with" argument, already normalized to a source URI.
    pub initial_file: Option<String>,
    pub log_dir:      PathBuf,
    pub warnings:     Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let theme = std::env::var(THEME_ENV).ok();
        let arg   = std::env::args().nth(1);
        Self::from_parts(theme.as_deref(), arg.as_deref(), std::env::temp_dir())
    }

    /// Build from raw inputs. Unknown theme names fall back to light; a
    /// relative file argument is resolved against the working directory when
    /// it exists.
    pub fn from_parts(theme: Option<&str>, file_arg: Option<&str>, log_dir: PathBuf) -> Self {
        let mut warnings = Vec::new();
        let theme = match theme {
            Some(raw) => ThemeMode::parse(raw).unwrap_or_else(|| {
                warnings.push(format!("unknown {THEME_ENV}={raw:?}; using light"));
                ThemeMode::Light
            }),
            None => ThemeMode::Light,
        };

        let initial_file = file_arg
            .map(str::trim)
            .filter(|a| !a.is_empty() && !a.starts_with('-'))
            .and_then(|a| {
                let resolved = std::fs::canonicalize(Path::new(a))
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_else(|_| a.to_string());
                lottieview_core::helpers::uri::normalize_source(&resolved)
            });

        Self { theme, initial_file, log_dir, warnings }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp() -> PathBuf { PathBuf::from("/tmp") }

    #[test]
    fn defaults_to_light_without_file() {
        let c = AppConfig::from_parts(None, None, tmp());
        assert_eq!(c.theme, ThemeMode::Light);
        assert_eq!(c.initial_file, None);
        assert_eq!(c.log_path(), PathBuf::from("/tmp/lottieview.log"));
    }

    #[test]
    fn theme_from_env_value() {
        assert_eq!(AppConfig::from_parts(Some("DARK"), None, tmp()).theme, ThemeMode::Dark);
        assert_eq!(AppConfig::from_parts(Some("neon"), None, tmp()).theme, ThemeMode::Light);
    }

    #[test]
    fn unknown_theme_is_kept_as_a_warning() {
        let c = AppConfig::from_parts(Some("neon"), None, tmp());
        assert_eq!(c.warnings, vec![format!("unknown {THEME_ENV}=\"neon\"; using light")]);
        assert!(AppConfig::from_parts(Some("dark"), None, tmp()).warnings.is_empty());
    }

    #[test]
    fn file_argument_becomes_uri() {
        let c = AppConfig::from_parts(None, Some("/no/such/dir/anim.json"), tmp());
        assert_eq!(c.initial_file.as_deref(), Some("file:///no/such/dir/anim.json"));

        let c = AppConfig::from_parts(None, Some("file:///a/b.lottie"), tmp());
        assert_eq!(c.initial_file.as_deref(), Some("file:///a/b.lottie"));
    }

    #[test]
    fn flags_and_blank_arguments_are_ignored() {
        assert_eq!(AppConfig::from_parts(None, Some("--verbose"), tmp()).initial_file, None);
        assert_eq!(AppConfig::from_parts(None, Some("   "), tmp()).initial_file, None);
    }
}
