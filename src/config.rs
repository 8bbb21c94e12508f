use crate::i18n::DisplayMode;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Localization
    pub display_mode: DisplayMode,
    pub sanitize_text: bool,
    pub validate_pairs: bool,
    pub max_depth: usize,
    pub collapse_language_maps: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Localization
            display_mode: match std::env::var("DISPLAY_MODE") {
                Ok(value) => value.parse().context("DISPLAY_MODE is invalid")?,
                Err(_) => DisplayMode::Single,
            },
            sanitize_text: env_flag("SANITIZE_TEXT", false),
            validate_pairs: env_flag("VALIDATE_PAIRS", false),
            max_depth: std::env::var("MAX_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|depth| *depth > 0)
                .unwrap_or(256),
            collapse_language_maps: env_flag("COLLAPSE_LANGUAGE_MAPS", false),
        })
    }
}

/// Read a boolean flag; anything other than true/false/1/0 keeps the default.
fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name)
        .map(|v| v.trim().to_ascii_lowercase())
        .as_deref()
    {
        Ok("true") | Ok("1") => true,
        Ok("false") | Ok("0") => false,
        _ => default,
    }
}
