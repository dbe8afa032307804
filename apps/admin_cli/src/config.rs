use std::{fs, io, num::NonZeroUsize, path::Path};

use anyhow::Context;
use client_core::{PaginationMode, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_FILE: &str = "admin.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub token: Option<String>,
    pub page_size: NonZeroUsize,
    pub pagination: PaginationMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".into(),
            token: None,
            page_size: DEFAULT_PAGE_SIZE,
            pagination: PaginationMode::Client,
        }
    }
}

/// Keys accepted in `admin.toml`; anything missing keeps its default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    token: Option<String>,
    page_size: Option<NonZeroUsize>,
    server_pagination: Option<bool>,
}

/// Defaults, then the config file, then the environment.
///
/// A missing default `admin.toml` is fine; a missing file named explicitly
/// is an error.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let file = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(file) {
        Ok(raw) => settings
            .apply_file(&raw)
            .with_context(|| format!("failed to parse {}", file.display()))?,
        Err(err) if path.is_none() && err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", file.display()));
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

impl Settings {
    pub fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file.api_url {
            self.api_url = v;
        }
        if let Some(v) = file.token {
            self.token = Some(v);
        }
        if let Some(v) = file.page_size {
            self.page_size = v;
        }
        if let Some(server) = file.server_pagination {
            self.pagination = pagination_mode(server);
        }
        Ok(())
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("ADMIN_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = lookup("APP__API_URL") {
            self.api_url = v;
        }

        if let Some(v) = lookup("ADMIN_TOKEN") {
            self.token = Some(v);
        }
        if let Some(v) = lookup("APP__TOKEN") {
            self.token = Some(v);
        }

        if let Some(v) = lookup("APP__PAGE_SIZE") {
            match v.trim().parse::<NonZeroUsize>() {
                Ok(parsed) => self.page_size = parsed,
                Err(error) => warn!(value = %v, %error, "ignoring invalid APP__PAGE_SIZE"),
            }
        }

        if let Some(v) = lookup("APP__SERVER_PAGINATION") {
            match v.trim().parse::<bool>() {
                Ok(server) => self.pagination = pagination_mode(server),
                Err(error) => warn!(value = %v, %error, "ignoring invalid APP__SERVER_PAGINATION"),
            }
        }
    }
}

fn pagination_mode(server: bool) -> PaginationMode {
    if server {
        PaginationMode::Server
    } else {
        PaginationMode::Client
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
