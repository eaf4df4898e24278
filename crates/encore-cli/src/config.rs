// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use encore_app::ArtistId;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_BUSY_TIMEOUT: &str = "5s";
const DEFAULT_ARTIST_ID: i64 = 1;
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            profile: Profile::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
    pub busy_timeout: Option<String>,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            db_path: None,
            busy_timeout: Some(DEFAULT_BUSY_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub artist_id: Option<i64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            artist_id: Some(DEFAULT_ARTIST_ID),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub color: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self { color: Some(true) }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub filter: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("ENCORE_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set ENCORE_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(encore_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and put values under [storage], [profile], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1. Regenerate it with `encore --print-example-config`",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if let Some(db_path) = &self.storage.db_path {
            encore_db::validate_db_path(db_path)?;
        }

        if let Some(timeout) = &self.storage.busy_timeout {
            let parsed = parse_duration(timeout)?;
            if parsed.is_zero() {
                bail!(
                    "storage.busy_timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(artist_id) = self.profile.artist_id
            && artist_id <= 0
        {
            bail!(
                "profile.artist_id in {} must be a positive id, got {}",
                path.display(),
                artist_id
            );
        }

        if let Some(filter) = &self.log.filter {
            EnvFilter::try_new(filter).map_err(|error| {
                anyhow!(
                    "log.filter in {} is not a valid filter ({error}); try \"warn\" or \"encore_db=debug\"",
                    path.display()
                )
            })?;
        }

        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => encore_db::default_db_path(),
        }
    }

    pub fn busy_timeout(&self) -> Result<Duration> {
        parse_duration(
            self.storage
                .busy_timeout
                .as_deref()
                .unwrap_or(DEFAULT_BUSY_TIMEOUT),
        )
    }

    pub fn artist_id(&self) -> ArtistId {
        ArtistId::new(self.profile.artist_id.unwrap_or(DEFAULT_ARTIST_ID))
    }

    pub fn color(&self) -> bool {
        self.ui.color.unwrap_or(true)
    }

    pub fn log_filter(&self) -> &str {
        self.log.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# encore config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/encore/encore.db)\n# db_path = \"/absolute/path/to/encore.db\"\nbusy_timeout = \"{}\"\n\n[profile]\nartist_id = {}\n\n[ui]\ncolor = true\n\n[log]\n# Overridden by RUST_LOG when set.\nfilter = \"{}\"\n",
            path.display(),
            DEFAULT_BUSY_TIMEOUT,
            DEFAULT_ARTIST_ID,
            DEFAULT_LOG_FILTER,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("timeout duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
