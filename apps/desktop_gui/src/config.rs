//! Startup configuration: defaults, then `empreinte.toml`, then environment, then flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

pub const APP_DIR_NAME: &str = "empreinte";
pub const SETTINGS_FILE_NAME: &str = "empreinte.toml";
pub const DATABASE_FILE_NAME: &str = "credentials.sqlite3";

pub const DATA_DIR_ENV: &str = "EMPREINTE_DATA_DIR";
pub const BIOMETRICS_ENV: &str = "EMPREINTE_BIOMETRICS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BiometricMode {
    /// In-app confirmation dialog standing in for the fingerprint sensor.
    #[default]
    Prompt,
    /// Behave like a device without a sensor.
    Unavailable,
}

impl BiometricMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "prompt" => Some(Self::Prompt),
            "unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(name = "empreinte", about = "Formulaire d'inscription protégé par empreinte")]
pub struct Args {
    /// Directory holding the credentials database.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub biometrics: Option<BiometricMode>,
    /// Settings file; defaults to `empreinte.toml` in the data directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub data_dir: Option<PathBuf>,
    pub biometrics: Option<BiometricMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupConfig {
    pub data_dir: Option<PathBuf>,
    pub biometrics: BiometricMode,
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_root: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn from_startup(startup: &StartupConfig) -> anyhow::Result<Self> {
        let root = match &startup.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_root()?,
        };

        Ok(Self {
            db_path: root.join(DATABASE_FILE_NAME),
            data_root: root,
        })
    }

    pub fn database_url(&self) -> String {
        storage::sqlite_url_for_path(&self.db_path)
    }
}

fn default_data_root() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .ok_or_else(|| anyhow!("unable to resolve local app data dir"))?;
    Ok(base.join(APP_DIR_NAME))
}

pub fn load_startup_config(args: &Args) -> anyhow::Result<StartupConfig> {
    let settings_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => default_data_root()
            .ok()
            .map(|root| root.join(SETTINGS_FILE_NAME))
            .filter(|path| path.exists()),
    };

    let file_settings = match settings_path {
        Some(path) => Some(read_settings_file(&path)?),
        None => None,
    };

    resolve_startup_config(args, file_settings, |name| std::env::var(name).ok())
}

pub fn read_settings_file(path: &Path) -> anyhow::Result<FileSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("invalid settings file '{}'", path.display()))
}

pub fn resolve_startup_config(
    args: &Args,
    file_settings: Option<FileSettings>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<StartupConfig> {
    let mut config = StartupConfig::default();

    if let Some(file) = file_settings {
        if file.data_dir.is_some() {
            config.data_dir = file.data_dir;
        }
        if let Some(mode) = file.biometrics {
            config.biometrics = mode;
        }
    }

    if let Some(dir) = read_non_empty(&env, DATA_DIR_ENV) {
        config.data_dir = Some(PathBuf::from(dir));
    }
    if let Some(raw) = read_non_empty(&env, BIOMETRICS_ENV) {
        config.biometrics = BiometricMode::parse(&raw)
            .ok_or_else(|| anyhow!("{BIOMETRICS_ENV}='{raw}' is not one of prompt, unavailable"))?;
    }

    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(mode) = args.biometrics {
        config.biometrics = mode;
    }

    Ok(config)
}

fn read_non_empty(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    match env(name) {
        Some(value) if value.trim().is_empty() => {
            tracing::debug!("{name} was set but empty");
            None
        }
        other => other,
    }
}
