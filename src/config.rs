use std::path::PathBuf;
use std::{env, fs};

use serde::Deserialize;

use crate::{fmt, Error};

const DEFAULT_CONFIG_PATH: &str = "rankcord.toml";
const DEFAULT_DATA_PATH: &str = "leaderboard_data.json";
const DEFAULT_ACCOUNT_HOST: &str = "https://americas.api.riotgames.com";
const DEFAULT_PLATFORM_HOST: &str = "https://na1.api.riotgames.com";
const DEFAULT_FETCH_CONCURRENCY: usize = 4;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Optional on-disk settings. Anything not present falls back to a default;
/// only the env secrets are mandatory.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
struct FileConfig {
    data_path: Option<String>,
    account_host: Option<String>,
    platform_host: Option<String>,
    fetch_concurrency: Option<usize>,
    refresh_interval_minutes: Option<u64>,
    log: FileLogConfig,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
struct FileLogConfig {
    level: Option<String>,
    path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub riot_api_key: String,
    pub discord_token: String,
    pub leaderboard_channel_id: u64,
    pub data_path: PathBuf,
    pub account_host: String,
    pub platform_host: String,
    pub fetch_concurrency: usize,
    pub refresh_interval_minutes: Option<u64>,
    pub log: LogConfig,
}

/// Resolves the runtime configuration. Missing or invalid env secrets are
/// fatal; the TOML file is optional.
pub fn load_config() -> Result<AppConfig, Error> {
    dotenvy::dotenv().ok();

    let riot_api_key = require_env("RIOT_API_KEY")?;
    let discord_token = require_env("DISCORD_BOT_TOKEN")?;
    let leaderboard_channel_id = require_env("LEADERBOARD_CHANNEL_ID")?
        .parse::<u64>()
        .map_err(|e| fmt!("LEADERBOARD_CHANNEL_ID must be a numeric channel id: {e}"))?;
    if leaderboard_channel_id == 0 {
        return Err("LEADERBOARD_CHANNEL_ID must be non-zero".into());
    }

    let file = load_file_config()?;

    Ok(AppConfig {
        riot_api_key,
        discord_token,
        leaderboard_channel_id,
        data_path: PathBuf::from(file.data_path.unwrap_or_else(|| DEFAULT_DATA_PATH.into())),
        account_host: file
            .account_host
            .unwrap_or_else(|| DEFAULT_ACCOUNT_HOST.into()),
        platform_host: file
            .platform_host
            .unwrap_or_else(|| DEFAULT_PLATFORM_HOST.into()),
        fetch_concurrency: file
            .fetch_concurrency
            .unwrap_or(DEFAULT_FETCH_CONCURRENCY)
            .max(1),
        refresh_interval_minutes: file.refresh_interval_minutes,
        log: LogConfig {
            level: file.log.level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.into()),
            path: file.log.path.map(PathBuf::from),
        },
    })
}

fn require_env(name: &str) -> Result<String, Error> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(fmt!("{name} must be set in the environment").into()),
    }
}

fn load_file_config() -> Result<FileConfig, Error> {
    let path = env::var("RANKCORD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let path = PathBuf::from(path);

    if !path.exists() {
        return Ok(FileConfig::default());
    }
    if !path.is_file() {
        return Err(fmt!("Config path is not a file: {}", path.display()).into());
    }

    let s = fs::read_to_string(&path)?;
    Ok(toml::from_str(&s)?)
}
