use anyhow::{Context, Result};
use cfsync_arr_api::HttpArrClient;
use cfsync_common::environment::{
    get_env_var, get_env_var_or,
    variables::{CUSTOM_FORMATS_DIR, HTTP_TIMEOUT_SECS, VERSION_FILE},
};
use cfsync_common::Instance;
use cfsync_store::{DefinitionRepository, VersionStore};
use cfsync_sync::{SyncTarget, Syncer};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

const CUSTOM_FORMATS_DIR_DEFAULT: &str = "custom_formats";
const VERSION_FILE_DEFAULT: &str = "version.json";
const HTTP_TIMEOUT_SECS_DEFAULT: u64 = 30;

/// Settings for a run, read from the environment.
#[derive(Debug)]
pub struct SyncSettings {
    pub custom_formats_dir: PathBuf,
    pub version_file: PathBuf,
    pub http_timeout: Duration,
}

impl SyncSettings {
    pub fn from_environment() -> Self {
        SyncSettings {
            custom_formats_dir: PathBuf::from(get_env_var_or(
                CUSTOM_FORMATS_DIR,
                CUSTOM_FORMATS_DIR_DEFAULT,
            )),
            version_file: PathBuf::from(get_env_var_or(VERSION_FILE, VERSION_FILE_DEFAULT)),
            http_timeout: Duration::from_secs(get_http_timeout_secs()),
        }
    }
}

fn get_http_timeout_secs() -> u64 {
    match get_env_var(HTTP_TIMEOUT_SECS) {
        Ok(secs) => parse_http_timeout_secs(&secs),
        Err(_) => {
            info!(
                "No value found for {}, using the default value {}.",
                HTTP_TIMEOUT_SECS, HTTP_TIMEOUT_SECS_DEFAULT
            );
            HTTP_TIMEOUT_SECS_DEFAULT
        }
    }
}

/// A positive number of seconds, otherwise the default.
fn parse_http_timeout_secs(raw: &str) -> u64 {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => secs,
        Ok(_) => {
            warn!(
                "{} must be greater than zero, using the default value {}.",
                HTTP_TIMEOUT_SECS, HTTP_TIMEOUT_SECS_DEFAULT
            );
            HTTP_TIMEOUT_SECS_DEFAULT
        }
        Err(e) => {
            warn!(
                value = %raw,
                error = %e,
                "Invalid value for {}, using the default value {}.",
                HTTP_TIMEOUT_SECS,
                HTTP_TIMEOUT_SECS_DEFAULT
            );
            HTTP_TIMEOUT_SECS_DEFAULT
        }
    }
}

pub fn initialize_syncer(settings: &SyncSettings) -> Syncer {
    info!(
        directory = %settings.custom_formats_dir.display(),
        version_file = %settings.version_file.display(),
        "Using local definitions."
    );
    Syncer::new(
        DefinitionRepository::new(&settings.custom_formats_dir),
        VersionStore::load(&settings.version_file),
    )
}

pub fn initialize_targets(
    instances: Vec<Instance>,
    settings: &SyncSettings,
) -> Result<Vec<SyncTarget<HttpArrClient>>> {
    instances
        .into_iter()
        .map(|instance| {
            let client = HttpArrClient::new(&instance, settings.http_timeout)
                .with_context(|| format!("Failed to create a client for {}.", instance.name))?;
            Ok(SyncTarget::new(instance, client))
        })
        .collect()
}
