use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod models;
pub use models::*;

/// Marker value that is replaced by an environment variable after loading.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Default prefix for configuration environment variables (`ENCORE__SERVER__PORT`).
pub const DEFAULT_PREFIX: &str = "ENCORE";

/// Loads the layered application configuration.
///
/// Sources, later ones winning:
/// 1. `{config_dir}/default.*`
/// 2. `{config_dir}/{RUN_ENV}.*` (`RUN_ENV` defaults to `debug`)
/// 3. `ENCORE__...` environment variables
///
/// `config_dir` is taken from `ENCORE_CONFIG_DIR` and defaults to `config`.
/// Values set to `"secret_from_env"` are resolved afterwards, see
/// [`apply_env_overrides_from_marker`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let config_dir = env::var("ENCORE_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Loads the configuration from an explicit directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());

    let layers: [PathBuf; 2] = [config_dir.join("default"), config_dir.join(&run_env)];
    let mut builder = Config::builder();
    for layer in &layers {
        debug!("Config layer {}", layer.display());
        builder = builder.add_source(File::with_name(&layer.to_string_lossy()).required(false));
    }

    let config: AppConfig = builder
        .add_source(Environment::with_prefix(&prefix).separator("__"))
        .build()?
        .try_deserialize()?;
    apply_env_overrides_from_marker(config)
}

/// `calendly.access_token` -> `CALENDLY_ACCESS_TOKEN`.
fn secret_var_name(path: &[String]) -> String {
    path.join("_").to_uppercase()
}

/// Replaces every `"secret_from_env"` string below `value` with the
/// variable named after its path. Unset variables become `null`.
fn resolve_secret_markers(value: &mut Value, path: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                path.push(key.clone());
                resolve_secret_markers(child, path);
                path.pop();
            }
        }
        Value::String(marker) if marker == SECRET_MARKER => {
            let var = secret_var_name(path);
            *value = match env::var(&var) {
                Ok(secret) => Value::String(secret),
                Err(_) => {
                    warn!("{} is not set; {} stays empty", var, path.join("."));
                    Value::Null
                }
            };
        }
        _ => {}
    }
}

/// Resolves `"secret_from_env"` markers in an already loaded config.
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut tree = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("config is not serializable: {err}")))?;
    resolve_secret_markers(&mut tree, &mut Vec::new());
    serde_json::from_value(tree)
        .map_err(|err| ConfigError::Message(format!("secret substitution broke config: {err}")))
}

static DOTENV_FILE: OnceCell<PathBuf> = OnceCell::new();

/// Loads the `.env` file once per process and returns its path.
///
/// `DOTENV_OVERRIDE` wins, then a first command line argument starting with
/// `.env`. A missing file is not an error.
pub fn ensure_dotenv_loaded() -> &'static Path {
    DOTENV_FILE.get_or_init(|| {
        let file = env::var("DOTENV_OVERRIDE")
            .ok()
            .or_else(|| env::args().nth(1).filter(|arg| arg.starts_with(".env")))
            .unwrap_or_else(|| ".env".to_string());
        if dotenv::from_filename(&file).is_ok() {
            debug!("Loaded environment from {}", file);
        }
        PathBuf::from(file)
    })
}
