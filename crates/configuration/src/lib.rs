use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseSettings, LoggingSettings, ServerSettings, Settings};

/// String-valued keys and the environment variables that override them.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("database.host", "DB_HOST"),
    ("database.user", "DB_USER"),
    ("database.password", "DB_PASSWORD"),
    ("database.name", "DB_NAME"),
    ("database.ssl_ca", "SSL_CA_PATH"),
    ("server.host", "SERVER_HOST"),
    ("server.public_url", "PUBLIC_URL"),
    ("logging.directory", "LOG_DIR"),
];

/// Integer-valued keys and the environment variables that override them.
const ENV_PORT_OVERRIDES: &[(&str, &str)] = &[
    ("database.port", "DB_PORT"),
    ("server.port", "SERVER_PORT"),
];

/// Loads the application configuration.
///
/// Sources, from lowest to highest precedence: built-in defaults, the TOML
/// file (`config.toml` in the working directory if `path` is `None`, where it
/// is optional), then the process environment. Call `dotenvy` before this if
/// `.env` files should be honoured.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`], reading environment values through `lookup`.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config").required(false),
    };

    let mut builder = config::Config::builder()
        .set_default("database.host", "localhost")?
        .set_default("database.user", "root")?
        .set_default("database.password", "")?
        .set_default("database.name", "imoveis")?
        .set_default("database.port", 3306_i64)?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000_i64)?
        .set_default("server.public_url", "http://localhost:5000")?
        .add_source(file);

    let env = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

    for (key, var) in ENV_OVERRIDES {
        builder = builder.set_override_option(*key, env(*var))?;
    }
    for (key, var) in ENV_PORT_OVERRIDES {
        let port = env(*var).map(|raw| parse_port(var, &raw)).transpose()?;
        builder = builder.set_override_option(*key, port)?;
    }

    let settings = builder.build()?.try_deserialize::<Settings>()?;
    validate(&settings)?;

    tracing::debug!(?settings, "Configuration loaded.");
    Ok(settings)
}

fn parse_port(var: &str, raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map(i64::from)
        .map_err(|_| ConfigError::ValidationError(format!("{var} must be a port number, got '{raw}'")))
}

fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let url = settings.server.public_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "server.public_url must be an http(s) URL, got '{url}'"
        )));
    }
    if settings.database.name.trim().is_empty() {
        return Err(ConfigError::ValidationError("database.name must not be empty".to_string()));
    }
    Ok(())
}
