//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::recording::Duration;

use super::args::{is_valid_config_key, parse_buffer_len, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Unset { key } => handle_unset(store, presenter, &key).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, Some(value))?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_unset<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    if !store.exists() {
        presenter.info(&format!("{} is not set", key));
        return Ok(());
    }

    let mut config = store.load().await?;
    apply_value(&mut config, key, None)?;

    store.save(&config).await?;
    presenter.success(&format!("{} unset", key));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    let value = read_value(&config, key);
    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: "Unknown key".to_string(),
    }
}

/// Read a config field as display text
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "duration" => config.duration.clone(),
        "buffer_len" => config.buffer_len.map(|n| n.to_string()),
        "content_type" => config.content_type.clone(),
        "output" => config.output.clone(),
        "upload_url" => config.upload_url.clone(),
        "session_id" => config.session_id.clone(),
        _ => None,
    }
}

/// Set (or clear, with `None`) a config field from already-validated text
fn apply_value(config: &mut AppConfig, key: &str, value: Option<&str>) -> Result<(), ConfigError> {
    let text = value.map(str::to_string);
    match key {
        "duration" => config.duration = text,
        "buffer_len" => {
            config.buffer_len = match value {
                Some(v) => Some(parse_buffer_len(v).map_err(|message| {
                    ConfigError::ValidationError {
                        key: key.to_string(),
                        message,
                    }
                })?),
                None => None,
            }
        }
        "content_type" => config.content_type = text,
        "output" => config.output = text,
        "upload_url" => config.upload_url = text,
        "session_id" => config.session_id = text,
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "duration" => {
            value
                .parse::<Duration>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "buffer_len" => {
            parse_buffer_len(value).map_err(invalid)?;
        }
        "content_type" => {
            if !is_media_type(value) {
                return Err(invalid(format!(
                    "Invalid value '{}'. Expected a media type such as audio/wav",
                    value
                )));
            }
        }
        "upload_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(
                    "Value must start with http:// or https://".to_string(),
                ));
            }
        }
        "output" | "session_id" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
        }
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

/// `type/subtype` with both halves present
fn is_media_type(value: &str) -> bool {
    match value.split_once('/') {
        Some((kind, subtype)) => {
            !kind.trim().is_empty() && !subtype.trim().is_empty() && !subtype.contains('/')
        }
        None => false,
    }
}
