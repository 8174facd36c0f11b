//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{AnonymifyConfig, RecognitionMode};
use crate::domain::errors::AnonymifyError;
use crate::domain::result::Result;
use crate::domain::EntityType;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into [`AnonymifyConfig`]
/// 4. Applies environment variable overrides (ANONYMIFY_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`AnonymifyError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use anonymify::config::load_config;
///
/// let config = load_config("anonymify.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnonymifyConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AnonymifyError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AnonymifyError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AnonymifyConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        AnonymifyError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Loads configuration, falling back to defaults when the file does not exist
///
/// Environment overrides still apply to the defaults. A file that exists but
/// is malformed is an error, never silently replaced.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AnonymifyConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::info!(config_path = %path.display(), "Configuration file not found, using defaults");
    let mut config = AnonymifyConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        AnonymifyError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AnonymifyError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AnonymifyError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the ANONYMIFY_* prefix
///
/// Malformed override values are rejected, never ignored.
fn apply_env_overrides(config: &mut AnonymifyConfig) -> Result<()> {
    if let Ok(val) = std::env::var("ANONYMIFY_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("ANONYMIFY_RECOGNITION_MODE") {
        config.anonymization.recognition_mode = val
            .parse::<RecognitionMode>()
            .map_err(AnonymifyError::Configuration)?;
    }
    if let Ok(val) = std::env::var("ANONYMIFY_PERSON_SCORE_THRESHOLD") {
        config.anonymization.person_score_threshold =
            parse_env("ANONYMIFY_PERSON_SCORE_THRESHOLD", &val)?;
    }
    if let Ok(val) = std::env::var("ANONYMIFY_OTHER_SCORE_THRESHOLD") {
        config.anonymization.other_score_threshold =
            parse_env("ANONYMIFY_OTHER_SCORE_THRESHOLD", &val)?;
    }
    if let Ok(val) = std::env::var("ANONYMIFY_PATTERN_TIMEOUT_MS") {
        config.anonymization.pattern_timeout_ms =
            parse_env("ANONYMIFY_PATTERN_TIMEOUT_MS", &val)?;
    }
    if let Ok(val) = std::env::var("ANONYMIFY_PATTERN_LIBRARY") {
        config.anonymization.pattern_library = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("ANONYMIFY_MODEL_PATH") {
        config.anonymization.model_path = Some(PathBuf::from(val));
    }
    if let Ok(val) = std::env::var("ANONYMIFY_ENABLED_ENTITIES") {
        config.anonymization.enabled_entities = Some(parse_entity_list(&val)?);
    }

    if let Ok(val) = std::env::var("ANONYMIFY_AUDIT_ENABLED") {
        config.audit.enabled = parse_env("ANONYMIFY_AUDIT_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("ANONYMIFY_AUDIT_LOG_PATH") {
        config.audit.log_path = PathBuf::from(val);
    }

    if let Ok(val) = std::env::var("ANONYMIFY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("ANONYMIFY_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("ANONYMIFY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AnonymifyError::Configuration(format!("Invalid {name} value: {value}")))
}

/// Parses a comma-separated entity type list such as `PERSON,EMAIL`
pub fn parse_entity_list(value: &str) -> Result<Vec<EntityType>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<EntityType>().map_err(AnonymifyError::Configuration))
        .collect()
}
