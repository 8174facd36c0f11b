//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) yields a
//! working pattern-only configuration.

use crate::domain::EntityType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which detection backends run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionMode {
    /// Pattern rules only
    #[default]
    Fast,
    /// Patterns plus the lexicon model, short name runs
    Balanced,
    /// Patterns plus the lexicon model, long name runs
    Accurate,
}

impl RecognitionMode {
    /// Whether this mode requires the statistical provider
    pub fn needs_provider(&self) -> bool {
        !matches!(self, Self::Fast)
    }
}

impl fmt::Display for RecognitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Balanced => write!(f, "balanced"),
            Self::Accurate => write!(f, "accurate"),
        }
    }
}

impl FromStr for RecognitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "accurate" => Ok(Self::Accurate),
            _ => Err(format!(
                "Invalid recognition mode '{s}'. Must be one of: fast, balanced, accurate"
            )),
        }
    }
}

/// Main Anonymify configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnonymifyConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Detection and scoring settings
    #[serde(default)]
    pub anonymization: AnonymizationSettings,

    /// Exclusion vocabulary
    #[serde(default)]
    pub whitelist: WhitelistConfig,

    /// Audit trail settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AnonymifyConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.anonymization.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Detection and scoring settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationSettings {
    /// Which detection backends run
    #[serde(default)]
    pub recognition_mode: RecognitionMode,

    /// Minimum confidence for person candidates
    #[serde(default = "default_person_threshold")]
    pub person_score_threshold: f32,

    /// Minimum confidence for every other entity type
    #[serde(default = "default_other_threshold")]
    pub other_score_threshold: f32,

    /// Entity types to detect; absent means all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_entities: Option<Vec<EntityType>>,

    /// Rule catalog replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<PathBuf>,

    /// Given-name lexicon used by the balanced and accurate modes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,

    /// Per-rule match budget in milliseconds
    #[serde(default = "default_pattern_timeout_ms")]
    pub pattern_timeout_ms: u64,

    /// Rejoin names and compounds split across line breaks before analysis
    #[serde(default = "default_true")]
    pub normalize_line_breaks: bool,
}

impl Default for AnonymizationSettings {
    fn default() -> Self {
        Self {
            recognition_mode: RecognitionMode::default(),
            person_score_threshold: default_person_threshold(),
            other_score_threshold: default_other_threshold(),
            enabled_entities: None,
            pattern_library: None,
            model_path: None,
            pattern_timeout_ms: default_pattern_timeout_ms(),
            normalize_line_breaks: default_true(),
        }
    }
}

impl AnonymizationSettings {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("person_score_threshold", self.person_score_threshold),
            ("other_score_threshold", self.other_score_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be between 0.0 and 1.0, got {value}"));
            }
        }

        if self.pattern_timeout_ms == 0 {
            return Err("pattern_timeout_ms must be greater than 0".to_string());
        }

        if let Some(ref entities) = self.enabled_entities {
            if entities.is_empty() {
                return Err(
                    "enabled_entities must not be empty; omit it to enable all types".to_string(),
                );
            }
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(format!("Pattern library file not found: {}", path.display()));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                ));
            }
        }

        Ok(())
    }

    /// Enabled entity types, defaulting to the full catalog
    pub fn enabled_entity_types(&self) -> Vec<EntityType> {
        self.enabled_entities
            .clone()
            .unwrap_or_else(|| EntityType::ALL.to_vec())
    }
}

/// Exclusion vocabulary, grouped the way users maintain it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitelistConfig {
    /// Court and judiciary terms
    #[serde(default = "default_court_terms")]
    pub court_terms: Vec<String>,

    /// Public authorities
    #[serde(default = "default_authorities")]
    pub authorities: Vec<String>,

    /// Professions
    #[serde(default = "default_professions")]
    pub professions: Vec<String>,

    /// Well-known organizations
    #[serde(default = "default_organizations")]
    pub organizations: Vec<String>,

    /// Capitalized function words that start sentences
    #[serde(default = "default_common_words")]
    pub common_words: Vec<String>,

    /// User additions
    #[serde(default)]
    pub custom: Vec<String>,
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self {
            court_terms: default_court_terms(),
            authorities: default_authorities(),
            professions: default_professions(),
            organizations: default_organizations(),
            common_words: default_common_words(),
            custom: Vec::new(),
        }
    }
}

impl WhitelistConfig {
    /// All terms of every group
    pub fn all_terms(&self) -> impl Iterator<Item = &str> {
        self.court_terms
            .iter()
            .chain(&self.authorities)
            .chain(&self.professions)
            .chain(&self.organizations)
            .chain(&self.common_words)
            .chain(&self.custom)
            .map(String::as_str)
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines instead of plain text
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_true(),
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path cannot be empty when audit is enabled".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_person_threshold() -> f32 {
    0.7
}

fn default_other_threshold() -> f32 {
    0.6
}

fn default_pattern_timeout_ms() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymify.log")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_court_terms() -> Vec<String> {
    to_strings(&[
        "Gericht",
        "Richter",
        "Staatsanwaltschaft",
        "Amtsgericht",
        "Landgericht",
        "Oberlandesgericht",
        "Bundesgerichtshof",
    ])
}

fn default_authorities() -> Vec<String> {
    to_strings(&["Finanzamt", "Polizei", "Bundesamt", "Krankenkasse"])
}

fn default_professions() -> Vec<String> {
    to_strings(&["Rechtsanwalt", "Notar", "Steuerberater", "Arzt"])
}

fn default_organizations() -> Vec<String> {
    to_strings(&["Deutsche Bank", "Sparkasse", "AOK", "TÜV"])
}

fn default_common_words() -> Vec<String> {
    to_strings(&[
        "Der", "Die", "Das", "Im", "Am", "Zum", "Zur", "Vom", "Bei", "Mit", "Durch",
    ])
}
