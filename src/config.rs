//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rschema/rschema.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `RSCHEMA_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::EditorOptions;
use crate::application::{ApplicationError, SchemaFormat};
use crate::domain::{FieldKind, IdGenerator, RandomIdGenerator, SequentialIdGenerator};

/// How new field ids are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// UUID v4 based, unique across sessions
    #[default]
    Random,
    /// `f1`, `f2`, ... reproducible within a session
    Sequential,
}

impl IdStrategy {
    pub fn generator(self) -> Arc<dyn IdGenerator> {
        match self {
            IdStrategy::Random => Arc::new(RandomIdGenerator),
            IdStrategy::Sequential => Arc::new(SequentialIdGenerator::default()),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdStrategy::Random => f.write_str("random"),
            IdStrategy::Sequential => f.write_str("sequential"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(IdStrategy::Random),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(format!("unknown id strategy '{}'", other)),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub id_strategy: Option<IdStrategy>,
    pub indent: Option<usize>,
    pub format: Option<SchemaFormat>,
    pub nested_kind: Option<FieldKind>,
    pub echo_document: Option<bool>,
}

/// Unified configuration for rschema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Id generation strategy (default: random)
    pub id_strategy: IdStrategy,
    /// Spaces per level in exported JSON (default: 2)
    pub indent: usize,
    /// Projection shown after each edit (default: simple)
    pub format: SchemaFormat,
    /// Kind of fields created by `nest` (default: String)
    pub nested_kind: FieldKind,
    /// Print the document after every mutation in the REPL (default: true)
    pub echo_document: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Random,
            indent: 2,
            format: SchemaFormat::Simple,
            nested_kind: FieldKind::String,
            echo_document: true,
        }
    }
}

/// Get the XDG config directory for rschema.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rschema").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rschema.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

fn parse_env<T: FromStr>(key: &str, raw: &str) -> Result<T, ApplicationError>
where
    T::Err: fmt::Display,
{
    raw.parse::<T>().map_err(|e| ApplicationError::Config {
        message: format!("RSCHEMA_{}: {}", key.to_ascii_uppercase(), e),
    })
}

impl Settings {
    /// Options for a schema editor built from these settings.
    pub fn editor_options(&self) -> EditorOptions {
        EditorOptions {
            nested_kind: self.nested_kind,
            format: self.format,
        }
    }

    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            id_strategy: overlay.id_strategy.unwrap_or(self.id_strategy),
            indent: overlay.indent.unwrap_or(self.indent),
            format: overlay.format.unwrap_or(self.format),
            nested_kind: overlay.nested_kind.unwrap_or(self.nested_kind),
            echo_document: overlay.echo_document.unwrap_or(self.echo_document),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; unlike
    ///   the global file it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), explicit)
    }

    /// Layered load with the global config location supplied by the caller.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply RSCHEMA_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RSCHEMA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("id_strategy") {
            settings.id_strategy = parse_env("id_strategy", &val)?;
        }
        if let Ok(val) = config.get_string("indent") {
            settings.indent = parse_env("indent", &val)?;
        }
        if let Ok(val) = config.get_string("format") {
            settings.format = parse_env("format", &val)?;
        }
        if let Ok(val) = config.get_string("nested_kind") {
            settings.nested_kind = parse_env("nested_kind", &val)?;
        }
        if let Ok(val) = config.get_string("echo_document") {
            settings.echo_document = parse_env("echo_document", &val)?;
        }

        Ok(settings)
    }

    /// Render as TOML, e.g. for `rschema config`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_rendered_then_lists_every_key() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("id_strategy = \"random\""));
        assert!(toml.contains("indent = 2"));
        assert!(toml.contains("format = \"simple\""));
        assert!(toml.contains("nested_kind = \"String\""));
        assert!(toml.contains("echo_document = true"));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let overlay = RawSettings {
            indent: Some(4),
            nested_kind: Some(FieldKind::Object),
            ..RawSettings::default()
        };

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.indent, 4);
        assert_eq!(merged.nested_kind, FieldKind::Object);
        assert_eq!(merged.format, SchemaFormat::Simple);
        assert_eq!(merged.id_strategy, IdStrategy::Random);
    }
}
