//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Every test that loads settings runs `#[serial]`: the RSCHEMA_* layer is
//! process-global and the env tests below modify it.

use std::env;
use std::fs;

use serial_test::serial;
use tempfile::TempDir;

use rschema::application::SchemaFormat;
use rschema::application::ApplicationError;
use rschema::config::{IdStrategy, Settings};
use rschema::domain::FieldKind;

#[test]
#[serial]
fn given_no_config_files_when_load_then_returns_defaults() {
    let settings = Settings::load_from(None, None).expect("load settings");

    assert_eq!(settings.indent, 2);
    assert_eq!(settings.format, SchemaFormat::Simple);
    assert_eq!(settings.nested_kind, FieldKind::String);
    assert_eq!(settings.id_strategy, IdStrategy::Random);
    assert!(settings.echo_document);
}

#[test]
#[serial]
fn given_global_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("rschema.toml");
    fs::write(
        &global,
        r#"
id_strategy = "sequential"
format = "json-schema"
"#,
    )
    .unwrap();

    let settings = Settings::load_from(Some(global.as_path()), None).expect("load settings");

    assert_eq!(settings.id_strategy, IdStrategy::Sequential);
    assert_eq!(settings.format, SchemaFormat::JsonSchema);
    assert_eq!(settings.indent, 2, "unspecified keys keep defaults");
}

#[test]
#[serial]
fn given_explicit_config_when_load_then_wins_over_global() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let explicit = dir.path().join("local.toml");
    fs::write(&global, "indent = 4\nnested_kind = \"Object\"\n").unwrap();
    fs::write(&explicit, "indent = 8\necho_document = false\n").unwrap();

    let settings = Settings::load_from(Some(global.as_path()), Some(explicit.as_path())).expect("load settings");

    assert_eq!(settings.indent, 8);
    assert_eq!(settings.nested_kind, FieldKind::Object);
    assert!(!settings.echo_document);
}

#[test]
#[serial]
fn given_missing_global_file_when_load_then_ignored() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_from(Some(dir.path().join("absent.toml").as_path()), None).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
#[serial]
fn given_missing_explicit_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load_from(None, Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.to_string().contains("config file not found"));
}

#[test]
#[serial]
fn given_invalid_toml_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "nested_kind = \"Tuple\"\n").unwrap();

    let err = Settings::load_from(None, Some(path.as_path())).unwrap_err();

    assert!(err.to_string().starts_with("config error: parse"));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_sequential_strategy_when_building_generator_then_counts_up() {
    let ids = IdStrategy::Sequential.generator();
    assert_eq!(ids.next_id().as_str(), "f1");
    assert_eq!(ids.next_id().as_str(), "f2");
}

/// Removes the listed variables on drop, so a failing assert cannot leak them.
struct EnvVars(&'static [&'static str]);

impl EnvVars {
    fn set(vars: &'static [(&'static str, &'static str)]) -> Self {
        static KEYS: [&str; 5] = [
            "RSCHEMA_ID_STRATEGY",
            "RSCHEMA_INDENT",
            "RSCHEMA_FORMAT",
            "RSCHEMA_NESTED_KIND",
            "RSCHEMA_ECHO_DOCUMENT",
        ];
        for (key, value) in vars {
            env::set_var(key, value);
        }
        Self(&KEYS)
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for key in self.0 {
            env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn given_env_overrides_when_load_then_env_wins_over_explicit_file() {
    let dir = TempDir::new().unwrap();
    let explicit = dir.path().join("local.toml");
    fs::write(&explicit, "indent = 8\nnested_kind = \"Array\"\nid_strategy = \"random\"\n").unwrap();
    let _env = EnvVars::set(&[
        ("RSCHEMA_INDENT", "4"),
        ("RSCHEMA_NESTED_KIND", "object"),
        ("RSCHEMA_ID_STRATEGY", "sequential"),
    ]);

    let settings = Settings::load_from(None, Some(explicit.as_path())).expect("load settings");

    assert_eq!(settings.indent, 4);
    assert_eq!(settings.nested_kind, FieldKind::Object);
    assert_eq!(settings.id_strategy, IdStrategy::Sequential);
    assert_eq!(settings.format, SchemaFormat::Simple, "unset env keys keep file/default value");
}

#[test]
#[serial]
fn given_unparsable_env_value_when_load_then_config_error() {
    let _env = EnvVars::set(&[("RSCHEMA_INDENT", "abc")]);

    let err = Settings::load_from(None, None).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains("RSCHEMA_INDENT"));
}
