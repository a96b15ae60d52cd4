use std::path::PathBuf;

use anyhow::Result;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::binder::ValidationPolicy;
use crate::help::{HelpLayout, MIN_TEXT_WIDTH};

const DEFAULT_SETTINGS_FILE: &str = "certflags.toml";
const DEFAULT_HELP_INDENT: u64 = 26;
const DEFAULT_HELP_WIDTH: u64 = 100;
const DEFAULT_VALIDATION_POLICY: &str = "enforce";

/// Driver settings. The binder itself never reads files or the environment.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub help: HelpSettings,
    pub validation: ValidationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HelpSettings {
    pub indent: usize,
    pub width: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ValidationSettings {
    pub policy: ValidationPolicy,
}

impl Settings {
    /// Creates a new `Settings` instance.
    ///
    /// # Errors
    /// Returns error if the settings file or environment holds values of the
    /// wrong type.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));

        Config::builder()
            .set_default("help.indent", DEFAULT_HELP_INDENT)?
            .set_default("help.width", DEFAULT_HELP_WIDTH)?
            .set_default("validation.policy", DEFAULT_VALIDATION_POLICY)?
            .add_source(File::from(path).required(false))
            // e.g. CERTFLAGS_HELP_WIDTH, CERTFLAGS_VALIDATION_POLICY
            .add_source(Environment::with_prefix("CERTFLAGS").separator("_"))
            .build()?
            .try_deserialize()
    }

    /// Validates settings values for correctness.
    ///
    /// # Errors
    /// Returns error if the help layout leaves too little room for text.
    pub fn validate(&self) -> Result<()> {
        if self.help.width <= self.help.indent {
            anyhow::bail!("help.width must be greater than help.indent");
        }
        if self.help.width - self.help.indent < MIN_TEXT_WIDTH {
            anyhow::bail!("help.width must leave at least {MIN_TEXT_WIDTH} columns after help.indent");
        }
        Ok(())
    }

    #[must_use]
    pub fn help_layout(&self) -> HelpLayout {
        HelpLayout {
            indent: self.help.indent,
            width: self.help.width,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_settings_defaults() {
        let settings = Settings::new(None).unwrap();
        assert_eq!(settings.help.indent, 26);
        assert_eq!(settings.help.width, 100);
        assert_eq!(settings.validation.policy, ValidationPolicy::Enforce);
        assert_eq!(settings.help_layout(), HelpLayout::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_settings_file_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
            [help]
            indent = 30
            width = 120
            [validation]
            policy = "report"
        "#
        )
        .unwrap();
        file.flush().unwrap();

        let settings = Settings::new(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(settings.help_layout(), HelpLayout { indent: 30, width: 120 });
        assert_eq!(settings.validation.policy, ValidationPolicy::Report);
    }

    #[test]
    fn test_load_settings_rejects_unknown_policy() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[validation]\npolicy = \"strict\"").unwrap();
        file.flush().unwrap();

        assert!(Settings::new(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_validate_rejects_narrow_layout() {
        let mut settings = Settings::new(None).unwrap();
        settings.help.width = settings.help.indent;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("help.width"));

        settings.help.width = settings.help.indent + 5;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("columns"));
    }
}
