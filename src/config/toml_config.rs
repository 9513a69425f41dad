use crate::core::csv_codec::CsvDialect;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ROSTER_PATH: &str = "personas.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_roster_path")]
    pub path: String,
    #[serde(default)]
    pub dialect: CsvDialect,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn default_roster_path() -> String {
    DEFAULT_ROSTER_PATH.to_string()
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            path: default_roster_path(),
            dialect: CsvDialect::default(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 載入並驗證配置檔
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROSTER_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("roster.path", &self.roster.path)?;
        validate_file_extension("roster.path", &self.roster.path, &["csv"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[roster]
path = "data/equipo.csv"
dialect = "quoted"

[logging]
verbose = true
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.roster.path, "data/equipo.csv");
        assert_eq!(config.roster.dialect, CsvDialect::Quoted);
        assert_eq!(config.logging.verbose, Some(true));
        assert_eq!(config.logging.json, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.roster.path, DEFAULT_ROSTER_PATH);
        assert_eq!(config.roster.dialect, CsvDialect::Legacy);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ROSTER_TEST_DIR", "/tmp/roster");

        let toml_content = r#"
[roster]
path = "${ROSTER_TEST_DIR}/personas.csv"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.roster.path, "/tmp/roster/personas.csv");

        std::env::remove_var("ROSTER_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str("[roster]\npath = \"personas.txt\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str("[roster]\npath = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_dialect_rejected() {
        let result = AppConfig::from_toml_str("[roster]\ndialect = \"tsv\"\n");
        assert!(matches!(result, Err(RosterError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[roster]\npath = \"club.csv\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.roster.path, "club.csv");
        assert!(AppConfig::load_validated(temp_file.path()).is_ok());
    }

    #[test]
    fn test_load_validated_rejects_bad_extension() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[roster]\npath = \"personas.txt\"\n")
            .unwrap();

        assert!(AppConfig::from_file(temp_file.path()).is_ok());
        assert!(matches!(
            AppConfig::load_validated(temp_file.path()),
            Err(RosterError::InvalidConfigValue { .. })
        ));
    }
}
