#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::csv_codec::CsvDialect;
use crate::utils::validation::{validate_path, Validate};
use toml_config::AppConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "roster-csv")]
#[command(about = "Keep a roster of people in a CSV file")]
pub struct CliConfig {
    /// CSV file backing the roster (overrides the config file)
    #[arg(long)]
    pub roster: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV flavour: legacy (unquoted) or quoted
    #[arg(long)]
    pub dialect: Option<CsvDialect>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// Rewrite the roster file even if some of its lines could not be loaded
    #[arg(long)]
    pub force: bool,

    #[command(subcommand)]
    pub command: cli::Command,
}

/// Effective settings after merging the config file with command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub roster_path: String,
    pub dialect: CsvDialect,
    pub verbose: bool,
    pub log_json: bool,
}

impl Settings {
    pub fn from_file_config(file: &AppConfig) -> Self {
        Self {
            roster_path: file.roster.path.clone(),
            dialect: file.roster.dialect,
            verbose: file.logging.verbose.unwrap_or(false),
            log_json: file.logging.json.unwrap_or(false),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_path("roster", &self.roster_path)
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn resolve(&self, file: &AppConfig) -> Settings {
        let base = Settings::from_file_config(file);
        Settings {
            roster_path: self.roster.clone().unwrap_or(base.roster_path),
            dialect: self.dialect.unwrap_or(base.dialect),
            verbose: self.verbose || base.verbose,
            log_json: self.log_json || base.log_json,
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file() {
        let file = AppConfig::from_toml_str(
            "[roster]\npath = \"club.csv\"\ndialect = \"quoted\"\n[logging]\njson = true\n",
        )
        .unwrap();

        let cli = CliConfig::parse_from(["roster-csv", "--roster", "otro.csv", "list"]);
        let settings = cli.resolve(&file);
        assert_eq!(settings.roster_path, "otro.csv");
        assert_eq!(settings.dialect, CsvDialect::Quoted);
        assert!(settings.log_json);
        assert!(!settings.verbose);

        let cli = CliConfig::parse_from(["roster-csv", "--dialect", "legacy", "-v", "list"]);
        let settings = cli.resolve(&file);
        assert_eq!(settings.roster_path, "club.csv");
        assert_eq!(settings.dialect, CsvDialect::Legacy);
        assert!(settings.verbose);
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = CliConfig::parse_from(["roster-csv", "add", "Ana", "Lopez", "30"]);
        assert!(matches!(cli.command, cli::Command::Add { ref name, .. } if name == "Ana"));
        assert!(cli.command.mutates());

        let cli = CliConfig::parse_from(["roster-csv", "edit", "2", "--age", "31"]);
        assert!(matches!(
            cli.command,
            cli::Command::Edit { index: 2, ref age, .. } if age.as_deref() == Some("31")
        ));

        let cli = CliConfig::parse_from(["roster-csv", "list", "--filter", "an"]);
        assert!(!cli.command.mutates());
        assert!(!cli.force);

        let cli = CliConfig::parse_from(["roster-csv", "--force", "remove", "0"]);
        assert!(cli.force);
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::from_file_config(&AppConfig::default());
        assert!(settings.validate().is_ok());
        settings.roster_path.clear();
        assert!(settings.validate().is_err());
    }
}
