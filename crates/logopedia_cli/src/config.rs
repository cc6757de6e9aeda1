//! Runtime configuration resolved from flags, environment and defaults.

use crate::cli::Cli;
use anyhow::{bail, Context};
use logopedia_core::{default_log_level, detect_default_language, Language, LoggingOptions};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub logging: LoggingOptions,
    pub language: Language,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let language = match cli.lang.as_deref() {
            Some(code) => match Language::from_code(code) {
                Some(language) => language,
                None => bail!("unsupported language `{code}`; expected pl or en"),
            },
            None => detect_default_language(),
        };

        let log_dir = match &cli.log_dir {
            Some(dir) => absolutize(dir)?,
            None => default_log_dir(),
        };
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());

        let mut logging = LoggingOptions::new(level, log_dir);
        logging.echo_warnings = cli.verbose;

        Ok(Self {
            db_path: cli.db.clone(),
            logging,
            language,
        })
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("logopedia")
        .join("logs")
}

fn absolutize(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::cli::Cli;
    use clap::Parser;
    use logopedia_core::Language;

    #[test]
    fn explicit_flags_win() {
        let cli = Cli::try_parse_from([
            "logopedia",
            "--db",
            "records.db",
            "--log-dir",
            "/var/tmp/logopedia",
            "--log-level",
            "warn",
            "--lang",
            "pl_PL.UTF-8",
            "-v",
        ])
        .unwrap();
        let config = AppConfig::from_cli(&cli).unwrap();

        assert_eq!(config.db_path.to_str(), Some("records.db"));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.log_dir.to_str(), Some("/var/tmp/logopedia"));
        assert!(config.logging.echo_warnings);
        assert_eq!(config.language, Language::Pl);
    }

    #[test]
    fn relative_log_dir_becomes_absolute() {
        let cli = Cli::try_parse_from(["logopedia", "--log-dir", "logs", "--lang", "en"]).unwrap();
        let config = AppConfig::from_cli(&cli).unwrap();
        assert!(config.logging.log_dir.is_absolute());
        assert!(config.logging.log_dir.ends_with("logs"));
    }

    #[test]
    fn unknown_language_is_rejected() {
        let cli = Cli::try_parse_from(["logopedia", "--lang", "de"]).unwrap();
        let err = AppConfig::from_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("unsupported language"));
    }
}
