use crate::domain::errors::{ExportError, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
}

/// Connection details from a config file; every field is optional, and
/// whatever is still missing after the CLI merge is prompted for.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConnectionConfig {
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub service: Option<String>,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    // Overrides for ad-hoc runs
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long)]
    pub service: Option<String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: AppConfig = if path.ends_with(".json") {
            serde_json::from_str(&contents)
                .map_err(|e| ExportError::ConfigError(e.to_string()))?
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| ExportError::ConfigError(e.to_string()))?
        };

        Ok(config)
    }

    pub fn merge_cli(&mut self, args: &CliArgs) {
        if let Some(u) = &args.user {
            self.connection.user = Some(u.clone());
        }
        if let Some(p) = &args.password {
            self.connection.password = Some(p.clone());
        }
        if let Some(h) = &args.host {
            self.connection.host = Some(h.clone());
        }
        if let Some(p) = args.port {
            self.connection.port = Some(p);
        }
        if let Some(s) = &args.service {
            self.connection.service = Some(s.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_config() {
        let yaml = r#"
connection:
  user: "system"
  host: "localhost"
  port: 1521
  service: "ORCL"
"#;
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        write!(file, "{}", yaml).unwrap();
        let path = file.path().to_str().unwrap();

        let config = AppConfig::from_file(path).expect("Failed to parse config");

        assert_eq!(config.connection.user.as_deref(), Some("system"));
        assert_eq!(config.connection.port, Some(1521));
        assert_eq!(config.connection.service.as_deref(), Some("ORCL"));
        assert!(config.connection.password.is_none());
    }

    #[test]
    fn test_load_json_config() {
        let json = r#"{"connection": {"host": "db.internal", "service": "XEPDB1"}}"#;
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(file, "{}", json).unwrap();
        let path = file.path().to_str().unwrap();

        let config = AppConfig::from_file(path).expect("Failed to parse config");

        assert_eq!(config.connection.host.as_deref(), Some("db.internal"));
        assert_eq!(config.connection.service.as_deref(), Some("XEPDB1"));
        assert!(config.connection.user.is_none());
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = AppConfig::default();
        config.connection.host = Some("from-file".to_string());
        config.connection.port = Some(1521);

        let args = CliArgs {
            config: None,
            user: Some("system".to_string()),
            password: None,
            host: Some("from-cli".to_string()),
            port: None,
            service: None,
        };
        config.merge_cli(&args);

        assert_eq!(config.connection.host.as_deref(), Some("from-cli"));
        assert_eq!(config.connection.user.as_deref(), Some("system"));
        assert_eq!(config.connection.port, Some(1521));
    }
}
