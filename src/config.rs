//! Application configuration module
//!
//! Server settings come from environment variables; database settings come
//! from the MovieLens INI file (`[rds]` section). The INI path is the only
//! input naming that file, and nothing here mutates the process environment.

use serde::Deserialize;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Default location of the RDS settings file
pub const DEFAULT_CONFIG_FILE: &str = "movielens-config.ini";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    File(#[from] config::ConfigError),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for containers
            port: 3000,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// RDS settings, the `[rds]` section of the MovieLens INI file.
/// Field names match the INI keys one to one.
#[derive(Debug, Clone, Deserialize)]
pub struct RdsConfig {
    pub endpoint: String,
    pub port_number: u16,
    pub user_name: String,
    pub user_pwd: String,
    pub db_name: String,
}

/// Top-level shape of the INI file
#[derive(Debug, Deserialize)]
struct RdsFile {
    rds: RdsConfig,
}

impl RdsConfig {
    /// Load the `[rds]` section from an INI file at `path`
    pub fn from_ini(path: &str) -> Result<Self, ConfigError> {
        let parsed = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Ini))
            .build()?;

        let file: RdsFile = parsed.try_deserialize()?;

        if file.rds.endpoint.is_empty() {
            return Err(ConfigError::InvalidValue(
                "rds.endpoint must not be empty".to_string(),
            ));
        }

        Ok(file.rds)
    }
}

/// Complete application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub rds: RdsConfig,
}

impl Settings {
    /// Load settings from environment variables and the RDS INI file
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let server = ServerConfig {
            host: std::env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| ServerConfig::default().port),
        };

        let cors = CorsConfig {
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        let config_file = std::env::var("MOVIELENS_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let rds = RdsConfig::from_ini(&config_file)?;

        Ok(Self { server, cors, rds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_temp_ini(contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("movielens-test-{}.ini", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_rds_config_from_ini() {
        let path = write_temp_ini(
            "[rds]\n\
             endpoint = movielens.abc123xy.us-east-2.rds.amazonaws.com\n\
             port_number = 5432\n\
             user_name = movielens_readonly\n\
             user_pwd = hunter2\n\
             db_name = movielens\n",
        );

        let rds = RdsConfig::from_ini(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(rds.endpoint, "movielens.abc123xy.us-east-2.rds.amazonaws.com");
        assert_eq!(rds.port_number, 5432);
        assert_eq!(rds.user_name, "movielens_readonly");
        assert_eq!(rds.user_pwd, "hunter2");
        assert_eq!(rds.db_name, "movielens");
    }

    #[test]
    fn test_rds_config_missing_file() {
        let result = RdsConfig::from_ini("/nonexistent/movielens-config.ini");
        assert!(result.is_err());
    }

    #[test]
    fn test_rds_config_missing_key() {
        let path = write_temp_ini("[rds]\nendpoint = localhost\n");
        let result = RdsConfig::from_ini(path.to_str().unwrap());
        fs::remove_file(&path).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_rds_config_empty_endpoint() {
        let path = write_temp_ini(
            "[rds]\n\
             endpoint =\n\
             port_number = 5432\n\
             user_name = u\n\
             user_pwd = p\n\
             db_name = d\n",
        );
        let result = RdsConfig::from_ini(path.to_str().unwrap());
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }
}
