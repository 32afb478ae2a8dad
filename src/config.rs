// src/config.rs
use crate::domain::catalog::CatalogEnvironment;
use crate::domain::errors::{AppError, AppResult};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Storefront configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Local store configuration
    pub store: StoreConfig,

    /// Catalog seed configuration
    pub catalog: CatalogConfig,

    /// Order notification configuration
    pub notifier: NotifierConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Local store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the persisted JSON documents
    pub data_dir: PathBuf,
}

/// Catalog seed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Which static seed list a fresh store starts from
    pub environment: CatalogEnvironment,
}

/// Order notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Email API endpoint (Resend-compatible)
    pub api_url: String,

    /// API key; notifications are disabled when absent
    pub api_key: Option<String>,

    /// Operator address that receives order summaries
    pub notification_email: String,

    /// Sender address
    pub sender_email: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

/// Map the CATALOG_ENV variable onto a seed environment.
fn parse_environment(raw: &str) -> CatalogEnvironment {
    match raw.to_lowercase().as_str() {
        "development" | "dev" => CatalogEnvironment::Development,
        _ => CatalogEnvironment::Production,
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let store_config = StoreConfig {
            data_dir: env::var("STORE_DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
        };

        let catalog_config = CatalogConfig {
            environment: parse_environment(
                &env::var("CATALOG_ENV").unwrap_or_else(|_| "production".to_string()),
            ),
        };

        let notifier_config = NotifierConfig {
            api_url: env::var("RESEND_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
            api_key: env::var("RESEND_API_KEY").ok(),
            notification_email: env::var("NOTIFICATION_EMAIL")
                .unwrap_or_else(|_| "pedidos@healthybreads.mx".to_string()),
            sender_email: env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "Healthy Breads <onboarding@resend.dev>".to_string()),
        };

        let logging_config = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            to_file: env::var("LOG_TO_FILE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        Ok(Config {
            store: store_config,
            catalog: catalog_config,
            notifier: notifier_config,
            logging: logging_config,
        })
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(path)
            .map_err(|e| AppError::Config(format!("Failed to open config file: {}", e)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        // Set log level
        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // Configure output
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path)
                    .map_err(|e| AppError::Config(format!("Failed to create log file: {}", e)))?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        // Initialize the logger
        builder.init();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing_defaults_to_production() {
        assert_eq!(parse_environment("dev"), CatalogEnvironment::Development);
        assert_eq!(
            parse_environment("Development"),
            CatalogEnvironment::Development
        );
        assert_eq!(parse_environment("production"), CatalogEnvironment::Production);
        assert_eq!(parse_environment("anything"), CatalogEnvironment::Production);
    }
}
