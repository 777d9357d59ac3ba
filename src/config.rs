use clap::Parser;
use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub pool_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub backend: String, // "remote" or "ollama"
    pub model: String,   // Model name
    pub api_key: Option<String>,
    pub api_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub web: WebConfig,
    pub llm: LlmConfig,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the DuckDB database file
    #[arg(long)]
    pub database: Option<String>,
}

impl AppConfig {
    pub fn new(args: &CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config_builder = Config::builder();
        let mut file_found = false;

        // Add configuration from file if specified
        if let Some(config_path) = &args.config {
            config_builder = config_builder.add_source(File::from(config_path.as_path()));
            file_found = true;
        } else {
            // Check for config in default locations
            let default_locations = vec![
                "config.toml",
                "config/config.toml",
                "/etc/ticket-analytics/config.toml",
            ];

            for location in default_locations {
                if Path::new(location).exists() {
                    config_builder =
                        config_builder.add_source(File::new(location, config::FileFormat::Toml));
                    file_found = true;
                    break;
                }
            }
        }

        // A present-but-invalid file is an error; defaults only apply when
        // there is no file at all
        let mut config: AppConfig = if file_found {
            config_builder.build()?.try_deserialize()?
        } else {
            AppConfig::default()
        };

        // Override with command line args if provided
        if let Some(host) = &args.host {
            config.web.host = host.clone();
        }
        if let Some(port) = args.port {
            config.web.port = port;
        }
        if let Some(database) = &args.database {
            config.database.connection_string = database.clone();
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                connection_string: "tickets.db".to_string(),
                pool_size: 5,
            },
            web: WebConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                allowed_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ],
            },
            llm: LlmConfig {
                backend: "ollama".to_string(),
                model: "llama3.2".to_string(),
                api_key: None,
                api_url: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    struct TempConfigFile {
        path: PathBuf,
    }

    impl TempConfigFile {
        fn new(name: &str, contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "ticket-analytics-{}-{}.toml",
                name,
                std::process::id()
            ));
            fs::write(&path, contents).unwrap();
            Self { path }
        }

        fn args(&self) -> CliArgs {
            CliArgs {
                config: Some(self.path.clone()),
                host: None,
                port: None,
                database: None,
            }
        }
    }

    impl Drop for TempConfigFile {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.path);
        }
    }

    const VALID_CONFIG: &str = r#"
        [database]
        connection_string = "analytics.db"
        pool_size = 2

        [web]
        host = "0.0.0.0"
        port = 9000
        allowed_origins = ["http://localhost:5173"]

        [llm]
        backend = "remote"
        model = "gpt-4o-mini"
        api_key = "secret"
        api_url = "https://api.example.com/v1/chat/completions"
    "#;

    #[test]
    fn explicit_config_file_is_loaded() {
        let file = TempConfigFile::new("valid", VALID_CONFIG);
        let config = AppConfig::new(&file.args()).unwrap();
        assert_eq!(config.database.connection_string, "analytics.db");
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.llm.backend, "remote");
    }

    #[test]
    fn incomplete_config_file_is_an_error_not_a_silent_default() {
        // Only a [web] table; the missing sections must surface, not be
        // papered over with AppConfig::default()
        let file = TempConfigFile::new("incomplete", "[web]\nhost = \"0.0.0.0\"\n");
        assert!(AppConfig::new(&file.args()).is_err());
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let file = TempConfigFile::new("malformed", "this is not toml [");
        assert!(AppConfig::new(&file.args()).is_err());
    }

    #[test]
    fn cli_args_override_file_values() {
        let file = TempConfigFile::new("override", VALID_CONFIG);
        let mut args = file.args();
        args.port = Some(4000);
        args.database = Some("elsewhere.db".to_string());
        let config = AppConfig::new(&args).unwrap();
        assert_eq!(config.web.port, 4000);
        assert_eq!(config.database.connection_string, "elsewhere.db");
        assert_eq!(config.web.host, "0.0.0.0");
    }
}
