//! Configuration loading from environment.

use std::env;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("Unknown LOG_FORMAT `{}` (expected `pretty` or `json`)", other),
        }
    }
}

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub log_format: LogFormat,
    /// OTLP collector endpoint; telemetry export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let log_format = lookup("LOG_FORMAT")
            .map(|s| s.parse::<LogFormat>())
            .transpose()?
            .unwrap_or(LogFormat::Pretty);

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.is_empty());

        Ok(Self {
            port,
            database_url,
            log_format,
            otlp_endpoint,
        })
    }
}
