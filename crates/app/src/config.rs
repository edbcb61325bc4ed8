//! Configuration

use std::time::Duration;

use clap::Args;

use crate::api::ApiConfig;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// REST API settings.
#[derive(Debug, Args)]
pub struct ApiSettings {
    /// Storefront REST API host
    #[arg(long, env = "CARTA_API_URL", global = true)]
    pub api_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "CARTA_HTTP_TIMEOUT_SECONDS", default_value_t = 10u64, global = true)]
    pub http_timeout_seconds: u64,
}

impl ApiSettings {
    /// API client configuration, if an API host was given.
    pub fn api_config(&self) -> Option<ApiConfig> {
        let base_url = self.api_url.as_deref().map(str::trim).filter(|url| !url.is_empty())?;

        Some(ApiConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(self.http_timeout_seconds),
        })
    }
}

/// Order hand-off settings.
#[derive(Debug, Args)]
pub struct OrderSettings {
    /// WhatsApp number orders are sent to, with country code
    #[arg(long, env = "CARTA_ORDER_PHONE", global = true)]
    pub order_phone: Option<String>,
}
