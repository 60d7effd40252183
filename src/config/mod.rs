//! Configuration module for the G2L backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_DEMO_DELAY_MS: u64 = 5000;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file backing the key/value store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Gemini API key; generation fails without it
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Whether the demo scenario shortcuts are consulted before real generation
    pub demo_scenarios: bool,
    /// Simulated delay before a demo scenario resolves
    pub demo_delay: Duration,
    /// Malformed variables that fell back to defaults. Logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let mut warnings = Vec::new();

        let db_path = env::var("G2L_DB_PATH")
            .unwrap_or_else(|_| "./data/g2l.sqlite".to_string())
            .into();

        let bind_addr = env::var("G2L_BIND_ADDR")
            .ok()
            .and_then(|raw| match raw.parse() {
                Ok(addr) => Some(addr),
                Err(e) => {
                    warnings.push(format!(
                        "Invalid G2L_BIND_ADDR {:?} ({}), using default",
                        raw, e
                    ));
                    None
                }
            })
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR));

        let log_level = env::var("G2L_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = match env::var("G2L_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let gemini_model =
            env::var("G2L_GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());

        let demo_scenarios = env::var("G2L_DEMO_SCENARIOS")
            .ok()
            .map(|raw| parse_flag(&raw))
            .unwrap_or(true);

        let demo_delay_ms = env::var("G2L_DEMO_DELAY_MS")
            .ok()
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    warnings.push(format!(
                        "Invalid G2L_DEMO_DELAY_MS {:?} ({}), using default",
                        raw, e
                    ));
                    None
                }
            })
            .unwrap_or(DEFAULT_DEMO_DELAY_MS);

        Self {
            db_path,
            bind_addr,
            log_level,
            log_format,
            gemini_api_key,
            gemini_model,
            demo_scenarios,
            demo_delay: Duration::from_millis(demo_delay_ms),
            warnings,
        }
    }
}

/// Anything other than an explicit "off" value keeps the flag enabled.
fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
