//! Configuration module for the back-office.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which login page template `GET /login` renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStyle {
    /// Simple centered form
    Simple,
    /// Split screen with carousel and social providers
    Split,
}

impl LoginStyle {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "login02" | "split" => LoginStyle::Split,
            _ => LoginStyle::Simple,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key guarding /app and /action (disabled when unset)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Optional labels JSON overriding the embedded English labels
    pub labels_path: Option<PathBuf>,
    /// Asset cache-busting token handed to every page
    pub cache_version: String,
    /// Login page variant
    pub login_style: LoginStyle,
    /// Where a successful login lands
    pub login_redirect: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let api_psk = env::var("BACKOFFICE_API_PSK")
            .ok()
            .filter(|psk| !psk.is_empty());

        let db_path = env::var("BACKOFFICE_DB_PATH")
            .unwrap_or_else(|_| "./data/backoffice.sqlite".to_string())
            .into();

        let bind_addr = env::var("BACKOFFICE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| format!("Invalid BACKOFFICE_BIND_ADDR format: {}", bind_addr))?;

        let log_level = env::var("BACKOFFICE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let labels_path = env::var("BACKOFFICE_LABELS_PATH").ok().map(PathBuf::from);

        let cache_version =
            env::var("BACKOFFICE_CACHE_VERSION").unwrap_or_else(|_| "dev".to_string());

        let login_style = LoginStyle::parse(
            &env::var("BACKOFFICE_LOGIN_STYLE").unwrap_or_default(),
        );

        let login_redirect = env::var("BACKOFFICE_LOGIN_REDIRECT")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "/app/".to_string());

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            labels_path,
            cache_version,
            login_style,
            login_redirect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 8] = [
        "BACKOFFICE_API_PSK",
        "BACKOFFICE_DB_PATH",
        "BACKOFFICE_BIND_ADDR",
        "BACKOFFICE_LOG_LEVEL",
        "BACKOFFICE_LABELS_PATH",
        "BACKOFFICE_CACHE_VERSION",
        "BACKOFFICE_LOGIN_STYLE",
        "BACKOFFICE_LOGIN_REDIRECT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env().unwrap();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/backoffice.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.labels_path.is_none());
        assert_eq!(config.login_style, LoginStyle::Simple);
        assert_eq!(config.login_redirect, "/app/");
    }

    #[test]
    fn test_invalid_bind_addr_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("BACKOFFICE_BIND_ADDR", "not-an-address");

        let result = Config::from_env();
        env::remove_var("BACKOFFICE_BIND_ADDR");

        assert!(result.unwrap_err().contains("BACKOFFICE_BIND_ADDR"));
    }

    #[test]
    fn test_login_style_parse() {
        assert_eq!(LoginStyle::parse("login02"), LoginStyle::Split);
        assert_eq!(LoginStyle::parse(" Split "), LoginStyle::Split);
        assert_eq!(LoginStyle::parse("login01"), LoginStyle::Simple);
        assert_eq!(LoginStyle::parse(""), LoginStyle::Simple);
    }
}
