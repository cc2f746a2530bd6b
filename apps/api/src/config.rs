use anyhow::{Context, Result};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on request bodies carrying CV content.
    pub max_cv_bytes: usize,
    pub cors_permissive: bool,
}

const DEFAULT_MAX_CV_BYTES: usize = 2 * 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_cv_bytes: optional_env("MAX_CV_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_CV_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_CV_BYTES),
            cors_permissive: optional_env("CORS_PERMISSIVE")
                .map(|v| parse_flag(&v))
                .transpose()?
                .unwrap_or(true),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_cv_bytes: DEFAULT_MAX_CV_BYTES,
            cors_permissive: true,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("CORS_PERMISSIVE must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" YES ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_default_limits() {
        let config = Config::default();
        assert_eq!(config.max_cv_bytes, 2_097_152);
        assert!(config.cors_permissive);
    }
}
