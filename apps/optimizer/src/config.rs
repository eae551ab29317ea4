use anyhow::{Context, Result};

/// Runtime configuration loaded from environment variables (and `.env` when present).
/// Every value is optional; CLI flags override what is set here.
#[derive(Debug, Clone)]
pub struct Config {
    pub output_prefix: String,
    pub default_role: String,
    pub default_company: String,
    pub max_input_bytes: u64,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_prefix: "resume_optimization_output".to_string(),
            default_role: "Software Engineer".to_string(),
            default_company: "Target Company".to_string(),
            max_input_bytes: 50 * 1024 * 1024,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let max_input_mb = match std::env::var("RESUME_MAX_INPUT_MB") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .context("RESUME_MAX_INPUT_MB must be a whole number of megabytes")?,
            Err(_) => 50,
        };

        Ok(Config {
            output_prefix: env_or("RESUME_OUTPUT_PREFIX", defaults.output_prefix),
            default_role: env_or("RESUME_DEFAULT_ROLE", defaults.default_role),
            default_company: env_or("RESUME_DEFAULT_COMPANY", defaults.default_company),
            max_input_bytes: megabytes_to_bytes(max_input_mb)?,
            rust_log: env_or("RUST_LOG", defaults.rust_log),
        })
    }
}

fn megabytes_to_bytes(mb: u64) -> Result<u64> {
    mb.checked_mul(1024 * 1024)
        .context("RESUME_MAX_INPUT_MB is too large")
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.default_role, "Software Engineer");
        assert_eq!(config.default_company, "Target Company");
        assert_eq!(config.output_prefix, "resume_optimization_output");
        assert_eq!(config.max_input_bytes, 52_428_800);
    }

    #[test]
    fn test_megabytes_to_bytes_rejects_overflow() {
        assert_eq!(megabytes_to_bytes(50).unwrap(), 52_428_800);
        assert_eq!(megabytes_to_bytes(0).unwrap(), 0);
        assert!(megabytes_to_bytes(u64::MAX).is_err());
        assert!(megabytes_to_bytes(u64::MAX / (1024 * 1024) + 1).is_err());
    }

    #[test]
    fn test_env_or_ignores_blank_values() {
        std::env::set_var("RESUME_TEST_BLANK_KEY", "   ");
        assert_eq!(env_or("RESUME_TEST_BLANK_KEY", "fallback".into()), "fallback");
        std::env::remove_var("RESUME_TEST_BLANK_KEY");
    }
}
