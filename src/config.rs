//! Listener and service configuration
//!
//! Parsed from CLI flags with environment fallbacks. Configuration only
//! selects collaborators (bind address, database path, provider toggle);
//! it never changes resolution semantics.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "anuvad", version, about = "Text translation service with dictionary fallback")]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 9000)]
    pub port: u16,

    /// Path of the SQLite database holding translation logs
    #[arg(long, env = "DATABASE_PATH", default_value = "translation_logs.db")]
    pub database_path: PathBuf,

    /// Disable the external translation provider (dictionary only)
    #[arg(long, env = "NO_PROVIDER", default_value_t = false)]
    pub no_provider: bool,

    /// Enable verbose logging
    #[arg(long, env = "DEBUG", default_value_t = false)]
    pub debug: bool,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["anuvad"]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert!(!config.no_provider);
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::parse_from([
            "anuvad",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--no-provider",
        ]);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert!(config.no_provider);
    }
}
