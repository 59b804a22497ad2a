//! Configuration management for Listkeep
//!
//! All configurable parameters in one place with environment variable
//! overrides. Follows the principle: sensible defaults, configurable in
//! production.

use std::env;
use tracing::info;

/// Server configuration loaded from environment with defaults
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host address (default: 127.0.0.1)
    /// Set to 0.0.0.0 for Docker or network-accessible deployments
    pub host: String,

    /// Server port (default: 4567)
    pub port: u16,

    /// Session idle lifetime in seconds (default: 86400 = 24 hours)
    /// A session untouched for this long is dropped by the sweeper.
    pub session_ttl_secs: u64,

    /// Session sweep interval in seconds (default: 300 = 5 minutes)
    pub session_sweep_interval_secs: u64,

    /// Name of the session cookie (default: listkeep_session)
    pub cookie_name: String,

    /// Whether the session cookie carries the Secure attribute
    /// (default: false, auto-enabled in production)
    pub cookie_secure: bool,

    /// Maximum concurrent requests (default: 200)
    pub max_concurrent_requests: usize,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_secs: u64,

    /// Whether running in production mode
    pub is_production: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4567,
            session_ttl_secs: 86_400,
            session_sweep_interval_secs: 300,
            cookie_name: "listkeep_session".to_string(),
            cookie_secure: false,
            max_concurrent_requests: 200,
            request_timeout_secs: 30,
            is_production: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults
    #[allow(clippy::field_reassign_with_default)] // Environment overrides require mutable config
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check production mode first
        config.is_production = env::var("LISTKEEP_ENV")
            .map(|v| {
                let v = v.to_lowercase();
                v == "production" || v == "prod"
            })
            .unwrap_or(false);

        // Host (bind address)
        if let Ok(val) = env::var("LISTKEEP_HOST") {
            config.host = val;
        }

        // Port
        if let Ok(val) = env::var("LISTKEEP_PORT") {
            if let Ok(port) = val.parse() {
                config.port = port;
            }
        }

        // Session lifetime
        if let Ok(val) = env::var("LISTKEEP_SESSION_TTL") {
            if let Ok(n) = val.parse() {
                config.session_ttl_secs = n;
            }
        }

        if let Ok(val) = env::var("LISTKEEP_SESSION_SWEEP_INTERVAL") {
            if let Ok(n) = val.parse() {
                config.session_sweep_interval_secs = n;
            }
        }

        // Cookie settings
        if let Ok(val) = env::var("LISTKEEP_COOKIE_NAME") {
            if !val.is_empty() {
                config.cookie_name = val;
            }
        }

        // Secure cookies follow production mode unless explicitly set
        if let Ok(val) = env::var("LISTKEEP_COOKIE_SECURE") {
            config.cookie_secure = val.to_lowercase() == "true" || val == "1";
        } else if config.is_production {
            config.cookie_secure = true;
        }

        // Concurrency
        if let Ok(val) = env::var("LISTKEEP_MAX_CONCURRENT") {
            if let Ok(n) = val.parse() {
                config.max_concurrent_requests = n;
            }
        }

        // Request timeout
        if let Ok(val) = env::var("LISTKEEP_REQUEST_TIMEOUT") {
            if let Ok(n) = val.parse() {
                config.request_timeout_secs = n;
            }
        }

        config
    }

    /// Log the current configuration
    pub fn log(&self) {
        info!("Configuration:");
        info!(
            "   Mode: {}",
            if self.is_production {
                "PRODUCTION"
            } else {
                "Development"
            }
        );
        info!("   Bind: {}:{}", self.host, self.port);
        info!(
            "   Session TTL: {}s (swept every {}s)",
            self.session_ttl_secs, self.session_sweep_interval_secs
        );
        info!(
            "   Session cookie: {} (secure: {})",
            self.cookie_name, self.cookie_secure
        );
        info!("   Max concurrent: {}", self.max_concurrent_requests);
        info!("   Request timeout: {}s", self.request_timeout_secs);
    }
}

/// Environment variable documentation
#[allow(unused)] // Public API - available for CLI help output
pub fn print_env_help() {
    println!("Listkeep Configuration Environment Variables:");
    println!();
    println!("  LISTKEEP_ENV                    - Set to 'production' or 'prod' for production mode");
    println!("  LISTKEEP_HOST                   - Bind address (default: 127.0.0.1, use 0.0.0.0 for Docker)");
    println!("  LISTKEEP_PORT                   - Server port (default: 4567)");
    println!("  LISTKEEP_SESSION_TTL            - Session idle lifetime in seconds (default: 86400)");
    println!("  LISTKEEP_SESSION_SWEEP_INTERVAL - Expired-session sweep interval in seconds (default: 300)");
    println!("  LISTKEEP_COOKIE_NAME            - Session cookie name (default: listkeep_session)");
    println!("  LISTKEEP_COOKIE_SECURE          - Set Secure on the cookie true/false (default: auto in production)");
    println!("  LISTKEEP_MAX_CONCURRENT         - Max concurrent requests (default: 200)");
    println!("  LISTKEEP_REQUEST_TIMEOUT        - Request timeout in seconds (default: 30)");
    println!();
    println!("  RUST_LOG                        - Log level (e.g., info, debug, trace)");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 4567);
        assert_eq!(config.session_ttl_secs, 86_400);
        assert_eq!(config.cookie_name, "listkeep_session");
        assert!(!config.is_production);
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_env_override() {
        env::set_var("LISTKEEP_PORT", "8080");
        env::set_var("LISTKEEP_SESSION_TTL", "600");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, 8080);
        assert_eq!(config.session_ttl_secs, 600);

        env::remove_var("LISTKEEP_PORT");
        env::remove_var("LISTKEEP_SESSION_TTL");
    }
}
