//! Application configuration loaded from the environment.
//!
//! Sensitive fields are marked and must never be logged.

use envconfig::Envconfig;
use std::sync::LazyLock;

/// Environment variables used to configure the petmate server.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Database host value (NON-SENSITIVE)
    /// Example: "sqlite:data/petmate.db"
    pub db_host: String,

    /// 🔒 SENSITIVE: key used by SQLCipher to encrypt the database in prod
    #[envconfig(default = "")]
    pub db_pass_encrypt: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "8080")]
    pub web_server_port: u16,

    /// Path to SSL private key file, only read in prod (SENSITIVE PATH)
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file, only read in prod (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// 🔒 SENSITIVE: logfire write token. Empty means log to stdout only
    #[envconfig(default = "")]
    pub logfire_token: String,

    /// Origin of the single page front-end allowed by CORS (NON-SENSITIVE)
    #[envconfig(default = "http://localhost:3000")]
    pub cors_allowed_origin: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    pub fn has_logfire_token(&self) -> bool {
        !self.logfire_token.trim().is_empty()
    }

    pub fn server_addr(&self) -> (String, u16) {
        (self.web_server_host.to_string(), self.web_server_port)
    }
}

/// Global application configuration instance.
///
/// Loaded on first access; a missing required variable aborts the process.
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env()
        .expect("Failed to load application configuration. Check environment variables.")
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_defaults_from_hashmap() {
        let mut env = HashMap::new();
        env.insert("DB_HOST".to_string(), "sqlite::memory:".to_string());

        let config = AppConfig::init_from_hashmap(&env).unwrap();

        assert_eq!(config.env, "local");
        assert!(!config.is_prod());
        assert!(!config.has_logfire_token());
        assert_eq!(config.server_addr(), ("0.0.0.0".to_string(), 8080));
    }

    #[test]
    fn test_config_prod_is_case_insensitive() {
        let mut env = HashMap::new();
        env.insert("DB_HOST".to_string(), "sqlite:petmate.db".to_string());
        env.insert("ENV".to_string(), "PROD".to_string());
        env.insert("LOGFIRE_TOKEN".to_string(), "token".to_string());

        let config = AppConfig::init_from_hashmap(&env).unwrap();

        assert!(config.is_prod());
        assert!(config.has_logfire_token());
    }

    #[test]
    fn test_config_missing_db_host_fails() {
        assert!(AppConfig::init_from_hashmap(&HashMap::new()).is_err());
    }
}
