use envconfig::Envconfig;
use std::sync::LazyLock;

/// Subset of the petmate server configuration needed to reach the database
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    #[envconfig(default = "local")]
    pub env: String,
    pub db_host: String,
    #[envconfig(default = "")]
    pub db_pass_encrypt: String,
}

impl AppConfig {
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }
}

pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(|| {
    AppConfig::init_from_env().expect("DB_HOST must be set to run petmate scripts")
});
