use serde::Deserialize;
use std::env;
use tripkart_shared::Paise;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Soft TTL of a seat lock; enforced lazily, no background sweeper.
    pub lock_ttl_seconds: u64,
    /// Flat convenience fee stamped onto new carts, in paise.
    pub convenience_fee: Paise,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Then the per-environment file, which is optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // A local override file, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Finally the environment, e.g. TRIPKART__SERVER__PORT=8080
            .add_source(config::Environment::with_prefix("TRIPKART").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
