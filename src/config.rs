use dotenvy::dotenv;
use std::env;
use std::sync::{Arc, OnceLock};

/// Global Config stored in `OnceLock`, built lazily on first access.
static CONFIG: OnceLock<Arc<Config>> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
}

impl Config {
    /// Load environment variables and set defaults
    fn from_env() -> Self {
        dotenv().ok(); // Load .env only once

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://festival.db?mode=rwc".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "kadlekai-parishe-secret-key".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
        }
    }

    /// Safe access to Config
    pub fn get() -> Arc<Config> {
        CONFIG.get_or_init(|| Arc::new(Self::from_env())).clone()
    }
}
