use std::{env, time::Duration};

#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 25,
            min_connections: 0,
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(300),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
    pub health_check_interval: Duration,
    pub cors_origins: Vec<String>,
    pub pool: PoolSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_parse("APP_PORT").unwrap_or(3000);

        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: env_parse("DB_MAX_CONNECTIONS").unwrap_or(defaults.max_connections),
            min_connections: env_parse("DB_MIN_CONNECTIONS").unwrap_or(defaults.min_connections),
            idle_timeout: env_secs("DB_IDLE_TIMEOUT_SECS").unwrap_or(defaults.idle_timeout),
            max_lifetime: env_secs("DB_MAX_LIFETIME_SECS").unwrap_or(defaults.max_lifetime),
            acquire_timeout: env_secs("DB_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or(defaults.acquire_timeout),
        };

        let cors_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:4000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port,
            database_url,
            host,
            request_timeout: env_secs("REQUEST_TIMEOUT_SECS").unwrap_or(Duration::from_secs(5)),
            health_check_interval: env_secs("DB_HEALTH_CHECK_INTERVAL_SECS")
                .unwrap_or(Duration::from_secs(10)),
            cors_origins,
            pool,
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn env_secs(key: &str) -> Option<Duration> {
    env_parse::<u64>(key).map(Duration::from_secs)
}
