use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; when set it wins over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub cors_origin: String,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env_parse("PORT", 8080),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok(),
                host: env_or("DB_HOST", "localhost"),
                port: env_parse("DB_PORT", 5432),
                user: env_or("DB_USER", "postgres"),
                password: env_or("DB_PASS", ""),
                name: env_or("DB_NAME", "storefront"),
                max_connections: env_parse("DB_MAX_CONNECTIONS", 10),
                acquire_timeout_secs: env_parse("DB_ACQUIRE_TIMEOUT_SECS", 5),
                max_lifetime_secs: env_parse("DB_MAX_LIFETIME_SECS", 30 * 60),
                idle_timeout_secs: env_parse("DB_IDLE_TIMEOUT_SECS", 5 * 60),
            },
            security: SecurityConfig {
                jwt_secret: env_or("JWT_SECRET", ""),
                jwt_expiry_hours: 8,
                cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            },
            chat: ChatConfig {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
                model: env_or("GEMINI_MODEL", "gemini-1.5-flash"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.security.jwt_expiry_hours, 8);
        assert_eq!(cfg.database.max_connections, 10);
        assert!(!cfg.chat.model.is_empty());
    }
}
