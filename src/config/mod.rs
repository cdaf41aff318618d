use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// The single accepted credential pair. A shared-secret placeholder,
    /// not a credential system.
    pub login_user: String,
    pub login_password: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("ORDER_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://database.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(10);

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "troque-este-segredo".to_string());

        let jwt_expiry_hours = env::var("JWT_EXPIRY_HOURS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);

        let login_user = env::var("LOGIN_USER").unwrap_or_else(|_| "admin".to_string());
        let login_password = env::var("LOGIN_PASSWORD").unwrap_or_else(|_| "123456".to_string());

        Self {
            server: ServerConfig { port },
            database: DatabaseConfig { url, max_connections },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours,
                login_user,
                login_password,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
