use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_port: u16,
    pub jwt_secret: String,
    pub jwt_expires_secs: i64,
    pub cors_origins: Vec<String>,
    pub upload_dir: String,
    pub max_file_size: usize,
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_host: env_or("DB_HOST", "localhost"),
            db_user: env_or("DB_USER", "postgres"),
            db_password: env_or("DB_PASSWORD", ""),
            db_name: env_or("DB_NAME", "cinda_db"),
            db_port: env_or("DB_PORT", "5432").parse().unwrap_or(5432),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                tracing::warn!("JWT_SECRET not set, using default (insecure!)");
                "jwt-secret-key-change-this-in-production".to_string()
            }),
            jwt_expires_secs: env_or("JWT_EXPIRES_SECS", "86400").parse().unwrap_or(86400),
            cors_origins: env_or("CORS_ORIGINS", "http://localhost:3000,http://127.0.0.1:5500")
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            max_file_size: env_or("MAX_FILE_SIZE", "104857600").parse().unwrap_or(104_857_600),
            host: env_or("HOST", "0.0.0.0"),
            port: env_or("PORT", "5000").parse().unwrap_or(5000),
            debug: env_or("DEBUG", "false").to_lowercase() == "true",
        }
    }

    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}
