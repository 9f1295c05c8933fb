use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub pagination: PaginationConfig,
    pub uploads: UploadConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub password_hash_cost: u32,
}

#[derive(Debug, Clone)]
pub struct PaginationConfig {
    pub default_limit: i64,
    pub max_limit: i64,
}

/// Image-host upload settings. The host is an external collaborator: when it
/// is not configured, uploads are skipped and the affected request proceeds
/// without a picture.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub image_host_url: Option<String>,
    pub image_host_key: Option<String>,
    pub upload_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: Option<String>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_address: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env_parsed("PORT", 5000),
            },
            security: SecurityConfig {
                jwt_secret: env::var("JWT_SECRET_KEY").unwrap_or_default(),
                jwt_expiry_hours: env_parsed("JWT_EXPIRY_HOURS", 24),
                password_hash_cost: env_parsed("PASSWORD_HASH_COST", bcrypt::DEFAULT_COST),
            },
            pagination: PaginationConfig {
                default_limit: env_parsed("DEFAULT_PAGE_SIZE", 5),
                max_limit: env_parsed("MAX_PAGE_SIZE", 100),
            },
            uploads: UploadConfig {
                image_host_url: env::var("IMAGE_HOST_URL").ok(),
                image_host_key: env::var("IMAGE_HOST_KEY").ok(),
                upload_timeout_secs: env_parsed("IMAGE_UPLOAD_TIMEOUT_SECS", 10),
            },
            mail: MailConfig {
                smtp_host: env::var("SMTP_HOST").ok(),
                smtp_username: env::var("SMTP_USERNAME").ok(),
                smtp_password: env::var("SMTP_PASSWORD").ok(),
                from_address: env::var("MAIL_FROM").ok(),
            },
        }
    }
}

fn env_parsed<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
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
        // Build directly rather than through the Lazy so other tests that
        // set env vars first cannot interfere with the singleton.
        let config = AppConfig {
            server: ServerConfig { port: 5000 },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                password_hash_cost: bcrypt::DEFAULT_COST,
            },
            pagination: PaginationConfig {
                default_limit: 5,
                max_limit: 100,
            },
            uploads: UploadConfig {
                image_host_url: None,
                image_host_key: None,
                upload_timeout_secs: 10,
            },
            mail: MailConfig {
                smtp_host: None,
                smtp_username: None,
                smtp_password: None,
                from_address: None,
            },
        };
        assert_eq!(config.pagination.default_limit, 5);
        assert!(config.uploads.image_host_url.is_none());
    }

    #[test]
    fn env_parsed_falls_back_on_garbage() {
        std::env::set_var("TASKPAD_TEST_GARBAGE_PORT", "not-a-number");
        let port: u16 = env_parsed("TASKPAD_TEST_GARBAGE_PORT", 5000);
        assert_eq!(port, 5000);
    }
}
