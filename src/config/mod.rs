use std::env;

/// Runtime configuration for the admin backend
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default page size for admin listings (default: 10)
    pub default_page_size: u64,

    /// Create an initial admin account when the users table is empty
    /// (default: true)
    pub seed_admin: bool,

    /// Seed admin username (default: "admin")
    pub admin_username: String,

    /// Seed admin email (default: "admin@localhost")
    pub admin_email: String,

    /// Seed admin password; change it after first login
    pub admin_password: String,

    /// Allowed CORS Origins (comma separated)
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            seed_admin: true,
            admin_username: "admin".to_string(),
            admin_email: "admin@localhost".to_string(),
            admin_password: "changeme".to_string(),
            // Localhost only instead of wildcard
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(), // Vite default
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v >= 1)
                .unwrap_or(default.default_page_size),

            seed_admin: env::var("SEED_ADMIN")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(default.seed_admin),

            admin_username: env::var("ADMIN_USERNAME").unwrap_or(default.admin_username),

            admin_email: env::var("ADMIN_EMAIL").unwrap_or(default.admin_email),

            admin_password: env::var("ADMIN_PASSWORD").unwrap_or(default.admin_password),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_page_size, 10);
        assert!(config.seed_admin);
        assert_eq!(config.admin_username, "admin");
    }

    #[test]
    fn test_from_env_cors_fallback() {
        unsafe { env::remove_var("ALLOWED_ORIGINS") };
        let config = AppConfig::from_env();
        let default_config = AppConfig::default();
        assert_eq!(config.allowed_origins, default_config.allowed_origins);
        assert!(!config.allowed_origins.contains(&"*".to_string()));
    }

    #[test]
    fn test_page_size_rejects_zero() {
        unsafe { env::set_var("DEFAULT_PAGE_SIZE", "0") };
        let config = AppConfig::from_env();
        unsafe { env::remove_var("DEFAULT_PAGE_SIZE") };
        assert_eq!(config.default_page_size, 10);
    }
}
