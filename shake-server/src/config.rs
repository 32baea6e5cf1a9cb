//! Server configuration (environment variables)

use crate::error::BoxError;

/// Manager account created at startup when missing
#[derive(Debug, Clone)]
pub struct BootstrapManager {
    pub email: String,
    pub password: String,
    pub firstname: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Allowed CORS origin; permissive when unset
    pub cors_allow_origin: Option<String>,
    pub bootstrap_manager: Option<BootstrapManager>,
    /// `json` for structured output
    pub log_format: String,
    /// Daily-rolling log files are written here when set
    pub log_dir: Option<String>,
    /// Rate limiting keys on X-Forwarded-For instead of the peer address
    pub trust_proxy: bool,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let bootstrap_manager = match (
            non_empty_var("BOOTSTRAP_MANAGER_EMAIL"),
            non_empty_var("BOOTSTRAP_MANAGER_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(BootstrapManager {
                email: email.trim().to_lowercase(),
                password,
                firstname: non_empty_var("BOOTSTRAP_MANAGER_NAME")
                    .unwrap_or_else(|| "Manager".into()),
            }),
            (Some(_), None) | (None, Some(_)) => {
                return Err(
                    "BOOTSTRAP_MANAGER_EMAIL and BOOTSTRAP_MANAGER_PASSWORD must be set together"
                        .into(),
                );
            }
            (None, None) => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_expiry_hours: std::env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h: &i64| *h > 0)
                .unwrap_or(24),
            cors_allow_origin: non_empty_var("CORS_ALLOW_ORIGIN"),
            bootstrap_manager,
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".into()),
            log_dir: non_empty_var("LOG_DIR"),
            trust_proxy: non_empty_var("TRUST_PROXY")
                .is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes")),
            environment,
        })
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
