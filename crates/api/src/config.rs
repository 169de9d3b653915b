use crate::auth::jwt::JwtConfig;

/// The single administrative identity allowed to use `/api/v1/admin`.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    /// Login email, compared case-insensitively.
    pub email: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// `None` disables login entirely; every admin request then fails with 401.
    pub admin: Option<AdminCredentials>,
    /// Recipient for owner notifications. Falls back to the settings email.
    pub notify_email: Option<String>,
    /// Public base URL used to build links in outgoing email.
    pub site_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `ADMIN_EMAIL`          | unset (login disabled)     |
    /// | `ADMIN_PASSWORD_HASH`  | unset (login disabled)     |
    /// | `NOTIFY_EMAIL`         | unset                      |
    /// | `SITE_URL`             | `http://localhost:3000`    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let admin = match (
            non_empty_var("ADMIN_EMAIL"),
            non_empty_var("ADMIN_PASSWORD_HASH"),
        ) {
            (Some(email), Some(password_hash)) => Some(AdminCredentials {
                email,
                password_hash,
            }),
            (None, None) => None,
            _ => panic!("ADMIN_EMAIL and ADMIN_PASSWORD_HASH must be set together"),
        };

        let site_url = non_empty_var("SITE_URL")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            admin,
            notify_email: non_empty_var("NOTIFY_EMAIL"),
            site_url,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated value, dropping blank entries.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_blanks() {
        assert_eq!(
            split_list(" http://a.test , ,http://b.test,"),
            vec!["http://a.test", "http://b.test"]
        );
        assert!(split_list("").is_empty());
    }
}
