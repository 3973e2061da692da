use crate::auth::password;

/// The single administrator account, read from the environment and hashed
/// once at startup. There is no user table; the cookie session carries the
/// admin flag after a successful login.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password_hash: String,
}

impl AdminCredentials {
    /// Build from ADMIN_USERNAME / ADMIN_PASSWORD, with development defaults.
    pub fn from_env() -> Self {
        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            log::warn!("ADMIN_PASSWORD not set; using the default development password");
            "attendance123".to_string()
        });
        Self::new(username, &password)
    }

    pub fn new(username: String, password: &str) -> Self {
        let password_hash =
            password::hash_password(password).expect("Failed to hash admin password");
        AdminCredentials {
            username,
            password_hash,
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username
            && password::verify_password(password, &self.password_hash).unwrap_or(false)
    }
}
