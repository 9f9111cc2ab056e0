//! Server Configuration

use serde::Serialize;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 4242;

/// Presence flags for the environment variables the service cares about.
///
/// Captured once at startup and reported by the health endpoint, so a
/// deploy can be checked without any secret value leaving the process.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnvPresence {
    #[serde(rename = "STRIPE_SECRET_KEY")]
    pub stripe_secret_key: bool,

    #[serde(rename = "STRIPE_PUBLISHABLE_KEY")]
    pub stripe_publishable_key: bool,

    #[serde(rename = "GOOGLE_SHEET_ID")]
    pub google_sheet_id: bool,

    #[serde(rename = "GOOGLE_CLIENT_EMAIL")]
    pub google_client_email: bool,
}

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,

    /// Publishable key handed to the browser; empty when unset
    pub publishable_key: String,

    /// Environment snapshot for the health endpoint
    pub env_presence: EnvPresence,
}

impl ServerConfig {
    /// Reads `PORT`, the Stripe keys, and the sheet variables.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let publishable_key = std::env::var("STRIPE_PUBLISHABLE_KEY").unwrap_or_default();

        let env_presence = EnvPresence {
            stripe_secret_key: env_present("STRIPE_SECRET_KEY"),
            stripe_publishable_key: !publishable_key.is_empty(),
            google_sheet_id: env_present("GOOGLE_SHEET_ID"),
            google_client_email: env_present("GOOGLE_CLIENT_EMAIL"),
        };

        Self {
            port,
            publishable_key,
            env_presence,
        }
    }

    /// Address to bind, all interfaces.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn env_present(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_presence_serializes_with_variable_names() {
        let presence = EnvPresence {
            stripe_secret_key: true,
            stripe_publishable_key: false,
            google_sheet_id: true,
            google_client_email: false,
        };
        let value = serde_json::to_value(presence).unwrap();
        assert_eq!(value["STRIPE_SECRET_KEY"], true);
        assert_eq!(value["STRIPE_PUBLISHABLE_KEY"], false);
        assert_eq!(value["GOOGLE_SHEET_ID"], true);
        assert_eq!(value["GOOGLE_CLIENT_EMAIL"], false);
    }

    #[test]
    fn binds_all_interfaces_on_the_configured_port() {
        let config = ServerConfig {
            port: 8080,
            publishable_key: String::new(),
            env_presence: EnvPresence {
                stripe_secret_key: false,
                stripe_publishable_key: false,
                google_sheet_id: false,
                google_client_email: false,
            },
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }
}
