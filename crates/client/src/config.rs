use paypal_nvp_types::Environment;
use serde::{Deserialize, Serialize};

const REDACTED: &str = "Redacted";

/// API credentials issued by PayPal for signature-based authentication
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub signature: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            signature: signature.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("signature", &REDACTED)
            .finish()
    }
}

/// Configuration for a [`PayPalClient`](crate::PayPalClient)
///
/// Can be built in code or deserialized from the embedding application's
/// own configuration:
///
/// ```yaml
/// credentials:
///   username: merchant_api1.example.com
///   password: "..."
///   signature: "..."
/// environment: sandbox
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub credentials: Credentials,

    /// Sandbox or production, defaults to sandbox
    #[serde(default)]
    pub environment: Environment,

    /// Replaces the environment's NVP endpoint (proxies, local gateways).
    /// Checkout URLs are not affected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nvp_endpoint: Option<String>,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            environment: Environment::default(),
            nvp_endpoint: None,
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the NVP endpoint override
    pub fn with_nvp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.nvp_endpoint = Some(endpoint.into());
        self
    }

    /// Endpoint requests are POSTed to
    pub fn endpoint(&self) -> &str {
        self.nvp_endpoint
            .as_deref()
            .unwrap_or_else(|| self.environment.nvp_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials::new("merchant_api1.example.com", "hunter2", "sig-abc");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("merchant_api1.example.com"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("sig-abc"));
    }

    #[test]
    fn test_endpoint_defaults_to_environment() {
        let config = ClientConfig::new(Credentials::new("u", "p", "s"));
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.endpoint(), "https://api-3t.sandbox.paypal.com/nvp");

        let config = config.with_environment(Environment::Production);
        assert_eq!(config.endpoint(), "https://api-3t.paypal.com/nvp");
    }

    #[test]
    fn test_endpoint_override() {
        let config = ClientConfig::new(Credentials::new("u", "p", "s"))
            .with_environment(Environment::Production)
            .with_nvp_endpoint("http://127.0.0.1:9000/nvp");
        assert_eq!(config.endpoint(), "http://127.0.0.1:9000/nvp");
    }

    #[test]
    fn test_deserialize_config() {
        let json = r#"{
            "credentials": {
                "username": "merchant_api1.example.com",
                "password": "pw",
                "signature": "sig"
            },
            "environment": "production"
        }"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.credentials.username, "merchant_api1.example.com");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.nvp_endpoint, None);
    }
}
