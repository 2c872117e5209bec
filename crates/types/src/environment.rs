use serde::{Deserialize, Serialize};

/// NVP endpoint used when talking to the sandbox
pub const NVP_SANDBOX_URL: &str = "https://api-3t.sandbox.paypal.com/nvp";

/// NVP endpoint used in production
pub const NVP_PRODUCTION_URL: &str = "https://api-3t.paypal.com/nvp";

/// Buyer-facing checkout page in the sandbox
pub const CHECKOUT_SANDBOX_URL: &str = "https://www.sandbox.paypal.com/cgi-bin/webscr";

/// Buyer-facing checkout page in production
pub const CHECKOUT_PRODUCTION_URL: &str = "https://www.paypal.com/cgi-bin/webscr";

/// API version sent with every request
pub const NVP_VERSION: &str = "94";

/// Which PayPal deployment a client talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn from_sandbox_flag(uses_sandbox: bool) -> Self {
        if uses_sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }

    /// NVP API endpoint for this environment
    pub fn nvp_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => NVP_SANDBOX_URL,
            Environment::Production => NVP_PRODUCTION_URL,
        }
    }

    /// Checkout redirect base for this environment
    pub fn checkout_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => CHECKOUT_SANDBOX_URL,
            Environment::Production => CHECKOUT_PRODUCTION_URL,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Sandbox => write!(f, "sandbox"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_flag() {
        assert_eq!(Environment::from_sandbox_flag(true), Environment::Sandbox);
        assert_eq!(
            Environment::from_sandbox_flag(false),
            Environment::Production
        );
        assert!(Environment::Sandbox.is_sandbox());
        assert!(!Environment::Production.is_sandbox());
    }

    #[test]
    fn test_urls_follow_environment() {
        assert_eq!(Environment::Sandbox.nvp_url(), NVP_SANDBOX_URL);
        assert_eq!(Environment::Production.nvp_url(), NVP_PRODUCTION_URL);
        assert_eq!(Environment::Sandbox.checkout_url(), CHECKOUT_SANDBOX_URL);
        assert_eq!(
            Environment::Production.checkout_url(),
            CHECKOUT_PRODUCTION_URL
        );
    }

    #[test]
    fn test_parse_from_config() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(env, Environment::Production);
        assert_eq!(env.to_string(), "production");
    }
}
