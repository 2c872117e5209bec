use paypal_nvp_types::{Environment, NVP_VERSION, NvpResponse, NvpValues};
use tracing::{debug, warn};

use crate::{
    config::{ClientConfig, Credentials},
    error::{PayPalError, Result},
};

/// Client for the PayPal NVP API
///
/// Holds the API credentials and an HTTP client; no other state is kept
/// between calls, so a single instance can be cloned and shared freely.
///
/// # Example
///
/// ```no_run
/// use paypal_nvp::{DigitalGood, PayPalClient, sum_digital_good_amounts};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PayPalClient::new("merchant_api1.example.com", "password", "signature", true);
///
///     let goods = vec![DigitalGood::new("E-book", 9.99, 1)];
///     let response = client
///         .set_express_checkout_digital_goods(
///             sum_digital_good_amounts(&goods),
///             "USD",
///             "https://shop.example/return",
///             "https://shop.example/cancel",
///             &goods,
///         )
///         .await?;
///
///     println!("Send the buyer to {}", response.checkout_url());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PayPalClient {
    credentials: Credentials,
    environment: Environment,
    endpoint: String,
    http_client: reqwest::Client,
}

impl PayPalClient {
    /// Create a client with a default HTTP client
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
        uses_sandbox: bool,
    ) -> Self {
        Self::with_http_client(
            username,
            password,
            signature,
            uses_sandbox,
            reqwest::Client::new(),
        )
    }

    /// Create a client that sends requests through `http_client`
    pub fn with_http_client(
        username: impl Into<String>,
        password: impl Into<String>,
        signature: impl Into<String>,
        uses_sandbox: bool,
        http_client: reqwest::Client,
    ) -> Self {
        let config = ClientConfig::new(Credentials::new(username, password, signature))
            .with_environment(Environment::from_sandbox_flag(uses_sandbox));
        Self::from_config_with_http_client(config, http_client)
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::from_config_with_http_client(config, reqwest::Client::new())
    }

    pub fn from_config_with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        let endpoint = config.endpoint().to_string();
        Self {
            credentials: config.credentials,
            environment: config.environment,
            endpoint,
            http_client,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn uses_sandbox(&self) -> bool {
        self.environment.is_sandbox()
    }

    /// NVP endpoint requests are POSTed to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sign `values` with the client credentials, POST them and decode the reply.
    ///
    /// `USER`, `PWD`, `SIGNATURE` and `VERSION` are appended to `values`.
    /// The HTTP status is ignored: PayPal reports failures in the body, and
    /// a reply whose `ACK` is a failure (or that carries `L_ERRORCODE0`)
    /// comes back as [`PayPalError::Gateway`] together with the decoded
    /// response. A body that is not a well-formed NVP string is
    /// [`PayPalError::Decode`]. Transport and body-read failures are
    /// returned as they are.
    pub async fn perform_request(&self, mut values: NvpValues) -> Result<NvpResponse> {
        values.add("USER", self.credentials.username.as_str());
        values.add("PWD", self.credentials.password.as_str());
        values.add("SIGNATURE", self.credentials.signature.as_str());
        values.add("VERSION", NVP_VERSION);

        let method = values.get_or_empty("METHOD");
        debug!(
            method = %method,
            endpoint = %self.endpoint,
            environment = %self.environment,
            "Sending NVP request"
        );

        let http_response = self
            .http_client
            .post(&self.endpoint)
            .form(&values.pairs())
            .send()
            .await
            .map_err(PayPalError::Transport)?;

        let status = http_response.status();
        let body = http_response.text().await.map_err(PayPalError::Body)?;

        let values = match NvpValues::parse_strict(&body) {
            Ok(values) => values,
            Err(source) => {
                warn!(
                    method = %method,
                    status = status.as_u16(),
                    error = %source,
                    "NVP response body is not decodable"
                );
                return Err(PayPalError::Decode { source, body });
            }
        };

        let response = NvpResponse::from_values(values, self.environment);
        debug!(
            method = %method,
            status = status.as_u16(),
            ack = %response.ack,
            correlation_id = %response.correlation_id,
            "Received NVP response"
        );

        if let Some(error) = response.gateway_error() {
            warn!(
                method = %method,
                ack = %error.ack,
                error_code = %error.error_code,
                short_message = %error.short_message,
                correlation_id = %response.correlation_id,
                "PayPal declared the call failed"
            );
            return Err(PayPalError::Gateway {
                error,
                response: Box::new(response),
            });
        }

        Ok(response)
    }
}
