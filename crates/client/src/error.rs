use paypal_nvp_types::{GatewayError, NvpParseError, NvpResponse};
use thiserror::Error;

/// Errors that can occur while calling the NVP API
#[derive(Error, Debug)]
pub enum PayPalError {
    /// The request never got a response (DNS, connect, TLS, ...)
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The body is not an NVP string (an HTML error page, a proxy reply, ...)
    #[error("Failed to decode NVP response: {source}")]
    Decode {
        #[source]
        source: NvpParseError,
        body: String,
    },

    /// PayPal answered but declared the call failed
    ///
    /// The decoded reply is kept so callers can still inspect the
    /// correlation id and every raw field.
    #[error("{error}")]
    Gateway {
        #[source]
        error: GatewayError,
        response: Box<NvpResponse>,
    },
}

impl PayPalError {
    /// The gateway-declared failure, if this is one
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            PayPalError::Gateway { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The decoded reply that accompanied a gateway failure
    pub fn response(&self) -> Option<&NvpResponse> {
        match self {
            PayPalError::Gateway { response, .. } => Some(response.as_ref()),
            _ => None,
        }
    }

    /// Raw body of a reply that could not be decoded
    pub fn undecoded_body(&self) -> Option<&str> {
        match self {
            PayPalError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for NVP operations
pub type Result<T> = std::result::Result<T, PayPalError>;
