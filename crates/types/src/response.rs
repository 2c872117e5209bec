//! Typed views over NVP replies.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::{Environment, NvpValues};

const MAINTENANCE_MESSAGE: &str = "PayPal is undergoing maintenance.\nPlease try again later.";

/// Parse a numeric field, reading missing or malformed values as zero.
///
/// Projections never fail on bad numbers; callers that need strict
/// validation read the raw value from [`NvpResponse::values`].
fn relaxed_amount(values: &NvpValues, key: &str) -> f64 {
    values
        .get(key)
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or_default()
}

/// Decoded reply of any NVP call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NvpResponse {
    /// `ACK`: Success, SuccessWithWarning, Failure or FailureWithWarning
    pub ack: String,
    pub correlation_id: String,
    pub timestamp: String,
    pub version: String,
    pub build: String,
    /// Express Checkout token, empty for calls that do not return one
    pub token: String,
    /// Every field of the reply, including the ones promoted above
    pub values: NvpValues,
    environment: Environment,
}

impl NvpResponse {
    /// Promote the well-known fields of a parsed reply.
    ///
    /// `environment` is the one the request was sent to; it decides which
    /// checkout page [`NvpResponse::checkout_url`] points at.
    pub fn from_values(values: NvpValues, environment: Environment) -> Self {
        Self {
            ack: values.get_or_empty("ACK"),
            correlation_id: values.get_or_empty("CORRELATIONID"),
            timestamp: values.get_or_empty("TIMESTAMP"),
            version: values.get_or_empty("VERSION"),
            build: values.get_or_empty("BUILD"),
            token: values.get_or_empty("TOKEN"),
            values,
            environment,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn is_success(&self) -> bool {
        self.ack.eq_ignore_ascii_case("success")
            || self.ack.eq_ignore_ascii_case("successwithwarning")
    }

    /// The failure PayPal declared in this reply, if any.
    ///
    /// A reply fails when it carries `L_ERRORCODE0` or when `ACK` is
    /// `Failure`/`FailureWithWarning` (any case). Only the first error block
    /// is promoted; see [`NvpResponse::errors`] for all of them.
    pub fn gateway_error(&self) -> Option<GatewayError> {
        let error_code = self.values.get_or_empty("L_ERRORCODE0");
        let failed = !error_code.is_empty()
            || self.ack.eq_ignore_ascii_case("failure")
            || self.ack.eq_ignore_ascii_case("failurewithwarning");
        if !failed {
            return None;
        }

        Some(GatewayError {
            ack: self.ack.clone(),
            error_code,
            short_message: self.values.get_or_empty("L_SHORTMESSAGE0"),
            long_message: self.values.get_or_empty("L_LONGMESSAGE0"),
            severity_code: self.values.get_or_empty("L_SEVERITYCODE0"),
        })
    }

    /// Every indexed error block, in order
    pub fn errors(&self) -> Vec<ErrorDetail> {
        let mut errors = Vec::new();
        for index in 0.. {
            let field = |name: &str| self.values.get(&format!("{name}{index}")).map(str::to_string);
            let detail = ErrorDetail {
                error_code: field("L_ERRORCODE"),
                short_message: field("L_SHORTMESSAGE"),
                long_message: field("L_LONGMESSAGE"),
                severity_code: field("L_SEVERITYCODE"),
            };
            if detail.is_empty() {
                break;
            }
            errors.push(detail);
        }
        errors
    }

    /// URL to send the buyer to so they can approve the payment
    pub fn checkout_url(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("cmd", "_express-checkout")
            .append_pair("token", &self.token)
            .finish();
        format!("{}?{}", self.environment.checkout_url(), query)
    }

    /// Payment outcome of a `DoExpressCheckoutPayment` reply
    pub fn payment_response(&self) -> PaymentResponse {
        PaymentResponse::from_values(&self.values)
    }

    /// Buyer and order details of a `GetExpressCheckoutDetails` reply
    pub fn checkout_details(&self) -> CheckoutDetails {
        CheckoutDetails::from_values(&self.values)
    }
}

/// Outcome of the first payment in a `DoExpressCheckoutPayment` reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub transaction_id: String,
    /// e.g. "Completed", "Pending"
    pub status: String,
    /// e.g. "instant", "echeck"
    pub payment_type: String,
    pub fee: f64,
    pub amount: f64,
    pub currency: String,
    pub reason_code: String,
}

impl PaymentResponse {
    pub fn from_values(values: &NvpValues) -> Self {
        let mut response = Self::default();
        response.populate(values);
        response
    }

    /// Overwrite every field from `values`.
    ///
    /// Missing or non-numeric `PAYMENTINFO_0_AMT` / `PAYMENTINFO_0_FEEAMT`
    /// become `0.0` instead of an error.
    pub fn populate(&mut self, values: &NvpValues) {
        self.transaction_id = values.get_or_empty("PAYMENTINFO_0_TRANSACTIONID");
        self.status = values.get_or_empty("PAYMENTINFO_0_PAYMENTSTATUS");
        self.amount = relaxed_amount(values, "PAYMENTINFO_0_AMT");
        self.fee = relaxed_amount(values, "PAYMENTINFO_0_FEEAMT");
        self.currency = values.get_or_empty("PAYMENTINFO_0_CURRENCYCODE");
        self.payment_type = values.get_or_empty("PAYMENTINFO_0_PAYMENTTYPE");
        self.reason_code = values.get_or_empty("PAYMENTINFO_0_REASONCODE");
    }
}

/// Buyer and order information returned by `GetExpressCheckoutDetails`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutDetails {
    pub token: String,
    /// Needed to complete the payment with `DoExpressCheckoutPayment`
    pub payer_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub country_code: String,
    /// e.g. "PaymentActionNotInitiated", "PaymentActionCompleted"
    pub checkout_status: String,
    pub amount: f64,
    pub currency: String,
}

impl CheckoutDetails {
    pub fn from_values(values: &NvpValues) -> Self {
        Self {
            token: values.get_or_empty("TOKEN"),
            payer_id: values.get_or_empty("PAYERID"),
            email: values.get_or_empty("EMAIL"),
            first_name: values.get_or_empty("FIRSTNAME"),
            last_name: values.get_or_empty("LASTNAME"),
            country_code: values.get_or_empty("COUNTRYCODE"),
            checkout_status: values.get_or_empty("CHECKOUTSTATUS"),
            amount: relaxed_amount(values, "PAYMENTREQUEST_0_AMT"),
            currency: values.get_or_empty("PAYMENTREQUEST_0_CURRENCYCODE"),
        }
    }
}

/// Failure declared by PayPal in an NVP reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    pub ack: String,
    pub error_code: String,
    pub short_message: String,
    pub long_message: String,
    pub severity_code: String,
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.error_code.is_empty() && !self.short_message.is_empty() {
            write!(f, "PayPal Error {}: {}", self.error_code, self.short_message)
        } else if !self.ack.is_empty() {
            write!(f, "{}", self.ack)
        } else {
            write!(f, "{}", MAINTENANCE_MESSAGE)
        }
    }
}

impl std::error::Error for GatewayError {}

/// One `L_ERRORCODE{n}` block of a reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub error_code: Option<String>,
    pub short_message: Option<String>,
    pub long_message: Option<String>,
    pub severity_code: Option<String>,
}

impl ErrorDetail {
    fn is_empty(&self) -> bool {
        self.error_code.is_none()
            && self.short_message.is_none()
            && self.long_message.is_none()
            && self.severity_code.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CHECKOUT_SANDBOX_URL;

    fn response(body: &str, environment: Environment) -> NvpResponse {
        NvpResponse::from_values(NvpValues::parse(body), environment)
    }

    #[test]
    fn test_promotes_well_known_fields() {
        let response = response(
            "TOKEN=EC%2d8AB&TIMESTAMP=2024%2d05%2d01T10%3a00%3a00Z&CORRELATIONID=9f1c2&ACK=Success&VERSION=94&BUILD=5908853",
            Environment::Sandbox,
        );
        assert_eq!(response.ack, "Success");
        assert_eq!(response.token, "EC-8AB");
        assert_eq!(response.correlation_id, "9f1c2");
        assert_eq!(response.timestamp, "2024-05-01T10:00:00Z");
        assert_eq!(response.version, "94");
        assert_eq!(response.build, "5908853");
        assert!(response.is_success());
        assert_eq!(response.values.get("BUILD"), Some("5908853"));
    }

    #[test]
    fn test_success_has_no_gateway_error() {
        let response = response("ACK=Success&TOKEN=EC-1", Environment::Production);
        assert_eq!(response.gateway_error(), None);
        assert!(response.errors().is_empty());
    }

    #[test]
    fn test_failure_ack_yields_gateway_error() {
        let response = response(
            "ACK=Failure&L_ERRORCODE0=10410&L_SHORTMESSAGE0=Invalid%20token&L_LONGMESSAGE0=Invalid%20token.&L_SEVERITYCODE0=Error",
            Environment::Sandbox,
        );
        let error = response.gateway_error().unwrap();
        assert_eq!(error.ack, "Failure");
        assert_eq!(error.error_code, "10410");
        assert_eq!(error.short_message, "Invalid token");
        assert_eq!(error.long_message, "Invalid token.");
        assert_eq!(error.severity_code, "Error");
        assert_eq!(error.to_string(), "PayPal Error 10410: Invalid token");
        assert!(!response.is_success());
    }

    #[test]
    fn test_failure_ack_is_case_insensitive() {
        let error = response("ACK=FAILUREWITHWARNING", Environment::Sandbox)
            .gateway_error()
            .unwrap();
        assert_eq!(error.ack, "FAILUREWITHWARNING");
        assert_eq!(error.error_code, "");
        assert_eq!(error.to_string(), "FAILUREWITHWARNING");
    }

    #[test]
    fn test_error_code_alone_is_a_failure() {
        let error = response(
            "ACK=SuccessWithWarning&L_ERRORCODE0=11607&L_SHORTMESSAGE0=Duplicate%20Request",
            Environment::Sandbox,
        )
        .gateway_error()
        .unwrap();
        assert_eq!(error.ack, "SuccessWithWarning");
        assert_eq!(error.error_code, "11607");
    }

    #[test]
    fn test_empty_gateway_error_falls_back_to_maintenance() {
        assert_eq!(GatewayError::default().to_string(), MAINTENANCE_MESSAGE);

        let error = GatewayError {
            error_code: "10001".to_string(),
            ..Default::default()
        };
        assert_eq!(error.to_string(), MAINTENANCE_MESSAGE);
    }

    #[test]
    fn test_errors_lists_every_block() {
        let response = response(
            "ACK=Failure&L_ERRORCODE0=10004&L_SHORTMESSAGE0=A&L_ERRORCODE1=10009&L_SEVERITYCODE1=Error&L_ERRORCODE3=skipped",
            Environment::Sandbox,
        );
        let errors = response.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].error_code.as_deref(), Some("10004"));
        assert_eq!(errors[0].short_message.as_deref(), Some("A"));
        assert_eq!(errors[1].error_code.as_deref(), Some("10009"));
        assert_eq!(errors[1].severity_code.as_deref(), Some("Error"));
    }

    #[test]
    fn test_checkout_url_uses_response_environment() {
        let sandbox = response("ACK=Success&TOKEN=EC-123", Environment::Sandbox);
        assert_eq!(
            sandbox.checkout_url(),
            format!("{CHECKOUT_SANDBOX_URL}?cmd=_express-checkout&token=EC-123")
        );

        let production = response("ACK=Success&TOKEN=EC-123", Environment::Production);
        assert_eq!(
            production.checkout_url(),
            "https://www.paypal.com/cgi-bin/webscr?cmd=_express-checkout&token=EC-123"
        );
    }

    #[test]
    fn test_payment_response_projection() {
        let response = response(
            "ACK=Success&PAYMENTINFO_0_TRANSACTIONID=8WC123&PAYMENTINFO_0_PAYMENTSTATUS=Completed&PAYMENTINFO_0_AMT=25.00&PAYMENTINFO_0_FEEAMT=1.03&PAYMENTINFO_0_CURRENCYCODE=USD&PAYMENTINFO_0_PAYMENTTYPE=instant&PAYMENTINFO_0_REASONCODE=None",
            Environment::Sandbox,
        );
        let payment = response.payment_response();
        assert_eq!(payment.transaction_id, "8WC123");
        assert_eq!(payment.status, "Completed");
        assert_eq!(payment.amount, 25.0);
        assert_eq!(payment.fee, 1.03);
        assert_eq!(payment.currency, "USD");
        assert_eq!(payment.payment_type, "instant");
        assert_eq!(payment.reason_code, "None");
    }

    #[test]
    fn test_payment_response_non_numeric_amount_is_zero() {
        let values = NvpValues::parse("PAYMENTINFO_0_AMT=abc&PAYMENTINFO_0_TRANSACTIONID=T1");
        let payment = PaymentResponse::from_values(&values);
        assert_eq!(payment.amount, 0.0);
        assert_eq!(payment.fee, 0.0);
        assert_eq!(payment.transaction_id, "T1");
    }

    #[test]
    fn test_padded_amount_is_zero() {
        let values = NvpValues::parse("PAYMENTINFO_0_AMT=%2025.00&PAYMENTINFO_0_FEEAMT=1.50%20");
        let payment = PaymentResponse::from_values(&values);
        assert_eq!(payment.amount, 0.0);
        assert_eq!(payment.fee, 0.0);
    }

    #[test]
    fn test_populate_overwrites_previous_values() {
        let mut payment = PaymentResponse {
            transaction_id: "old".to_string(),
            amount: 99.0,
            ..Default::default()
        };
        payment.populate(&NvpValues::parse("PAYMENTINFO_0_TRANSACTIONID=new"));
        assert_eq!(payment.transaction_id, "new");
        assert_eq!(payment.amount, 0.0);
    }

    #[test]
    fn test_checkout_details_projection() {
        let response = response(
            "TOKEN=EC-9&PAYERID=QZ7&EMAIL=buyer%40example.com&FIRSTNAME=Ada&LASTNAME=Lovelace&COUNTRYCODE=GB&CHECKOUTSTATUS=PaymentActionNotInitiated&PAYMENTREQUEST_0_AMT=12.50&PAYMENTREQUEST_0_CURRENCYCODE=GBP&ACK=Success",
            Environment::Sandbox,
        );
        let details = response.checkout_details();
        assert_eq!(details.token, "EC-9");
        assert_eq!(details.payer_id, "QZ7");
        assert_eq!(details.email, "buyer@example.com");
        assert_eq!(details.first_name, "Ada");
        assert_eq!(details.last_name, "Lovelace");
        assert_eq!(details.country_code, "GB");
        assert_eq!(details.checkout_status, "PaymentActionNotInitiated");
        assert_eq!(details.amount, 12.5);
        assert_eq!(details.currency, "GBP");
    }
}
