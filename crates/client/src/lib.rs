//! PayPal NVP client
//!
//! A thin async client for PayPal's name-value pair (NVP) API, covering the
//! Express Checkout flow.
//!
//! # Overview
//!
//! - [`PayPalClient`] - signs, sends and decodes NVP calls
//! - [`NvpResponse`] - decoded reply, with the raw fields in [`NvpResponse::values`]
//! - [`PayPalError`] - transport, body-read and gateway-declared failures
//!
//! # Express Checkout flow
//!
//! ```ignore
//! use paypal_nvp::{Good, Order, PayPalClient};
//!
//! let client = PayPalClient::new("merchant_api1.example.com", "password", "signature", true);
//!
//! // 1. Register the checkout and send the buyer to PayPal
//! let order = Order::new("USD", "https://shop.example/return", "https://shop.example/cancel")
//!     .with_subtotal(25.0)
//!     .with_total(25.0);
//! let goods = vec![Good::new("Blue mug", 12.5, 2).with_id("MUG-BLUE")];
//! let response = client.set_express_checkout(&order, &goods).await?;
//! redirect(response.checkout_url());
//!
//! // 2. The buyer comes back to the return URL with `token` and `PayerID`
//! let details = client.get_express_checkout_details(&token).await?.checkout_details();
//!
//! // 3. Capture the money
//! let payment = client
//!     .do_express_checkout_sale(&token, &details.payer_id, "USD", 25.0)
//!     .await?
//!     .payment_response();
//! println!("Transaction {} is {}", payment.transaction_id, payment.status);
//! ```
//!
//! # Errors
//!
//! PayPal reports failures in the reply body rather than with HTTP status
//! codes. A reply whose `ACK` is `Failure`/`FailureWithWarning`, or that
//! carries `L_ERRORCODE0`, is returned as [`PayPalError::Gateway`] along
//! with the decoded response. Nothing is retried.

pub mod checkout;
pub mod client;
pub mod config;
pub mod error;

// Re-export main types at crate root
pub use checkout::{
    do_express_checkout_payment_request, get_express_checkout_details_request, payment_action,
    set_express_checkout_digital_goods_request, set_express_checkout_request,
};
pub use client::PayPalClient;
pub use config::{ClientConfig, Credentials};
pub use error::{PayPalError, Result};
pub use paypal_nvp_types::{
    CheckoutDetails, DigitalGood, Environment, ErrorDetail, GatewayError, Good, NvpResponse,
    NvpParseError, NvpValues, Order, PaymentResponse, format_amount, sum_digital_good_amounts,
};
