//! Data model for the PayPal NVP (name-value pair) Express Checkout API.
//!
//! Everything here is pure: parsing and encoding of NVP bodies, the orders
//! and line items sent with `SetExpressCheckout`, and typed views over the
//! replies. The HTTP client lives in the `paypal-nvp` crate.

pub mod environment;
pub mod order;
pub mod response;
pub mod values;

pub use environment::{
    CHECKOUT_PRODUCTION_URL, CHECKOUT_SANDBOX_URL, Environment, NVP_PRODUCTION_URL,
    NVP_SANDBOX_URL, NVP_VERSION,
};
pub use order::{DigitalGood, Good, Order, format_amount, sum_digital_good_amounts};
pub use response::{CheckoutDetails, ErrorDetail, GatewayError, NvpResponse, PaymentResponse};
pub use values::{NvpParseError, NvpValues};
