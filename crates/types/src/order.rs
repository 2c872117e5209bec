//! Orders and line items sent with `SetExpressCheckout`.

use serde::{Deserialize, Serialize};

/// Format an amount the way the NVP API expects: exactly two decimals
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Totals and redirect URLs for a single checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Sum of the line items, sent as `PAYMENTREQUEST_0_ITEMAMT`
    pub subtotal: f64,
    pub shipping: f64,
    /// Positive values add a trailing `DISCOUNT` line item
    pub discount: f64,
    /// Grand total, sent as `PAYMENTREQUEST_0_AMT`
    pub total: f64,
    /// Three-letter ISO currency code (e.g., "USD")
    pub currency_code: String,
    /// Where the buyer lands after approving the payment
    pub return_url: String,
    /// Where the buyer lands after cancelling
    pub cancel_url: String,
}

impl Order {
    pub fn new(
        currency_code: impl Into<String>,
        return_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        Self {
            currency_code: currency_code.into(),
            return_url: return_url.into(),
            cancel_url: cancel_url.into(),
            ..Default::default()
        }
    }

    pub fn with_subtotal(mut self, subtotal: f64) -> Self {
        self.subtotal = subtotal;
        self
    }

    pub fn with_shipping(mut self, shipping: f64) -> Self {
        self.shipping = shipping;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_total(mut self, total: f64) -> Self {
        self.total = total;
        self
    }
}

/// Physical line item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Good {
    /// Merchant item number, sent as `L_PAYMENTREQUEST_0_NUMBER{i}` when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Unit price
    pub amount: f64,
    pub quantity: u32,
}

impl Good {
    pub fn new(name: impl Into<String>, amount: f64, quantity: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            amount,
            quantity,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Item number to send, skipping empty identifiers
    pub fn item_number(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Digital line item, flagged with `ITEMCATEGORY=Digital`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DigitalGood {
    pub name: String,
    /// Unit price
    pub amount: f64,
    pub quantity: u32,
}

impl DigitalGood {
    pub fn new(name: impl Into<String>, amount: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            amount,
            quantity,
        }
    }
}

/// Total of `amount * quantity` over a basket of digital goods
pub fn sum_digital_good_amounts(goods: &[DigitalGood]) -> f64 {
    goods
        .iter()
        .map(|good| good.amount * f64::from(good.quantity))
        .sum()
}
