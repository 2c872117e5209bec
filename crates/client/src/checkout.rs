//! Express Checkout calls.
//!
//! Every call comes in two forms: a pure `*_request` function that builds
//! the [`NvpValues`] to send (handy for inspection and tests), and a
//! [`PayPalClient`] method that sends it through
//! [`PayPalClient::perform_request`].

use paypal_nvp_types::{DigitalGood, Good, NvpResponse, NvpValues, Order, format_amount};

use crate::{PayPalClient, error::Result};

/// Values accepted for `PAYMENTREQUEST_0_PAYMENTACTION`
///
/// The client forwards whatever string it is given; these are the ones
/// PayPal documents.
pub mod payment_action {
    /// Charge immediately
    pub const SALE: &str = "Sale";
    /// Authorize now, capture later
    pub const AUTHORIZATION: &str = "Authorization";
    /// Create an order to authorize and capture later (ship later)
    pub const ORDER: &str = "Order";
}

fn line_item_key(field: &str, index: usize) -> String {
    format!("L_PAYMENTREQUEST_0_{field}{index}")
}

/// Fields shared by both `SetExpressCheckout` flavours, after the amounts
fn add_checkout_fields(values: &mut NvpValues, currency_code: &str, return_url: &str, cancel_url: &str) {
    values.add("PAYMENTREQUEST_0_PAYMENTACTION", payment_action::SALE);
    values.add("PAYMENTREQUEST_0_CURRENCYCODE", currency_code);
    values.add("RETURNURL", return_url);
    values.add("CANCELURL", cancel_url);
    values.add("REQCONFIRMSHIPPING", "0");
    values.add("NOSHIPPING", "1");
    values.add("SOLUTIONTYPE", "Sole");
}

/// Build a `SetExpressCheckout` request for physical goods.
///
/// A positive `order.discount` is sent as one extra `DISCOUNT` line item
/// after all of `goods`, with a negative amount and quantity 1.
pub fn set_express_checkout_request(order: &Order, goods: &[Good]) -> NvpValues {
    let mut values = NvpValues::new();
    values.set("METHOD", "SetExpressCheckout");
    values.add("PAYMENTREQUEST_0_ITEMAMT", format_amount(order.subtotal));
    values.add("PAYMENTREQUEST_0_SHIPPINGAMT", format_amount(order.shipping));
    values.add("PAYMENTREQUEST_0_AMT", format_amount(order.total));
    add_checkout_fields(
        &mut values,
        &order.currency_code,
        &order.return_url,
        &order.cancel_url,
    );

    for (index, good) in goods.iter().enumerate() {
        if let Some(number) = good.item_number() {
            values.add(line_item_key("NUMBER", index), number);
        }
        values.add(line_item_key("NAME", index), good.name.as_str());
        values.add(line_item_key("AMT", index), format_amount(good.amount));
        values.add(line_item_key("QTY", index), good.quantity.to_string());
    }

    if order.discount > 0.0 {
        let index = goods.len();
        values.add(line_item_key("NAME", index), "DISCOUNT");
        values.add(line_item_key("AMT", index), format_amount(-order.discount));
        values.add(line_item_key("QTY", index), "1");
    }

    values
}

/// Build a `SetExpressCheckout` request for digital goods.
///
/// `payment_amount` is sent as is; [`sum_digital_good_amounts`] computes
/// the usual value.
///
/// [`sum_digital_good_amounts`]: paypal_nvp_types::sum_digital_good_amounts
pub fn set_express_checkout_digital_goods_request(
    payment_amount: f64,
    currency_code: &str,
    return_url: &str,
    cancel_url: &str,
    goods: &[DigitalGood],
) -> NvpValues {
    let mut values = NvpValues::new();
    values.set("METHOD", "SetExpressCheckout");
    values.add("PAYMENTREQUEST_0_AMT", format_amount(payment_amount));
    add_checkout_fields(&mut values, currency_code, return_url, cancel_url);

    for (index, good) in goods.iter().enumerate() {
        values.add(line_item_key("NAME", index), good.name.as_str());
        values.add(line_item_key("AMT", index), format_amount(good.amount));
        values.add(line_item_key("QTY", index), good.quantity.to_string());
        values.add(line_item_key("ITEMCATEGORY", index), "Digital");
    }

    values
}

/// Build a `DoExpressCheckoutPayment` request.
///
/// `payment_action` is forwarded verbatim, see [`payment_action`].
pub fn do_express_checkout_payment_request(
    token: &str,
    payer_id: &str,
    payment_action: &str,
    currency_code: &str,
    final_payment_amount: f64,
) -> NvpValues {
    let mut values = NvpValues::new();
    values.set("METHOD", "DoExpressCheckoutPayment");
    values.add("TOKEN", token);
    values.add("PAYERID", payer_id);
    values.add("PAYMENTREQUEST_0_PAYMENTACTION", payment_action);
    values.add("PAYMENTREQUEST_0_CURRENCYCODE", currency_code);
    values.add("PAYMENTREQUEST_0_AMT", format_amount(final_payment_amount));
    values
}

/// Build a `GetExpressCheckoutDetails` request
pub fn get_express_checkout_details_request(token: &str) -> NvpValues {
    let mut values = NvpValues::new();
    values.add("TOKEN", token);
    values.set("METHOD", "GetExpressCheckoutDetails");
    values
}

impl PayPalClient {
    /// Start a checkout for physical goods.
    ///
    /// On success, redirect the buyer to [`NvpResponse::checkout_url`].
    pub async fn set_express_checkout(&self, order: &Order, goods: &[Good]) -> Result<NvpResponse> {
        self.perform_request(set_express_checkout_request(order, goods))
            .await
    }

    /// Start a checkout for digital goods
    pub async fn set_express_checkout_digital_goods(
        &self,
        payment_amount: f64,
        currency_code: &str,
        return_url: &str,
        cancel_url: &str,
        goods: &[DigitalGood],
    ) -> Result<NvpResponse> {
        self.perform_request(set_express_checkout_digital_goods_request(
            payment_amount,
            currency_code,
            return_url,
            cancel_url,
            goods,
        ))
        .await
    }

    /// Complete a checkout the buyer approved.
    ///
    /// Read the outcome with [`NvpResponse::payment_response`].
    pub async fn do_express_checkout_payment(
        &self,
        token: &str,
        payer_id: &str,
        payment_action: &str,
        currency_code: &str,
        final_payment_amount: f64,
    ) -> Result<NvpResponse> {
        self.perform_request(do_express_checkout_payment_request(
            token,
            payer_id,
            payment_action,
            currency_code,
            final_payment_amount,
        ))
        .await
    }

    /// [`do_express_checkout_payment`](Self::do_express_checkout_payment) with a `Sale` action
    pub async fn do_express_checkout_sale(
        &self,
        token: &str,
        payer_id: &str,
        currency_code: &str,
        final_payment_amount: f64,
    ) -> Result<NvpResponse> {
        self.do_express_checkout_payment(
            token,
            payer_id,
            payment_action::SALE,
            currency_code,
            final_payment_amount,
        )
        .await
    }

    /// Fetch buyer and order details for `token`.
    ///
    /// Read them with [`NvpResponse::checkout_details`].
    pub async fn get_express_checkout_details(&self, token: &str) -> Result<NvpResponse> {
        self.perform_request(get_express_checkout_details_request(token))
            .await
    }
}
