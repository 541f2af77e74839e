//! Place / modify order validation.

use serde_json::Value;

use crate::error::{DhanError, OrderValidationError, Result};
use crate::types::enums::*;
use crate::types::orders::{ModifyOrderRequest, PlaceOrderRequest};
use crate::validation::fields::{
    Fields, non_negative_integer, parse_enum, positive_amount, positive_integer,
};
use crate::validation::ids::{validate_correlation_id, validate_order_id};

type FieldResult<T> = std::result::Result<T, OrderValidationError>;

/// Validate a raw place-order body and build the typed request.
///
/// Rules run in a fixed order and the first failure is returned:
/// required fields, enum membership, `quantity`, `price`, `triggerPrice`,
/// `disclosedQuantity`, optional extras, then `correlationId`.
pub fn validate_place_order_request(input: &Value) -> FieldResult<PlaceOrderRequest> {
    let body = Fields::object(input)?;

    let dhan_client_id = body.required_str_alias("dhanClientId", &["clientId"])?;
    let transaction_type = body.required_str("transactionType")?;
    let exchange_segment = body.required_str("exchangeSegment")?;
    let product_type = body.required_str("productType")?;
    let order_type = body.required_str("orderType")?;
    let validity = body.required_str("validity")?;
    let security_id = body.required_identifier("securityId")?;
    let quantity = body.required_number("quantity")?;

    let transaction_type: TransactionType =
        parse_enum("transactionType", transaction_type, &TransactionType::ALL)?;
    let exchange_segment: ExchangeSegment =
        parse_enum("exchangeSegment", exchange_segment, &ExchangeSegment::ALL)?;
    let product_type: ProductType = parse_enum("productType", product_type, &ProductType::ALL)?;
    let order_type: OrderType = parse_enum("orderType", order_type, &OrderType::ALL)?;
    let validity: Validity = parse_enum("validity", validity, &Validity::ALL)?;

    let quantity = positive_integer("quantity", quantity)?;

    let (price, trigger_price) = check_conditional_prices(
        order_type,
        body.optional_number("price")?,
        body.optional_number("triggerPrice")?,
    )?;

    let disclosed_quantity = body
        .optional_number("disclosedQuantity")?
        .map(|dq| non_negative_integer("disclosedQuantity", dq))
        .transpose()?;
    check_disclosed_quantity(disclosed_quantity, Some(quantity))?;

    let after_market_order = body.optional_bool("afterMarketOrder")?;
    let amo_time = body
        .optional_str("amoTime")?
        .map(|raw| parse_enum::<AmoTime>("amoTime", raw, &AmoTime::ALL))
        .transpose()?;
    let bo_profit_value = body
        .optional_number("boProfitValue")?
        .map(|v| positive_amount("boProfitValue", v))
        .transpose()?;
    let bo_stop_loss_value = body
        .optional_number("boStopLossValue")?
        .map(|v| positive_amount("boStopLossValue", v))
        .transpose()?;

    let correlation_id = body.optional_str("correlationId")?;
    if let Some(id) = correlation_id {
        validate_correlation_id(id)?;
    }

    Ok(PlaceOrderRequest {
        dhan_client_id: dhan_client_id.to_owned(),
        correlation_id: correlation_id.map(str::to_owned),
        transaction_type,
        exchange_segment,
        product_type,
        order_type,
        validity,
        security_id,
        quantity,
        disclosed_quantity,
        price,
        trigger_price,
        after_market_order,
        amo_time,
        bo_profit_value,
        bo_stop_loss_value,
    })
}

/// Validate a raw modify-order body and build the typed request.
///
/// When `path_order_id` is given (the route is bound to one order), a body
/// `orderId` that differs from it fails with [`DhanError::OrderIdMismatch`]
/// before any other field is looked at. Every other failure is
/// [`DhanError::Validation`].
pub fn validate_modify_order_request(
    input: &Value,
    path_order_id: Option<&str>,
) -> Result<ModifyOrderRequest> {
    let body = Fields::object(input)?;

    let order_id = body.required_str("orderId")?;
    validate_order_id(order_id)?;
    if let Some(path) = path_order_id {
        if path != order_id {
            return Err(DhanError::OrderIdMismatch {
                path: path.to_owned(),
                body: order_id.to_owned(),
            });
        }
    }

    let dhan_client_id = body.required_str_alias("dhanClientId", &["clientId"])?;
    let order_type = body.required_str("orderType")?;
    let validity = body.required_str("validity")?;

    let order_type: OrderType = parse_enum("orderType", order_type, &OrderType::ALL)?;
    let validity: Validity = parse_enum("validity", validity, &Validity::ALL)?;
    let leg_name = body
        .optional_str("legName")?
        .map(|raw| parse_enum::<LegName>("legName", raw, &LegName::ALL))
        .transpose()?;

    let quantity = body
        .optional_number("quantity")?
        .map(|q| positive_integer("quantity", q))
        .transpose()?;

    let (price, trigger_price) = check_conditional_prices(
        order_type,
        body.optional_number("price")?,
        body.optional_number("triggerPrice")?,
    )?;

    let disclosed_quantity = body
        .optional_number("disclosedQuantity")?
        .map(|dq| non_negative_integer("disclosedQuantity", dq))
        .transpose()?;
    check_disclosed_quantity(disclosed_quantity, quantity)?;

    Ok(ModifyOrderRequest {
        dhan_client_id: dhan_client_id.to_owned(),
        order_id: order_id.to_owned(),
        order_type,
        leg_name,
        quantity,
        price,
        disclosed_quantity,
        trigger_price,
        validity,
    })
}

// ---------------------------------------------------------------------------
// Shared rules
// ---------------------------------------------------------------------------

pub(crate) fn check_quantity(quantity: u64) -> FieldResult<()> {
    if quantity == 0 {
        return Err(OrderValidationError::new(
            "quantity",
            "quantity must be a positive integer",
        ));
    }
    Ok(())
}

/// `price` / `triggerPrice` presence as a function of the order type.
///
/// A price the order type does not use is dropped when it is zero and
/// rejected when it is negative. Returns the normalized pair.
pub(crate) fn check_conditional_prices(
    order_type: OrderType,
    price: Option<f64>,
    trigger_price: Option<f64>,
) -> FieldResult<(Option<f64>, Option<f64>)> {
    let price = conditional_amount("price", order_type, order_type.requires_price(), price)?;
    let trigger_price = conditional_amount(
        "triggerPrice",
        order_type,
        order_type.requires_trigger_price(),
        trigger_price,
    )?;
    Ok((price, trigger_price))
}

fn conditional_amount(
    field: &'static str,
    order_type: OrderType,
    required: bool,
    value: Option<f64>,
) -> FieldResult<Option<f64>> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(Some(v)),
        _ if required => Err(OrderValidationError::new(
            field,
            format!("{field} is required and must be greater than 0 for {order_type:?} orders"),
        )),
        None => Ok(None),
        Some(v) if v == 0.0 => Ok(None),
        Some(_) => Err(OrderValidationError::new(
            field,
            format!("{field} must be greater than 0"),
        )),
    }
}

/// `0 <= disclosedQuantity < quantity`. The upper bound is only checkable
/// when the quantity is known.
pub(crate) fn check_disclosed_quantity(
    disclosed_quantity: Option<u64>,
    quantity: Option<u64>,
) -> FieldResult<()> {
    match (disclosed_quantity, quantity) {
        (Some(dq), Some(qty)) if dq >= qty => Err(OrderValidationError::new(
            "disclosedQuantity",
            format!("disclosedQuantity ({dq}) must be less than quantity ({qty})"),
        )),
        _ => Ok(()),
    }
}
