//! Multi-leg order validation: super orders and forever (GTT / OCO) orders.
//!
//! Every numeric leg field is mandatory here, unlike plain orders where
//! presence depends on the order type.

use serde_json::Value;

use crate::error::OrderValidationError;
use crate::types::enums::*;
use crate::types::forever_order::CreateForeverOrderRequest;
use crate::types::super_order::PlaceSuperOrderRequest;
use crate::validation::fields::{
    Fields, non_negative_integer, parse_enum, positive_amount, positive_integer,
};
use crate::validation::ids::validate_correlation_id;
use crate::validation::orders::check_disclosed_quantity;

type FieldResult<T> = Result<T, OrderValidationError>;

/// Validate a raw super-order body.
///
/// `quantity`, `price`, `targetPrice`, `stopLossPrice` and `trailingJump`
/// must all be present and positive, checked in that order.
pub fn validate_super_order_request(input: &Value) -> FieldResult<PlaceSuperOrderRequest> {
    let body = Fields::object(input)?;

    let dhan_client_id = body.required_str_alias("dhanClientId", &["clientId"])?;
    let transaction_type = body.required_str("transactionType")?;
    let exchange_segment = body.required_str("exchangeSegment")?;
    let product_type = body.required_str("productType")?;
    let order_type = body.required_str("orderType")?;
    let security_id = body.required_identifier("securityId")?;

    let transaction_type: TransactionType =
        parse_enum("transactionType", transaction_type, &TransactionType::ALL)?;
    let exchange_segment: ExchangeSegment =
        parse_enum("exchangeSegment", exchange_segment, &ExchangeSegment::ALL)?;
    let product_type: ProductType = parse_enum("productType", product_type, &ProductType::ALL)?;
    let order_type: OrderType = parse_enum("orderType", order_type, &OrderType::ALL)?;

    let quantity = positive_integer("quantity", body.required_number("quantity")?)?;
    let price = positive_amount("price", body.required_number("price")?)?;
    let target_price = positive_amount("targetPrice", body.required_number("targetPrice")?)?;
    let stop_loss_price =
        positive_amount("stopLossPrice", body.required_number("stopLossPrice")?)?;
    let trailing_jump = positive_amount("trailingJump", body.required_number("trailingJump")?)?;

    let correlation_id = body.optional_str("correlationId")?;
    if let Some(id) = correlation_id {
        validate_correlation_id(id)?;
    }

    Ok(PlaceSuperOrderRequest {
        dhan_client_id: dhan_client_id.to_owned(),
        correlation_id: correlation_id.map(str::to_owned),
        transaction_type,
        exchange_segment,
        product_type,
        order_type,
        security_id,
        quantity,
        price,
        target_price,
        stop_loss_price,
        trailing_jump,
    })
}

/// Validate a raw forever-order body.
///
/// `quantity`, `price` and `triggerPrice` are always required. An `OCO`
/// order also needs the second leg: `price1`, `triggerPrice1`, `quantity1`.
pub fn validate_forever_order_request(input: &Value) -> FieldResult<CreateForeverOrderRequest> {
    let body = Fields::object(input)?;

    let dhan_client_id = body.required_str_alias("dhanClientId", &["clientId"])?;
    let order_flag = body.required_str("orderFlag")?;
    let transaction_type = body.required_str("transactionType")?;
    let exchange_segment = body.required_str("exchangeSegment")?;
    let product_type = body.required_str("productType")?;
    let order_type = body.required_str("orderType")?;
    let validity = body.required_str("validity")?;
    let security_id = body.required_identifier("securityId")?;

    let order_flag: OrderFlag = parse_enum("orderFlag", order_flag, &OrderFlag::ALL)?;
    let transaction_type: TransactionType =
        parse_enum("transactionType", transaction_type, &TransactionType::ALL)?;
    let exchange_segment: ExchangeSegment =
        parse_enum("exchangeSegment", exchange_segment, &ExchangeSegment::ALL)?;
    let product_type: ProductType = parse_enum("productType", product_type, &ProductType::ALL)?;
    let order_type: OrderType = parse_enum("orderType", order_type, &OrderType::ALL)?;
    let validity: Validity = parse_enum("validity", validity, &Validity::ALL)?;

    let quantity = positive_integer("quantity", body.required_number("quantity")?)?;
    let price = positive_amount("price", body.required_number("price")?)?;
    let trigger_price = positive_amount("triggerPrice", body.required_number("triggerPrice")?)?;

    let disclosed_quantity = body
        .optional_number("disclosedQuantity")?
        .map(|dq| non_negative_integer("disclosedQuantity", dq))
        .transpose()?;
    check_disclosed_quantity(disclosed_quantity, Some(quantity))?;

    let (price1, trigger_price1, quantity1) = match order_flag {
        OrderFlag::SINGLE => (None, None, None),
        OrderFlag::OCO => (
            Some(positive_amount("price1", body.required_number("price1")?)?),
            Some(positive_amount(
                "triggerPrice1",
                body.required_number("triggerPrice1")?,
            )?),
            Some(positive_integer("quantity1", body.required_number("quantity1")?)?),
        ),
    };

    let correlation_id = body.optional_str("correlationId")?;
    if let Some(id) = correlation_id {
        validate_correlation_id(id)?;
    }

    Ok(CreateForeverOrderRequest {
        dhan_client_id: dhan_client_id.to_owned(),
        correlation_id: correlation_id.map(str::to_owned),
        order_flag,
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
        price1,
        trigger_price1,
        quantity1,
    })
}
