//! Order validation rules.

use dhan_guard::error::DhanError;
use dhan_guard::types::enums::*;
use dhan_guard::validation::*;
use serde_json::{Value, json};

fn place_body(order_type: &str) -> Value {
    json!({
        "dhanClientId": "1000000003",
        "transactionType": "BUY",
        "exchangeSegment": "NSE_EQ",
        "productType": "INTRADAY",
        "orderType": order_type,
        "validity": "DAY",
        "securityId": "11536",
        "quantity": 5
    })
}

fn with(mut body: Value, key: &str, value: Value) -> Value {
    body[key] = value;
    body
}

fn without(mut body: Value, key: &str) -> Value {
    if let Some(map) = body.as_object_mut() {
        map.remove(key);
    }
    body
}

fn rejected_field(body: &Value) -> &'static str {
    validate_place_order_request(body)
        .expect_err("expected a validation error")
        .field()
}

// ===================================================================
// Place order: conditional prices
// ===================================================================

#[test]
fn market_order_needs_no_price() {
    let req = validate_place_order_request(&place_body("MARKET")).expect("valid market order");
    assert_eq!(req.order_type, OrderType::MARKET);
    assert_eq!(req.price, None);
    assert_eq!(req.trigger_price, None);
    assert_eq!(req.quantity, 5);
}

#[test]
fn market_order_drops_zero_prices() {
    let body = with(with(place_body("MARKET"), "price", json!(0)), "triggerPrice", json!(0));
    let req = validate_place_order_request(&body).expect("zeros are ignored");
    assert_eq!(req.price, None);
    assert_eq!(req.trigger_price, None);
}

#[test]
fn market_order_rejects_negative_price() {
    let body = with(place_body("MARKET"), "price", json!(-1));
    assert_eq!(rejected_field(&body), "price");
}

#[test]
fn priced_order_types_require_price() {
    for order_type in ["LIMIT", "STOP_LOSS"] {
        let base = with(place_body(order_type), "triggerPrice", json!(99.5));
        assert_eq!(rejected_field(&base), "price", "{order_type} without price");
        for bad in [json!(0), json!(-10.5), json!(null)] {
            let body = with(base.clone(), "price", bad.clone());
            assert_eq!(rejected_field(&body), "price", "{order_type} price {bad}");
        }
    }
}

#[test]
fn stop_order_types_require_trigger_price() {
    for order_type in ["STOP_LOSS", "STOP_LOSS_MARKET"] {
        let base = with(place_body(order_type), "price", json!(100));
        assert_eq!(rejected_field(&base), "triggerPrice", "{order_type} without trigger");
        for bad in [json!(0), json!(-0.05)] {
            let body = with(base.clone(), "triggerPrice", bad);
            assert_eq!(rejected_field(&body), "triggerPrice");
        }
    }
}

#[test]
fn stop_loss_market_accepts_trigger_only() {
    let body = with(place_body("STOP_LOSS_MARKET"), "triggerPrice", json!(98));
    let req = validate_place_order_request(&body).expect("valid SL-M order");
    assert_eq!(req.price, None);
    assert_eq!(req.trigger_price, Some(98.0));
}

#[test]
fn limit_order_with_zero_price_names_price() {
    let body = with(place_body("LIMIT"), "price", json!(0));
    let err = validate_place_order_request(&body).unwrap_err();
    assert_eq!(err.field(), "price");
    assert!(err.message().contains("LIMIT"), "{}", err.message());
}

#[test]
fn numeric_strings_are_accepted() {
    let body = with(
        with(place_body("LIMIT"), "price", json!("1520.50")),
        "quantity",
        json!("10"),
    );
    let req = validate_place_order_request(&body).expect("numeric strings");
    assert_eq!(req.price, Some(1520.5));
    assert_eq!(req.quantity, 10);
}

// ===================================================================
// Place order: quantities
// ===================================================================

#[test]
fn quantity_must_be_positive_integer() {
    for bad in [json!(0), json!(-3), json!(2.5), json!("abc")] {
        let body = with(place_body("MARKET"), "quantity", bad.clone());
        assert_eq!(rejected_field(&body), "quantity", "quantity {bad}");
    }
}

#[test]
fn disclosed_quantity_must_be_below_quantity() {
    for dq in [5, 6, 100] {
        let body = with(place_body("MARKET"), "disclosedQuantity", json!(dq));
        let err = validate_place_order_request(&body).unwrap_err();
        assert_eq!(err.field(), "disclosedQuantity");
        assert_eq!(
            err.message(),
            format!("disclosedQuantity ({dq}) must be less than quantity (5)")
        );
    }
    for dq in [0, 1, 4] {
        let body = with(place_body("MARKET"), "disclosedQuantity", json!(dq));
        let req = validate_place_order_request(&body).expect("dq below quantity");
        assert_eq!(req.disclosed_quantity, Some(dq));
    }
}

#[test]
fn disclosed_quantity_rejects_negative() {
    let body = with(place_body("MARKET"), "disclosedQuantity", json!(-1));
    assert_eq!(rejected_field(&body), "disclosedQuantity");
}

// ===================================================================
// Place order: required fields, enums, order of rules
// ===================================================================

#[test]
fn missing_required_fields_are_named() {
    for field in [
        "dhanClientId",
        "transactionType",
        "exchangeSegment",
        "productType",
        "orderType",
        "validity",
        "securityId",
        "quantity",
    ] {
        let body = without(place_body("MARKET"), field);
        let err = validate_place_order_request(&body).unwrap_err();
        assert_eq!(err.field(), field);
        assert_eq!(err.message(), format!("{field} is required"));
    }
}

#[test]
fn client_id_alias_is_accepted() {
    let body = with(without(place_body("MARKET"), "dhanClientId"), "clientId", json!("42"));
    let req = validate_place_order_request(&body).expect("clientId alias");
    assert_eq!(req.dhan_client_id, "42");
}

#[test]
fn numeric_security_id_is_accepted() {
    let body = with(place_body("MARKET"), "securityId", json!(1333));
    let req = validate_place_order_request(&body).expect("numeric security id");
    assert_eq!(req.security_id, "1333");
}

#[test]
fn unknown_enum_values_are_rejected() {
    let cases = [
        ("transactionType", "HOLD"),
        ("exchangeSegment", "NYSE"),
        ("productType", "MTF"),
        ("orderType", "ICEBERG"),
        ("validity", "GTC"),
    ];
    for (field, value) in cases {
        let body = with(place_body("MARKET"), field, json!(value));
        let err = validate_place_order_request(&body).unwrap_err();
        assert_eq!(err.field(), field);
        assert!(err.message().contains(value), "{}", err.message());
    }
}

#[test]
fn first_broken_rule_is_reported() {
    // Missing field beats bad enum, bad enum beats bad quantity, quantity
    // beats price, price beats disclosed quantity.
    let body = json!({
        "transactionType": "HOLD",
        "orderType": "LIMIT",
        "quantity": 0,
        "price": 0,
        "disclosedQuantity": 50
    });
    assert_eq!(rejected_field(&body), "dhanClientId");

    let body = with(with(place_body("LIMIT"), "transactionType", json!("HOLD")), "quantity", json!(0));
    assert_eq!(rejected_field(&body), "transactionType");

    let body = with(with(place_body("LIMIT"), "quantity", json!(0)), "price", json!(0));
    assert_eq!(rejected_field(&body), "quantity");

    let body = with(place_body("LIMIT"), "disclosedQuantity", json!(50));
    assert_eq!(rejected_field(&body), "price");
}

#[test]
fn correlation_id_is_checked_last() {
    let body = with(place_body("MARKET"), "correlationId", json!("strat-01_a"));
    assert!(validate_place_order_request(&body).is_ok());

    let body = with(place_body("MARKET"), "correlationId", json!("bad/id"));
    assert_eq!(rejected_field(&body), "correlationId");

    let body = with(
        with(place_body("MARKET"), "correlationId", json!("bad/id")),
        "amoTime",
        json!("LATE"),
    );
    assert_eq!(rejected_field(&body), "amoTime");
}

#[test]
fn non_object_body_is_rejected() {
    assert_eq!(rejected_field(&json!([1, 2])), "body");
    assert_eq!(rejected_field(&Value::Null), "body");
}

#[test]
fn typed_request_revalidates() {
    let mut req = validate_place_order_request(&with(place_body("LIMIT"), "price", json!(10)))
        .expect("valid limit order");
    assert!(req.validate().is_ok());
    req.price = None;
    assert_eq!(req.validate().unwrap_err().field(), "price");
}

// ===================================================================
// Modify order
// ===================================================================

fn modify_body() -> Value {
    json!({
        "dhanClientId": "1000000003",
        "orderId": "ORD123",
        "orderType": "LIMIT",
        "validity": "DAY",
        "quantity": 10,
        "price": 101.5
    })
}

#[test]
fn modify_path_mismatch_is_reported_first() {
    let body = json!({ "orderId": "ORD999", "quantity": 10 });
    let err = validate_modify_order_request(&body, Some("ORD123")).unwrap_err();
    assert!(matches!(
        &err,
        DhanError::OrderIdMismatch { path, body } if path == "ORD123" && body == "ORD999"
    ));
    assert!(err.to_string().starts_with("Order ID mismatch"));
}

#[test]
fn modify_matching_path_passes() {
    let req = validate_modify_order_request(&modify_body(), Some("ORD123")).expect("valid modify");
    assert_eq!(req.order_id, "ORD123");
    assert_eq!(req.quantity, Some(10));
    assert_eq!(req.price, Some(101.5));
}

#[test]
fn modify_without_path_skips_mismatch_check() {
    assert!(validate_modify_order_request(&modify_body(), None).is_ok());
}

#[test]
fn modify_rules_are_validation_errors() {
    let body = with(modify_body(), "price", json!(0));
    match validate_modify_order_request(&body, Some("ORD123")) {
        Err(DhanError::Validation(e)) => assert_eq!(e.field(), "price"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let body = with(modify_body(), "disclosedQuantity", json!(10));
    match validate_modify_order_request(&body, None) {
        Err(DhanError::Validation(e)) => assert_eq!(e.field(), "disclosedQuantity"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let body = with(modify_body(), "legName", json!("MIDDLE_LEG"));
    match validate_modify_order_request(&body, None) {
        Err(DhanError::Validation(e)) => assert_eq!(e.field(), "legName"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn modify_requires_order_id() {
    let body = without(modify_body(), "orderId");
    match validate_modify_order_request(&body, Some("ORD123")) {
        Err(DhanError::Validation(e)) => assert_eq!(e.field(), "orderId"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ===================================================================
// Super and forever orders
// ===================================================================

fn super_body() -> Value {
    json!({
        "dhanClientId": "1000000003",
        "transactionType": "BUY",
        "exchangeSegment": "NSE_EQ",
        "productType": "CNC",
        "orderType": "LIMIT",
        "securityId": "11536",
        "quantity": 5,
        "price": 1500,
        "targetPrice": 1600,
        "stopLossPrice": 1450,
        "trailingJump": 10
    })
}

#[test]
fn super_order_requires_every_leg_amount() {
    assert!(validate_super_order_request(&super_body()).is_ok());
    for field in ["price", "targetPrice", "stopLossPrice", "trailingJump"] {
        let err = validate_super_order_request(&with(super_body(), field, json!(0))).unwrap_err();
        assert_eq!(err.field(), field);
        assert_eq!(err.message(), format!("{field} must be greater than 0"));

        let err = validate_super_order_request(&without(super_body(), field)).unwrap_err();
        assert_eq!(err.field(), field);
    }
}

fn forever_body(flag: &str) -> Value {
    json!({
        "dhanClientId": "1000000003",
        "orderFlag": flag,
        "transactionType": "SELL",
        "exchangeSegment": "NSE_EQ",
        "productType": "CNC",
        "orderType": "LIMIT",
        "validity": "DAY",
        "securityId": "11536",
        "quantity": 5,
        "price": 1600,
        "triggerPrice": 1595
    })
}

#[test]
fn single_forever_order_needs_no_second_leg() {
    let req = validate_forever_order_request(&forever_body("SINGLE")).expect("valid SINGLE");
    assert_eq!(req.order_flag, OrderFlag::SINGLE);
    assert_eq!(req.price1, None);
    assert_eq!(req.quantity1, None);
}

#[test]
fn oco_forever_order_requires_second_leg() {
    let err = validate_forever_order_request(&forever_body("OCO")).unwrap_err();
    assert_eq!(err.field(), "price1");

    let body = with(forever_body("OCO"), "price1", json!(1400));
    assert_eq!(
        validate_forever_order_request(&body).unwrap_err().field(),
        "triggerPrice1"
    );

    let body = with(with(body, "triggerPrice1", json!(1405)), "quantity1", json!(5));
    let req = validate_forever_order_request(&body).expect("complete OCO");
    assert_eq!(req.price1, Some(1400.0));
    assert_eq!(req.trigger_price1, Some(1405.0));
    assert_eq!(req.quantity1, Some(5));
}

// ===================================================================
// Identifiers
// ===================================================================

#[test]
fn order_ids() {
    for ok in ["112111182198", "ORD123", "my order_1-a"] {
        assert!(validate_order_id(ok).is_ok(), "{ok}");
    }
    let too_long = "9".repeat(31);
    for bad in ["", "   ", " ORD1", "ORD1 ", "ORD/1", "ord€", too_long.as_str()] {
        let err = validate_order_id(bad).unwrap_err();
        assert_eq!(err.field(), "orderId", "{bad:?}");
    }
    assert!(validate_order_id(&"9".repeat(30)).is_ok());
}

#[test]
fn correlation_ids_use_their_own_field_name() {
    assert_eq!(validate_correlation_id("").unwrap_err().field(), "correlationId");
    assert!(validate_correlation_id("batch-7").is_ok());
}
