//! Order routes.

use serde_json::Value;

use crate::api::BrokerProxy;
use crate::constants::paths;
use crate::error::Result;
use crate::risk::TradeOperation;
use crate::types::envelope::ApiEnvelope;
use crate::types::orders::*;
use crate::validation::{
    validate_modify_order_request, validate_order_id, validate_place_order_request,
};

impl BrokerProxy {
    /// Place a new order from a raw body.
    ///
    /// **Upstream:** `POST /v2/orders`
    pub async fn place_order(&self, body: &Value) -> ApiEnvelope<OrderResponse> {
        ApiEnvelope::from_result(self.try_place_order(body).await)
    }

    /// Place an already-typed order. The numeric rules are re-checked.
    pub async fn submit_order(&self, req: &PlaceOrderRequest) -> Result<OrderResponse> {
        req.validate()?;
        let op = TradeOperation::place()
            .symbol(&req.security_id)
            .quantity(req.quantity)
            .price(req.price);
        self.guard
            .execute_trade(&op, || {
                self.client.post::<_, OrderResponse>(paths::ORDERS, req)
            })
            .await
    }

    /// Modify a pending order. `order_id` is the id the route is bound to;
    /// the body's `orderId` must match it.
    ///
    /// **Upstream:** `PUT /v2/orders/{order-id}`
    pub async fn modify_order(&self, order_id: &str, body: &Value) -> ApiEnvelope<OrderResponse> {
        ApiEnvelope::from_result(self.try_modify_order(order_id, body).await)
    }

    /// Send an already-typed modification.
    pub async fn submit_modification(&self, req: &ModifyOrderRequest) -> Result<OrderResponse> {
        req.validate()?;
        let path = format!("{}/{}", paths::ORDERS, req.order_id);
        let mut op = TradeOperation::modify().price(req.price);
        op.quantity = req.quantity;
        self.guard
            .execute_trade(&op, || self.client.put::<_, OrderResponse>(&path, req))
            .await
    }

    /// Cancel a pending order.
    ///
    /// **Upstream:** `DELETE /v2/orders/{order-id}`
    pub async fn cancel_order(&self, order_id: &str) -> ApiEnvelope<OrderResponse> {
        ApiEnvelope::from_result(self.try_cancel_order(order_id).await)
    }

    /// Today's order book.
    ///
    /// **Upstream:** `GET /v2/orders`
    pub async fn get_orders(&self) -> ApiEnvelope<Vec<OrderDetail>> {
        ApiEnvelope::from_result(self.client.get(paths::ORDERS).await)
    }

    /// One order by id.
    ///
    /// **Upstream:** `GET /v2/orders/{order-id}`
    pub async fn get_order(&self, order_id: &str) -> ApiEnvelope<OrderDetail> {
        ApiEnvelope::from_result(self.try_get_order(order_id).await)
    }

    async fn try_place_order(&self, body: &Value) -> Result<OrderResponse> {
        let req = validate_place_order_request(&self.with_client_id(body))?;
        self.submit_order(&req).await
    }

    async fn try_modify_order(&self, order_id: &str, body: &Value) -> Result<OrderResponse> {
        validate_order_id(order_id)?;
        let req = validate_modify_order_request(&self.with_client_id(body), Some(order_id))?;
        self.submit_modification(&req).await
    }

    async fn try_cancel_order(&self, order_id: &str) -> Result<OrderResponse> {
        validate_order_id(order_id)?;
        let path = format!("{}/{order_id}", paths::ORDERS);
        self.guard
            .execute_trade(&TradeOperation::cancel(), || {
                self.client.delete::<OrderResponse>(&path)
            })
            .await
    }

    async fn try_get_order(&self, order_id: &str) -> Result<OrderDetail> {
        validate_order_id(order_id)?;
        self.client
            .get(&format!("{}/{order_id}", paths::ORDERS))
            .await
    }
}
