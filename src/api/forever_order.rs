//! Forever order (GTT / OCO) routes.

use serde_json::Value;

use crate::api::BrokerProxy;
use crate::constants::paths;
use crate::error::Result;
use crate::risk::TradeOperation;
use crate::types::envelope::ApiEnvelope;
use crate::types::forever_order::*;
use crate::types::orders::OrderResponse;
use crate::validation::{validate_forever_order_request, validate_order_id};

impl BrokerProxy {
    /// Create a forever order from a raw body.
    ///
    /// **Upstream:** `POST /v2/forever/orders`
    pub async fn create_forever_order(&self, body: &Value) -> ApiEnvelope<OrderResponse> {
        ApiEnvelope::from_result(self.try_create_forever_order(body).await)
    }

    /// Delete a pending forever order.
    ///
    /// **Upstream:** `DELETE /v2/forever/orders/{order-id}`
    pub async fn delete_forever_order(&self, order_id: &str) -> ApiEnvelope<OrderResponse> {
        ApiEnvelope::from_result(self.try_delete_forever_order(order_id).await)
    }

    /// All forever orders.
    ///
    /// **Upstream:** `GET /v2/forever/all`
    pub async fn get_forever_orders(&self) -> ApiEnvelope<Vec<ForeverOrderDetail>> {
        ApiEnvelope::from_result(self.client.get(paths::FOREVER_ORDERS_ALL).await)
    }

    async fn try_create_forever_order(&self, body: &Value) -> Result<OrderResponse> {
        let req = validate_forever_order_request(&self.with_client_id(body))?;
        let op = TradeOperation::place()
            .symbol(&req.security_id)
            .quantity(req.quantity)
            .price(Some(req.price));
        self.guard
            .execute_trade(&op, || {
                self.client
                    .post::<_, OrderResponse>(paths::FOREVER_ORDERS, &req)
            })
            .await
    }

    async fn try_delete_forever_order(&self, order_id: &str) -> Result<OrderResponse> {
        validate_order_id(order_id)?;
        let path = format!("{}/{order_id}", paths::FOREVER_ORDERS);
        self.guard
            .execute_trade(&TradeOperation::cancel(), || {
                self.client.delete::<OrderResponse>(&path)
            })
            .await
    }
}
