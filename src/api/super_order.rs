//! Super order routes (entry + target + stop-loss in one request).

use serde_json::Value;

use crate::api::BrokerProxy;
use crate::constants::paths;
use crate::error::Result;
use crate::risk::TradeOperation;
use crate::types::LegName;
use crate::types::envelope::ApiEnvelope;
use crate::types::orders::OrderResponse;
use crate::types::super_order::*;
use crate::validation::fields::parse_enum;
use crate::validation::{validate_order_id, validate_super_order_request};

impl BrokerProxy {
    /// Place a super order from a raw body.
    ///
    /// **Upstream:** `POST /v2/super/orders`
    pub async fn place_super_order(&self, body: &Value) -> ApiEnvelope<OrderResponse> {
        ApiEnvelope::from_result(self.try_place_super_order(body).await)
    }

    /// Cancel one leg of a super order. Cancelling `ENTRY_LEG` cancels all
    /// legs.
    ///
    /// **Upstream:** `DELETE /v2/super/orders/{order-id}/{order-leg}`
    pub async fn cancel_super_order(&self, order_id: &str, leg: &str) -> ApiEnvelope<OrderResponse> {
        ApiEnvelope::from_result(self.try_cancel_super_order(order_id, leg).await)
    }

    /// Today's super orders.
    ///
    /// **Upstream:** `GET /v2/super/orders`
    pub async fn get_super_orders(&self) -> ApiEnvelope<Vec<SuperOrderDetail>> {
        ApiEnvelope::from_result(self.client.get(paths::SUPER_ORDERS).await)
    }

    async fn try_place_super_order(&self, body: &Value) -> Result<OrderResponse> {
        let req = validate_super_order_request(&self.with_client_id(body))?;
        let op = TradeOperation::place()
            .symbol(&req.security_id)
            .quantity(req.quantity)
            .price(Some(req.price));
        self.guard
            .execute_trade(&op, || {
                self.client
                    .post::<_, OrderResponse>(paths::SUPER_ORDERS, &req)
            })
            .await
    }

    async fn try_cancel_super_order(&self, order_id: &str, leg: &str) -> Result<OrderResponse> {
        validate_order_id(order_id)?;
        let leg: LegName = parse_enum("legName", leg, &LegName::ALL)?;
        let path = format!("{}/{order_id}/{}", paths::SUPER_ORDERS, leg.as_str());
        self.guard
            .execute_trade(&TradeOperation::cancel(), || {
                self.client.delete::<OrderResponse>(&path)
            })
            .await
    }
}
