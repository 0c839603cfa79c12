use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;
use crate::exchange::{ExchangeApi, ExchangePosition};
use crate::model::order::{ActiveOrder, OrderRequest, OrderSide, OrderState};

use super::types::{
    CancelAllRequest, ChildOrderEntry, PositionEntry, SendChildOrderRequest,
    SendChildOrderResponse,
};

/// Signed client for the bitFlyer Lightning private REST API.
pub struct BitflyerRestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
    product_code: String,
}

impl BitflyerRestClient {
    pub fn new(base_url: &str, api_key: &str, api_secret: &str, product_code: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            product_code: product_code.to_string(),
        }
    }

    /// ACCESS-SIGN is HMAC-SHA256 over timestamp + method + path + body.
    fn sign(&self, timestamp: &str, method: &str, path: &str, body: &str) -> String {
        let text = format!("{}{}{}{}", timestamp, method, path, body);
        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.api_secret.as_bytes()).expect("HMAC key error");
        mac.update(text.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    async fn get(&self, path: &str) -> Result<String, AppError> {
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let sign = self.sign(&timestamp, "GET", path, "");
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .http
            .get(&url)
            .header("ACCESS-KEY", &self.api_key)
            .header("ACCESS-TIMESTAMP", &timestamp)
            .header("ACCESS-SIGN", &sign)
            .send()
            .await?;

        Self::read_body(resp).await
    }

    async fn post(&self, path: &str, body: String) -> Result<String, AppError> {
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let sign = self.sign(&timestamp, "POST", path, &body);
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .http
            .post(&url)
            .header("ACCESS-KEY", &self.api_key)
            .header("ACCESS-TIMESTAMP", &timestamp)
            .header("ACCESS-SIGN", &sign)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        Self::read_body(resp).await
    }

    async fn read_body(resp: reqwest::Response) -> Result<String, AppError> {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(AppError::BitflyerApi {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

impl ExchangeApi for BitflyerRestClient {
    async fn open_positions(&self) -> Result<Vec<ExchangePosition>, AppError> {
        let path = format!("/v1/me/getpositions?product_code={}", self.product_code);
        let body = self.get(&path).await?;
        let entries: Vec<PositionEntry> = serde_json::from_str(&body)?;

        let positions = entries
            .iter()
            .filter_map(|e| {
                OrderSide::from_bitflyer_str(&e.side).map(|side| ExchangePosition {
                    side,
                    price: e.price,
                    size: e.size,
                })
            })
            .collect();
        Ok(positions)
    }

    async fn recent_orders(&self, count: u32) -> Result<Vec<ActiveOrder>, AppError> {
        let path = format!(
            "/v1/me/getchildorders?product_code={}&count={}",
            self.product_code, count
        );
        let body = self.get(&path).await?;
        let entries: Vec<ChildOrderEntry> = serde_json::from_str(&body)?;

        let orders = entries
            .iter()
            .filter_map(|e| {
                OrderSide::from_bitflyer_str(&e.side).map(|side| ActiveOrder {
                    side,
                    size: e.size,
                    state: OrderState::from_bitflyer_str(&e.child_order_state),
                })
            })
            .collect();
        Ok(orders)
    }

    async fn cancel_all_orders(&self) -> Result<(), AppError> {
        let body = serde_json::to_string(&CancelAllRequest {
            product_code: self.product_code.clone(),
        })?;
        tracing::info!("Cancelling all child orders");
        // Success response has an empty body.
        self.post("/v1/me/cancelallchildorders", body).await?;
        Ok(())
    }

    async fn submit_order(&self, request: &OrderRequest) -> Result<String, AppError> {
        let body = serde_json::to_string(&SendChildOrderRequest {
            product_code: self.product_code.clone(),
            child_order_type: request.order_type.as_bitflyer_str().to_string(),
            side: request.side.as_bitflyer_str().to_string(),
            price: request.price,
            size: request.size,
            time_in_force: request.time_in_force.as_bitflyer_str().to_string(),
        })?;

        tracing::info!(
            side = %request.side,
            size = request.size,
            price = request.price,
            order_type = request.order_type.as_bitflyer_str(),
            time_in_force = request.time_in_force.as_bitflyer_str(),
            "Sending child order"
        );

        let resp_body = self.post("/v1/me/sendchildorder", body).await?;
        let resp: SendChildOrderResponse = serde_json::from_str(&resp_body)?;

        tracing::info!(
            acceptance_id = %resp.child_order_acceptance_id,
            "Order accepted"
        );
        Ok(resp.child_order_acceptance_id)
    }
}
