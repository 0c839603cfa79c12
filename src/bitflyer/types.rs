use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::tick::Tick;

/// One open position from GET /v1/me/getpositions.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionEntry {
    pub side: String,
    pub price: f64,
    pub size: f64,
}

/// One child order from GET /v1/me/getchildorders.
#[derive(Debug, Clone, Deserialize)]
pub struct ChildOrderEntry {
    pub side: String,
    pub size: f64,
    pub child_order_state: String,
}

/// Body for POST /v1/me/sendchildorder.
#[derive(Debug, Clone, Serialize)]
pub struct SendChildOrderRequest {
    pub product_code: String,
    pub child_order_type: String,
    pub side: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub size: f64,
    pub time_in_force: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendChildOrderResponse {
    pub child_order_acceptance_id: String,
}

/// Body for POST /v1/me/cancelallchildorders.
#[derive(Debug, Clone, Serialize)]
pub struct CancelAllRequest {
    pub product_code: String,
}

/// Error body the private API returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub status: i64,
    pub error_message: String,
}

/// Subscribe frame for the JSON-RPC realtime endpoint.
#[derive(Debug, Serialize)]
pub struct SubscribeRequest<'a> {
    pub method: &'static str,
    pub params: SubscribeParams<'a>,
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub struct SubscribeParams<'a> {
    pub channel: &'a str,
}

/// Incoming channelMessage frame carrying a ticker event.
#[derive(Debug, Deserialize)]
pub struct ChannelMessage {
    pub method: String,
    pub params: ChannelParams,
}

#[derive(Debug, Deserialize)]
pub struct ChannelParams {
    pub channel: String,
    pub message: TickerEvent,
}

/// The lightning_ticker payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerEvent {
    pub timestamp: String,
    pub best_bid: f64,
    pub best_ask: f64,
    pub best_bid_size: f64,
    pub best_ask_size: f64,
    pub ltp: f64,
    pub volume: f64,
}

impl TickerEvent {
    /// Exchange timestamps come with or without a zone suffix; an unparsable
    /// one falls back to the local receive time.
    fn parse_timestamp(&self) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|t| t.and_utc())
            })
            .unwrap_or_else(|_| Utc::now())
    }

    pub fn into_tick(self) -> Tick {
        let observed_at = self.parse_timestamp();
        Tick {
            latest_price: self.ltp,
            best_bid: self.best_bid,
            best_ask: self.best_ask,
            best_bid_size: self.best_bid_size,
            best_ask_size: self.best_ask_size,
            volume: self.volume,
            observed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_ticker_channel_message() {
        let json = r#"{
            "jsonrpc": "2.0",
            "method": "channelMessage",
            "params": {
                "channel": "lightning_ticker_FX_BTC_JPY",
                "message": {
                    "product_code": "FX_BTC_JPY",
                    "state": "RUNNING",
                    "timestamp": "2024-03-01T12:00:00.123Z",
                    "tick_id": 39481886,
                    "best_bid": 9253902.0,
                    "best_ask": 9254480.0,
                    "best_bid_size": 0.02,
                    "best_ask_size": 0.45,
                    "total_bid_depth": 1319.35,
                    "total_ask_depth": 688.29,
                    "ltp": 9254480.0,
                    "volume": 12795.33,
                    "volume_by_product": 12795.33
                }
            }
        }"#;

        let msg: ChannelMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.method, "channelMessage");
        assert_eq!(msg.params.channel, "lightning_ticker_FX_BTC_JPY");

        let tick = msg.params.message.into_tick();
        assert_eq!(tick.latest_price, 9254480.0);
        assert_eq!(tick.best_bid, 9253902.0);
        assert_eq!(tick.best_ask_size, 0.45);
        assert_eq!(tick.observed_at.timestamp(), 1709294400);
    }

    #[test]
    fn ticker_timestamp_without_zone_suffix_parses() {
        let event = TickerEvent {
            timestamp: "2024-03-01T12:00:00.5".to_string(),
            best_bid: 1.0,
            best_ask: 2.0,
            best_bid_size: 0.1,
            best_ask_size: 0.2,
            ltp: 1.5,
            volume: 10.0,
        };
        let tick = event.into_tick();
        assert_eq!(tick.observed_at.timestamp(), 1709294400);
    }

    #[test]
    fn deserialize_positions_response() {
        let json = r#"[
            {
                "product_code": "FX_BTC_JPY",
                "side": "BUY",
                "price": 36000.0,
                "size": 10.0,
                "commission": 0.0,
                "swap_point_accumulate": -35.0,
                "require_collateral": 120000.0,
                "open_date": "2015-11-03T10:04:45.011",
                "leverage": 3.0,
                "pnl": 965.0,
                "sfd": -0.5
            }
        ]"#;
        let positions: Vec<PositionEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].side, "BUY");
        assert_eq!(positions[0].size, 10.0);
    }

    #[test]
    fn serialize_market_order_omits_price() {
        let req = SendChildOrderRequest {
            product_code: "FX_BTC_JPY".to_string(),
            child_order_type: "MARKET".to_string(),
            side: "SELL".to_string(),
            price: None,
            size: 0.5,
            time_in_force: "GTC".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("price"));
        assert!(json.contains("\"child_order_type\":\"MARKET\""));
    }
}
