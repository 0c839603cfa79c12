use anyhow::{Context, Result};
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite;

use crate::model::tick::TickUpdate;

use super::types::{ChannelMessage, SubscribeParams, SubscribeRequest};

/// Exponential backoff for reconnection.
struct ExponentialBackoff {
    current: Duration,
    initial: Duration,
    max: Duration,
    factor: f64,
}

impl ExponentialBackoff {
    fn new(initial: Duration, max: Duration, factor: f64) -> Self {
        Self {
            current: initial,
            initial,
            max,
            factor,
        }
    }

    fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = Duration::from_secs_f64(
            (self.current.as_secs_f64() * self.factor).min(self.max.as_secs_f64()),
        );
        delay
    }

    fn reset(&mut self) {
        self.current = self.initial;
    }
}

pub struct BitflyerWsClient {
    url: String,
    channel: String,
}

impl BitflyerWsClient {
    pub fn new(ws_base_url: &str, product_code: &str) -> Self {
        Self {
            url: ws_base_url.to_string(),
            channel: format!("lightning_ticker_{}", product_code),
        }
    }

    /// Connect and run the ticker loop with automatic reconnection. Each
    /// received ticker overwrites the slot in `tick_tx`; the trading loop only
    /// ever wants the latest one.
    pub async fn connect_and_run(
        &self,
        tick_tx: watch::Sender<Option<TickUpdate>>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        let mut backoff =
            ExponentialBackoff::new(Duration::from_secs(1), Duration::from_secs(60), 2.0);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self.connect_once(&tick_tx, &mut shutdown).await {
                Ok(()) => {
                    tracing::info!("WebSocket shut down cleanly");
                    break;
                }
                Err(e) => {
                    let delay = backoff.next_delay();
                    tracing::warn!(
                        error = %e,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "WebSocket disconnected, reconnecting"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => continue,
                        _ = shutdown.changed() => {
                            tracing::info!("Shutdown during reconnect");
                            break;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    async fn connect_once(
        &self,
        tick_tx: &watch::Sender<Option<TickUpdate>>,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<()> {
        tracing::info!(url = %self.url, channel = %self.channel, "Connecting");

        let (ws_stream, _resp) = tokio_tungstenite::connect_async(&self.url)
            .await
            .context("WebSocket connect failed")?;

        let (mut write, mut read) = ws_stream.split();

        let subscribe = serde_json::to_string(&SubscribeRequest {
            method: "subscribe",
            params: SubscribeParams {
                channel: &self.channel,
            },
            id: 1,
        })?;
        write
            .send(tungstenite::Message::Text(subscribe.into()))
            .await
            .context("Subscribe frame failed")?;

        tracing::info!("WebSocket connected and subscribed");

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(tungstenite::Message::Text(text))) => {
                            match serde_json::from_str::<ChannelMessage>(&text) {
                                Ok(msg) if msg.method == "channelMessage" => {
                                    let update = TickUpdate {
                                        tick: msg.params.message.into_tick(),
                                        received_at: Utc::now(),
                                    };
                                    let _ = tick_tx.send(Some(update));
                                }
                                Ok(_) => {}
                                Err(e) => {
                                    // Subscribe acks and heartbeats also arrive here.
                                    tracing::debug!(error = %e, "Skipping non-ticker message");
                                }
                            }
                        }
                        Some(Ok(tungstenite::Message::Ping(_))) => {
                            // tokio-tungstenite answers pings automatically
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            return Err(anyhow::anyhow!("WebSocket read error: {}", e));
                        }
                        None => {
                            return Err(anyhow::anyhow!("WebSocket stream ended"));
                        }
                    }
                }
                _ = shutdown.changed() => {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_until_cap() {
        let mut b = ExponentialBackoff::new(Duration::from_secs(1), Duration::from_secs(8), 2.0);
        assert_eq!(b.next_delay(), Duration::from_secs(1));
        assert_eq!(b.next_delay(), Duration::from_secs(2));
        assert_eq!(b.next_delay(), Duration::from_secs(4));
        assert_eq!(b.next_delay(), Duration::from_secs(8));
        assert_eq!(b.next_delay(), Duration::from_secs(8));
        b.reset();
        assert_eq!(b.next_delay(), Duration::from_secs(1));
    }

    #[test]
    fn channel_name_follows_product_code() {
        let client = BitflyerWsClient::new("wss://ws.lightstream.bitflyer.com/json-rpc", "FX_BTC_JPY");
        assert_eq!(client.channel, "lightning_ticker_FX_BTC_JPY");
    }
}
