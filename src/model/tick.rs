use chrono::{DateTime, Utc};

/// Best bid/ask snapshot from the lightning ticker channel.
#[derive(Debug, Clone)]
pub struct Tick {
    pub latest_price: f64,
    pub best_bid: f64,
    pub best_ask: f64,
    pub best_bid_size: f64,
    pub best_ask_size: f64,
    pub volume: f64,
    pub observed_at: DateTime<Utc>,
}

impl Tick {
    /// Synthetic tick with a flat book, used for analyzer warm-up in tests.
    pub fn from_price(price: f64) -> Self {
        Self {
            latest_price: price,
            best_bid: price,
            best_ask: price,
            best_bid_size: 1.0,
            best_ask_size: 1.0,
            volume: 0.0,
            observed_at: Utc::now(),
        }
    }
}

/// A tick together with the wall-clock instant the feed delivered it.
///
/// This is the single value handed from the WebSocket task to the trading loop;
/// the loop reads one consistent copy per cycle and checks `received_at` for
/// staleness.
#[derive(Debug, Clone)]
pub struct TickUpdate {
    pub tick: Tick,
    pub received_at: DateTime<Utc>,
}
