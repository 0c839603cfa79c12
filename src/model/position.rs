use std::fmt;

use chrono::{DateTime, Utc};

use super::order::OrderSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSide {
    Flat,
    Long,
    Short,
}

impl PositionSide {
    pub fn from_order_side(side: OrderSide) -> Self {
        match side {
            OrderSide::Buy => PositionSide::Long,
            OrderSide::Sell => PositionSide::Short,
        }
    }

    /// Order side that closes a position on this side.
    pub fn closing_order_side(&self) -> Option<OrderSide> {
        match self {
            PositionSide::Flat => None,
            PositionSide::Long => Some(OrderSide::Sell),
            PositionSide::Short => Some(OrderSide::Buy),
        }
    }
}

impl fmt::Display for PositionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionSide::Flat => write!(f, "FLAT"),
            PositionSide::Long => write!(f, "LONG"),
            PositionSide::Short => write!(f, "SHORT"),
        }
    }
}

/// Net exposure rebuilt from the exchange's open positions each cycle.
#[derive(Debug, Clone)]
pub struct PositionSnapshot {
    pub side: PositionSide,
    pub size: f64,
    /// Size-weighted average entry price over all open positions. The
    /// aggregation does not separate by side; the engine only ever holds one
    /// side at a time, so mixed-side input is not structurally ruled out but
    /// never occurs in practice.
    pub volume_weighted_price: f64,
    pub opened_at: Option<DateTime<Utc>>,
}

impl PositionSnapshot {
    pub fn flat() -> Self {
        Self {
            side: PositionSide::Flat,
            size: 0.0,
            volume_weighted_price: 0.0,
            opened_at: None,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.side == PositionSide::Flat
    }
}

/// Aggregate view of the exchange's working orders for one cycle.
///
/// `side` is the side of the last order seen while iterating, not a net side;
/// with both sides active simultaneously it is arbitrary. Preserved as-is
/// because the cancel-before-reorder check keys off it.
#[derive(Debug, Clone)]
pub struct PendingOrderSummary {
    pub side: Option<OrderSide>,
    pub total_size: f64,
}

impl PendingOrderSummary {
    pub fn none() -> Self {
        Self {
            side: None,
            total_size: 0.0,
        }
    }
}
