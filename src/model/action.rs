use std::fmt;

use super::order::OrderSide;

/// Outcome of one analysis cycle.
///
/// Each variant carries the order side it implies, so "open while already
/// positioned" (a deliberate double-down in the strategy table) is expressed
/// the same way as a fresh entry instead of hiding behind a bare Buy/Sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Hold,
    Open { side: OrderSide },
    TakeProfit { side: OrderSide },
    CutLoss { side: OrderSide },
}

impl TradeAction {
    pub fn order_side(&self) -> Option<OrderSide> {
        match self {
            TradeAction::Hold => None,
            TradeAction::Open { side }
            | TradeAction::TakeProfit { side }
            | TradeAction::CutLoss { side } => Some(*side),
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Hold => write!(f, "HOLD"),
            TradeAction::Open { side } => write!(f, "OPEN({})", side),
            TradeAction::TakeProfit { side } => write!(f, "TAKE_PROFIT({})", side),
            TradeAction::CutLoss { side } => write!(f, "CUT_LOSS({})", side),
        }
    }
}
