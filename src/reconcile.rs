use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::exchange::ExchangePosition;
use crate::model::order::ActiveOrder;
use crate::model::position::{PendingOrderSummary, PositionSide, PositionSnapshot};

/// Folds the exchange's position and order reports into the snapshots the
/// decision loop works from, tracking side transitions across cycles.
#[derive(Debug)]
pub struct PositionReconciler {
    min_order_size: f64,
    previous_side: PositionSide,
    opened_at: Option<DateTime<Utc>>,
}

impl PositionReconciler {
    pub fn new(min_order_size: f64) -> Self {
        Self {
            min_order_size,
            previous_side: PositionSide::Flat,
            opened_at: None,
        }
    }

    /// Aggregate position legs into one snapshot. Legs are averaged by volume
    /// regardless of side. A residual below the minimum order size collapses
    /// only the side to flat; the dust size stays in the snapshot so open
    /// sizing still counts it against the betting allowance.
    pub fn reconcile_positions(&mut self, legs: &[ExchangePosition]) -> PositionSnapshot {
        let total_size: f64 = legs.iter().map(|l| l.size).sum();
        let weighted: f64 = legs.iter().map(|l| l.price * l.size).sum();
        let volume_weighted_price = if total_size > 0.0 {
            weighted / total_size
        } else {
            0.0
        };

        if total_size < self.min_order_size {
            if self.previous_side != PositionSide::Flat {
                let held = self
                    .opened_at
                    .map(|t| Utc::now() - t)
                    .map(|d| d.num_seconds());
                info!(side = %self.previous_side, held_secs = held, "position closed");
            }
            self.previous_side = PositionSide::Flat;
            self.opened_at = None;
            return PositionSnapshot {
                side: PositionSide::Flat,
                size: total_size,
                volume_weighted_price,
                opened_at: None,
            };
        }

        let side = legs
            .iter()
            .map(|l| PositionSide::from_order_side(l.side))
            .next_back()
            .unwrap_or(PositionSide::Flat);

        if side != self.previous_side {
            info!(%side, size = total_size, price = volume_weighted_price, "position opened");
            self.opened_at = Some(Utc::now());
        } else if let Some(opened) = self.opened_at {
            debug!(held_secs = (Utc::now() - opened).num_seconds(), "position held");
        }
        self.previous_side = side;

        debug!(
            %side,
            size = total_size,
            price = volume_weighted_price,
            legs = legs.len(),
            "position reconciled"
        );

        PositionSnapshot {
            side,
            size: total_size,
            volume_weighted_price,
            opened_at: self.opened_at,
        }
    }

    /// Sum the working orders into one summary. The reported side is the side
    /// of the last active order iterated, which is what the cancel check keys
    /// off.
    pub fn summarize_orders(orders: &[ActiveOrder]) -> PendingOrderSummary {
        let mut summary = PendingOrderSummary::none();
        for order in orders.iter().filter(|o| o.state.is_active()) {
            summary.side = Some(order.side);
            summary.total_size += order.size;
        }
        summary
    }
}
