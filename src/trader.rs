use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::analyzer::TickAnalyzer;
use crate::config::TradingConfig;
use crate::exchange::ExchangeApi;
use crate::model::action::TradeAction;
use crate::model::order::{OrderRequest, OrderSide};
use crate::model::position::{PendingOrderSummary, PositionSnapshot};
use crate::model::tick::{Tick, TickUpdate};
use crate::reconcile::PositionReconciler;

/// How many recent child orders to pull each cycle; settled ones are filtered
/// out after the fact.
const ORDER_QUERY_COUNT: u32 = 3;

/// Drives the trade cycle: reconcile exchange state, analyze the latest tick,
/// dispatch the resulting action.
pub struct Trader<E: ExchangeApi> {
    exchange: E,
    analyzer: TickAnalyzer,
    reconciler: PositionReconciler,
    config: TradingConfig,
}

impl<E: ExchangeApi> Trader<E> {
    pub fn new(exchange: E, config: TradingConfig) -> Self {
        Self {
            exchange,
            analyzer: TickAnalyzer::new(config.warmup_ticks),
            reconciler: PositionReconciler::new(config.min_order_size),
            config,
        }
    }

    /// Run cycles on a fixed period until shutdown. A cycle that fails is
    /// logged and abandoned; the next tick starts clean.
    pub async fn run(
        &mut self,
        tick_rx: watch::Receiver<Option<TickUpdate>>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        let mut interval = tokio::time::interval(self.config.loop_period());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            period_secs = self.config.loop_period_secs,
            betting_size = self.config.betting_size,
            "Trader started"
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let update = tick_rx.borrow().clone();
                    let Some(update) = update else {
                        debug!("No tick received yet");
                        continue;
                    };

                    let age = Utc::now() - update.received_at;
                    if tick_is_stale(age, self.config.tick_staleness()) {
                        debug!(age_secs = age.num_seconds(), "Tick is stale, skipping cycle");
                        continue;
                    }

                    debug!(received_at = %update.received_at, "Cycle start");
                    if let Err(e) = self.run_cycle(update.tick).await {
                        error!(error = %e, "Trading cycle failed");
                        for cause in e.chain().skip(1).take(2) {
                            error!(cause = %cause, "Caused by");
                        }
                    }
                }
                _ = shutdown.changed() => {
                    info!("Trader shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// One full decision cycle against a single tick.
    pub async fn run_cycle(&mut self, tick: Tick) -> Result<()> {
        let legs = self
            .exchange
            .open_positions()
            .await
            .context("Fetching positions failed")?;
        let position = self.reconciler.reconcile_positions(&legs);

        let orders = self
            .exchange
            .recent_orders(ORDER_QUERY_COUNT)
            .await
            .context("Fetching orders failed")?;
        let pending = PositionReconciler::summarize_orders(&orders);

        let action = self.analyzer.analyze(tick.clone(), &position);
        info!(
            action = %action,
            position = %position.side,
            position_size = position.size,
            pending_size = pending.total_size,
            "Cycle decided"
        );

        self.dispatch(action, &tick, &position, &pending).await
    }

    async fn dispatch(
        &self,
        action: TradeAction,
        tick: &Tick,
        position: &PositionSnapshot,
        pending: &PendingOrderSummary,
    ) -> Result<()> {
        match action {
            TradeAction::Hold => Ok(()),
            TradeAction::Open { side } => self.open(side, tick, position, pending).await,
            TradeAction::TakeProfit { side } => {
                let (price, liquidity) = counter_quote(side, tick);
                let size = position.size.min(liquidity);
                let request = OrderRequest::limit_ioc(side, size, price);
                self.exchange
                    .submit_order(&request)
                    .await
                    .context("Take-profit order failed")?;
                Ok(())
            }
            TradeAction::CutLoss { side } => {
                let request = OrderRequest::market_gtc(side, position.size);
                self.exchange
                    .submit_order(&request)
                    .await
                    .context("Loss-cut order failed")?;
                Ok(())
            }
        }
    }

    async fn open(
        &self,
        side: OrderSide,
        tick: &Tick,
        position: &PositionSnapshot,
        pending: &PendingOrderSummary,
    ) -> Result<()> {
        let (price, liquidity) = counter_quote(side, tick);
        let headroom = self.config.betting_size - position.size;
        let size = liquidity.min(headroom);

        if size < self.config.min_order_size {
            debug!(size, side = %side, "Open size below minimum, suppressed");
            return Ok(());
        }

        // A working order on the other side would fight the new one; flush
        // everything and give the exchange a moment to settle.
        if pending.side == Some(side.opposite()) {
            self.exchange
                .cancel_all_orders()
                .await
                .context("Cancel before reorder failed")?;
            tokio::time::sleep(self.config.cancel_settle()).await;
        }

        let request = OrderRequest::limit_ioc(side, size, price);
        self.exchange
            .submit_order(&request)
            .await
            .context("Open order failed")?;
        Ok(())
    }

    pub fn tick_count(&self) -> usize {
        self.analyzer.tick_count()
    }
}

/// Best price and size on the side of the book an aggressive order of `side`
/// trades against.
fn counter_quote(side: OrderSide, tick: &Tick) -> (f64, f64) {
    match side {
        OrderSide::Buy => (tick.best_ask, tick.best_ask_size),
        OrderSide::Sell => (tick.best_bid, tick.best_bid_size),
    }
}

/// A tick is usable strictly less than `limit` after it was received.
fn tick_is_stale(age: chrono::Duration, limit: chrono::Duration) -> bool {
    age >= limit
}
