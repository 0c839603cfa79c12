pub mod decision;
pub mod momentum;
pub mod trend;

use tracing::{debug, info};

use crate::model::action::TradeAction;
use crate::model::position::PositionSnapshot;
use crate::model::tick::Tick;

use decision::DecisionEngine;
use momentum::MomentumTracker;
use trend::{classify, population_stats, separation};

/// Per-tick analysis pipeline: momentum tracking, trend classification and the
/// position-aware decision table.
#[derive(Debug)]
pub struct TickAnalyzer {
    momentum: MomentumTracker,
    decision: DecisionEngine,
    warmup_ticks: usize,
}

impl TickAnalyzer {
    pub fn new(warmup_ticks: usize) -> Self {
        Self {
            momentum: MomentumTracker::new(),
            decision: DecisionEngine::new(warmup_ticks),
            warmup_ticks,
        }
    }

    /// Feed one tick through the pipeline and decide what to do about it.
    pub fn analyze(&mut self, tick: Tick, position: &PositionSnapshot) -> TradeAction {
        let movement = self.momentum.record_tick(tick.clone());
        let population = self.momentum.movement_population();
        let (mean, std_dev) = population_stats(&population);
        let z = separation(movement, &population);
        let trend = classify(movement, &population);

        debug!(
            price = tick.latest_price,
            volume = tick.volume,
            "tick absorbed"
        );
        if let Some(ema) = self.momentum.latest_ema() {
            debug!(
                ema10 = ema.ten,
                ema20 = ema.twenty,
                ema30 = ema.thirty,
                "ema snapshot"
            );
        }
        info!(
            movement,
            mean,
            std_dev,
            z,
            trend = %trend,
            "trend classified"
        );

        let tick_count = self.momentum.tick_count();
        if tick_count < self.warmup_ticks {
            info!(
                ticks = tick_count,
                required = self.warmup_ticks,
                "warming up"
            );
        }

        self.decision.decide(
            tick_count,
            position.side,
            trend,
            &tick,
            position.volume_weighted_price,
        )
    }

    pub fn tick_count(&self) -> usize {
        self.momentum.tick_count()
    }
}
