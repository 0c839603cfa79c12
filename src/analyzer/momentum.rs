use crate::indicator::ema::last_ema;
use crate::model::tick::Tick;
use crate::series::BoundedSeries;

pub const TICK_CAPACITY: usize = 1024;
pub const MOVEMENT_CAPACITY: usize = 1024;

/// The trend baseline is calibrated against these two constants; changing
/// either shifts the movement population the z-score is measured against.
pub const EMA_SNAPSHOT_CAPACITY: usize = 20;
pub const MOVEMENT_LAG: usize = 10;

/// EMA-10/20/30 of the tick price history, one per tick.
#[derive(Debug, Clone, Copy)]
pub struct EmaSnapshot {
    pub ten: f64,
    pub twenty: f64,
    pub thirty: f64,
}

/// Maintains the rolling tick/EMA/movement buffers and derives the momentum
/// sample for each incoming tick.
#[derive(Debug)]
pub struct MomentumTracker {
    ticks: BoundedSeries<Tick>,
    emas: BoundedSeries<EmaSnapshot>,
    movements: BoundedSeries<f64>,
}

impl MomentumTracker {
    pub fn new() -> Self {
        Self {
            ticks: BoundedSeries::new(TICK_CAPACITY),
            emas: BoundedSeries::new(EMA_SNAPSHOT_CAPACITY),
            movements: BoundedSeries::new(MOVEMENT_CAPACITY),
        }
    }

    /// Absorb one tick: update the EMA snapshot history and return the EMA-10
    /// delta over the last `MOVEMENT_LAG` snapshots (0 while fewer than two
    /// snapshots exist).
    pub fn record_tick(&mut self, tick: Tick) -> f64 {
        self.ticks.push(tick);

        let prices: Vec<f64> = self
            .ticks
            .snapshot()
            .iter()
            .map(|t| t.latest_price)
            .collect();
        let snapshot = EmaSnapshot {
            ten: last_ema(&prices, 10),
            twenty: last_ema(&prices, 20),
            thirty: last_ema(&prices, 30),
        };
        self.emas.push(snapshot);

        let tens: Vec<f64> = self.emas.snapshot().iter().map(|e| e.ten).collect();
        let movement = price_movement(&tens, MOVEMENT_LAG);
        self.movements.push(movement);

        movement
    }

    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    pub fn latest_ema(&self) -> Option<EmaSnapshot> {
        self.emas.last().copied()
    }

    /// Current movement population, oldest first.
    pub fn movement_population(&self) -> Vec<f64> {
        self.movements.snapshot()
    }
}

impl Default for MomentumTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Delta between the last value and the one `lag` samples back (or the oldest
/// available). Fewer than two values is no movement.
fn price_movement(values: &[f64], lag: usize) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let offset = values.len().saturating_sub(lag);
    values[values.len() - 1] - values[offset]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_is_zero_below_two_samples() {
        assert!(price_movement(&[], 10).abs() < f64::EPSILON);
        assert!(price_movement(&[5.0], 10).abs() < f64::EPSILON);
    }

    #[test]
    fn movement_spans_at_most_lag_samples() {
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        // last = 19, 10 back from the end = index 10
        assert!((price_movement(&values, 10) - 9.0).abs() < f64::EPSILON);

        let short = [3.0, 7.0, 12.0];
        // fewer samples than the lag: span from the oldest
        assert!((price_movement(&short, 10) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn constant_prices_produce_zero_movement() {
        let mut tracker = MomentumTracker::new();
        for _ in 0..50 {
            let movement = tracker.record_tick(Tick::from_price(100.0));
            assert!(movement.abs() < 1e-9);
        }
        assert_eq!(tracker.tick_count(), 50);
        assert_eq!(tracker.movement_population().len(), 50);
        let ema = tracker.latest_ema().unwrap();
        assert!((ema.ten - 100.0).abs() < 1e-9);
        assert!((ema.thirty - 100.0).abs() < 1e-9);
    }

    #[test]
    fn price_jump_registers_positive_movement() {
        let mut tracker = MomentumTracker::new();
        for _ in 0..30 {
            tracker.record_tick(Tick::from_price(100.0));
        }
        let movement = tracker.record_tick(Tick::from_price(200.0));
        // EMA-10 moves by alpha * jump = 2/11 * 100
        assert!((movement - 200.0 / 11.0).abs() < 1e-6);
    }

    #[test]
    fn ema_history_is_bounded() {
        let mut tracker = MomentumTracker::new();
        for i in 0..100 {
            tracker.record_tick(Tick::from_price(100.0 + i as f64));
        }
        // Only the EMA buffer is capped at 20; ticks and movements keep growing
        // until their own capacity.
        assert_eq!(tracker.tick_count(), 100);
        assert_eq!(tracker.movement_population().len(), 100);
    }
}
