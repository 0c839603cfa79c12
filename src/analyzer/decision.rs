use crate::analyzer::trend::TrendCategory;
use crate::model::action::TradeAction;
use crate::model::order::OrderSide;
use crate::model::position::PositionSide;
use crate::model::tick::Tick;

/// Maps the current position, trend category and quotes onto a trade action.
///
/// Until `warmup_ticks` ticks have been observed the engine always holds, so
/// the movement population is representative before any order goes out.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine {
    warmup_ticks: usize,
}

impl DecisionEngine {
    pub fn new(warmup_ticks: usize) -> Self {
        Self { warmup_ticks }
    }

    pub fn decide(
        &self,
        tick_history_len: usize,
        side: PositionSide,
        trend: TrendCategory,
        tick: &Tick,
        position_price: f64,
    ) -> TradeAction {
        if tick_history_len < self.warmup_ticks {
            return TradeAction::Hold;
        }

        match side {
            PositionSide::Flat => match trend {
                TrendCategory::GreatRise => TradeAction::Open {
                    side: OrderSide::Buy,
                },
                TrendCategory::GreatFall => TradeAction::Open {
                    side: OrderSide::Sell,
                },
                _ => TradeAction::Hold,
            },
            PositionSide::Short => match trend {
                TrendCategory::None if tick.best_ask < position_price => TradeAction::TakeProfit {
                    side: OrderSide::Buy,
                },
                TrendCategory::Rise | TrendCategory::GreatRise => TradeAction::CutLoss {
                    side: OrderSide::Buy,
                },
                // A further plunge while short adds to the position.
                TrendCategory::GreatFall => TradeAction::Open {
                    side: OrderSide::Sell,
                },
                _ => TradeAction::Hold,
            },
            PositionSide::Long => match trend {
                TrendCategory::None if tick.best_bid > position_price => TradeAction::TakeProfit {
                    side: OrderSide::Sell,
                },
                // A further surge while long adds to the position.
                TrendCategory::GreatRise => TradeAction::Open {
                    side: OrderSide::Buy,
                },
                TrendCategory::Fall | TrendCategory::GreatFall => TradeAction::CutLoss {
                    side: OrderSide::Sell,
                },
                _ => TradeAction::Hold,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WARMUP: usize = 100;

    fn engine() -> DecisionEngine {
        DecisionEngine::new(WARMUP)
    }

    fn quote(bid: f64, ask: f64) -> Tick {
        let mut tick = Tick::from_price((bid + ask) / 2.0);
        tick.best_bid = bid;
        tick.best_ask = ask;
        tick
    }

    #[test]
    fn holds_during_warmup_regardless_of_trend() {
        let tick = quote(99.0, 101.0);
        for len in [0, 1, WARMUP - 1] {
            let action = engine().decide(
                len,
                PositionSide::Flat,
                TrendCategory::GreatRise,
                &tick,
                0.0,
            );
            assert_eq!(action, TradeAction::Hold);
        }
        let action = engine().decide(
            WARMUP,
            PositionSide::Flat,
            TrendCategory::GreatRise,
            &tick,
            0.0,
        );
        assert_ne!(action, TradeAction::Hold);
    }

    #[test]
    fn flat_opens_only_on_great_moves() {
        let tick = quote(99.0, 101.0);
        let cases = [
            (TrendCategory::GreatRise, TradeAction::Open { side: OrderSide::Buy }),
            (TrendCategory::GreatFall, TradeAction::Open { side: OrderSide::Sell }),
            (TrendCategory::Rise, TradeAction::Hold),
            (TrendCategory::Fall, TradeAction::Hold),
            (TrendCategory::None, TradeAction::Hold),
        ];
        for (trend, expected) in cases {
            assert_eq!(
                engine().decide(WARMUP, PositionSide::Flat, trend, &tick, 0.0),
                expected,
                "flat + {trend}"
            );
        }
    }

    #[test]
    fn short_takes_profit_only_below_entry() {
        let entry = 100.0;
        let below = quote(97.0, 98.0);
        let above = quote(102.0, 103.0);

        assert_eq!(
            engine().decide(WARMUP, PositionSide::Short, TrendCategory::None, &below, entry),
            TradeAction::TakeProfit { side: OrderSide::Buy }
        );
        assert_eq!(
            engine().decide(WARMUP, PositionSide::Short, TrendCategory::None, &above, entry),
            TradeAction::Hold
        );
    }

    #[test]
    fn short_cuts_loss_on_any_rise() {
        let tick = quote(104.0, 105.0);
        for trend in [TrendCategory::Rise, TrendCategory::GreatRise] {
            assert_eq!(
                engine().decide(WARMUP, PositionSide::Short, trend, &tick, 100.0),
                TradeAction::CutLoss { side: OrderSide::Buy },
                "short + {trend}"
            );
        }
    }

    #[test]
    fn short_adds_on_great_fall() {
        let tick = quote(94.0, 95.0);
        assert_eq!(
            engine().decide(WARMUP, PositionSide::Short, TrendCategory::GreatFall, &tick, 100.0),
            TradeAction::Open { side: OrderSide::Sell }
        );
        assert_eq!(
            engine().decide(WARMUP, PositionSide::Short, TrendCategory::Fall, &tick, 100.0),
            TradeAction::Hold
        );
    }

    #[test]
    fn long_takes_profit_only_above_entry() {
        let entry = 100.0;
        let above = quote(102.0, 103.0);
        let below = quote(97.0, 98.0);

        assert_eq!(
            engine().decide(WARMUP, PositionSide::Long, TrendCategory::None, &above, entry),
            TradeAction::TakeProfit { side: OrderSide::Sell }
        );
        assert_eq!(
            engine().decide(WARMUP, PositionSide::Long, TrendCategory::None, &below, entry),
            TradeAction::Hold
        );
    }

    #[test]
    fn long_cuts_loss_on_any_fall() {
        let tick = quote(94.0, 95.0);
        for trend in [TrendCategory::Fall, TrendCategory::GreatFall] {
            assert_eq!(
                engine().decide(WARMUP, PositionSide::Long, trend, &tick, 100.0),
                TradeAction::CutLoss { side: OrderSide::Sell },
                "long + {trend}"
            );
        }
    }

    #[test]
    fn long_adds_on_great_rise() {
        let tick = quote(104.0, 105.0);
        assert_eq!(
            engine().decide(WARMUP, PositionSide::Long, TrendCategory::GreatRise, &tick, 100.0),
            TradeAction::Open { side: OrderSide::Buy }
        );
        assert_eq!(
            engine().decide(WARMUP, PositionSide::Long, TrendCategory::Rise, &tick, 100.0),
            TradeAction::Hold
        );
    }
}
