//! Exponential moving average with seed-first semantics: the first price
//! initializes the average at full weight and produces no output sample.

/// Running EMA sequence over `prices`. One output per input after the seed, so
/// the result has `prices.len() - 1` entries (empty for zero or one input).
pub fn ema(prices: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(prices.len().saturating_sub(1));
    let mut current = 0.0;
    let mut seeded = false;

    for &price in prices {
        if !seeded {
            seeded = true;
            current = price;
            continue;
        }
        current = price * alpha + current * (1.0 - alpha);
        out.push(current);
    }

    out
}

/// Final EMA value over `prices`; 0.0 for an empty input, the seed itself for a
/// single price.
pub fn last_ema(prices: &[f64], period: usize) -> f64 {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut current = 0.0;
    let mut seeded = false;

    for &price in prices {
        if !seeded {
            seeded = true;
            current = price;
            continue;
        }
        current = price * alpha + current * (1.0 - alpha);
    }

    current
}
