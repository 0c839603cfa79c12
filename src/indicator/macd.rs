/// One MACD sample: the slow EMA of price, the fast line (price minus slow),
/// and the signal line (EMA of the fast line).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Macd {
    pub slow: f64,
    pub value: f64,
    pub signal: f64,
}

/// Final MACD over `prices`. The first price seeds the slow line and yields no
/// fast/signal values, matching the EMA seed convention.
pub fn last_macd(prices: &[f64], period: usize, signal_period: usize) -> Macd {
    let alpha = 2.0 / (period as f64 + 1.0);
    let signal_alpha = 2.0 / (signal_period as f64 + 1.0);

    let mut current = Macd::default();
    let mut seeded = false;

    for &price in prices {
        if !seeded {
            seeded = true;
            current.slow = price;
            continue;
        }
        current.slow = price * alpha + current.slow * (1.0 - alpha);
        current.value = price - current.slow;
        current.signal = current.value * signal_alpha + current.signal * (1.0 - signal_alpha);
    }

    current
}

/// Running MACD sequence, one sample per input after the seed.
pub fn macd(prices: &[f64], period: usize, signal_period: usize) -> Vec<Macd> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let signal_alpha = 2.0 / (signal_period as f64 + 1.0);

    let mut out = Vec::with_capacity(prices.len().saturating_sub(1));
    let mut current = Macd::default();
    let mut seeded = false;

    for &price in prices {
        if !seeded {
            seeded = true;
            current.slow = price;
            continue;
        }
        current.slow = price * alpha + current.slow * (1.0 - alpha);
        current.value = price - current.slow;
        current.signal = current.value * signal_alpha + current.signal * (1.0 - signal_alpha);
        out.push(current);
    }

    out
}
