use crate::error::AppError;

/// RSI over the last `period` deltas: 100 * grossGain / (grossGain - grossLoss),
/// where losses accumulate as negative values. Requires strictly more prices
/// than the period so every delta has a predecessor.
pub fn last_rsi(prices: &[f64], period: usize) -> Result<f64, AppError> {
    let count = prices.len();
    if count <= period {
        return Err(AppError::InsufficientSamples {
            have: count,
            period,
        });
    }

    let mut gross_gain = 0.0;
    let mut gross_loss = 0.0;

    for i in count - period..count {
        let delta = prices[i] - prices[i - 1];
        if delta > 0.0 {
            gross_gain += delta;
        } else if delta < 0.0 {
            gross_loss += delta;
        }
    }

    Ok(100.0 * gross_gain / (gross_gain - gross_loss))
}

/// Sliding RSI over every `period + 1` wide window, oldest first.
pub fn rsi(prices: &[f64], period: usize) -> Result<Vec<f64>, AppError> {
    let count = prices.len();
    if count <= period {
        return Err(AppError::InsufficientSamples {
            have: count,
            period,
        });
    }

    (0..count - period)
        .map(|offset| last_rsi(&prices[offset..offset + period + 1], period))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_input_not_longer_than_period() {
        let prices = [1.0, 2.0, 3.0];
        assert!(matches!(
            last_rsi(&prices, 3),
            Err(AppError::InsufficientSamples { have: 3, period: 3 })
        ));
        assert!(last_rsi(&prices, 5).is_err());
        assert!(rsi(&prices, 3).is_err());
    }

    #[test]
    fn monotonic_rise_saturates_at_100() {
        let prices = [100.0, 101.0, 102.0, 103.0, 104.0, 105.0];
        let v = last_rsi(&prices, 5).unwrap();
        assert!((v - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn monotonic_fall_saturates_at_0() {
        let prices = [105.0, 104.0, 103.0, 102.0, 101.0, 100.0];
        let v = last_rsi(&prices, 5).unwrap();
        assert!(v.abs() < f64::EPSILON);
    }

    #[test]
    fn mixed_moves_stay_in_bounds() {
        let prices = [44.0, 44.25, 44.5, 43.75, 44.0, 44.5, 45.0, 44.75, 45.5];
        let v = last_rsi(&prices, 8).unwrap();
        assert!(v > 0.0 && v < 100.0);
    }

    #[test]
    fn sliding_windows_cover_whole_input() {
        let prices = [1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
        let seq = rsi(&prices, 3).unwrap();
        assert_eq!(seq.len(), 3);
        let last_window = last_rsi(&prices[2..6], 3).unwrap();
        assert!((seq[2] - last_window).abs() < 1e-12);
    }
}
