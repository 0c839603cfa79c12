use std::fmt;

/// Discrete classification of one movement sample against the rolling
/// movement population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendCategory {
    None,
    Rise,
    GreatRise,
    Fall,
    GreatFall,
}

impl fmt::Display for TrendCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendCategory::None => "NONE",
            TrendCategory::Rise => "RISE",
            TrendCategory::GreatRise => "GREAT_RISE",
            TrendCategory::Fall => "FALL",
            TrendCategory::GreatFall => "GREAT_FALL",
        };
        write!(f, "{}", s)
    }
}

/// Mean and sample standard deviation of the population. Both are 0 when the
/// population has fewer than two samples.
pub fn population_stats(population: &[f64]) -> (f64, f64) {
    let n = population.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = population.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, 0.0);
    }
    let variance = population
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / (n - 1) as f64;
    (mean, variance.sqrt())
}

/// Z-score of the movement against the population; 0 when the deviation is 0.
pub fn separation(movement: f64, population: &[f64]) -> f64 {
    let (mean, std_dev) = population_stats(population);
    if std_dev.abs() > 0.0 {
        (movement - mean) / std_dev
    } else {
        0.0
    }
}

/// Movement sign is checked first, then the z-score magnitude: |z| >= 3 is a
/// great move, |z| >= 1 an ordinary one, anything less is noise.
pub fn classify(movement: f64, population: &[f64]) -> TrendCategory {
    let abs_z = separation(movement, population).abs();

    if movement > 0.0 {
        if abs_z >= 3.0 {
            return TrendCategory::GreatRise;
        }
        if abs_z >= 1.0 {
            return TrendCategory::Rise;
        }
    }

    if movement < 0.0 {
        if abs_z >= 3.0 {
            return TrendCategory::GreatFall;
        }
        if abs_z >= 1.0 {
            return TrendCategory::Fall;
        }
    }

    TrendCategory::None
}
