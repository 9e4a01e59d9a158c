const BONUS_DIVISOR: u64 = 7;

pub fn golden_ratio() -> f64 {
    (1.0 + 5f64.sqrt()) / 2.0
}

/// Interactions per view. Totals that are a positive multiple of seven
/// earn a `1 + 1/phi` bonus.
pub fn engagement_rate(reactions: u64, shares: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }

    let interactions = reactions.saturating_add(shares);
    let mut rate = interactions as f64 / views as f64;
    if interactions > 0 && interactions % BONUS_DIVISOR == 0 {
        rate *= 1.0 + 1.0 / golden_ratio();
    }

    rate
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
