//! Reward formula
//!
//! `reward = deposit * total_score / divide_threshold`, evaluated in floating point
//! so small deposits do not truncate to zero.

/// Payout for a finished game
pub fn reward_for(deposit: f64, total_score: u64, divide_threshold: u64) -> f64 {
    if divide_threshold == 0 {
        return 0.0;
    }
    deposit * total_score as f64 / divide_threshold as f64
}

/// Running estimate shown while playing. Zero until `min_score` (if any) is reached.
pub fn estimated_reward(
    deposit: f64,
    total_score: u64,
    divide_threshold: u64,
    min_score: Option<u64>,
) -> f64 {
    match min_score {
        Some(min) if total_score < min => 0.0,
        _ => reward_for(deposit, total_score, divide_threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DIVIDE_THRESHOLD;

    #[test]
    fn test_reference_payout() {
        assert_eq!(reward_for(10.0, 900, DIVIDE_THRESHOLD), 5.0);
        assert_eq!(reward_for(10.0, 0, DIVIDE_THRESHOLD), 0.0);
        assert_eq!(reward_for(2.0, 3600, DIVIDE_THRESHOLD), 4.0);
    }

    #[test]
    fn test_no_integer_truncation() {
        let reward = reward_for(1.0, 900, DIVIDE_THRESHOLD);
        assert_eq!(reward, 0.5);
        let reward = reward_for(3.0, 100, DIVIDE_THRESHOLD);
        assert!((reward - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_qualifying_score() {
        assert_eq!(estimated_reward(10.0, 900, DIVIDE_THRESHOLD, None), 5.0);
        assert_eq!(estimated_reward(10.0, 900, DIVIDE_THRESHOLD, Some(1000)), 0.0);
        assert_eq!(estimated_reward(10.0, 1800, DIVIDE_THRESHOLD, Some(1000)), 10.0);
    }

    #[test]
    fn test_zero_threshold_pays_nothing() {
        assert_eq!(reward_for(10.0, 900, 0), 0.0);
    }
}
