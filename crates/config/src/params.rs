//! FlowController protocol parameters.
//!
//! All values are fixed-point numbers scaled by 10^18. Their meaning is owned
//! by the contract; they are passed to the constructor as-is.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// 1.0 in 18-decimal fixed point.
pub const FIXED_POINT_ONE: u128 = 1_000_000_000_000_000_000;

/// Seconds in the 30-day month used to derive [`MAX_RATIO`].
pub const SECONDS_PER_MONTH: u128 = 30 * 24 * 60 * 60;

/// Per-period decay factor, 0.9999999.
pub const DECAY: u128 = FIXED_POINT_ONE / 10_000_000 * 9_999_999;

/// Per-second rate ceiling derived from a 2% monthly cap.
pub const MAX_RATIO: u128 = FIXED_POINT_ONE * 2 / 100 / SECONDS_PER_MONTH;

/// Weighting factor, 0.025.
pub const WEIGHT: u128 = FIXED_POINT_ONE / 1_000 * 25;

/// Constructor parameters of the extended FlowController.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowParams {
    pub decay: U256,
    pub max_ratio: U256,
    pub weight: U256,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            decay: U256::from(DECAY),
            max_ratio: U256::from(MAX_RATIO),
            weight: U256::from(WEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay() {
        assert_eq!(DECAY, 999_999_900_000_000_000);
    }

    #[test]
    fn test_max_ratio_is_floored() {
        // 2e16 / 2_592_000 = 7716049382.716...
        assert_eq!(SECONDS_PER_MONTH, 2_592_000);
        assert_eq!(MAX_RATIO, 7_716_049_382);
    }

    #[test]
    fn test_weight() {
        assert_eq!(WEIGHT, 25_000_000_000_000_000);
    }

    #[test]
    fn test_default_params() {
        let params = FlowParams::default();
        assert_eq!(params.decay.to_string(), "999999900000000000");
        assert_eq!(params.max_ratio.to_string(), "7716049382");
        assert_eq!(params.weight.to_string(), "25000000000000000");
    }
}
