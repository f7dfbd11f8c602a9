//! FlowController constructor bindings.
//!
//! Two constructor shapes exist:
//! - [`FlowController`]: addresses plus decay, max ratio and weight
//! - [`basic::FlowController`]: addresses only

use alloy_sol_types::sol;

sol! {
    /// FlowController taking the protocol parameters at construction.
    contract FlowController {
        constructor(
            address conviction,
            address superfluid,
            address superToken,
            uint256 decay,
            uint256 maxRatio,
            uint256 weight
        );
    }
}

/// FlowController with fixed protocol parameters.
pub mod basic {
    use alloy_sol_types::sol;

    sol! {
        contract FlowController {
            constructor(address conviction, address superfluid, address superToken);
        }
    }
}
