use alloy::primitives::U256;

use crate::constants::CALL_GAS_RETENTION_DIVISOR;

/// Converts a gas amount expressed as `U256` into `u64`, saturating at `u64::MAX`.
pub fn gas_to_u64(gas: U256) -> u64 {
    if gas > U256::from(u64::MAX) {
        u64::MAX
    } else {
        gas.to::<u64>()
    }
}

/// Gas a caller can hand to a nested call: everything but one 64th of what is left.
pub fn forwardable_gas(gas_left: u64) -> u64 {
    gas_left - gas_left / CALL_GAS_RETENTION_DIVISOR
}
