use alloy::primitives::Address;
use log::{debug, warn};

use crate::{
    models::MetaTransactionError,
    services::{HostTrait, ReceiverHook},
    utils::forwardable_gas,
};

/// Notifies contract recipients of incoming tokens.
///
/// The hook runs with `min(gas_limit, gas_left - gas_left / 64)` gas. A
/// receiver that reverts, runs out of gas or answers anything but the
/// acceptance value rejects the transfer with
/// [`MetaTransactionError::InvalidOnReceive`].
#[derive(Debug, Clone, Copy)]
pub struct ReceiverCallback {
    ledger: Address,
}

impl ReceiverCallback {
    pub fn new(ledger: Address) -> Self {
        Self { ledger }
    }

    pub fn invoke<H: HostTrait>(
        &self,
        host: &mut H,
        receiver: Address,
        hook: &ReceiverHook,
        gas_limit: u64,
        gas_left: u64,
    ) -> Result<(), MetaTransactionError> {
        if receiver == self.ledger {
            return Err(MetaTransactionError::InvalidMethod);
        }
        if !host.is_contract(receiver) {
            return Ok(());
        }

        let gas = gas_limit.min(forwardable_gas(gas_left));
        match host.call_receiver(receiver, hook, gas) {
            Ok(value) if value == hook.accepted_value() => {
                debug!("receiver {} accepted tokens with {} gas", receiver, gas);
                Ok(())
            }
            Ok(value) => {
                warn!("receiver {} answered {} instead of accepting", receiver, value);
                Err(MetaTransactionError::InvalidOnReceive)
            }
            Err(e) => {
                warn!("receiver {} failed: {}", receiver, e);
                Err(MetaTransactionError::InvalidOnReceive)
            }
        }
    }
}
