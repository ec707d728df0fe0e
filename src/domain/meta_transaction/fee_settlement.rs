use alloy::primitives::{Address, Bytes};
use log::{debug, warn};

use super::ReceiverCallback;
use crate::{
    models::{CallContext, FeeToken, GasReceipt, LedgerEvent, MetaTransactionError, SettledFee},
    repositories::BalanceRepositoryTrait,
    services::{HostError, HostTrait, ReceiverHook},
};

/// Pays the relayer fee described by a [`GasReceipt`] out of the signer's
/// holdings.
///
/// Fees in this ledger's own tokens move between balances directly. Fees in
/// any other token are pulled through the token contract with the ledger as
/// spender, so the signer must have approved the ledger there.
pub struct FeeSettlement<'a, B: BalanceRepositoryTrait> {
    ledger: Address,
    balances: &'a B,
}

impl<'a, B: BalanceRepositoryTrait> FeeSettlement<'a, B> {
    pub fn new(ledger: Address, balances: &'a B) -> Self {
        Self { ledger, balances }
    }

    pub fn settle<H: HostTrait>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        signer: Address,
        receipt: &GasReceipt,
        events: &mut Vec<LedgerEvent>,
    ) -> Result<SettledFee, MetaTransactionError> {
        let recipient = if receipt.feeRecipient == Address::ZERO {
            ctx.caller
        } else {
            receipt.feeRecipient
        };
        let token = receipt.fee_token()?;
        let amount = receipt.gasFee;

        match token {
            FeeToken::Erc1155 { token, id } if token == self.ledger => {
                self.balances.debit(signer, id, amount)?;
                self.balances.credit(recipient, id, amount)?;
                events.push(LedgerEvent::TransferSingle {
                    operator: ctx.caller,
                    from: signer,
                    to: recipient,
                    id,
                    amount,
                });

                let hook = ReceiverHook::Single {
                    operator: ctx.caller,
                    from: signer,
                    id,
                    amount,
                    data: Bytes::new(),
                };
                ReceiverCallback::new(self.ledger).invoke(
                    host,
                    recipient,
                    &hook,
                    u64::MAX,
                    ctx.gas,
                )?;
            }
            FeeToken::Erc1155 { token, id } => {
                host.erc1155_safe_transfer_from(token, self.ledger, signer, recipient, id, amount)
                    .map_err(fee_transfer_error)?;
            }
            FeeToken::Erc20 { token } => {
                host.erc20_transfer_from(token, self.ledger, signer, recipient, amount)
                    .map_err(fee_transfer_error)?;
            }
        }

        debug!("fee of {} paid by {} to {}", amount, signer, recipient);
        Ok(SettledFee {
            token,
            recipient,
            amount,
        })
    }
}

fn fee_transfer_error(error: HostError) -> MetaTransactionError {
    match error {
        HostError::InsufficientBalance => MetaTransactionError::Underflow,
        HostError::Overflow => MetaTransactionError::Overflow,
        HostError::InsufficientAllowance | HostError::NotApproved => {
            MetaTransactionError::InvalidOperator
        }
        HostError::NoCode(token) => {
            warn!("fee token {} has no code", token);
            MetaTransactionError::UnsupportedAsset
        }
        other => {
            warn!("fee token transfer failed: {}", other);
            MetaTransactionError::InvalidOperator
        }
    }
}
