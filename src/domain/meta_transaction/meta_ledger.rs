//! Multi-token ledger accepting relayed, signature-authorized operations.
//!
//! A meta-transaction moves through these steps, and a failure in any of them
//! rolls back the ledger store, the host and the pending events:
//!
//! 1. decode the relayer payload for the claimed fee flag
//! 2. check the signer's nonce
//! 3. rebuild the canonical message and validate the signature
//! 4. advance the nonce
//! 5. update balances or approvals
//! 6. settle the relayer fee, when one is claimed
//! 7. notify a contract recipient

use alloy::primitives::{Address, B256, U256};
use log::{debug, info};

use super::{
    decode_approval_data, domain_separator, FeeSettlement, MessageCodec, MetaPayload,
    NonceRegistry, ReceiverCallback, SignatureValidator, TransferData,
};
use crate::{
    config::LedgerConfigFile,
    models::{
        ApprovalIntent, BatchTransferIntent, CallContext, GasReceipt, LedgerEvent,
        MetaTransactionError, MetaTransactionReceipt, SettledFee, TransferIntent,
    },
    repositories::{ApprovalRepositoryTrait, BalanceRepositoryTrait, LedgerStore},
    services::{HostTrait, ReceiverHook},
    utils::gas_to_u64,
};

/// Result of the steps run inside one atomic call: new nonce and settled fee.
type Execution = (U256, Option<SettledFee>);

#[derive(Debug)]
pub struct MetaLedger {
    address: Address,
    domain_separator: B256,
    codec: MessageCodec,
    validator: SignatureValidator,
    callback: ReceiverCallback,
    store: LedgerStore,
    events: Vec<LedgerEvent>,
}

impl MetaLedger {
    pub fn new(address: Address) -> Self {
        let domain_separator = domain_separator(address);
        Self {
            address,
            domain_separator,
            codec: MessageCodec::new(address),
            validator: SignatureValidator::new(domain_separator),
            callback: ReceiverCallback::new(address),
            store: LedgerStore::new(),
            events: Vec::new(),
        }
    }

    /// Builds a ledger at the configured address holding the genesis balances.
    pub fn from_config(config: &LedgerConfigFile) -> Result<Self, MetaTransactionError> {
        let mut ledger = Self::new(config.address);
        for allocation in &config.genesis {
            ledger.mint(allocation.owner, allocation.id, allocation.amount)?;
        }
        info!(
            "ledger {} initialized with {} genesis allocations",
            ledger.address,
            config.genesis.len()
        );
        Ok(ledger)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn domain_separator(&self) -> B256 {
        self.domain_separator
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Events of every committed call, oldest first.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn balance_of(&self, owner: Address, id: U256) -> Result<U256, MetaTransactionError> {
        Ok(self.store.balances.balance_of(owner, id)?)
    }

    pub fn balance_of_batch(
        &self,
        owners: &[Address],
        ids: &[U256],
    ) -> Result<Vec<U256>, MetaTransactionError> {
        if owners.len() != ids.len() {
            return Err(MetaTransactionError::InvalidArrayLength);
        }
        owners
            .iter()
            .zip(ids)
            .map(|(owner, id)| self.balance_of(*owner, *id))
            .collect()
    }

    pub fn is_approved_for_all(
        &self,
        owner: Address,
        operator: Address,
    ) -> Result<bool, MetaTransactionError> {
        Ok(self.store.approvals.is_approved_for_all(owner, operator)?)
    }

    pub fn get_nonce(&self, signer: Address) -> Result<U256, MetaTransactionError> {
        NonceRegistry::new(&self.store.nonces).current(signer)
    }

    /// Creates `amount` new tokens of `id` for `to`.
    pub fn mint(&mut self, to: Address, id: U256, amount: U256) -> Result<(), MetaTransactionError> {
        if to == Address::ZERO {
            return Err(MetaTransactionError::InvalidRecipient);
        }
        self.store.balances.credit(to, id, amount)?;
        self.events.push(LedgerEvent::TransferSingle {
            operator: Address::ZERO,
            from: Address::ZERO,
            to,
            id,
            amount,
        });
        Ok(())
    }

    /// Lets `operator` move all tokens of the immediate caller.
    pub fn set_approval_for_all(
        &mut self,
        ctx: &CallContext,
        operator: Address,
        approved: bool,
    ) -> Result<(), MetaTransactionError> {
        self.store
            .approvals
            .set_approval_for_all(ctx.caller, operator, approved)?;
        self.events.push(LedgerEvent::ApprovalForAll {
            owner: ctx.caller,
            operator,
            approved,
        });
        Ok(())
    }

    /// Transfers `amount` of `id` from `from` to `to` on behalf of `from`.
    ///
    /// `data` is the relayer payload `abi.encode(signature, signedData)`; with
    /// `is_gas_fee` set the signed data must carry the fee receipt the signer
    /// authorized.
    #[allow(clippy::too_many_arguments)]
    pub fn meta_safe_transfer_from<H: HostTrait>(
        &mut self,
        host: &mut H,
        ctx: &CallContext,
        from: Address,
        to: Address,
        id: U256,
        amount: U256,
        is_gas_fee: bool,
        data: &[u8],
    ) -> Result<MetaTransactionReceipt, MetaTransactionError> {
        let result = self.atomically(host, |ledger, host, events| {
            ledger.execute_transfer(host, ctx, from, to, id, amount, is_gas_fee, data, events)
        });

        match &result {
            Ok(receipt) => info!(
                "meta transfer of {} (id {}) from {} to {} committed, nonce now {}",
                amount, id, from, to, receipt.nonce
            ),
            Err(e) => debug!("meta transfer from {} rejected: {}", from, e),
        }
        result
    }

    /// Batch version of [`MetaLedger::meta_safe_transfer_from`]; `ids` and
    /// `amounts` are paired by index and the batch moves as a whole or not at all.
    #[allow(clippy::too_many_arguments)]
    pub fn meta_safe_batch_transfer_from<H: HostTrait>(
        &mut self,
        host: &mut H,
        ctx: &CallContext,
        from: Address,
        to: Address,
        ids: &[U256],
        amounts: &[U256],
        is_gas_fee: bool,
        data: &[u8],
    ) -> Result<MetaTransactionReceipt, MetaTransactionError> {
        let result = self.atomically(host, |ledger, host, events| {
            ledger.execute_batch_transfer(
                host, ctx, from, to, ids, amounts, is_gas_fee, data, events,
            )
        });

        match &result {
            Ok(receipt) => info!(
                "meta batch transfer of {} ids from {} to {} committed, nonce now {}",
                ids.len(),
                from,
                to,
                receipt.nonce
            ),
            Err(e) => debug!("meta batch transfer from {} rejected: {}", from, e),
        }
        result
    }

    /// Sets or revokes `operator`'s approval over all tokens of `owner` on
    /// behalf of `owner`.
    #[allow(clippy::too_many_arguments)]
    pub fn meta_set_approval_for_all<H: HostTrait>(
        &mut self,
        host: &mut H,
        ctx: &CallContext,
        owner: Address,
        operator: Address,
        approved: bool,
        is_gas_fee: bool,
        data: &[u8],
    ) -> Result<MetaTransactionReceipt, MetaTransactionError> {
        let result = self.atomically(host, |ledger, host, events| {
            ledger.execute_approval(host, ctx, owner, operator, approved, is_gas_fee, data, events)
        });

        match &result {
            Ok(receipt) => info!(
                "meta approval of {} for {} set to {}, nonce now {}",
                operator, owner, approved, receipt.nonce
            ),
            Err(e) => debug!("meta approval by {} rejected: {}", owner, e),
        }
        result
    }

    /// Runs `operation` against a snapshot of the store and a host checkpoint.
    /// Events are only published when the operation succeeds.
    ///
    /// The snapshot is a full copy of the store, so each call costs time and
    /// memory proportional to the ledger size.
    fn atomically<H, F>(
        &mut self,
        host: &mut H,
        operation: F,
    ) -> Result<MetaTransactionReceipt, MetaTransactionError>
    where
        H: HostTrait,
        F: FnOnce(&Self, &mut H, &mut Vec<LedgerEvent>) -> Result<Execution, MetaTransactionError>,
    {
        let snapshot = self.store.clone();
        let checkpoint = host.checkpoint();
        let mut events = Vec::new();

        match operation(self, host, &mut events) {
            Ok((nonce, fee)) => {
                host.commit_checkpoint(checkpoint);
                self.events.extend(events.iter().cloned());
                Ok(MetaTransactionReceipt { nonce, events, fee })
            }
            Err(e) => {
                self.store = snapshot;
                host.revert_to_checkpoint(checkpoint);
                Err(e)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_transfer<H: HostTrait>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        from: Address,
        to: Address,
        id: U256,
        amount: U256,
        is_gas_fee: bool,
        data: &[u8],
        events: &mut Vec<LedgerEvent>,
    ) -> Result<Execution, MetaTransactionError> {
        if to == Address::ZERO {
            return Err(MetaTransactionError::InvalidRecipient);
        }

        let payload = MetaPayload::decode(data)?;
        let signed = TransferData::decode(&payload.signed_data, is_gas_fee)?;
        let intent = TransferIntent {
            from,
            to,
            id,
            amount,
            nonce: payload.signature.nonce,
            is_gas_fee,
            data: signed.data,
        };
        let message = self
            .codec
            .transfer_message(&intent, signed.receipt.as_ref());
        let new_nonce = self.authorize(host, from, intent.nonce, &message, &payload, events)?;

        self.store.balances.debit(from, id, amount)?;
        self.store.balances.credit(to, id, amount)?;
        events.push(LedgerEvent::TransferSingle {
            operator: ctx.caller,
            from,
            to,
            id,
            amount,
        });

        let fee = self.settle_fee(host, ctx, from, signed.receipt.as_ref(), events)?;

        let hook = ReceiverHook::Single {
            operator: ctx.caller,
            from,
            id,
            amount,
            data: intent.data,
        };
        self.callback.invoke(
            host,
            to,
            &hook,
            callback_gas_limit(signed.receipt.as_ref()),
            ctx.gas,
        )?;

        Ok((new_nonce, fee))
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_batch_transfer<H: HostTrait>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        from: Address,
        to: Address,
        ids: &[U256],
        amounts: &[U256],
        is_gas_fee: bool,
        data: &[u8],
        events: &mut Vec<LedgerEvent>,
    ) -> Result<Execution, MetaTransactionError> {
        if to == Address::ZERO {
            return Err(MetaTransactionError::InvalidRecipient);
        }
        if ids.len() != amounts.len() {
            return Err(MetaTransactionError::InvalidArrayLength);
        }

        let payload = MetaPayload::decode(data)?;
        let signed = TransferData::decode(&payload.signed_data, is_gas_fee)?;
        let intent = BatchTransferIntent {
            from,
            to,
            ids: ids.to_vec(),
            amounts: amounts.to_vec(),
            nonce: payload.signature.nonce,
            is_gas_fee,
            data: signed.data,
        };
        let message = self
            .codec
            .batch_transfer_message(&intent, signed.receipt.as_ref());
        let new_nonce = self.authorize(host, from, intent.nonce, &message, &payload, events)?;

        for (id, amount) in ids.iter().zip(amounts) {
            self.store.balances.debit(from, *id, *amount)?;
            self.store.balances.credit(to, *id, *amount)?;
        }
        events.push(LedgerEvent::TransferBatch {
            operator: ctx.caller,
            from,
            to,
            ids: intent.ids.clone(),
            amounts: intent.amounts.clone(),
        });

        let fee = self.settle_fee(host, ctx, from, signed.receipt.as_ref(), events)?;

        let hook = ReceiverHook::Batch {
            operator: ctx.caller,
            from,
            ids: intent.ids,
            amounts: intent.amounts,
            data: intent.data,
        };
        self.callback.invoke(
            host,
            to,
            &hook,
            callback_gas_limit(signed.receipt.as_ref()),
            ctx.gas,
        )?;

        Ok((new_nonce, fee))
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_approval<H: HostTrait>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        owner: Address,
        operator: Address,
        approved: bool,
        is_gas_fee: bool,
        data: &[u8],
        events: &mut Vec<LedgerEvent>,
    ) -> Result<Execution, MetaTransactionError> {
        let payload = MetaPayload::decode(data)?;
        let receipt = decode_approval_data(&payload.signed_data, is_gas_fee)?;
        let intent = ApprovalIntent {
            owner,
            operator,
            approved,
            nonce: payload.signature.nonce,
            is_gas_fee,
        };
        let message = self.codec.approval_message(&intent, receipt.as_ref());
        let new_nonce = self.authorize(host, owner, intent.nonce, &message, &payload, events)?;

        self.store
            .approvals
            .set_approval_for_all(owner, operator, approved)?;
        events.push(LedgerEvent::ApprovalForAll {
            owner,
            operator,
            approved,
        });

        let fee = self.settle_fee(host, ctx, owner, receipt.as_ref(), events)?;
        Ok((new_nonce, fee))
    }

    /// Checks the nonce, validates the signature over `message` and advances
    /// the nonce, publishing the change first.
    fn authorize<H: HostTrait>(
        &self,
        host: &H,
        signer: Address,
        nonce: U256,
        message: &[u8],
        payload: &MetaPayload,
        events: &mut Vec<LedgerEvent>,
    ) -> Result<U256, MetaTransactionError> {
        let nonces = NonceRegistry::new(&self.store.nonces);
        nonces.check(signer, nonce)?;
        self.validator
            .validate(host, signer, message, &payload.signature)?;

        let new_nonce = nonces.advance(signer)?;
        events.push(LedgerEvent::NonceChange { signer, new_nonce });
        Ok(new_nonce)
    }

    fn settle_fee<H: HostTrait>(
        &self,
        host: &mut H,
        ctx: &CallContext,
        signer: Address,
        receipt: Option<&GasReceipt>,
        events: &mut Vec<LedgerEvent>,
    ) -> Result<Option<SettledFee>, MetaTransactionError> {
        receipt
            .map(|receipt| {
                FeeSettlement::new(self.address, &self.store.balances)
                    .settle(host, ctx, signer, receipt, events)
            })
            .transpose()
    }
}

/// Gas cap of the recipient hook; without a receipt the hook may use all forwardable gas.
fn callback_gas_limit(receipt: Option<&GasReceipt>) -> u64 {
    receipt.map_or(u64::MAX, |receipt| gas_to_u64(receipt.gasLimitCallback))
}
