//! In-memory host with mock contracts.
//!
//! Each address holds at most one kind of contract: a fungible token, a
//! foreign multi-token ledger, an ERC-1271 wallet, an ERC-1155 receiver or a
//! plain contract without any of these interfaces. Addresses without a
//! registered contract are key-pair accounts.

use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, FixedBytes, B256, U256};
use log::debug;

use super::{Checkpoint, HostError, HostTrait, ReceiverHook, WalletPayload};
use crate::{
    constants::{ERC1271_MAGIC_VALUE_BYTES, ERC1271_MAGIC_VALUE_BYTES32},
    domain::signing_hash,
    utils::recover_address_from_prehash,
};

#[derive(Debug, Clone, Default)]
struct Erc20Token {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>, // (owner, spender) -> allowance
}

#[derive(Debug, Clone, Default)]
struct MultiToken {
    balances: HashMap<(Address, U256), U256>,
    operators: HashSet<(Address, Address)>, // (owner, operator)
}

/// ERC-1271 wallet accepting signatures of its owner key over a ledger's
/// protocol hash.
#[derive(Debug, Clone)]
struct ContractWallet {
    owner: Address,
    domain_separator: B256,
}

impl ContractWallet {
    fn is_valid_signature(&self, payload: &WalletPayload, signature: &[u8]) -> FixedBytes<4> {
        let (hash, magic) = match payload {
            WalletPayload::Bytes(message) => (
                signing_hash(&self.domain_separator, message),
                ERC1271_MAGIC_VALUE_BYTES,
            ),
            WalletPayload::Hash(hash) => (*hash, ERC1271_MAGIC_VALUE_BYTES32),
        };

        match recover_address_from_prehash(&hash, signature) {
            Ok(recovered) if recovered == self.owner => magic,
            _ => FixedBytes::ZERO,
        }
    }
}

/// Mock ERC-1155 receiver.
#[derive(Debug, Clone, Default)]
pub struct TokenReceiver {
    /// Gas a hook invocation consumes
    pub gas_cost: u64,
    /// Answer with a wrong value instead of the acceptance value
    pub should_reject: bool,
    /// Hooks that returned the acceptance value
    pub received: Vec<ReceiverHook>,
}

impl TokenReceiver {
    pub fn new(gas_cost: u64) -> Self {
        Self {
            gas_cost,
            ..Default::default()
        }
    }

    pub fn rejecting() -> Self {
        Self {
            should_reject: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
struct HostState {
    erc20: HashMap<Address, Erc20Token>,
    erc1155: HashMap<Address, MultiToken>,
    wallets: HashMap<Address, ContractWallet>,
    receivers: HashMap<Address, TokenReceiver>,
    contracts: HashSet<Address>,
}

#[derive(Debug, Default)]
pub struct InMemoryHost {
    state: HostState,
    checkpoints: Vec<HostState>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a contract that implements none of the mocked interfaces.
    pub fn deploy_contract(&mut self, address: Address) {
        self.state.contracts.insert(address);
    }

    pub fn deploy_erc20(&mut self, token: Address) {
        self.state.erc20.entry(token).or_default();
    }

    pub fn deploy_erc1155(&mut self, token: Address) {
        self.state.erc1155.entry(token).or_default();
    }

    pub fn deploy_wallet(&mut self, wallet: Address, owner: Address, domain_separator: B256) {
        self.state.wallets.insert(
            wallet,
            ContractWallet {
                owner,
                domain_separator,
            },
        );
    }

    pub fn deploy_receiver(&mut self, address: Address, receiver: TokenReceiver) {
        self.state.receivers.insert(address, receiver);
    }

    pub fn receiver(&self, address: Address) -> Option<&TokenReceiver> {
        self.state.receivers.get(&address)
    }

    pub fn set_receiver_should_reject(
        &mut self,
        address: Address,
        should_reject: bool,
    ) -> Result<(), HostError> {
        let receiver = self
            .state
            .receivers
            .get_mut(&address)
            .ok_or(HostError::NoCode(address))?;
        receiver.should_reject = should_reject;
        Ok(())
    }

    pub fn erc20_mint(
        &mut self,
        token: Address,
        owner: Address,
        amount: U256,
    ) -> Result<(), HostError> {
        let erc20 = self.erc20_mut(token)?;
        let balance = erc20.balances.entry(owner).or_default();
        *balance = balance.checked_add(amount).ok_or(HostError::Overflow)?;
        Ok(())
    }

    pub fn erc20_approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), HostError> {
        self.erc20_mut(token)?
            .allowances
            .insert((owner, spender), amount);
        Ok(())
    }

    pub fn erc20_balance_of(&self, token: Address, owner: Address) -> U256 {
        self.state
            .erc20
            .get(&token)
            .and_then(|erc20| erc20.balances.get(&owner).copied())
            .unwrap_or_default()
    }

    pub fn erc1155_mint(
        &mut self,
        token: Address,
        owner: Address,
        id: U256,
        amount: U256,
    ) -> Result<(), HostError> {
        let multi = self.erc1155_mut(token)?;
        let balance = multi.balances.entry((owner, id)).or_default();
        *balance = balance.checked_add(amount).ok_or(HostError::Overflow)?;
        Ok(())
    }

    pub fn erc1155_set_approval_for_all(
        &mut self,
        token: Address,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), HostError> {
        let multi = self.erc1155_mut(token)?;
        if approved {
            multi.operators.insert((owner, operator));
        } else {
            multi.operators.remove(&(owner, operator));
        }
        Ok(())
    }

    pub fn erc1155_balance_of(&self, token: Address, owner: Address, id: U256) -> U256 {
        self.state
            .erc1155
            .get(&token)
            .and_then(|multi| multi.balances.get(&(owner, id)).copied())
            .unwrap_or_default()
    }

    fn erc20_mut(&mut self, token: Address) -> Result<&mut Erc20Token, HostError> {
        self.state
            .erc20
            .get_mut(&token)
            .ok_or(HostError::NoCode(token))
    }

    fn erc1155_mut(&mut self, token: Address) -> Result<&mut MultiToken, HostError> {
        self.state
            .erc1155
            .get_mut(&token)
            .ok_or(HostError::NoCode(token))
    }
}

impl HostTrait for InMemoryHost {
    fn is_contract(&self, account: Address) -> bool {
        self.state.contracts.contains(&account)
            || self.state.erc20.contains_key(&account)
            || self.state.erc1155.contains_key(&account)
            || self.state.wallets.contains_key(&account)
            || self.state.receivers.contains_key(&account)
    }

    fn is_valid_signature(
        &self,
        wallet: Address,
        payload: &WalletPayload,
        signature: &[u8],
    ) -> Result<FixedBytes<4>, HostError> {
        match self.state.wallets.get(&wallet) {
            Some(contract) => Ok(contract.is_valid_signature(payload, signature)),
            None if self.is_contract(wallet) => Err(HostError::Reverted(
                "isValidSignature not implemented".to_string(),
            )),
            None => Err(HostError::NoCode(wallet)),
        }
    }

    fn erc20_transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), HostError> {
        let erc20 = self.erc20_mut(token)?;

        let remaining_allowance = if spender != from {
            let allowance = erc20
                .allowances
                .get(&(from, spender))
                .copied()
                .unwrap_or_default();
            Some(
                allowance
                    .checked_sub(amount)
                    .ok_or(HostError::InsufficientAllowance)?,
            )
        } else {
            None
        };

        let from_balance = erc20.balances.get(&from).copied().unwrap_or_default();
        let from_balance = from_balance
            .checked_sub(amount)
            .ok_or(HostError::InsufficientBalance)?;

        if let Some(remaining) = remaining_allowance {
            erc20.allowances.insert((from, spender), remaining);
        }
        erc20.balances.insert(from, from_balance);

        let to_balance = erc20.balances.entry(to).or_default();
        *to_balance = to_balance.checked_add(amount).ok_or(HostError::Overflow)?;

        debug!("erc20 {} moved {} from {} to {}", token, amount, from, to);
        Ok(())
    }

    fn erc1155_safe_transfer_from(
        &mut self,
        token: Address,
        operator: Address,
        from: Address,
        to: Address,
        id: U256,
        amount: U256,
    ) -> Result<(), HostError> {
        let multi = self.erc1155_mut(token)?;

        if operator != from && !multi.operators.contains(&(from, operator)) {
            return Err(HostError::NotApproved);
        }

        let from_balance = multi.balances.get(&(from, id)).copied().unwrap_or_default();
        let from_balance = from_balance
            .checked_sub(amount)
            .ok_or(HostError::InsufficientBalance)?;
        multi.balances.insert((from, id), from_balance);

        let to_balance = multi.balances.entry((to, id)).or_default();
        *to_balance = to_balance.checked_add(amount).ok_or(HostError::Overflow)?;

        debug!(
            "erc1155 {} moved {} of id {} from {} to {}",
            token, amount, id, from, to
        );
        Ok(())
    }

    fn call_receiver(
        &mut self,
        receiver: Address,
        hook: &ReceiverHook,
        gas_limit: u64,
    ) -> Result<FixedBytes<4>, HostError> {
        if !self.state.receivers.contains_key(&receiver) {
            if self.is_contract(receiver) {
                return Err(HostError::Reverted(
                    "receiver hook not implemented".to_string(),
                ));
            }
            return Err(HostError::NoCode(receiver));
        }
        let Some(mock) = self.state.receivers.get_mut(&receiver) else {
            return Err(HostError::NoCode(receiver));
        };

        if mock.gas_cost > gas_limit {
            return Err(HostError::OutOfGas {
                limit: gas_limit,
                required: mock.gas_cost,
            });
        }

        if mock.should_reject {
            return Ok(FixedBytes::ZERO);
        }

        mock.received.push(hook.clone());
        Ok(hook.accepted_value())
    }

    /// Copies the whole host state.
    fn checkpoint(&mut self) -> Checkpoint {
        self.checkpoints.push(self.state.clone());
        Checkpoint(self.checkpoints.len() - 1)
    }

    fn revert_to_checkpoint(&mut self, checkpoint: Checkpoint) {
        if let Some(state) = self.checkpoints.get(checkpoint.0).cloned() {
            self.state = state;
        }
        self.checkpoints.truncate(checkpoint.0);
    }

    fn commit_checkpoint(&mut self, checkpoint: Checkpoint) {
        self.checkpoints.truncate(checkpoint.0);
    }
}
