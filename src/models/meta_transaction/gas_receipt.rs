use alloy::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::SolValue,
};
use log::debug;
use serde::Serialize;

use crate::{
    constants::{FEE_TOKEN_KIND_ERC1155, FEE_TOKEN_KIND_ERC20},
    models::MetaTransactionError,
};

sol! {
    /// Fee terms a signer attaches to a meta-transaction.
    ///
    /// `feeTokenData` ends with a kind byte: `abi.encode(token, id, uint8(0))`
    /// for multi-token fees, `abi.encode(token, uint8(1))` for fungible ones.
    /// A zero `feeRecipient` pays the immediate caller.
    #[derive(Debug, PartialEq, Eq)]
    struct GasReceipt {
        uint256 gasLimitCallback;
        uint256 gasFee;
        address feeRecipient;
        bytes feeTokenData;
    }
}

impl GasReceipt {
    pub fn new(
        gas_limit_callback: U256,
        gas_fee: U256,
        fee_recipient: Address,
        fee_token: &FeeToken,
    ) -> Self {
        Self {
            gasLimitCallback: gas_limit_callback,
            gasFee: gas_fee,
            feeRecipient: fee_recipient,
            feeTokenData: fee_token.encode(),
        }
    }

    pub fn fee_token(&self) -> Result<FeeToken, MetaTransactionError> {
        FeeToken::decode(&self.feeTokenData)
    }
}

/// Asset a relayer fee is paid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeeToken {
    Erc1155 { token: Address, id: U256 },
    Erc20 { token: Address },
}

impl FeeToken {
    pub fn encode(&self) -> Bytes {
        match self {
            FeeToken::Erc1155 { token, id } => (*token, *id, u16::from(FEE_TOKEN_KIND_ERC1155))
                .abi_encode_params()
                .into(),
            FeeToken::Erc20 { token } => (*token, u16::from(FEE_TOKEN_KIND_ERC20)).abi_encode_params().into(),
        }
    }

    /// Reads the kind from the last byte of `data`, then the token fields from
    /// the leading words.
    pub fn decode(data: &[u8]) -> Result<Self, MetaTransactionError> {
        let Some(&kind) = data.last() else {
            debug!("empty fee token data");
            return Err(MetaTransactionError::UnsupportedAsset);
        };

        match kind {
            FEE_TOKEN_KIND_ERC1155 if data.len() >= 64 => {
                let (token, id) = <(Address, U256)>::abi_decode_params(&data[..64], true)
                    .map_err(|e| {
                        debug!("malformed multi-token fee data: {}", e);
                        MetaTransactionError::UnsupportedAsset
                    })?;
                Ok(FeeToken::Erc1155 { token, id })
            }
            FEE_TOKEN_KIND_ERC20 if data.len() >= 32 => {
                let token = Address::abi_decode(&data[..32], true).map_err(|e| {
                    debug!("malformed fungible fee data: {}", e);
                    MetaTransactionError::UnsupportedAsset
                })?;
                Ok(FeeToken::Erc20 { token })
            }
            _ => {
                debug!(
                    "unsupported fee token kind {} ({} bytes of token data)",
                    kind,
                    data.len()
                );
                Err(MetaTransactionError::UnsupportedAsset)
            }
        }
    }

    pub fn token(&self) -> Address {
        match self {
            FeeToken::Erc1155 { token, .. } | FeeToken::Erc20 { token } => *token,
        }
    }
}
