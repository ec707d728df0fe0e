//! Single meta-transfers signed by key-pair accounts

use alloy::primitives::{Address, Bytes, U256};
use meta_ledger::{
    domain::{MetaPayload, TransferData},
    models::{FeeToken, GasReceipt, LedgerEvent, MetaTransactionError, SignatureType},
};

use crate::integration::common::fixtures::*;

#[test]
fn test_relayed_transfer_with_own_token_fee() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(10, true);
    let receipt = own_fee_receipt(130_000, FEE);

    let result = context.relay_transfer(&intent, Some(&receipt)).unwrap();

    assert_eq!(result.nonce, U256::from(1));
    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::from(1));
    assert_eq!(context.balance(context.alice(), TOKEN_ID), U256::from(90));
    assert_eq!(context.balance(RECIPIENT, TOKEN_ID), U256::from(10));
    assert_eq!(
        context.balance(context.alice(), FEE_ID),
        U256::from(INITIAL_FEE_BALANCE - FEE)
    );
    // The immediate caller is paid, never the transaction origin
    assert_eq!(context.balance(RELAYER, FEE_ID), U256::from(FEE));
    assert_eq!(context.balance(ORIGIN, FEE_ID), U256::ZERO);

    let alice = context.alice();
    assert_eq!(
        result.events,
        vec![
            LedgerEvent::NonceChange {
                signer: alice,
                new_nonce: U256::from(1),
            },
            LedgerEvent::TransferSingle {
                operator: RELAYER,
                from: alice,
                to: RECIPIENT,
                id: U256::from(TOKEN_ID),
                amount: U256::from(10),
            },
            LedgerEvent::TransferSingle {
                operator: RELAYER,
                from: alice,
                to: RELAYER,
                id: U256::from(FEE_ID),
                amount: U256::from(FEE),
            },
        ]
    );
}

#[test]
fn test_transfer_without_fee() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(100, false);

    let result = context.relay_transfer(&intent, None).unwrap();

    assert_eq!(result.fee, None);
    assert_eq!(context.balance(context.alice(), TOKEN_ID), U256::ZERO);
    assert_eq!(context.balance(RECIPIENT, TOKEN_ID), U256::from(100));
    assert_eq!(context.balance(RELAYER, FEE_ID), U256::ZERO);
}

#[test]
fn test_personal_message_signature() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(10, false);
    let payload = context
        .alice
        .sign_transfer(&intent, None, SignatureType::EoaPersonalHash)
        .unwrap();

    assert!(context.submit_transfer(&intent, &payload).is_ok());
}

#[test]
fn test_replayed_payload_is_rejected() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(10, true);
    let payload = context
        .alice
        .sign_transfer(&intent, Some(&own_fee_receipt(130_000, FEE)), SignatureType::EoaHash)
        .unwrap();

    context.submit_transfer(&intent, &payload).unwrap();
    let replay = context.submit_transfer(&intent, &payload);

    assert_eq!(
        replay,
        Err(MetaTransactionError::InvalidNonce {
            expected: U256::from(1),
            provided: U256::ZERO,
        })
    );
    assert_eq!(context.balance(RECIPIENT, TOKEN_ID), U256::from(10));
}

#[test]
fn test_nonces_must_be_used_in_order() {
    let mut context = TestContext::new();
    let mut intent = context.transfer_intent(10, false);
    intent.nonce = U256::from(1);

    assert_eq!(
        context.relay_transfer(&intent, None),
        Err(MetaTransactionError::InvalidNonce {
            expected: U256::ZERO,
            provided: U256::from(1),
        })
    );

    for expected in 1..=3u64 {
        let intent = context.transfer_intent(1, false);
        let result = context.relay_transfer(&intent, None).unwrap();
        assert_eq!(result.nonce, U256::from(expected));
    }
}

#[test]
fn test_relayer_cannot_alter_signed_fields() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(10, true);
    let payload = context
        .alice
        .sign_transfer(&intent, Some(&own_fee_receipt(130_000, FEE)), SignatureType::EoaHash)
        .unwrap();

    let mut tampered = Vec::new();
    let mut other_recipient = intent.clone();
    other_recipient.to = ORIGIN;
    tampered.push(other_recipient);
    let mut other_id = intent.clone();
    other_id.id = U256::from(FEE_ID);
    tampered.push(other_id);
    let mut other_amount = intent.clone();
    other_amount.amount = U256::from(11);
    tampered.push(other_amount);

    for altered in tampered {
        assert_eq!(
            context.submit_transfer(&altered, &payload),
            Err(MetaTransactionError::InvalidSignature)
        );
    }
    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::ZERO);
}

#[test]
fn test_fee_claim_must_match_authorization() {
    let mut context = TestContext::new();

    // Receipt signed, relayer pretends no fee was authorized
    let intent = context.transfer_intent(10, true);
    let payload = context
        .alice
        .sign_transfer(&intent, Some(&own_fee_receipt(130_000, FEE)), SignatureType::EoaHash)
        .unwrap();
    let mut undeclared = intent.clone();
    undeclared.is_gas_fee = false;
    assert_eq!(
        context.submit_transfer(&undeclared, &payload),
        Err(MetaTransactionError::InvalidSignature)
    );

    // No fee authorized, relayer claims one
    let intent = context.transfer_intent(10, false);
    let payload = context
        .alice
        .sign_transfer(&intent, None, SignatureType::EoaHash)
        .unwrap();
    let mut claimed = intent.clone();
    claimed.is_gas_fee = true;
    assert_eq!(
        context.submit_transfer(&claimed, &payload),
        Err(MetaTransactionError::InvalidSignature)
    );

    assert_eq!(context.balance(RELAYER, FEE_ID), U256::ZERO);
}

#[test]
fn test_signature_by_other_key_is_rejected() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(10, false);
    let payload = signer(2)
        .sign_transfer(&intent, None, SignatureType::EoaHash)
        .unwrap();

    assert_eq!(
        context.submit_transfer(&intent, &payload),
        Err(MetaTransactionError::InvalidSignature)
    );
}

#[test]
fn test_malformed_payloads_are_invalid_signatures() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(10, false);

    for payload in [Bytes::new(), Bytes::from(vec![0u8; 31]), Bytes::from(vec![0xffu8; 200])] {
        assert_eq!(
            context.submit_transfer(&intent, &payload),
            Err(MetaTransactionError::InvalidSignature)
        );
    }
}

#[test]
fn test_zero_recipient_is_rejected() {
    let mut context = TestContext::new();
    let mut intent = context.transfer_intent(10, false);
    intent.to = Address::ZERO;

    assert_eq!(
        context.relay_transfer(&intent, None),
        Err(MetaTransactionError::InvalidRecipient)
    );
}

#[test]
fn test_insufficient_balance_is_underflow() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(INITIAL_BALANCE + 1, false);

    assert_eq!(
        context.relay_transfer(&intent, None),
        Err(MetaTransactionError::Underflow)
    );
    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::ZERO);
}

#[test]
fn test_fee_above_balance_rolls_back_transfer() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(10, true);
    let receipt = own_fee_receipt(130_000, INITIAL_FEE_BALANCE + 1);

    assert_eq!(
        context.relay_transfer(&intent, Some(&receipt)),
        Err(MetaTransactionError::Underflow)
    );
    assert_eq!(
        context.balance(context.alice(), TOKEN_ID),
        U256::from(INITIAL_BALANCE)
    );
    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::ZERO);
}

#[test]
fn test_transfer_data_reaches_signature() {
    let mut context = TestContext::new();
    let mut intent = context.transfer_intent(10, false);
    intent.data = Bytes::from_static(b"Hello from the other side");
    let payload = context
        .alice
        .sign_transfer(&intent, None, SignatureType::EoaHash)
        .unwrap();

    assert!(context.submit_transfer(&intent, &payload).is_ok());
}

/// Re-encodes a signed payload with altered signed data, keeping the signature.
fn resubmitted(payload: &[u8], alter: impl FnOnce(&mut TransferData)) -> Bytes {
    let decoded = MetaPayload::decode(payload).unwrap();
    let mut signed = TransferData::decode(&decoded.signed_data, true).unwrap();
    alter(&mut signed);
    MetaPayload::new(decoded.signature, signed.encode()).encode()
}

#[test]
fn test_altered_receipt_or_data_is_rejected() {
    let mut context = TestContext::new();
    let mut intent = context.transfer_intent(10, true);
    intent.data = Bytes::from_static(b"Hello from the other side");
    let payload = context
        .alice
        .sign_transfer(&intent, Some(&own_fee_receipt(130_000, FEE)), SignatureType::EoaHash)
        .unwrap();

    let alterations: Vec<Box<dyn FnOnce(&mut TransferData)>> = vec![
        Box::new(|signed| {
            if let Some(receipt) = signed.receipt.as_mut() {
                receipt.gasFee = U256::from(FEE + 1);
            }
        }),
        Box::new(|signed| {
            if let Some(receipt) = signed.receipt.as_mut() {
                receipt.feeRecipient = ORIGIN;
            }
        }),
        Box::new(|signed| {
            if let Some(receipt) = signed.receipt.as_mut() {
                receipt.feeTokenData = FeeToken::Erc1155 {
                    token: LEDGER,
                    id: U256::from(TOKEN_ID),
                }
                .encode();
            }
        }),
        Box::new(|signed| {
            if let Some(receipt) = signed.receipt.as_mut() {
                receipt.gasLimitCallback = U256::from(1);
            }
        }),
        Box::new(|signed| signed.data = Bytes::from_static(b"Hello from this side")),
    ];

    for alter in alterations {
        let altered = resubmitted(&payload, alter);
        assert_ne!(altered, payload);
        assert_eq!(
            context.submit_transfer(&intent, &altered),
            Err(MetaTransactionError::InvalidSignature)
        );
    }

    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::ZERO);
    assert_eq!(context.balance(RELAYER, FEE_ID), U256::ZERO);
    assert!(context.submit_transfer(&intent, &payload).is_ok());
}

#[test]
fn test_receipt_handed_to_signer_without_fee_claim() {
    let mut context = TestContext::new();
    let intent = context.transfer_intent(10, false);
    let receipt: GasReceipt = own_fee_receipt(130_000, FEE);

    let result = context.relay_transfer(&intent, Some(&receipt)).unwrap();

    assert_eq!(result.fee, None);
    assert_eq!(result.events.len(), 2);
    assert_eq!(context.balance(RECIPIENT, TOKEN_ID), U256::from(10));
    assert_eq!(context.balance(RELAYER, FEE_ID), U256::ZERO);
    assert_eq!(
        context.balance(context.alice(), FEE_ID),
        U256::from(INITIAL_FEE_BALANCE)
    );
}

#[test]
fn test_recipient_overflow_rolls_back() {
    let mut context = TestContext::new();
    context
        .ledger
        .mint(RECIPIENT, U256::from(TOKEN_ID), U256::MAX)
        .unwrap();
    let intent = context.transfer_intent(10, true);

    assert_eq!(
        context.relay_transfer(&intent, Some(&own_fee_receipt(130_000, FEE))),
        Err(MetaTransactionError::Overflow)
    );
    assert_eq!(context.balance(RECIPIENT, TOKEN_ID), U256::MAX);
    assert_eq!(
        context.balance(context.alice(), TOKEN_ID),
        U256::from(INITIAL_BALANCE)
    );
    assert_eq!(context.balance(RELAYER, FEE_ID), U256::ZERO);
    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::ZERO);
}
