//! Batch meta-transfers

use alloy::primitives::{Bytes, U256};
use meta_ledger::models::{
    BatchTransferIntent, LedgerEvent, MetaTransactionError, MetaTransactionReceipt, SignatureType,
};

use crate::integration::common::fixtures::*;

const BATCH_SIZE: u64 = 33;

fn funded_batch_context() -> TestContext {
    let mut context = TestContext::new();
    let alice = context.alice();
    for id in 0..BATCH_SIZE {
        context
            .ledger
            .mint(alice, U256::from(id), U256::from(1_000))
            .unwrap();
    }
    context
}

fn batch_intent(context: &TestContext, is_gas_fee: bool) -> BatchTransferIntent {
    BatchTransferIntent {
        from: context.alice(),
        to: RECIPIENT,
        ids: (0..BATCH_SIZE).map(U256::from).collect(),
        amounts: (0..BATCH_SIZE).map(|i| U256::from(i + 1)).collect(),
        nonce: context.ledger.get_nonce(context.alice()).unwrap(),
        is_gas_fee,
        data: Bytes::new(),
    }
}

fn relay(
    context: &mut TestContext,
    intent: &BatchTransferIntent,
    payload: &[u8],
) -> Result<MetaTransactionReceipt, MetaTransactionError> {
    context.ledger.meta_safe_batch_transfer_from(
        &mut context.host,
        &context.ctx,
        intent.from,
        intent.to,
        &intent.ids,
        &intent.amounts,
        intent.is_gas_fee,
        payload,
    )
}

#[test]
fn test_batch_transfer_with_fee() {
    let mut context = funded_batch_context();
    let intent = batch_intent(&context, true);
    let payload = context
        .alice
        .sign_batch_transfer(&intent, Some(&own_fee_receipt(130_000, FEE)), SignatureType::EoaHash)
        .unwrap();

    let result = relay(&mut context, &intent, &payload).unwrap();

    for id in 0..BATCH_SIZE {
        assert_eq!(context.balance(RECIPIENT, id), U256::from(id + 1));
        assert_eq!(context.balance(context.alice(), id), U256::from(1_000 - id - 1));
    }
    assert_eq!(context.balance(RELAYER, FEE_ID), U256::from(FEE));
    assert_eq!(result.events.len(), 3);
    assert!(matches!(
        &result.events[1],
        LedgerEvent::TransferBatch { operator, ids, .. } if *operator == RELAYER && ids.len() == 33
    ));
}

#[test]
fn test_batch_is_all_or_nothing() {
    let mut context = funded_batch_context();
    let mut intent = batch_intent(&context, false);
    intent.amounts[32] = U256::from(1_001);
    let payload = context
        .alice
        .sign_batch_transfer(&intent, None, SignatureType::EoaHash)
        .unwrap();

    assert_eq!(
        relay(&mut context, &intent, &payload),
        Err(MetaTransactionError::Underflow)
    );
    for id in 0..BATCH_SIZE {
        assert_eq!(context.balance(RECIPIENT, id), U256::ZERO);
    }
    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::ZERO);
}

#[test]
fn test_mismatched_lengths_are_rejected() {
    let mut context = funded_batch_context();
    let intent = batch_intent(&context, false);
    let payload = context
        .alice
        .sign_batch_transfer(&intent, None, SignatureType::EoaHash)
        .unwrap();

    let mut short = intent.clone();
    short.amounts.pop();
    assert_eq!(
        relay(&mut context, &short, &payload),
        Err(MetaTransactionError::InvalidArrayLength)
    );
}

#[test]
fn test_reordered_batch_is_rejected() {
    let mut context = funded_batch_context();
    let intent = batch_intent(&context, false);
    let payload = context
        .alice
        .sign_batch_transfer(&intent, None, SignatureType::EoaHash)
        .unwrap();

    let mut reordered = intent.clone();
    reordered.amounts.swap(0, 1);
    assert_eq!(
        relay(&mut context, &reordered, &payload),
        Err(MetaTransactionError::InvalidSignature)
    );
    assert!(relay(&mut context, &intent, &payload).is_ok());
}

#[test]
fn test_empty_batch_advances_nonce() {
    let mut context = TestContext::new();
    let intent = BatchTransferIntent {
        from: context.alice(),
        to: RECIPIENT,
        ids: Vec::new(),
        amounts: Vec::new(),
        nonce: U256::ZERO,
        is_gas_fee: false,
        data: Bytes::new(),
    };
    let payload = context
        .alice
        .sign_batch_transfer(&intent, None, SignatureType::EoaHash)
        .unwrap();

    let result = relay(&mut context, &intent, &payload).unwrap();
    assert_eq!(result.nonce, U256::from(1));
}

#[test]
fn test_batch_recipient_overflow_rolls_back() {
    let mut context = funded_batch_context();
    context
        .ledger
        .mint(RECIPIENT, U256::from(BATCH_SIZE - 1), U256::MAX)
        .unwrap();
    let intent = batch_intent(&context, true);
    let payload = context
        .alice
        .sign_batch_transfer(&intent, Some(&own_fee_receipt(130_000, FEE)), SignatureType::EoaHash)
        .unwrap();

    assert_eq!(
        relay(&mut context, &intent, &payload),
        Err(MetaTransactionError::Overflow)
    );
    for id in 0..BATCH_SIZE - 1 {
        assert_eq!(context.balance(RECIPIENT, id), U256::ZERO);
        assert_eq!(context.balance(context.alice(), id), U256::from(1_000));
    }
    assert_eq!(context.balance(RECIPIENT, BATCH_SIZE - 1), U256::MAX);
    assert_eq!(context.balance(RELAYER, FEE_ID), U256::ZERO);
    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::ZERO);
}
