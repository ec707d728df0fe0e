//! Recipient hooks and the gas they are given

use alloy::primitives::{address, Address, Bytes, U256};
use meta_ledger::{
    models::{MetaTransactionError, SignatureType},
    services::{ReceiverHook, TokenReceiver},
};

use crate::integration::common::fixtures::*;

const RECEIVER: Address = address!("6666666666666666666666666666666666666666");
const HOOK_GAS_COST: u64 = 5_000;

fn receiver_context() -> TestContext {
    let mut context = TestContext::new();
    context
        .host
        .deploy_receiver(RECEIVER, TokenReceiver::new(HOOK_GAS_COST));
    context
}

#[test]
fn test_callback_gas_limit_from_receipt() {
    // (gasLimitCallback, call gas, succeeds)
    let cases = [
        (1_000, CALL_GAS, false),
        (9_000, CALL_GAS, true),
        (30_000_000, CALL_GAS, true),
        (30_000_000, 5_000, false),
    ];

    for (gas_limit_callback, call_gas, succeeds) in cases {
        let mut context = receiver_context();
        context.ctx.gas = call_gas;
        let mut intent = context.transfer_intent(10, true);
        intent.to = RECEIVER;

        let result = context.relay_transfer(&intent, Some(&own_fee_receipt(gas_limit_callback, FEE)));

        if succeeds {
            assert!(result.is_ok(), "limit {gas_limit_callback} should pass");
            assert_eq!(context.balance(RECEIVER, TOKEN_ID), U256::from(10));
        } else {
            assert_eq!(result, Err(MetaTransactionError::InvalidOnReceive));
            assert_eq!(context.balance(RECEIVER, TOKEN_ID), U256::ZERO);
            assert_eq!(context.balance(RELAYER, FEE_ID), U256::ZERO);
        }
    }
}

#[test]
fn test_hook_receives_operator_and_data() {
    let mut context = receiver_context();
    let mut intent = context.transfer_intent(10, false);
    intent.to = RECEIVER;
    intent.data = Bytes::from_static(b"Hello from the other side");

    context.relay_transfer(&intent, None).unwrap();

    let received = &context.host.receiver(RECEIVER).unwrap().received;
    assert_eq!(
        received,
        &vec![ReceiverHook::Single {
            operator: RELAYER,
            from: context.alice(),
            id: U256::from(TOKEN_ID),
            amount: U256::from(10),
            data: Bytes::from_static(b"Hello from the other side"),
        }]
    );
}

#[test]
fn test_rejecting_receiver_rolls_back() {
    let mut context = TestContext::new();
    context
        .host
        .deploy_receiver(RECEIVER, TokenReceiver::rejecting());
    let mut intent = context.transfer_intent(10, true);
    intent.to = RECEIVER;

    assert_eq!(
        context.relay_transfer(&intent, Some(&own_fee_receipt(130_000, FEE))),
        Err(MetaTransactionError::InvalidOnReceive)
    );
    assert_eq!(
        context.balance(context.alice(), TOKEN_ID),
        U256::from(INITIAL_BALANCE)
    );
    assert_eq!(context.ledger.get_nonce(context.alice()).unwrap(), U256::ZERO);
}

#[test]
fn test_contract_without_hook_rejects_tokens() {
    let mut context = TestContext::new();
    context.host.deploy_contract(RECEIVER);
    let mut intent = context.transfer_intent(10, false);
    intent.to = RECEIVER;

    assert_eq!(
        context.relay_transfer(&intent, None),
        Err(MetaTransactionError::InvalidOnReceive)
    );
}

#[test]
fn test_ledger_as_recipient_is_invalid_method() {
    let mut context = TestContext::new();
    let mut intent = context.transfer_intent(10, false);
    intent.to = LEDGER;

    assert_eq!(
        context.relay_transfer(&intent, None),
        Err(MetaTransactionError::InvalidMethod)
    );
}

#[test]
fn test_fee_recipient_contract_gets_hook() {
    let mut context = receiver_context();
    context.ctx = meta_ledger::models::CallContext::new(RECEIVER, CALL_GAS);
    let intent = context.transfer_intent(10, true);
    let payload = context
        .alice
        .sign_transfer(&intent, Some(&own_fee_receipt(0, FEE)), SignatureType::EoaHash)
        .unwrap();

    context.submit_transfer(&intent, &payload).unwrap();

    let received = &context.host.receiver(RECEIVER).unwrap().received;
    assert!(matches!(
        received.as_slice(),
        [ReceiverHook::Single { id, amount, .. }] if *id == U256::from(FEE_ID) && *amount == U256::from(FEE)
    ));
}
