//! # Meta Transfer Relay Example
//!
//! Signs a meta-transfer with a local key, relays it to an in-memory ledger
//! and prints the resulting receipt.
//!
//! ## Usage
//!
//! ```bash
//! # Default scenario: 10 tokens of id 66 with a 30000 fee in token 666
//! cargo run --example relay_meta_transfer
//!
//! # Custom transfer without a fee, ledger loaded from ./config/ledger.json
//! cargo run --example relay_meta_transfer -- \
//!   --use-config-file \
//!   --id 1 --amount 5 --no-fee \
//!   --to "0x2222222222222222222222222222222222222222"
//! ```
//!
//! Without `--use-config-file` the ledger starts at `--ledger` and the signer
//! receives 100 tokens of `--id` and 100000000 tokens of `--fee-id`.

use alloy::primitives::{Address, Bytes, U256};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use meta_ledger::{
    config::{load_config, RuntimeConfig},
    domain::MetaLedger,
    logging::setup_logging,
    models::{CallContext, FeeToken, GasReceipt, SignatureType, TransferIntent},
    services::{InMemoryHost, MetaTransactionSigner},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Signer private key (32 bytes as hex, with or without 0x prefix)
    #[arg(
        long,
        default_value = "0101010101010101010101010101010101010101010101010101010101010101"
    )]
    key: String,

    /// Ledger address, ignored with --use-config-file
    #[arg(long, default_value = "0x9fe46736679d2d9a65f0992f2272de9f3c7fa6e0")]
    ledger: Address,

    /// Load the ledger from CONFIG_DIR/CONFIG_FILE_NAME
    #[arg(long)]
    use_config_file: bool,

    /// Relayer submitting the transaction
    #[arg(long, default_value = "0x7777777777777777777777777777777777777777")]
    relayer: Address,

    #[arg(long, default_value = "0x2222222222222222222222222222222222222222")]
    to: Address,

    #[arg(long, default_value_t = 66)]
    id: u64,

    #[arg(long, default_value_t = 10)]
    amount: u64,

    /// Fee paid to the relayer in the ledger's own token --fee-id
    #[arg(long, default_value_t = 30_000)]
    fee: u64,

    #[arg(long, default_value_t = 666)]
    fee_id: u64,

    #[arg(long)]
    no_fee: bool,

    /// Sign with the EIP-191 personal message scheme
    #[arg(long)]
    personal: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let runtime_config = RuntimeConfig::from_env();
    setup_logging(&runtime_config)?;

    let mut ledger = if args.use_config_file {
        let path = runtime_config.config_file_path();
        let config = load_config(&path)
            .wrap_err_with(|| format!("Failed to load ledger config {}", path.display()))?;
        MetaLedger::from_config(&config)?
    } else {
        MetaLedger::new(args.ledger)
    };

    let signer = MetaTransactionSigner::from_hex(&args.key, ledger.address())
        .wrap_err("Failed to create signer")?;
    if !args.use_config_file {
        ledger.mint(signer.address(), U256::from(args.id), U256::from(100))?;
        ledger.mint(
            signer.address(),
            U256::from(args.fee_id),
            U256::from(100_000_000),
        )?;
    }

    let intent = TransferIntent {
        from: signer.address(),
        to: args.to,
        id: U256::from(args.id),
        amount: U256::from(args.amount),
        nonce: ledger.get_nonce(signer.address())?,
        is_gas_fee: !args.no_fee,
        data: Bytes::new(),
    };
    let receipt = GasReceipt::new(
        U256::from(130_000),
        U256::from(args.fee),
        Address::ZERO,
        &FeeToken::Erc1155 {
            token: ledger.address(),
            id: U256::from(args.fee_id),
        },
    );
    let signature_type = if args.personal {
        SignatureType::EoaPersonalHash
    } else {
        SignatureType::EoaHash
    };
    let payload = signer.sign_transfer(&intent, Some(&receipt), signature_type)?;

    println!("Meta Transfer Relay\n");
    println!("  Ledger:  {}", ledger.address());
    println!("  Signer:  {}", signer.address());
    println!("  Relayer: {}", args.relayer);
    println!("  Payload: {}\n", payload);

    let mut host = InMemoryHost::new();
    let ctx = CallContext::new(args.relayer, runtime_config.call_gas);
    let result = ledger.meta_safe_transfer_from(
        &mut host,
        &ctx,
        intent.from,
        intent.to,
        intent.id,
        intent.amount,
        intent.is_gas_fee,
        &payload,
    )?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    println!(
        "\nBalances: signer {} / recipient {} (id {}), relayer fee balance {}",
        ledger.balance_of(signer.address(), intent.id)?,
        ledger.balance_of(intent.to, intent.id)?,
        intent.id,
        ledger.balance_of(args.relayer, U256::from(args.fee_id))?
    );
    Ok(())
}
