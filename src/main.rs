//! zrx-swap - Binary Entry Point
//!
//! Walks one swap through both sides: the maker drafts a basket, signs it and
//! publishes it to an in-memory store; the taker opens the share link and
//! prepares the fill.
//! Nothing is sent to a chain.
//!
//! Set `ZRX_PRIVATE_KEY` to sign with a fixed key, otherwise a random one is
//! used. `RUST_LOG` controls log output (default `info`).

use alloy_primitives::{address, Address, U256};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zrx_swap::draft::DraftAssetKind;
use zrx_swap::order::{prepare_fill, sign_order, unix_now};
use zrx_swap::transport::{fetch, publish, MemoryOrderStore};
use zrx_swap::types::amount::{to_base_units, WETH_DECIMALS};
use zrx_swap::{Envelope, LocalWallet, Notifier, Result, Side, SwapConfig, SwapDraft, Wallet};

const DEMO_COLLECTION: Address = address!("0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D");
const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
const DEMO_TAKER: Address = address!("0x00000000000000000000000000000000000000b0");

/// Announces swaps in the log instead of a chat channel
struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) -> Result<()> {
        tracing::info!(%message, "swap announced");
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SwapConfig::from_env()?;
    let wallet = match std::env::var("ZRX_PRIVATE_KEY") {
        Ok(key) => LocalWallet::from_private_key(&key)?,
        Err(_) => LocalWallet::random(),
    };
    let maker = wallet.address()?;
    tracing::info!(%maker, exchange = %config.exchange_address, "maker wallet ready");

    println!("===========================================");
    println!("  zrx-swap - maker");
    println!("===========================================");

    let mut draft = SwapDraft::new();
    for token_id in [1u64, 2, 3] {
        draft = draft.with_asset(
            Side::Have,
            DraftAssetKind::Erc721 { contract: DEMO_COLLECTION, token_id: U256::from(token_id) },
            format!("NFT #{token_id}"),
        );
    }
    draft = draft.with_asset(
        Side::Want,
        DraftAssetKind::Erc20 { token: WETH, amount: to_base_units("1", WETH_DECIMALS)? },
        "Ether (Wrapped)",
    );

    // no chain in the demo, so approvals are assumed
    for id in draft.have().iter().map(|a| a.id).collect::<Vec<_>>() {
        draft = draft.with_approval(id, true);
    }
    println!("can create: {}", draft.can_create());

    let order = draft
        .to_builder(maker, None)?
        .default_expiry_secs(config.default_expiry_secs)
        .build(unix_now())?;
    let domain = config.domain();
    let signature = sign_order(&order, &wallet, &domain)?;

    let store = MemoryOrderStore::new();
    let envelope = Envelope::compact_from(&order, &signature)?;
    let published = publish(&envelope, &config.app_base_url, &LogNotifier, &store)?;
    println!("signature: {signature}");
    println!("order id:  {}", published.id);
    println!("link:      {}", published.link);
    println!();

    println!("===========================================");
    println!("  zrx-swap - taker");
    println!("===========================================");

    let from_link = Envelope::from_link(published.link.as_str())?;
    let from_store = fetch(&store, &published.id)?;
    println!("link and store agree: {}", from_link == from_store);

    let (received, received_sig) = from_link.open()?;
    let plan = prepare_fill(&received, &received_sig, DEMO_TAKER, unix_now(), &domain)?;
    println!("{}", plan.summary.render(|token| (token == WETH).then_some(WETH_DECIMALS)));
    println!("signed by maker: {}", plan.signature_matches_maker);
    println!("fillOrder calldata: {} bytes to {}", plan.call.data.len(), plan.call.to);

    Ok(())
}
