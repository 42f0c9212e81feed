//! Maker-side order construction.
//!
//! ## Rules
//!
//! - The maker gives one or more NFTs from a single collection. They are
//!   always wrapped in a MultiAsset basket (each entry amount 1) and the
//!   basket is filled as a unit, so `makerAssetAmount` is 1.
//! - The taker gives either an ERC-20 amount or a single NFT.
//! - Fees are zero, fee recipient and sender are unconstrained.
//! - A missing expiry defaults to `now + 7 days`; an expiry that does not
//!   parse falls back to the same default instead of failing.
//!
//! ## Example
//!
//! ```
//! use alloy_primitives::{Address, U256};
//! use zrx_swap::order::OrderBuilder;
//!
//! let order = OrderBuilder::new(Address::repeat_byte(0x01))
//!     .maker_nft(Address::repeat_byte(0xaa), 1u64).unwrap()
//!     .maker_nft(Address::repeat_byte(0xaa), "0x2").unwrap()
//!     .taker_erc20(Address::repeat_byte(0xbb), U256::from(1000))
//!     .salt(U256::from(7))
//!     .build(1_700_000_000)
//!     .unwrap();
//!
//! assert_eq!(order.maker_asset_amount, U256::from(1));
//! assert_eq!(order.expiration_time_seconds, U256::from(1_700_000_000u64 + 7 * 86_400));
//! ```

use alloy_primitives::{Address, Bytes, U256};

use crate::codec::{encode_erc20, encode_erc721, encode_multi_asset};
use crate::config::DEFAULT_EXPIRY_SECS;
use crate::error::{Result, SwapError};
use crate::order::salt::SaltSource;
use crate::types::token_id::{parse_u256, IntoTokenId};
use crate::types::Order;

/// A single maker-side NFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NftRef {
    pub contract: Address,
    pub token_id: U256,
}

impl NftRef {
    pub fn new(contract: Address, token_id: impl IntoTokenId) -> Result<Self> {
        Ok(Self { contract, token_id: token_id.into_token_id()? })
    }
}

/// What the taker gives in exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakerAsset {
    Erc20 { token: Address, amount: U256 },
    Erc721(NftRef),
}

impl TakerAsset {
    fn encode(&self) -> Result<(Bytes, U256)> {
        match *self {
            TakerAsset::Erc20 { amount, .. } if amount.is_zero() => {
                Err(SwapError::InvalidOrder("taker amount must be positive".into()))
            }
            TakerAsset::Erc20 { token, amount } => Ok((encode_erc20(token), amount)),
            TakerAsset::Erc721(nft) => {
                Ok((encode_erc721(nft.contract, nft.token_id), U256::from(1)))
            }
        }
    }
}

/// Collection shared by every maker NFT.
///
/// Fails with [`SwapError::MultipleCollectionsUnsupported`] when they differ.
pub fn single_collection(nfts: &[NftRef]) -> Result<Address> {
    let first = nfts
        .first()
        .ok_or_else(|| SwapError::InvalidOrder("no maker assets".into()))?;

    if nfts.iter().any(|nft| nft.contract != first.contract) {
        return Err(SwapError::MultipleCollectionsUnsupported);
    }
    Ok(first.contract)
}

/// MultiAsset basket of ERC-721s, each with amount 1.
pub fn encode_nft_basket(nfts: &[NftRef]) -> Result<Bytes> {
    let amounts = vec![U256::from(1); nfts.len()];
    let nested: Vec<Bytes> = nfts
        .iter()
        .map(|nft| encode_erc721(nft.contract, nft.token_id))
        .collect();
    encode_multi_asset(&amounts, &nested)
}

/// Resolve an optional raw expiry to Unix seconds.
pub fn resolve_expiry(raw: Option<&str>, now: u64, default_secs: u64) -> u64 {
    let fallback = now.saturating_add(default_secs);
    match raw {
        None => fallback,
        Some(text) => match text.trim().parse::<u64>() {
            Ok(secs) => secs,
            Err(_) => {
                tracing::warn!(expiry = text, fallback, "unparseable expiry, using default");
                fallback
            }
        },
    }
}

/// Fluent builder for maker orders.
#[derive(Debug, Clone)]
pub struct OrderBuilder {
    maker: Address,
    taker: Option<Address>,
    maker_nfts: Vec<NftRef>,
    taker_asset: Option<TakerAsset>,
    expiry: Option<String>,
    default_expiry_secs: u64,
    salt: Option<U256>,
}

impl OrderBuilder {
    pub fn new(maker: Address) -> Self {
        Self {
            maker,
            taker: None,
            maker_nfts: Vec::new(),
            taker_asset: None,
            expiry: None,
            default_expiry_secs: DEFAULT_EXPIRY_SECS,
            salt: None,
        }
    }

    /// Restrict the order to one taker; zero means anyone
    pub fn taker(mut self, taker: Address) -> Self {
        self.taker = Some(taker);
        self
    }

    pub fn maker_nft(mut self, contract: Address, token_id: impl IntoTokenId) -> Result<Self> {
        self.maker_nfts.push(NftRef::new(contract, token_id)?);
        Ok(self)
    }

    pub fn maker_nfts(mut self, nfts: impl IntoIterator<Item = NftRef>) -> Self {
        self.maker_nfts.extend(nfts);
        self
    }

    pub fn taker_erc20(mut self, token: Address, amount: U256) -> Self {
        self.taker_asset = Some(TakerAsset::Erc20 { token, amount });
        self
    }

    pub fn taker_nft(mut self, contract: Address, token_id: impl IntoTokenId) -> Result<Self> {
        self.taker_asset = Some(TakerAsset::Erc721(NftRef::new(contract, token_id)?));
        Ok(self)
    }

    pub fn taker_asset(mut self, asset: TakerAsset) -> Self {
        self.taker_asset = Some(asset);
        self
    }

    /// Raw expiry in Unix seconds, as typed by the user
    pub fn expiry(mut self, raw: impl Into<String>) -> Self {
        self.expiry = Some(raw.into());
        self
    }

    pub fn default_expiry_secs(mut self, secs: u64) -> Self {
        self.default_expiry_secs = secs;
        self
    }

    pub fn salt(mut self, salt: U256) -> Self {
        self.salt = Some(salt);
        self
    }

    /// Build the order as of `now` (Unix seconds).
    ///
    /// Without an explicit salt, one is drawn from [`SaltSource::global`].
    pub fn build(self, now: u64) -> Result<Order> {
        single_collection(&self.maker_nfts)?;

        let taker_asset = self
            .taker_asset
            .ok_or_else(|| SwapError::InvalidOrder("no taker asset".into()))?;
        let (taker_asset_data, taker_asset_amount) = taker_asset.encode()?;
        let maker_asset_data = encode_nft_basket(&self.maker_nfts)?;

        let expiration = resolve_expiry(self.expiry.as_deref(), now, self.default_expiry_secs);
        let salt = self.salt.unwrap_or_else(|| SaltSource::global().next());

        let order = Order {
            maker_address: self.maker,
            taker_address: self.taker.unwrap_or(Address::ZERO),
            fee_recipient_address: Address::ZERO,
            sender_address: Address::ZERO,
            maker_asset_amount: U256::from(1),
            taker_asset_amount,
            maker_fee: U256::ZERO,
            taker_fee: U256::ZERO,
            expiration_time_seconds: U256::from(expiration),
            salt,
            maker_asset_data,
            taker_asset_data,
        };

        tracing::debug!(
            maker = %order.maker_address,
            taker = %order.taker_address,
            nfts = self.maker_nfts.len(),
            expiration,
            "built order"
        );
        Ok(order)
    }
}

/// Build an order in one call.
///
/// `salt` may be a decimal or hex string; `None` draws a fresh one.
pub fn build_order(
    maker: Address,
    taker: Option<Address>,
    maker_assets: &[NftRef],
    taker_asset: TakerAsset,
    expiry: Option<&str>,
    salt: Option<&str>,
    now: u64,
) -> Result<Order> {
    let mut builder = OrderBuilder::new(maker)
        .maker_nfts(maker_assets.iter().copied())
        .taker_asset(taker_asset);

    if let Some(taker) = taker {
        builder = builder.taker(taker);
    }
    if let Some(expiry) = expiry {
        builder = builder.expiry(expiry);
    }
    if let Some(salt) = salt {
        let salt = parse_u256(salt).ok_or_else(|| SwapError::InvalidOrder(format!("bad salt {salt:?}")))?;
        builder = builder.salt(salt);
    }
    builder.build(now)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_erc20, decode_erc721, decode_multi_asset};
    use alloy_primitives::address;

    const MAKER: Address = address!("0x0000000000000000000000000000000000000001");
    const COLLECTION: Address = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1");
    const OTHER: Address = address!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa2");
    const WETH: Address = address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");
    const NOW: u64 = 1_700_000_000;

    fn one_eth() -> U256 {
        U256::from(10).pow(U256::from(18))
    }

    #[test]
    fn test_basket_swap() {
        let order = OrderBuilder::new(MAKER)
            .maker_nfts([1u64, 2, 3].map(|id| NftRef { contract: COLLECTION, token_id: U256::from(id) }))
            .taker_erc20(WETH, one_eth())
            .salt(U256::from(1))
            .build(NOW)
            .unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["makerAssetAmount"], "1");
        assert_eq!(json["takerAssetAmount"], "1000000000000000000");

        let (amounts, nested) = decode_multi_asset(&order.maker_asset_data).unwrap();
        assert_eq!(amounts, vec![U256::from(1); 3]);
        for (i, blob) in nested.iter().enumerate() {
            let (contract, token_id) = decode_erc721(blob).unwrap();
            assert_eq!(contract, COLLECTION);
            assert_eq!(token_id, U256::from(i + 1));
        }
        assert_eq!(decode_erc20(&order.taker_asset_data).unwrap(), WETH);
    }

    #[test]
    fn test_single_nft_still_uses_basket() {
        let order = OrderBuilder::new(MAKER)
            .maker_nft(COLLECTION, "42")
            .unwrap()
            .taker_erc20(WETH, U256::from(5))
            .build(NOW)
            .unwrap();

        let (_, nested) = decode_multi_asset(&order.maker_asset_data).unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(decode_erc721(&nested[0]).unwrap(), (COLLECTION, U256::from(42)));
    }

    #[test]
    fn test_multiple_collections_rejected() {
        let err = OrderBuilder::new(MAKER)
            .maker_nft(COLLECTION, 1u64)
            .unwrap()
            .maker_nft(OTHER, 2u64)
            .unwrap()
            .taker_erc20(WETH, one_eth())
            .build(NOW)
            .unwrap_err();
        assert!(matches!(err, SwapError::MultipleCollectionsUnsupported));
    }

    #[test]
    fn test_missing_legs_rejected() {
        let err = OrderBuilder::new(MAKER).taker_erc20(WETH, one_eth()).build(NOW).unwrap_err();
        assert!(matches!(err, SwapError::InvalidOrder(_)));

        let err = OrderBuilder::new(MAKER).maker_nft(COLLECTION, 1u64).unwrap().build(NOW).unwrap_err();
        assert!(matches!(err, SwapError::InvalidOrder(_)));

        let err = OrderBuilder::new(MAKER)
            .maker_nft(COLLECTION, 1u64)
            .unwrap()
            .taker_erc20(WETH, U256::ZERO)
            .build(NOW)
            .unwrap_err();
        assert!(matches!(err, SwapError::InvalidOrder(_)));
    }

    #[test]
    fn test_invalid_token_id() {
        let err = OrderBuilder::new(MAKER).maker_nft(COLLECTION, "-3").unwrap_err();
        assert!(matches!(err, SwapError::InvalidTokenId(_)));
    }

    #[test]
    fn test_expiry_defaults_and_fallback() {
        assert_eq!(resolve_expiry(None, NOW, DEFAULT_EXPIRY_SECS), NOW + 604_800);
        assert_eq!(resolve_expiry(Some("1800000000"), NOW, DEFAULT_EXPIRY_SECS), 1_800_000_000);
        assert_eq!(resolve_expiry(Some("next tuesday"), NOW, DEFAULT_EXPIRY_SECS), NOW + 604_800);
        assert_eq!(resolve_expiry(Some("-1"), NOW, DEFAULT_EXPIRY_SECS), NOW + 604_800);

        let order = OrderBuilder::new(MAKER)
            .maker_nft(COLLECTION, 1u64)
            .unwrap()
            .taker_erc20(WETH, one_eth())
            .expiry("garbage")
            .build(NOW)
            .unwrap();
        assert_eq!(order.expiration(), NOW + DEFAULT_EXPIRY_SECS);
    }

    #[test]
    fn test_defaults_are_unconstrained() {
        let order = OrderBuilder::new(MAKER)
            .maker_nft(COLLECTION, 1u64)
            .unwrap()
            .taker_nft(OTHER, 9u64)
            .unwrap()
            .build(NOW)
            .unwrap();

        assert!(order.is_open());
        assert_eq!(order.fee_recipient_address, Address::ZERO);
        assert_eq!(order.sender_address, Address::ZERO);
        assert_eq!(order.maker_fee, U256::ZERO);
        assert_eq!(order.taker_fee, U256::ZERO);
        assert_eq!(order.taker_asset_amount, U256::from(1));
        assert_eq!(decode_erc721(&order.taker_asset_data).unwrap(), (OTHER, U256::from(9)));
    }

    #[test]
    fn test_generated_salts_differ() {
        let build = || {
            OrderBuilder::new(MAKER)
                .maker_nft(COLLECTION, 1u64)
                .unwrap()
                .taker_erc20(WETH, one_eth())
                .build(NOW)
                .unwrap()
        };
        assert_ne!(build().salt, build().salt);
    }

    #[test]
    fn test_build_order_fn() {
        let order = build_order(
            MAKER,
            Some(OTHER),
            &[NftRef { contract: COLLECTION, token_id: U256::from(5) }],
            TakerAsset::Erc20 { token: WETH, amount: one_eth() },
            Some("1800000000"),
            Some("0x10"),
            NOW,
        )
        .unwrap();

        assert_eq!(order.taker_address, OTHER);
        assert_eq!(order.salt, U256::from(16));
        assert_eq!(order.expiration(), 1_800_000_000);

        let err = build_order(
            MAKER,
            None,
            &[NftRef { contract: COLLECTION, token_id: U256::from(5) }],
            TakerAsset::Erc20 { token: WETH, amount: one_eth() },
            None,
            Some("salty"),
            NOW,
        )
        .unwrap_err();
        assert!(matches!(err, SwapError::InvalidOrder(_)));
    }
}
