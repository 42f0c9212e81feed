//! Versioned envelope for handing a signed order from maker to taker.
//!
//! ## Wire Format
//!
//! ```text
//! { "version": 1, "kind": "full",    "order": {..}, "signature": "0x.." }
//! { "version": 1, "kind": "compact", "makerAddress": "0x..", "collection": "0x..",
//!   "tokenIds": ["1","2"], "takerAsset": {..}, "takerAssetAmount": "..", ... }
//! ```
//!
//! The compact form drops everything the maker side fixes anyway (fees,
//! sender, amount 1 basket) and is rebuilt through [`OrderBuilder`] on the
//! receiving side. In a link the JSON travels base64url-encoded in the URL
//! fragment, so it never reaches a server.

use alloy_primitives::{Address, U256};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use url::Url;

mod publish;

pub use publish::{fetch, publish, MemoryOrderStore, Published};

use crate::codec::{decode_erc721, decode_multi_asset};
use crate::error::{Result, SwapError};
use crate::order::{NftRef, OrderBuilder, TakerAsset};
use crate::types::{serde_u256, AssetDescriptor, Order, PackedSignature};

/// Envelope version written by this crate
pub const ENVELOPE_VERSION: u64 = 1;

/// A signed order ready to share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u64,
    #[serde(flatten)]
    pub payload: Payload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Payload {
    Full { order: Order, signature: PackedSignature },
    Compact(CompactOrder),
}

/// The fields a maker basket order cannot derive on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompactOrder {
    pub maker_address: Address,
    pub taker_address: Address,
    pub collection: Address,
    #[serde(with = "serde_u256::vec")]
    pub token_ids: Vec<U256>,
    /// ERC-20 or ERC-721, never a basket
    pub taker_asset: AssetDescriptor,
    #[serde(with = "serde_u256")]
    pub taker_asset_amount: U256,
    #[serde(with = "serde_u256")]
    pub expiration_time_seconds: U256,
    #[serde(with = "serde_u256")]
    pub salt: U256,
    pub signature: PackedSignature,
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u64,
}

fn not_compact(reason: &str) -> SwapError {
    SwapError::InvalidPayload(format!("order has no compact form: {reason}"))
}

impl CompactOrder {
    /// Compact form of a maker basket order.
    ///
    /// Fails with [`SwapError::InvalidPayload`] for orders the builder could
    /// not have produced (fees, sender, mixed or non-unit baskets).
    pub fn from_order(order: &Order, signature: &PackedSignature) -> Result<Self> {
        if !order.maker_fee.is_zero()
            || !order.taker_fee.is_zero()
            || order.fee_recipient_address != Address::ZERO
            || order.sender_address != Address::ZERO
        {
            return Err(not_compact("fees or sender set"));
        }
        if order.maker_asset_amount != U256::from(1) {
            return Err(not_compact("maker amount is not 1"));
        }

        let (amounts, nested) = decode_multi_asset(&order.maker_asset_data)?;
        if amounts.iter().any(|a| *a != U256::from(1)) {
            return Err(not_compact("basket entry amount is not 1"));
        }

        let mut collection = None;
        let mut token_ids = Vec::with_capacity(nested.len());
        for blob in &nested {
            let (contract, token_id) = decode_erc721(blob)?;
            match collection {
                None => collection = Some(contract),
                Some(c) if c != contract => return Err(SwapError::MultipleCollectionsUnsupported),
                Some(_) => {}
            }
            token_ids.push(token_id);
        }
        let collection = collection.ok_or_else(|| not_compact("empty basket"))?;

        let taker_asset = AssetDescriptor::decode(&order.taker_asset_data)?;
        if matches!(taker_asset, AssetDescriptor::MultiAsset { .. }) {
            return Err(not_compact("taker asset is a basket"));
        }

        Ok(Self {
            maker_address: order.maker_address,
            taker_address: order.taker_address,
            collection,
            token_ids,
            taker_asset,
            taker_asset_amount: order.taker_asset_amount,
            expiration_time_seconds: order.expiration_time_seconds,
            salt: order.salt,
            signature: *signature,
        })
    }

    /// Rebuild the full order the maker signed.
    pub fn to_order(&self) -> Result<Order> {
        let taker_asset = match &self.taker_asset {
            AssetDescriptor::Erc20 { token } => TakerAsset::Erc20 {
                token: *token,
                amount: self.taker_asset_amount,
            },
            AssetDescriptor::Erc721 { contract, token_id } => {
                if self.taker_asset_amount != U256::from(1) {
                    return Err(SwapError::InvalidPayload("ERC721 taker amount must be 1".into()));
                }
                TakerAsset::Erc721(NftRef { contract: *contract, token_id: *token_id })
            }
            AssetDescriptor::MultiAsset { .. } => {
                return Err(SwapError::InvalidPayload("taker asset cannot be a basket".into()));
            }
        };

        let expiry = u64::try_from(self.expiration_time_seconds)
            .map_err(|_| SwapError::InvalidPayload("expiration out of range".into()))?;

        let nfts = self
            .token_ids
            .iter()
            .map(|id| NftRef { contract: self.collection, token_id: *id });

        OrderBuilder::new(self.maker_address)
            .taker(self.taker_address)
            .maker_nfts(nfts)
            .taker_asset(taker_asset)
            .expiry(expiry.to_string())
            .salt(self.salt)
            .build(expiry)
    }
}

impl Envelope {
    pub fn full(order: Order, signature: PackedSignature) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            payload: Payload::Full { order, signature },
        }
    }

    pub fn compact_from(order: &Order, signature: &PackedSignature) -> Result<Self> {
        Ok(Self {
            version: ENVELOPE_VERSION,
            payload: Payload::Compact(CompactOrder::from_order(order, signature)?),
        })
    }

    /// The order and signature carried by this envelope.
    pub fn open(&self) -> Result<(Order, PackedSignature)> {
        match &self.payload {
            Payload::Full { order, signature } => Ok((order.clone(), *signature)),
            Payload::Compact(compact) => Ok((compact.to_order()?, compact.signature)),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse an envelope, checking the version before the body.
    pub fn from_json(text: &str) -> Result<Self> {
        let header: VersionHeader = serde_json::from_str(text)?;
        if header.version != ENVELOPE_VERSION {
            return Err(SwapError::UnrecognizedPayloadVersion(header.version));
        }
        Ok(serde_json::from_str(text)?)
    }

    /// base64url (unpadded) JSON, for a URL fragment
    pub fn to_fragment(&self) -> Result<String> {
        Ok(URL_SAFE_NO_PAD.encode(self.to_json()?))
    }

    /// Parse a fragment produced by [`Envelope::to_fragment`]; a leading `#`
    /// is ignored.
    pub fn from_fragment(fragment: &str) -> Result<Self> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let raw = URL_SAFE_NO_PAD
            .decode(fragment.trim())
            .map_err(|e| SwapError::InvalidPayload(format!("fragment: {e}")))?;
        let text = String::from_utf8(raw)
            .map_err(|_| SwapError::InvalidPayload("fragment is not UTF-8".into()))?;
        Self::from_json(&text)
    }

    /// Parse the envelope out of a shared link.
    pub fn from_link(link: &str) -> Result<Self> {
        let url = Url::parse(link).map_err(|e| SwapError::InvalidPayload(format!("link: {e}")))?;
        let fragment = url
            .fragment()
            .ok_or_else(|| SwapError::InvalidPayload("link has no fragment".into()))?;
        Self::from_fragment(fragment)
    }
}

/// `base` with the envelope in its fragment.
pub fn share_link(base: &str, envelope: &Envelope) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| SwapError::Config(format!("app base url: {e}")))?;
    url.set_fragment(Some(&envelope.to_fragment()?));
    tracing::debug!(len = url.as_str().len(), "share link built");
    Ok(url)
}

// ============================================================================
// Unit Tests
// ============================================================================
