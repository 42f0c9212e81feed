//! Asset descriptors and 0x v2 proxy ids.
//!
//! Every asset-data blob begins with a 4-byte proxy id (the selector of the
//! matching `ERC20Token(address)`, `ERC721Token(address,uint256)` or
//! `MultiAsset(uint256[],bytes[])` function) that tells the exchange which
//! asset proxy moves the asset.

use std::fmt;

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::types::serde_u256;

// ============================================================================
// ProxyId enum
// ============================================================================

/// Recognized 0x v2 asset proxy ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyId {
    /// `bytes4(keccak256("ERC20Token(address)"))`
    Erc20,
    /// `bytes4(keccak256("ERC721Token(address,uint256)"))`
    Erc721,
    /// `bytes4(keccak256("MultiAsset(uint256[],bytes[])"))`
    MultiAsset,
}

impl ProxyId {
    pub const ERC20_BYTES: [u8; 4] = [0xf4, 0x72, 0x61, 0xb0];
    pub const ERC721_BYTES: [u8; 4] = [0x02, 0x57, 0x17, 0x92];
    pub const MULTI_ASSET_BYTES: [u8; 4] = [0x94, 0xcf, 0xcd, 0xd7];

    /// Wire bytes of this proxy id
    pub fn to_bytes(self) -> [u8; 4] {
        match self {
            ProxyId::Erc20 => Self::ERC20_BYTES,
            ProxyId::Erc721 => Self::ERC721_BYTES,
            ProxyId::MultiAsset => Self::MULTI_ASSET_BYTES,
        }
    }

    /// Map wire bytes back to a proxy id
    pub fn from_bytes(bytes: [u8; 4]) -> Option<Self> {
        match bytes {
            Self::ERC20_BYTES => Some(ProxyId::Erc20),
            Self::ERC721_BYTES => Some(ProxyId::Erc721),
            Self::MULTI_ASSET_BYTES => Some(ProxyId::MultiAsset),
            _ => None,
        }
    }

    /// Short name used in summaries and error messages
    pub fn name(self) -> &'static str {
        match self {
            ProxyId::Erc20 => "ERC20",
            ProxyId::Erc721 => "ERC721",
            ProxyId::MultiAsset => "MultiAsset",
        }
    }
}

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{})", self.name(), hex::encode(self.to_bytes()))
    }
}

// ============================================================================
// AssetDescriptor enum
// ============================================================================

/// Semantic description of a tradeable asset.
///
/// The JSON form is tagged by `kind`:
///
/// ```
/// use zrx_swap::types::AssetDescriptor;
///
/// let json = r#"{"kind":"erc721","contract":"0x00000000000000000000000000000000000000aa","tokenId":"42"}"#;
/// let asset: AssetDescriptor = serde_json::from_str(json).unwrap();
/// assert_eq!(asset.kind(), zrx_swap::types::ProxyId::Erc721);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AssetDescriptor {
    /// A single non-fungible token
    #[serde(rename = "erc721", rename_all = "camelCase")]
    Erc721 {
        contract: Address,
        #[serde(with = "serde_u256")]
        token_id: U256,
    },

    /// A fungible token; the amount lives on the order, not here
    #[serde(rename = "erc20")]
    Erc20 { token: Address },

    /// A basket of sub-assets, each carried as its own encoded asset data.
    ///
    /// Nested entries are kept encoded; decode each one separately.
    #[serde(rename = "multiAsset")]
    MultiAsset {
        #[serde(with = "serde_u256::vec")]
        amounts: Vec<U256>,
        nested: Vec<Bytes>,
    },
}

impl AssetDescriptor {
    /// Proxy id this descriptor encodes under
    pub fn kind(&self) -> ProxyId {
        match self {
            AssetDescriptor::Erc721 { .. } => ProxyId::Erc721,
            AssetDescriptor::Erc20 { .. } => ProxyId::Erc20,
            AssetDescriptor::MultiAsset { .. } => ProxyId::MultiAsset,
        }
    }

    /// Contract address for single-asset kinds
    pub fn contract(&self) -> Option<Address> {
        match self {
            AssetDescriptor::Erc721 { contract, .. } => Some(*contract),
            AssetDescriptor::Erc20 { token } => Some(*token),
            AssetDescriptor::MultiAsset { .. } => None,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
