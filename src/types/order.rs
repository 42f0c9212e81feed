//! The 0x v2 order record.
//!
//! ## JSON Layout
//!
//! Field names follow the exchange ABI (`makerAddress`, `takerAssetData`, ...).
//! uint256 fields are decimal strings, addresses and asset data are `0x` hex.
//!
//! ## Lifecycle
//!
//! An order is built once by the maker, signed once and then only read. The
//! crate never mutates an order after construction; filling is delegated to
//! the exchange contract.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::types::asset::ProxyId;
use crate::types::serde_u256;

/// A 0x v2 order.
///
/// `taker_address`, `fee_recipient_address` and `sender_address` may be the
/// zero address, meaning "unconstrained".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Account that signs the order and gives the maker asset
    pub maker_address: Address,

    /// Only this account may fill; zero means anyone
    pub taker_address: Address,

    /// Receives fees (always zero here)
    pub fee_recipient_address: Address,

    /// Only this account may submit; zero means anyone
    pub sender_address: Address,

    /// Units of the maker asset (1 for an NFT basket)
    #[serde(with = "serde_u256")]
    pub maker_asset_amount: U256,

    /// Units of the taker asset
    #[serde(with = "serde_u256")]
    pub taker_asset_amount: U256,

    #[serde(with = "serde_u256")]
    pub maker_fee: U256,

    #[serde(with = "serde_u256")]
    pub taker_fee: U256,

    /// Unix seconds; the order cannot be filled once this moment is reached
    #[serde(with = "serde_u256")]
    pub expiration_time_seconds: U256,

    /// Uniqueness for the order hash; not checked for uniqueness here
    #[serde(with = "serde_u256")]
    pub salt: U256,

    /// Encoded maker asset (see [`crate::codec`])
    pub maker_asset_data: Bytes,

    /// Encoded taker asset (see [`crate::codec`])
    pub taker_asset_data: Bytes,
}

impl Order {
    /// Whether anyone may fill this order
    pub fn is_open(&self) -> bool {
        self.taker_address == Address::ZERO
    }

    /// Expiration clamped to `u64` (larger values never expire in practice)
    pub fn expiration(&self) -> u64 {
        u64::try_from(self.expiration_time_seconds).unwrap_or(u64::MAX)
    }

    /// Whether the order can no longer be filled at `now` (Unix seconds)
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expiration()
    }

    /// Proxy id prefix of the maker asset data, if recognized
    pub fn maker_proxy_id(&self) -> Option<ProxyId> {
        proxy_id_of(&self.maker_asset_data)
    }

    /// Proxy id prefix of the taker asset data, if recognized
    pub fn taker_proxy_id(&self) -> Option<ProxyId> {
        proxy_id_of(&self.taker_asset_data)
    }
}

fn proxy_id_of(data: &[u8]) -> Option<ProxyId> {
    let prefix: [u8; 4] = data.get(..4)?.try_into().ok()?;
    ProxyId::from_bytes(prefix)
}

// ============================================================================
// Unit Tests
// ============================================================================
