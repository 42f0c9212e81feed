//! Error types for the swap kernel.
//!
//! Codec and order-construction failures are surfaced as typed variants and
//! are never coerced into a different asset kind. Failures reported by
//! external collaborators (wallets, RPC nodes) arrive as
//! [`SwapError::ExternalCallFailed`].

use alloy_primitives::Address;
use thiserror::Error;

use crate::types::ProxyId;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SwapError>;

/// Failure to decode an asset-data blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer than 4 bytes, so there is no proxy id to read
    #[error("asset data too short: {0} bytes")]
    TooShort(usize),

    /// The prefix is a known proxy id, but not the one the caller expected
    #[error("wrong asset type: expected {expected}, found {found}")]
    WrongAssetType { expected: ProxyId, found: ProxyId },

    /// The prefix is not one of the recognized proxy ids
    #[error("unknown proxy id 0x{}", hex::encode(.0))]
    UnknownProxyId([u8; 4]),

    /// A MultiAsset entry that is itself a MultiAsset
    #[error("nested multi-asset data is not supported")]
    NestedMultiAsset,

    /// The payload after the proxy id is not canonical ABI for its shape
    #[error("malformed asset data: {0}")]
    Malformed(String),
}

/// Top-level error for every fallible operation in the crate.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("length mismatch: {amounts} amounts for {nested} nested asset datas")]
    LengthMismatch { amounts: usize, nested: usize },

    #[error("invalid token id: {0:?}")]
    InvalidTokenId(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("all maker NFTs must come from a single collection")]
    MultipleCollectionsUnsupported,

    #[error("invalid order: {0}")]
    InvalidOrder(String),

    #[error("order is reserved for {expected}, not {claimed}")]
    WrongTaker { expected: Address, claimed: Address },

    #[error("order expired at {expiration} (now {now})")]
    Expired { expiration: u64, now: u64 },

    #[error("no signing key available; connect a wallet first")]
    NoSigningKeyAvailable,

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("unrecognized payload version {0}")]
    UnrecognizedPayloadVersion(u64),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("no order stored under id {0:?}")]
    OrderNotFound(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("external call failed: {0}")]
    ExternalCallFailed(String),
}

impl From<alloy_signer::Error> for SwapError {
    fn from(err: alloy_signer::Error) -> Self {
        SwapError::ExternalCallFailed(err.to_string())
    }
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::InvalidPayload(err.to_string())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::WrongAssetType {
            expected: ProxyId::Erc721,
            found: ProxyId::Erc20,
        };
        assert_eq!(
            err.to_string(),
            "wrong asset type: expected ERC721 (0x02571792), found ERC20 (0xf47261b0)"
        );

        let err = DecodeError::UnknownProxyId([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(err.to_string(), "unknown proxy id 0xdeadbeef");
    }

    #[test]
    fn test_decode_error_converts() {
        let err: SwapError = DecodeError::NestedMultiAsset.into();
        assert!(matches!(err, SwapError::Decode(DecodeError::NestedMultiAsset)));
    }

    #[test]
    fn test_expired_display() {
        let err = SwapError::Expired { expiration: 10, now: 11 };
        assert_eq!(err.to_string(), "order expired at 10 (now 11)");
    }
}
