//! Asset-data codec for the 0x v2 wire format.
//!
//! ## Format
//!
//! ```text
//! ERC20      f47261b0 ∥ abi(address)
//! ERC721     02571792 ∥ abi(address, uint256)
//! MultiAsset 94cfcdd7 ∥ abi(uint256[], bytes[])
//! ```
//!
//! `abi(...)` is the standard head/tail parameter encoding in 32-byte words,
//! the same bytes `abi.encodeWithSelector` appends after the selector.
//!
//! ## Strictness
//!
//! Decoders check the proxy id first and fail with
//! [`DecodeError::WrongAssetType`] rather than guessing another kind. The
//! payload must also be canonical: it has to re-encode to exactly the input
//! bytes, so dirty padding or trailing garbage is rejected as
//! [`DecodeError::Malformed`].
//!
//! ## Example
//!
//! ```
//! use alloy_primitives::{Address, U256};
//! use zrx_swap::codec::{encode_erc721, decode_erc721};
//!
//! let contract = Address::repeat_byte(0xaa);
//! let data = encode_erc721(contract, U256::from(42));
//! assert_eq!(data.len(), 4 + 64);
//! assert_eq!(decode_erc721(&data).unwrap(), (contract, U256::from(42)));
//! ```

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolValue;

use crate::error::{DecodeError, Result, SwapError};
use crate::types::{AssetDescriptor, ProxyId};

// ============================================================================
// Encoding
// ============================================================================

/// Encode a single ERC-721 token.
pub fn encode_erc721(contract: Address, token_id: U256) -> Bytes {
    with_prefix(ProxyId::Erc721, (contract, token_id).abi_encode_params())
}

/// Encode an ERC-20 token (the amount lives on the order).
pub fn encode_erc20(token: Address) -> Bytes {
    with_prefix(ProxyId::Erc20, (token,).abi_encode_params())
}

/// Encode a basket of already-encoded sub-assets.
///
/// Fails with [`SwapError::LengthMismatch`] when the two lists differ in
/// length.
pub fn encode_multi_asset(amounts: &[U256], nested: &[Bytes]) -> Result<Bytes> {
    if amounts.len() != nested.len() {
        return Err(SwapError::LengthMismatch {
            amounts: amounts.len(),
            nested: nested.len(),
        });
    }

    let payload = (amounts.to_vec(), nested.to_vec()).abi_encode_params();
    Ok(with_prefix(ProxyId::MultiAsset, payload))
}

fn with_prefix(id: ProxyId, payload: Vec<u8>) -> Bytes {
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&id.to_bytes());
    out.extend_from_slice(&payload);
    out.into()
}

// ============================================================================
// Decoding
// ============================================================================

/// ABI-decode `$payload` as `$ty` and require that it re-encodes byte for byte.
macro_rules! decode_canonical {
    ($ty:ty, $payload:expr) => {{
        let payload: &[u8] = $payload;
        <$ty as SolValue>::abi_decode_params(payload)
            .map_err(|e| DecodeError::Malformed(e.to_string()))
            .and_then(|value| {
                if value.abi_encode_params() == payload {
                    Ok(value)
                } else {
                    Err(DecodeError::Malformed("non-canonical encoding".into()))
                }
            })
    }};
}

/// Read the proxy id of an asset-data blob.
pub fn proxy_id(data: &[u8]) -> std::result::Result<ProxyId, DecodeError> {
    let prefix: [u8; 4] = data
        .get(..4)
        .and_then(|p| p.try_into().ok())
        .ok_or(DecodeError::TooShort(data.len()))?;
    ProxyId::from_bytes(prefix).ok_or(DecodeError::UnknownProxyId(prefix))
}

/// Decode ERC-721 asset data into `(contract, token_id)`.
pub fn decode_erc721(data: &[u8]) -> std::result::Result<(Address, U256), DecodeError> {
    let payload = expect_prefix(data, ProxyId::Erc721)?;
    decode_canonical!((Address, U256), payload)
}

/// Decode ERC-20 asset data into the token address.
pub fn decode_erc20(data: &[u8]) -> std::result::Result<Address, DecodeError> {
    let payload = expect_prefix(data, ProxyId::Erc20)?;
    let (token,) = decode_canonical!((Address,), payload)?;
    Ok(token)
}

/// Decode MultiAsset data into `(amounts, nested)`.
///
/// Nested entries are returned still encoded.
pub fn decode_multi_asset(
    data: &[u8],
) -> std::result::Result<(Vec<U256>, Vec<Bytes>), DecodeError> {
    let payload = expect_prefix(data, ProxyId::MultiAsset)?;
    let (amounts, nested) = decode_canonical!((Vec<U256>, Vec<Bytes>), payload)?;

    if amounts.len() != nested.len() {
        return Err(DecodeError::Malformed(format!(
            "{} amounts for {} nested asset datas",
            amounts.len(),
            nested.len()
        )));
    }
    Ok((amounts, nested))
}

fn expect_prefix(data: &[u8], expected: ProxyId) -> std::result::Result<&[u8], DecodeError> {
    let found = proxy_id(data)?;
    if found != expected {
        return Err(DecodeError::WrongAssetType { expected, found });
    }
    Ok(&data[4..])
}

// ============================================================================
// AssetDescriptor integration
// ============================================================================

impl AssetDescriptor {
    /// Encode this descriptor into asset data.
    pub fn encode(&self) -> Result<Bytes> {
        match self {
            AssetDescriptor::Erc721 { contract, token_id } => {
                Ok(encode_erc721(*contract, *token_id))
            }
            AssetDescriptor::Erc20 { token } => Ok(encode_erc20(*token)),
            AssetDescriptor::MultiAsset { amounts, nested } => {
                encode_multi_asset(amounts, nested)
            }
        }
    }

    /// Decode any recognized asset data, dispatching on its proxy id.
    pub fn decode(data: &[u8]) -> std::result::Result<Self, DecodeError> {
        match proxy_id(data)? {
            ProxyId::Erc721 => {
                let (contract, token_id) = decode_erc721(data)?;
                Ok(AssetDescriptor::Erc721 { contract, token_id })
            }
            ProxyId::Erc20 => Ok(AssetDescriptor::Erc20 { token: decode_erc20(data)? }),
            ProxyId::MultiAsset => {
                let (amounts, nested) = decode_multi_asset(data)?;
                Ok(AssetDescriptor::MultiAsset { amounts, nested })
            }
        }
    }

    /// Decode asset data that must be of a specific kind.
    pub fn decode_as(data: &[u8], expected: ProxyId) -> std::result::Result<Self, DecodeError> {
        let found = proxy_id(data)?;
        if found != expected {
            return Err(DecodeError::WrongAssetType { expected, found });
        }
        Self::decode(data)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
