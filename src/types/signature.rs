//! 0x v2 wire signature.
//!
//! ## Layout
//!
//! ```text
//! byte 0        v (27 or 28)
//! bytes 1..33   r
//! bytes 33..65  s
//! byte 65       signature type (0x02 = EIP-712)
//! ```
//!
//! The exchange contract validates signatures only in this exact byte order,
//! which differs from the `r ∥ s ∥ v` layout wallets return.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Signature, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SwapError;

/// Signature type tag for EIP-712 typed-data signatures
pub const SIGNATURE_TYPE_EIP712: u8 = 0x02;

/// Total length of a packed signature
pub const PACKED_SIGNATURE_LEN: usize = 66;

/// A signature in the exchange's `v ∥ r ∥ s ∥ type` layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedSignature([u8; PACKED_SIGNATURE_LEN]);

impl PackedSignature {
    /// Repack a recoverable ECDSA signature.
    pub fn from_signature(sig: &Signature) -> Self {
        let mut out = [0u8; PACKED_SIGNATURE_LEN];
        out[0] = 27 + u8::from(sig.v());
        out[1..33].copy_from_slice(&sig.r().to_be_bytes::<32>());
        out[33..65].copy_from_slice(&sig.s().to_be_bytes::<32>());
        out[65] = SIGNATURE_TYPE_EIP712;
        Self(out)
    }

    /// Parse raw packed bytes, checking length, `v` and the type tag.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SwapError> {
        let raw: [u8; PACKED_SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            SwapError::InvalidSignature(format!(
                "expected {PACKED_SIGNATURE_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;

        if raw[65] != SIGNATURE_TYPE_EIP712 {
            return Err(SwapError::InvalidSignature(format!(
                "unsupported signature type 0x{:02x}",
                raw[65]
            )));
        }
        if raw[0] != 27 && raw[0] != 28 {
            return Err(SwapError::InvalidSignature(format!("invalid v {}", raw[0])));
        }

        Ok(Self(raw))
    }

    /// Unpack into an alloy signature for recovery
    pub fn to_signature(&self) -> Signature {
        let r = U256::from_be_slice(&self.0[1..33]);
        let s = U256::from_be_slice(&self.0[33..65]);
        Signature::new(r, s, self.0[0] == 28)
    }

    pub fn v(&self) -> u8 {
        self.0[0]
    }

    pub fn signature_type(&self) -> u8 {
        self.0[65]
    }

    pub fn as_bytes(&self) -> &[u8; PACKED_SIGNATURE_LEN] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for PackedSignature {
    type Err = SwapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("0x");
        let bytes = hex::decode(digits)
            .map_err(|e| SwapError::InvalidSignature(format!("bad hex: {e}")))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for PackedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PackedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackedSignature({})", self.to_hex())
    }
}

impl Serialize for PackedSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PackedSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
