//! Core data types for the swap kernel
//!
//! ## Types
//!
//! - [`AssetDescriptor`]: semantic description of an ERC-721, ERC-20 or basket
//! - [`ProxyId`]: the 4-byte asset proxy prefix of encoded asset data
//! - [`Order`]: the 0x v2 order record
//! - [`PackedSignature`]: the exchange's `v ∥ r ∥ s ∥ type` signature layout
//!
//! ## Integers
//!
//! Every uint256 is an alloy [`U256`](alloy_primitives::U256). Inputs from
//! users go through [`token_id`] or [`amount`] before they reach an order.

mod asset;
mod order;
mod signature;
pub mod amount;
pub mod serde_u256;
pub mod token_id;

// Re-export all types at module level
pub use asset::{AssetDescriptor, ProxyId};
pub use order::Order;
pub use signature::{PackedSignature, PACKED_SIGNATURE_LEN, SIGNATURE_TYPE_EIP712};
