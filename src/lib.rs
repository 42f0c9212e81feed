//! # zrx-swap
//!
//! Peer-to-peer NFT swaps over the 0x v2 exchange protocol.
//!
//! ## Architecture
//!
//! The swap kernel consists of:
//! - **Types**: Order, asset descriptors, packed signatures
//! - **Codec**: byte-exact 0x v2 asset data (ERC-721, ERC-20, MultiAsset)
//! - **Order**: maker-side build and sign, taker-side validate and fill
//! - **Transport**: versioned envelope and share links
//! - **Draft**: immutable maker-side selection of assets
//!
//! ## Design Principles
//!
//! 1. **Byte-exact**: everything handed to the exchange goes through the codec
//! 2. **No Floating Point**: human amounts are parsed with fixed-point decimals
//! 3. **No hidden I/O**: wallets and RPC nodes are reached only through the
//!    [`Wallet`] and [`ChainClient`] traits
//! 4. **Synchronous Execution**: the caller's runtime owns suspension points

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, AssetDescriptor, PackedSignature
pub mod types;

/// Asset data encoding and decoding
pub mod codec;

/// Error types
pub mod error;

/// Exchange constants and runtime configuration
pub mod config;

/// `sol!` bindings and calldata for exchange, ERC-721 and ERC-20
pub mod contracts;

/// Signing and chain access capabilities
pub mod wallet;

/// Order build, sign, validate and fill
pub mod order;

/// Envelope and share links
pub mod transport;

/// Maker-side swap draft
pub mod draft;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::SwapConfig;
pub use draft::{Side, SwapDraft};
pub use error::{DecodeError, Result, SwapError};
pub use order::{FillSummary, OrderBuilder};
pub use transport::Envelope;
pub use types::{AssetDescriptor, Order, PackedSignature, ProxyId};
pub use wallet::{ChainClient, LocalWallet, Notifier, OrderStore, Wallet};
