//! Capability interface to the outside world.
//!
//! The kernel never talks to a node or a browser wallet directly. Signing
//! goes through [`Wallet`], contract reads and transactions through
//! [`ChainClient`], publishing through [`Notifier`] and [`OrderStore`]. Each
//! call is a suspension point for the caller; nothing here retries or times
//! out.

use alloy_primitives::{Address, Bytes, Signature, TxHash, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::{Eip712Domain, SolStruct};

use crate::contracts::abi;
use crate::error::{Result, SwapError};

/// Typed data for a single order signature: domain plus message.
#[derive(Debug, Clone)]
pub struct TypedOrder<'a> {
    pub domain: &'a Eip712Domain,
    pub message: abi::Order,
}

impl TypedOrder<'_> {
    /// EIP-712 digest (`keccak256(0x1901 ∥ domainSeparator ∥ hashStruct)`)
    pub fn signing_hash(&self) -> B256 {
        self.message.eip712_signing_hash(self.domain)
    }
}

/// A contract call to be sent as a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub data: Bytes,
}

/// Signing side of a wallet.
pub trait Wallet {
    /// Connected account
    fn address(&self) -> Result<Address>;

    /// Sign EIP-712 typed data, returning the raw recoverable signature
    fn sign_typed_data(&self, typed: &TypedOrder<'_>) -> Result<Signature>;
}

/// Chain access: read-only calls and transaction submission.
pub trait ChainClient {
    /// `eth_call` against `to` with `data`, returning the raw return data
    fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;

    /// Send a transaction from the connected account
    fn send_transaction(&self, call: ContractCall) -> Result<TxHash>;
}

/// Announcement channel for newly published swaps, e.g. a chat webhook.
pub trait Notifier {
    fn notify(&self, message: &str) -> Result<()>;
}

/// Storage for published envelopes under ids the store assigns.
pub trait OrderStore {
    /// Store `envelope_json`, returning its id
    fn put(&self, envelope_json: &str) -> Result<String>;

    /// Envelope JSON stored under `id`, if any
    fn get(&self, id: &str) -> Result<Option<String>>;
}

/// In-process wallet backed by a local private key.
///
/// A disconnected wallet fails every operation with
/// [`SwapError::NoSigningKeyAvailable`].
#[derive(Debug, Clone, Default)]
pub struct LocalWallet {
    signer: Option<PrivateKeySigner>,
}

impl LocalWallet {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer: Some(signer) }
    }

    /// Wallet with no key connected
    pub fn disconnected() -> Self {
        Self { signer: None }
    }

    /// Fresh random key, for demos and tests
    pub fn random() -> Self {
        Self::new(PrivateKeySigner::random())
    }

    /// Parse a hex private key (with or without `0x`)
    pub fn from_private_key(hex_key: &str) -> Result<Self> {
        let signer: PrivateKeySigner = hex_key
            .trim()
            .parse()
            .map_err(|_| SwapError::Config("invalid private key".into()))?;
        Ok(Self::new(signer))
    }

    pub fn is_connected(&self) -> bool {
        self.signer.is_some()
    }

    fn signer(&self) -> Result<&PrivateKeySigner> {
        self.signer.as_ref().ok_or(SwapError::NoSigningKeyAvailable)
    }
}

impl Wallet for LocalWallet {
    fn address(&self) -> Result<Address> {
        Ok(self.signer()?.address())
    }

    fn sign_typed_data(&self, typed: &TypedOrder<'_>) -> Result<Signature> {
        let signer = self.signer()?;
        Ok(signer.sign_hash_sync(&typed.signing_hash())?)
    }
}

impl<W: Wallet + ?Sized> Wallet for &W {
    fn address(&self) -> Result<Address> {
        (**self).address()
    }

    fn sign_typed_data(&self, typed: &TypedOrder<'_>) -> Result<Signature> {
        (**self).sign_typed_data(typed)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
