//! EIP-712 order signing and signature checks.
//!
//! The digest is computed over the 0x v2 domain (see
//! [`crate::config::exchange_domain`]) and the `Order` struct from
//! [`crate::contracts::abi`]. The wallet's `r ∥ s ∥ v` signature is repacked
//! into the exchange's `v ∥ r ∥ s ∥ 0x02` layout.

use alloy_primitives::{Address, B256};
use alloy_sol_types::{Eip712Domain, SolStruct};

use crate::contracts::abi;
use crate::error::{Result, SwapError};
use crate::types::{Order, PackedSignature};
use crate::wallet::{TypedOrder, Wallet};

/// The 0x order hash: the EIP-712 digest that the maker signs.
pub fn order_hash(order: &Order, domain: &Eip712Domain) -> B256 {
    abi::Order::from(order).eip712_signing_hash(domain)
}

/// Sign `order` with `wallet` and pack the result for the exchange.
///
/// After signing, the signer is recovered and compared with the order's
/// maker; a mismatch is logged as a warning only, since the exchange contract
/// makes the final call.
pub fn sign_order<W: Wallet + ?Sized>(
    order: &Order,
    wallet: &W,
    domain: &Eip712Domain,
) -> Result<PackedSignature> {
    let typed = TypedOrder { domain, message: order.into() };
    let digest = typed.signing_hash();

    let raw = wallet.sign_typed_data(&typed)?;
    let packed = PackedSignature::from_signature(&raw);

    match raw.recover_address_from_prehash(&digest) {
        Ok(signer) if signer == order.maker_address => {
            tracing::debug!(%signer, hash = %digest, "order signed");
        }
        Ok(signer) => {
            tracing::warn!(
                %signer,
                maker = %order.maker_address,
                "recovered signer does not match maker"
            );
        }
        Err(e) => tracing::warn!(error = %e, "could not recover signer after signing"),
    }

    Ok(packed)
}

/// Recover the account that produced `signature` over `order`.
pub fn recover_signer(
    order: &Order,
    signature: &PackedSignature,
    domain: &Eip712Domain,
) -> Result<Address> {
    let digest = order_hash(order, domain);
    signature
        .to_signature()
        .recover_address_from_prehash(&digest)
        .map_err(|e| SwapError::InvalidSignature(e.to_string()))
}

/// Whether `signature` was produced by the order's maker.
pub fn is_signed_by_maker(order: &Order, signature: &PackedSignature, domain: &Eip712Domain) -> bool {
    matches!(recover_signer(order, signature, domain), Ok(signer) if signer == order.maker_address)
}

// ============================================================================
// Unit Tests
// ============================================================================
