//! Taker-side validation and fill preparation.
//!
//! A received order is checked against the claimed taker and the clock,
//! decoded into a human-readable [`FillSummary`] for confirmation, and turned
//! into an exchange `fillOrder` call. Submission and approvals go through the
//! caller's [`ChainClient`].

use std::fmt;

use alloy_primitives::{Address, TxHash, U256};
use alloy_sol_types::Eip712Domain;

use crate::codec::decode_multi_asset;
use crate::contracts::fill_order_call;
use crate::error::{DecodeError, Result, SwapError};
use crate::order::signing::recover_signer;
use crate::types::amount::from_base_units;
use crate::types::{AssetDescriptor, Order, PackedSignature, ProxyId};
use crate::wallet::{ChainClient, ContractCall};

/// One decoded leg of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegSummary {
    /// Proxy id of the leg's top-level asset data
    pub kind: ProxyId,
    /// Units of the leg as stated on the order
    pub amount: U256,
    /// Single-asset entries with their per-unit amounts; a MultiAsset leg is
    /// expanded one level, other legs have one entry with amount 1
    pub assets: Vec<(U256, AssetDescriptor)>,
}

impl LegSummary {
    /// Decode a leg from its asset data and order amount.
    pub fn decode(data: &[u8], amount: U256) -> std::result::Result<Self, DecodeError> {
        let top = AssetDescriptor::decode(data)?;
        let kind = top.kind();

        let assets = match top {
            AssetDescriptor::MultiAsset { .. } => {
                let (amounts, nested) = decode_multi_asset(data)?;
                amounts
                    .into_iter()
                    .zip(nested.iter())
                    .map(|(unit, blob)| match AssetDescriptor::decode(blob)? {
                        AssetDescriptor::MultiAsset { .. } => Err(DecodeError::NestedMultiAsset),
                        asset => Ok((unit, asset)),
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
            single => vec![(U256::from(1), single)],
        };

        Ok(Self { kind, amount, assets })
    }

    /// Collections / tokens referenced by this leg, in order, deduplicated
    pub fn contracts(&self) -> Vec<Address> {
        let mut out: Vec<Address> = Vec::new();
        for contract in self.assets.iter().filter_map(|(_, a)| a.contract()) {
            if !out.contains(&contract) {
                out.push(contract);
            }
        }
        out
    }
}

impl LegSummary {
    /// Render the leg, showing ERC-20 amounts in whole tokens where
    /// `decimals_of` knows the token and in base units otherwise.
    pub fn render(&self, decimals_of: impl Fn(Address) -> Option<u8>) -> String {
        let parts: Vec<String> = self
            .assets
            .iter()
            .map(|(unit, asset)| describe(asset, self.amount.saturating_mul(*unit), &decimals_of))
            .collect();
        parts.join(", ")
    }
}

impl fmt::Display for LegSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_| None))
    }
}

fn describe(asset: &AssetDescriptor, units: U256, decimals_of: &dyn Fn(Address) -> Option<u8>) -> String {
    match asset {
        AssetDescriptor::Erc721 { contract, token_id } => {
            format!("ERC721 {} #{}", short_address(*contract), token_id)
        }
        AssetDescriptor::Erc20 { token } => match decimals_of(*token) {
            Some(decimals) => {
                format!("{} of ERC20 {}", from_base_units(units, decimals), short_address(*token))
            }
            None => format!("{} base units of ERC20 {}", units, short_address(*token)),
        },
        AssetDescriptor::MultiAsset { nested, .. } => format!("basket of {}", nested.len()),
    }
}

/// `0x1234…abcd`, or `(any)` for the zero address
pub fn short_address(addr: Address) -> String {
    if addr == Address::ZERO {
        return "(any)".into();
    }
    let full = addr.to_checksum(None);
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

/// Both legs of an order, decoded for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillSummary {
    pub maker: Address,
    pub taker: Address,
    pub expiration: u64,
    /// What the maker gives (and the taker receives)
    pub maker_leg: LegSummary,
    /// What the taker gives
    pub taker_leg: LegSummary,
}

impl FillSummary {
    /// Multi-line confirmation text; see [`LegSummary::render`].
    pub fn render(&self, decimals_of: impl Fn(Address) -> Option<u8>) -> String {
        format!(
            "maker:   {}\ntaker:   {}\nexpires: {}\nyou receive: {}\nyou send:    {}",
            short_address(self.maker),
            short_address(self.taker),
            self.expiration,
            self.maker_leg.render(&decimals_of),
            self.taker_leg.render(&decimals_of),
        )
    }
}

impl fmt::Display for FillSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_| None))
    }
}

/// Check that `claimed_taker` may fill `order` at `now` and decode both legs.
///
/// - [`SwapError::WrongTaker`] if the order names a different taker
/// - [`SwapError::Expired`] once `now` reaches the expiration
pub fn validate_for_fill(order: &Order, claimed_taker: Address, now: u64) -> Result<FillSummary> {
    if !order.is_open() && order.taker_address != claimed_taker {
        return Err(SwapError::WrongTaker {
            expected: order.taker_address,
            claimed: claimed_taker,
        });
    }

    let expiration = order.expiration();
    if order.is_expired(now) {
        return Err(SwapError::Expired { expiration, now });
    }

    let maker_leg = LegSummary::decode(&order.maker_asset_data, order.maker_asset_amount)?;
    let taker_leg = LegSummary::decode(&order.taker_asset_data, order.taker_asset_amount)?;

    Ok(FillSummary {
        maker: order.maker_address,
        taker: order.taker_address,
        expiration,
        maker_leg,
        taker_leg,
    })
}

/// A validated order, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillPlan {
    pub summary: FillSummary,
    /// Whether the signature recovers to the order's maker
    pub signature_matches_maker: bool,
    /// The `fillOrder` transaction filling the whole taker amount
    pub call: ContractCall,
}

/// Validate `order` for `claimed_taker` and build the exchange fill call.
///
/// A signature that does not recover to the maker is logged and flagged on
/// the plan but does not fail.
pub fn prepare_fill(
    order: &Order,
    signature: &PackedSignature,
    claimed_taker: Address,
    now: u64,
    domain: &Eip712Domain,
) -> Result<FillPlan> {
    let summary = validate_for_fill(order, claimed_taker, now)?;

    let signature_matches_maker = match recover_signer(order, signature, domain) {
        Ok(signer) if signer == order.maker_address => true,
        Ok(signer) => {
            tracing::warn!(%signer, maker = %order.maker_address, "signature is not from maker");
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, "signature does not recover");
            false
        }
    };

    let exchange = domain
        .verifying_contract
        .ok_or_else(|| SwapError::Config("domain has no verifying contract".into()))?;
    let call = fill_order_call(exchange, order, order.taker_asset_amount, signature);

    Ok(FillPlan { summary, signature_matches_maker, call })
}

/// Send the plan's fill transaction.
pub fn submit_fill<C: ChainClient + ?Sized>(client: &C, plan: &FillPlan) -> Result<TxHash> {
    let hash = client.send_transaction(plan.call.clone())?;
    tracing::info!(tx = %hash, "fillOrder sent");
    Ok(hash)
}

// ============================================================================
// Unit Tests
// ============================================================================
