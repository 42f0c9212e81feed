//! Maker-side swap draft.
//!
//! The assets a maker offers (`have`) and asks for (`want`), each with an
//! approval flag. A draft is never mutated; every change returns a new draft,
//! so a front end can keep the previous value for undo or diffing.

use alloy_primitives::{Address, U256};

use crate::error::{Result, SwapError};
use crate::order::{NftRef, OrderBuilder, TakerAsset};

/// Which side of the swap an asset sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Offered by the maker
    Have,
    /// Asked of the taker
    Want,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftAssetKind {
    Erc721 { contract: Address, token_id: U256 },
    Erc20 { token: Address, amount: U256 },
}

/// One entry of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftAsset {
    /// Unique within the draft, never reused
    pub id: u64,
    pub side: Side,
    pub kind: DraftAssetKind,
    /// Display name
    pub name: String,
    pub approved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapDraft {
    have: Vec<DraftAsset>,
    want: Vec<DraftAsset>,
    next_id: u64,
}

impl SwapDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn have(&self) -> &[DraftAsset] {
        &self.have
    }

    pub fn want(&self) -> &[DraftAsset] {
        &self.want
    }

    /// Id the next added asset will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn get(&self, id: u64) -> Option<&DraftAsset> {
        self.have.iter().chain(self.want.iter()).find(|a| a.id == id)
    }

    /// Add an unapproved asset to `side`.
    pub fn with_asset(&self, side: Side, kind: DraftAssetKind, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        let asset = DraftAsset {
            id: next.next_id,
            side,
            kind,
            name: name.into(),
            approved: false,
        };
        next.next_id += 1;
        next.side_mut(side).push(asset);
        next
    }

    /// Remove the asset with `id`; unknown ids leave the draft unchanged.
    pub fn without_asset(&self, id: u64) -> Self {
        let mut next = self.clone();
        next.have.retain(|a| a.id != id);
        next.want.retain(|a| a.id != id);
        next
    }

    /// Set the approval flag of the asset with `id`.
    pub fn with_approval(&self, id: u64, approved: bool) -> Self {
        let mut next = self.clone();
        if let Some(asset) = next.have.iter_mut().chain(next.want.iter_mut()).find(|a| a.id == id) {
            asset.approved = approved;
        }
        next
    }

    /// Whether an order can be created: something is offered and every
    /// offered asset is approved.
    pub fn can_create(&self) -> bool {
        !self.have.is_empty() && self.have.iter().all(|a| a.approved)
    }

    /// Collections among offered assets that still need approval, in order.
    pub fn unapproved_collections(&self) -> Vec<Address> {
        let mut out = Vec::new();
        for asset in self.have.iter().filter(|a| !a.approved) {
            if let DraftAssetKind::Erc721 { contract, .. } = asset.kind {
                if !out.contains(&contract) {
                    out.push(contract);
                }
            }
        }
        out
    }

    /// Start an order from this draft.
    ///
    /// Offered assets must all be ERC-721 and exactly one asset must be
    /// wanted.
    pub fn to_builder(&self, maker: Address, taker: Option<Address>) -> Result<OrderBuilder> {
        let nfts = self
            .have
            .iter()
            .map(|asset| match asset.kind {
                DraftAssetKind::Erc721 { contract, token_id } => Ok(NftRef { contract, token_id }),
                DraftAssetKind::Erc20 { .. } => Err(SwapError::InvalidOrder(format!(
                    "offered asset {:?} is not an ERC721",
                    asset.name
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        let wanted = match self.want.as_slice() {
            [one] => one,
            other => {
                return Err(SwapError::InvalidOrder(format!(
                    "exactly one wanted asset is supported, found {}",
                    other.len()
                )))
            }
        };
        let taker_asset = match wanted.kind {
            DraftAssetKind::Erc20 { token, amount } => TakerAsset::Erc20 { token, amount },
            DraftAssetKind::Erc721 { contract, token_id } => {
                TakerAsset::Erc721(NftRef { contract, token_id })
            }
        };

        let mut builder = OrderBuilder::new(maker).maker_nfts(nfts).taker_asset(taker_asset);
        if let Some(taker) = taker {
            builder = builder.taker(taker);
        }
        Ok(builder)
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<DraftAsset> {
        match side {
            Side::Have => &mut self.have,
            Side::Want => &mut self.want,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_erc20, decode_multi_asset};

    const COLLECTION: Address = Address::repeat_byte(0xaa);
    const WETH: Address = Address::repeat_byte(0xee);
    const MAKER: Address = Address::repeat_byte(0x01);

    fn nft(id: u64) -> DraftAssetKind {
        DraftAssetKind::Erc721 { contract: COLLECTION, token_id: U256::from(id) }
    }

    fn weth(amount: u64) -> DraftAssetKind {
        DraftAssetKind::Erc20 { token: WETH, amount: U256::from(amount) }
    }

    #[test]
    fn test_changes_return_new_drafts() {
        let empty = SwapDraft::new();
        let one = empty.with_asset(Side::Have, nft(1), "Ape #1");

        assert!(empty.have().is_empty());
        assert_eq!(empty.next_id(), 0);
        assert_eq!(one.have().len(), 1);
        assert_eq!(one.have()[0].id, 0);
        assert!(!one.have()[0].approved);

        let approved = one.with_approval(0, true);
        assert!(!one.have()[0].approved);
        assert!(approved.have()[0].approved);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let draft = SwapDraft::new()
            .with_asset(Side::Have, nft(1), "a")
            .with_asset(Side::Want, weth(5), "b");
        let draft = draft.without_asset(1).with_asset(Side::Want, weth(6), "c");

        assert_eq!(draft.want().len(), 1);
        assert_eq!(draft.want()[0].id, 2);
        assert!(draft.get(1).is_none());
        assert_eq!(draft.get(0).map(|a| a.side), Some(Side::Have));
    }

    #[test]
    fn test_can_create_requires_approved_offer() {
        let draft = SwapDraft::new();
        assert!(!draft.can_create());

        let draft = draft
            .with_asset(Side::Have, nft(1), "a")
            .with_asset(Side::Have, nft(2), "b")
            .with_asset(Side::Want, weth(5), "c");
        assert!(!draft.can_create());
        assert_eq!(draft.unapproved_collections(), vec![COLLECTION]);

        let draft = draft.with_approval(0, true);
        assert!(!draft.can_create());

        let draft = draft.with_approval(1, true);
        assert!(draft.can_create());
        assert!(draft.unapproved_collections().is_empty());

        // wanted assets do not gate creation
        assert!(!draft.want()[0].approved);
    }

    #[test]
    fn test_to_builder_produces_basket_order() {
        let draft = SwapDraft::new()
            .with_asset(Side::Have, nft(1), "a")
            .with_asset(Side::Have, nft(2), "b")
            .with_asset(Side::Want, weth(1_000), "WETH");

        let order = draft.to_builder(MAKER, None).unwrap().build(1_700_000_000).unwrap();
        let (amounts, nested) = decode_multi_asset(&order.maker_asset_data).unwrap();
        assert_eq!(amounts.len(), 2);
        assert_eq!(nested.len(), 2);
        assert_eq!(decode_erc20(&order.taker_asset_data).unwrap(), WETH);
        assert_eq!(order.taker_asset_amount, U256::from(1_000));
    }

    #[test]
    fn test_to_builder_shape_errors() {
        let offer = SwapDraft::new().with_asset(Side::Have, nft(1), "a");
        assert!(matches!(offer.to_builder(MAKER, None), Err(SwapError::InvalidOrder(_))));

        let two_wants = offer
            .with_asset(Side::Want, weth(1), "x")
            .with_asset(Side::Want, nft(9), "y");
        assert!(matches!(two_wants.to_builder(MAKER, None), Err(SwapError::InvalidOrder(_))));

        let erc20_offer = SwapDraft::new()
            .with_asset(Side::Have, weth(1), "x")
            .with_asset(Side::Want, nft(9), "y");
        assert!(matches!(erc20_offer.to_builder(MAKER, None), Err(SwapError::InvalidOrder(_))));
    }
}
