//! Publishing a signed swap: store it, build its link, announce it.
//!
//! Storage failures fail the publish. A failed announcement does not: the
//! order is valid and stored either way, so it is logged and reported on
//! [`Published::notified`].

use std::cell::RefCell;
use std::collections::HashMap;

use alloy_primitives::keccak256;
use url::Url;

use crate::error::{Result, SwapError};
use crate::order::LegSummary;
use crate::transport::{share_link, Envelope};
use crate::wallet::{Notifier, OrderStore};

/// Outcome of [`publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// Share link carrying the envelope in its fragment
    pub link: Url,
    /// Id the store assigned to the envelope
    pub id: String,
    /// Whether the announcement was delivered
    pub notified: bool,
}

/// Store `envelope`, build its share link on `base_url` and announce it.
pub fn publish<N, S>(envelope: &Envelope, base_url: &str, notifier: &N, store: &S) -> Result<Published>
where
    N: Notifier + ?Sized,
    S: OrderStore + ?Sized,
{
    let (order, _) = envelope.open()?;
    let maker_leg = LegSummary::decode(&order.maker_asset_data, order.maker_asset_amount)?;
    let taker_leg = LegSummary::decode(&order.taker_asset_data, order.taker_asset_amount)?;

    let link = share_link(base_url, envelope)?;
    let id = store.put(&envelope.to_json()?)?;
    tracing::debug!(%id, maker = %order.maker_address, "envelope stored");

    let message = format!(
        "New swap created\nAccept swap: {link}\nMaker sends: {maker_leg}\nTaker sends: {taker_leg}"
    );
    let notified = match notifier.notify(&message) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(%id, error = %e, "swap announcement failed");
            false
        }
    };

    Ok(Published { link, id, notified })
}

/// Envelope stored under `id`.
pub fn fetch<S: OrderStore + ?Sized>(store: &S, id: &str) -> Result<Envelope> {
    let json = store
        .get(id)?
        .ok_or_else(|| SwapError::OrderNotFound(id.to_string()))?;
    Envelope::from_json(&json)
}

/// Single-process store; ids are the first 8 bytes of the JSON's keccak256.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RefCell<HashMap<String, String>>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.borrow().is_empty()
    }
}

impl OrderStore for MemoryOrderStore {
    fn put(&self, envelope_json: &str) -> Result<String> {
        let id = hex::encode(&keccak256(envelope_json)[..8]);
        self.orders.borrow_mut().insert(id.clone(), envelope_json.to_string());
        Ok(id)
    }

    fn get(&self, id: &str) -> Result<Option<String>> {
        Ok(self.orders.borrow().get(id).cloned())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
