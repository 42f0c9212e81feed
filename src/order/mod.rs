//! Order lifecycle: build and sign on the maker side, validate and fill on
//! the taker side.

pub mod builder;
pub mod fill;
pub mod salt;
pub mod signing;

pub use builder::{build_order, NftRef, OrderBuilder, TakerAsset};
pub use fill::{prepare_fill, submit_fill, validate_for_fill, FillPlan, FillSummary, LegSummary};
pub use salt::{unix_now, SaltSource};
pub use signing::{is_signed_by_maker, order_hash, recover_signer, sign_order};
