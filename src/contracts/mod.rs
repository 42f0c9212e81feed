//! Calls into the external contracts: exchange, collections, tokens.
//!
//! Calldata is built with the `sol!` interfaces in [`abi`]. The approval
//! helpers check on-chain state through a [`ChainClient`] first and only send
//! a transaction when the current approval is insufficient. The operator or
//! spender is always taken from [`SwapConfig`]: the ERC721Proxy for
//! collections, the ERC20Proxy for tokens.

pub mod abi;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_sol_types::SolCall;

use crate::config::SwapConfig;
use crate::error::{Result, SwapError};
use crate::types::{Order, PackedSignature};
use crate::wallet::{ChainClient, ContractCall};

use abi::{IERC20, IERC721, IExchange};

// ============================================================================
// Calldata builders
// ============================================================================

/// `fillOrder(order, takerAssetFillAmount, signature)` on the exchange.
pub fn fill_order_call(
    exchange: Address,
    order: &Order,
    taker_fill_amount: U256,
    signature: &PackedSignature,
) -> ContractCall {
    let call = IExchange::fillOrderCall {
        order: order.into(),
        takerAssetFillAmount: taker_fill_amount,
        signature: Bytes::copy_from_slice(signature.as_bytes()),
    };
    ContractCall { to: exchange, data: call.abi_encode().into() }
}

pub fn is_approved_for_all_call(owner: Address, operator: Address) -> Bytes {
    IERC721::isApprovedForAllCall { owner, operator }.abi_encode().into()
}

pub fn set_approval_for_all_call(collection: Address, operator: Address) -> ContractCall {
    let call = IERC721::setApprovalForAllCall { operator, approved: true };
    ContractCall { to: collection, data: call.abi_encode().into() }
}

pub fn allowance_call(owner: Address, spender: Address) -> Bytes {
    IERC20::allowanceCall { owner, spender }.abi_encode().into()
}

pub fn approve_call(token: Address, spender: Address, value: U256) -> ContractCall {
    let call = IERC20::approveCall { spender, value };
    ContractCall { to: token, data: call.abi_encode().into() }
}

// ============================================================================
// Approval flows
// ============================================================================

/// Outcome of an approval check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    /// Nothing to do
    AlreadySufficient,
    /// An approval transaction was sent
    Sent(TxHash),
}

/// Make sure the configured ERC721Proxy may move every token of
/// `collection` owned by `owner`.
pub fn ensure_collection_approval<C: ChainClient + ?Sized>(
    client: &C,
    config: &SwapConfig,
    owner: Address,
    collection: Address,
) -> Result<Approval> {
    let operator = config.erc721_proxy;
    let raw = client.call(collection, is_approved_for_all_call(owner, operator))?;
    let approved = IERC721::isApprovedForAllCall::abi_decode_returns(&raw)
        .map_err(|e| SwapError::ExternalCallFailed(format!("isApprovedForAll: {e}")))?;

    if approved {
        tracing::debug!(%collection, %operator, "collection already approved");
        return Ok(Approval::AlreadySufficient);
    }

    let hash = client.send_transaction(set_approval_for_all_call(collection, operator))?;
    tracing::info!(%collection, %operator, tx = %hash, "setApprovalForAll sent");
    Ok(Approval::Sent(hash))
}

/// Make sure the configured ERC20Proxy may pull at least `required` of
/// `token` from `owner`.
///
/// When the allowance is short, approves exactly `required`.
pub fn ensure_token_allowance<C: ChainClient + ?Sized>(
    client: &C,
    config: &SwapConfig,
    owner: Address,
    token: Address,
    required: U256,
) -> Result<Approval> {
    let spender = config.erc20_proxy;
    let raw = client.call(token, allowance_call(owner, spender))?;
    let current = IERC20::allowanceCall::abi_decode_returns(&raw)
        .map_err(|e| SwapError::ExternalCallFailed(format!("allowance: {e}")))?;

    if current >= required {
        tracing::debug!(%token, %current, %required, "allowance already sufficient");
        return Ok(Approval::AlreadySufficient);
    }

    let hash = client.send_transaction(approve_call(token, spender, required))?;
    tracing::info!(%token, %spender, %required, tx = %hash, "approve sent");
    Ok(Approval::Sent(hash))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloy_primitives::B256;
    use alloy_sol_types::SolValue;
    use std::cell::RefCell;

    /// Chain stub that answers every call with `response` and records sends.
    pub(crate) struct StubChain {
        pub response: Bytes,
        pub sent: RefCell<Vec<ContractCall>>,
        pub fail_calls: bool,
    }

    impl StubChain {
        pub fn answering(response: Vec<u8>) -> Self {
            Self { response: response.into(), sent: RefCell::new(vec![]), fail_calls: false }
        }

        pub fn failing() -> Self {
            Self { response: Bytes::new(), sent: RefCell::new(vec![]), fail_calls: true }
        }
    }

    impl ChainClient for StubChain {
        fn call(&self, _to: Address, _data: Bytes) -> Result<Bytes> {
            if self.fail_calls {
                return Err(SwapError::ExternalCallFailed("rpc down".into()));
            }
            Ok(self.response.clone())
        }

        fn send_transaction(&self, call: ContractCall) -> Result<TxHash> {
            self.sent.borrow_mut().push(call);
            Ok(B256::repeat_byte(self.sent.borrow().len() as u8))
        }
    }

    const OWNER: Address = Address::repeat_byte(0x01);
    const COLLECTION: Address = Address::repeat_byte(0xaa);
    const TOKEN: Address = Address::repeat_byte(0xbb);
    const PROXY: Address = Address::repeat_byte(0xcc);
    const ERC721_PROXY: Address = Address::repeat_byte(0xd7);
    const ERC20_PROXY: Address = Address::repeat_byte(0xd2);

    fn config() -> SwapConfig {
        SwapConfig {
            erc20_proxy: ERC20_PROXY,
            erc721_proxy: ERC721_PROXY,
            ..SwapConfig::default()
        }
    }

    #[test]
    fn test_selectors() {
        assert_eq!(&is_approved_for_all_call(OWNER, PROXY)[..4], &[0xe9, 0x85, 0xe9, 0xc5]);
        assert_eq!(&set_approval_for_all_call(COLLECTION, PROXY).data[..4], &[0xa2, 0x2c, 0xb4, 0x65]);
        assert_eq!(&allowance_call(OWNER, PROXY)[..4], &[0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(&approve_call(TOKEN, PROXY, U256::from(1)).data[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
    }

    #[test]
    fn test_collection_already_approved() {
        let chain = StubChain::answering(true.abi_encode());
        let outcome = ensure_collection_approval(&chain, &config(), OWNER, COLLECTION).unwrap();
        assert_eq!(outcome, Approval::AlreadySufficient);
        assert!(chain.sent.borrow().is_empty());
    }

    #[test]
    fn test_collection_needs_approval() {
        let chain = StubChain::answering(false.abi_encode());
        let outcome = ensure_collection_approval(&chain, &config(), OWNER, COLLECTION).unwrap();
        assert!(matches!(outcome, Approval::Sent(_)));

        let sent = chain.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], set_approval_for_all_call(COLLECTION, ERC721_PROXY));

        let decoded = IERC721::setApprovalForAllCall::abi_decode(&sent[0].data).unwrap();
        assert_eq!(decoded.operator, ERC721_PROXY);
        assert!(decoded.approved);
    }

    #[test]
    fn test_allowance_sufficient_and_short() {
        let required = U256::from(1000);

        let chain = StubChain::answering(U256::from(1000).abi_encode());
        let outcome = ensure_token_allowance(&chain, &config(), OWNER, TOKEN, required).unwrap();
        assert_eq!(outcome, Approval::AlreadySufficient);

        let chain = StubChain::answering(U256::from(999).abi_encode());
        let outcome = ensure_token_allowance(&chain, &config(), OWNER, TOKEN, required).unwrap();
        assert!(matches!(outcome, Approval::Sent(_)));
        assert_eq!(chain.sent.borrow()[0], approve_call(TOKEN, ERC20_PROXY, required));

        let decoded = IERC20::approveCall::abi_decode(&chain.sent.borrow()[0].data).unwrap();
        assert_eq!(decoded.spender, ERC20_PROXY);
        assert_eq!(decoded.value, required);
    }

    #[test]
    fn test_external_failures_propagate() {
        let chain = StubChain::failing();
        let err = ensure_token_allowance(&chain, &config(), OWNER, TOKEN, U256::from(1)).unwrap_err();
        assert!(matches!(err, SwapError::ExternalCallFailed(_)));
        assert!(chain.sent.borrow().is_empty());

        let chain = StubChain::answering(vec![0x01]);
        let err = ensure_collection_approval(&chain, &config(), OWNER, COLLECTION).unwrap_err();
        assert!(matches!(err, SwapError::ExternalCallFailed(_)));
    }
}
