//! Solidity types and interfaces of the external contracts.
//!
//! `Order` doubles as the EIP-712 struct: `sol!` derives `SolStruct`, whose
//! `eip712_signing_hash` hashes the twelve fields in declared order under
//! the type string
//! `Order(address makerAddress,address takerAddress,...,bytes takerAssetData)`.

use alloy_sol_types::sol;

use crate::types;

sol! {
    /// 0x v2 order, field for field.
    #[derive(Debug, PartialEq, Eq)]
    struct Order {
        address makerAddress;
        address takerAddress;
        address feeRecipientAddress;
        address senderAddress;
        uint256 makerAssetAmount;
        uint256 takerAssetAmount;
        uint256 makerFee;
        uint256 takerFee;
        uint256 expirationTimeSeconds;
        uint256 salt;
        bytes makerAssetData;
        bytes takerAssetData;
    }

    /// 0x v2 exchange entry point used by the taker.
    interface IExchange {
        function fillOrder(Order order, uint256 takerAssetFillAmount, bytes signature)
            external
            returns (uint256 makerAssetFilledAmount, uint256 takerAssetFilledAmount, uint256 makerFeePaid, uint256 takerFeePaid);
    }

    interface IERC721 {
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function setApprovalForAll(address operator, bool approved) external;
    }

    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
    }
}

impl From<&types::Order> for Order {
    fn from(order: &types::Order) -> Self {
        Order {
            makerAddress: order.maker_address,
            takerAddress: order.taker_address,
            feeRecipientAddress: order.fee_recipient_address,
            senderAddress: order.sender_address,
            makerAssetAmount: order.maker_asset_amount,
            takerAssetAmount: order.taker_asset_amount,
            makerFee: order.maker_fee,
            takerFee: order.taker_fee,
            expirationTimeSeconds: order.expiration_time_seconds,
            salt: order.salt,
            makerAssetData: order.maker_asset_data.clone(),
            takerAssetData: order.taker_asset_data.clone(),
        }
    }
}
