//! Swap kernel configuration.
//!
//! Every field has a default; the defaults consult environment variables
//! first and fall back to the 0x v2 mainnet deployment.

use alloy_primitives::{address, Address};
use alloy_sol_types::Eip712Domain;
use serde::Deserialize;
use std::borrow::Cow;

use crate::error::{Result, SwapError};

/// EIP-712 domain name of the 0x v2 exchange
pub const DOMAIN_NAME: &str = "0x Protocol";

/// EIP-712 domain version of the 0x v2 exchange
pub const DOMAIN_VERSION: &str = "2";

/// Default order lifetime: 7 days
pub const DEFAULT_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// 0x v2 Exchange (mainnet)
pub const MAINNET_EXCHANGE: Address = address!("0x080bf510FCbF18b91105470639e9561022937712");

/// 0x v2 ERC20Proxy (mainnet)
pub const MAINNET_ERC20_PROXY: Address = address!("0x95E6F48254609A6ee006F7D493c8e5fB97094ceF");

/// 0x v2 ERC721Proxy (mainnet)
pub const MAINNET_ERC721_PROXY: Address = address!("0xeFc70A1B18C432bdc64b596838B4D138f6bC6cad");

/// Configuration for building, signing and filling orders.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapConfig {
    /// Verifying contract of the EIP-712 domain and target of `fillOrder`
    #[serde(default = "defaults::exchange_address")]
    pub exchange_address: Address,

    /// Spender for ERC-20 allowances
    #[serde(default = "defaults::erc20_proxy")]
    pub erc20_proxy: Address,

    /// Operator for ERC-721 `setApprovalForAll`
    #[serde(default = "defaults::erc721_proxy")]
    pub erc721_proxy: Address,

    /// Page that loads a swap from its URL fragment
    #[serde(default = "defaults::app_base_url")]
    pub app_base_url: String,

    #[serde(default = "defaults::default_expiry_secs")]
    pub default_expiry_secs: u64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            exchange_address: defaults::exchange_address(),
            erc20_proxy: defaults::erc20_proxy(),
            erc721_proxy: defaults::erc721_proxy(),
            app_base_url: defaults::app_base_url(),
            default_expiry_secs: defaults::default_expiry_secs(),
        }
    }
}

impl SwapConfig {
    /// Configuration from environment variables alone.
    ///
    /// Unlike [`SwapConfig::default`], a set but unparseable address variable
    /// is an error instead of a fallback to mainnet.
    pub fn from_env() -> Result<Self> {
        check_address_vars(|key| std::env::var(key).ok())?;
        Ok(Self::default())
    }

    /// Parse a JSON config document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| SwapError::Config(e.to_string()))
    }

    /// EIP-712 domain for the configured exchange.
    ///
    /// 0x v2 predates chain ids in its domain, so no `chainId` field is set.
    pub fn domain(&self) -> Eip712Domain {
        exchange_domain(self.exchange_address)
    }
}

/// Environment variables holding addresses
pub const ADDRESS_VARS: [&str; 3] = ["ZRX_EXCHANGE_ADDRESS", "ZRX_ERC20_PROXY", "ZRX_ERC721_PROXY"];

/// Parse a `0x` hex address, failing with [`SwapError::InvalidAddress`].
pub fn parse_address(text: &str) -> Result<Address> {
    text.trim()
        .parse()
        .map_err(|_| SwapError::InvalidAddress(text.to_string()))
}

fn check_address_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    for key in ADDRESS_VARS {
        match lookup(key) {
            Some(value) if !value.is_empty() => {
                parse_address(&value)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// EIP-712 domain `{name: "0x Protocol", version: "2", verifyingContract}`
pub fn exchange_domain(exchange: Address) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(DOMAIN_NAME)),
        Some(Cow::Borrowed(DOMAIN_VERSION)),
        None,
        Some(exchange),
        None,
    )
}

mod defaults {
    use super::*;

    fn env_address(key: &str, fallback: Address) -> Address {
        match std::env::var(key) {
            Ok(value) if !value.is_empty() => match parse_address(&value) {
                Ok(addr) => addr,
                Err(e) => {
                    tracing::warn!(key, error = %e, "ignoring unparseable address");
                    fallback
                }
            },
            _ => fallback,
        }
    }

    pub fn exchange_address() -> Address {
        env_address(ADDRESS_VARS[0], MAINNET_EXCHANGE)
    }

    pub fn erc20_proxy() -> Address {
        env_address(ADDRESS_VARS[1], MAINNET_ERC20_PROXY)
    }

    pub fn erc721_proxy() -> Address {
        env_address(ADDRESS_VARS[2], MAINNET_ERC721_PROXY)
    }

    pub fn app_base_url() -> String {
        match std::env::var("ZRX_APP_BASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => "http://localhost:8888/loadswap.html".into(),
        }
    }

    pub fn default_expiry_secs() -> u64 {
        std::env::var("ZRX_DEFAULT_EXPIRY_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_EXPIRY_SECS)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    #[test]
    fn test_json_overrides_and_defaults() {
        let config = SwapConfig::from_json(
            r#"{"exchangeAddress":"0x0000000000000000000000000000000000000001"}"#,
        )
        .unwrap();
        assert_eq!(config.exchange_address, Address::with_last_byte(1));
        assert_eq!(config.default_expiry_secs, defaults::default_expiry_secs());
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = SwapConfig::from_json(r#"{"exchangeAddress": 5}"#).unwrap_err();
        assert!(matches!(err, SwapError::Config(_)));
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(
            parse_address(" 0x95E6F48254609A6ee006F7D493c8e5fB97094ceF ").unwrap(),
            MAINNET_ERC20_PROXY
        );
        for bad in ["", "0x1234", "not an address", "0xzz6F48254609A6ee006F7D493c8e5fB97094ceF"] {
            assert!(matches!(parse_address(bad), Err(SwapError::InvalidAddress(_))), "{bad}");
        }
    }

    #[test]
    fn test_address_vars_checked() {
        assert!(check_address_vars(|_| None).is_ok());
        assert!(check_address_vars(|_| Some(String::new())).is_ok());
        assert!(check_address_vars(|key| {
            (key == "ZRX_ERC721_PROXY").then(|| "0xeFc70A1B18C432bdc64b596838B4D138f6bC6cad".into())
        })
        .is_ok());

        let err = check_address_vars(|key| (key == "ZRX_ERC20_PROXY").then(|| "0xnope".into()))
            .unwrap_err();
        assert!(matches!(err, SwapError::InvalidAddress(ref v) if v == "0xnope"));
    }

    #[test]
    fn test_domain_has_no_chain_id() {
        let domain = exchange_domain(MAINNET_EXCHANGE);
        assert_eq!(domain.chain_id, None);
        assert_eq!(domain.verifying_contract, Some(MAINNET_EXCHANGE));

        let type_hash =
            keccak256("EIP712Domain(string name,string version,address verifyingContract)");
        assert_eq!(domain.type_hash(), type_hash);
    }
}
