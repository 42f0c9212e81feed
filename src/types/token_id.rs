//! Normalization of uint256 inputs (token ids, amounts, salts).
//!
//! User-facing inputs arrive as decimal strings, hex strings or native
//! integers. All of them are normalized to a canonical [`U256`] before they
//! reach the codec.
//!
//! ## Ambiguity
//!
//! A string made only of decimal digits is always read as decimal, even
//! though it is also valid hex. Hex is chosen when the string carries a `0x`
//! prefix or contains a hex letter.
//!
//! ```
//! use alloy_primitives::U256;
//! use zrx_swap::types::token_id::parse_u256;
//!
//! assert_eq!(parse_u256("42"), Some(U256::from(42)));
//! assert_eq!(parse_u256("0x2a"), Some(U256::from(42)));
//! assert_eq!(parse_u256("ff"), Some(U256::from(255)));
//! assert_eq!(parse_u256("10"), Some(U256::from(10)));
//! assert_eq!(parse_u256("-1"), None);
//! ```

use alloy_primitives::U256;

use crate::error::{Result, SwapError};

/// Parse a decimal or hex string into a `U256`.
///
/// Returns `None` for empty, signed, non-numeric or overflowing input.
pub fn parse_u256(input: &str) -> Option<U256> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_radix(digits, 16);
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return parse_radix(s, 10);
    }

    if s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return parse_radix(s, 16);
    }

    None
}

fn parse_radix(digits: &str, radix: u64) -> Option<U256> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    U256::from_str_radix(digits, radix).ok()
}

/// Anything that can be normalized into a token id.
pub trait IntoTokenId {
    /// Convert into a canonical token id, or fail with
    /// [`SwapError::InvalidTokenId`].
    fn into_token_id(self) -> Result<U256>;
}

impl IntoTokenId for U256 {
    fn into_token_id(self) -> Result<U256> {
        Ok(self)
    }
}

impl IntoTokenId for u64 {
    fn into_token_id(self) -> Result<U256> {
        Ok(U256::from(self))
    }
}

impl IntoTokenId for u128 {
    fn into_token_id(self) -> Result<U256> {
        Ok(U256::from(self))
    }
}

impl IntoTokenId for &str {
    fn into_token_id(self) -> Result<U256> {
        parse_u256(self).ok_or_else(|| SwapError::InvalidTokenId(self.to_string()))
    }
}

impl IntoTokenId for String {
    fn into_token_id(self) -> Result<U256> {
        self.as_str().into_token_id()
    }
}

impl IntoTokenId for &String {
    fn into_token_id(self) -> Result<U256> {
        self.as_str().into_token_id()
    }
}

/// Normalize a token id from any supported representation
pub fn normalize_token_id(input: impl IntoTokenId) -> Result<U256> {
    input.into_token_id()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_u256("0"), Some(U256::ZERO));
        assert_eq!(parse_u256("1324"), Some(U256::from(1324)));
        assert_eq!(parse_u256("  7  "), Some(U256::from(7)));
        assert_eq!(
            parse_u256("1000000000000000000"),
            Some(U256::from(1_000_000_000_000_000_000u64))
        );
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_u256("0x2a"), Some(U256::from(42)));
        assert_eq!(parse_u256("0X2A"), Some(U256::from(42)));
        assert_eq!(parse_u256("deadbeef"), Some(U256::from(0xdead_beefu64)));
        assert_eq!(parse_u256("0xff"), parse_u256("ff"));
    }

    #[test]
    fn test_digit_strings_are_decimal() {
        // "10" is valid hex too, but decimal wins
        assert_eq!(parse_u256("10"), Some(U256::from(10)));
        assert_eq!(parse_u256("0x10"), Some(U256::from(16)));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(parse_u256(""), None);
        assert_eq!(parse_u256("0x"), None);
        assert_eq!(parse_u256("-5"), None);
        assert_eq!(parse_u256("+5"), None);
        assert_eq!(parse_u256("12.5"), None);
        assert_eq!(parse_u256("abcxyz"), None);
        assert_eq!(parse_u256("0xzz"), None);
    }

    #[test]
    fn test_rejects_overflow() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_u256(&max), Some(U256::MAX));

        let too_big = format!("{max}0");
        assert_eq!(parse_u256(&too_big), None);
        assert_eq!(parse_u256(&format!("0x1{}", "0".repeat(64))), None);
    }

    #[test]
    fn test_into_token_id() {
        assert_eq!(normalize_token_id(42u64).unwrap(), U256::from(42));
        assert_eq!(normalize_token_id(42u128).unwrap(), U256::from(42));
        assert_eq!(normalize_token_id("0x2a").unwrap(), U256::from(42));
        assert_eq!(normalize_token_id(String::from("42")).unwrap(), U256::from(42));

        let err = normalize_token_id("-1").unwrap_err();
        assert!(matches!(err, SwapError::InvalidTokenId(s) if s == "-1"));
    }
}
