//! Human amount conversion for fungible tokens.
//!
//! ## Overview
//!
//! Orders carry ERC-20 amounts in base units (wei for WETH). Users type
//! amounts like `"1.5"`. Conversion goes through `rust_decimal`, with an
//! exact digit path for amounts wider than a `Decimal`, so no rounding ever
//! touches an amount.
//!
//! ## Examples
//!
//! ```
//! use alloy_primitives::U256;
//! use zrx_swap::types::amount::{to_base_units, from_base_units, WETH_DECIMALS};
//!
//! let wei = to_base_units("1.5", WETH_DECIMALS).unwrap();
//! assert_eq!(wei, U256::from(1_500_000_000_000_000_000u64));
//! assert_eq!(from_base_units(wei, WETH_DECIMALS), "1.5");
//! ```

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::error::{Result, SwapError};

/// Decimals of wrapped ether
pub const WETH_DECIMALS: u8 = 18;

/// Largest supported `decimals` value (10^77 still fits in a U256)
pub const MAX_DECIMALS: u8 = 77;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a human decimal string to base units.
///
/// Fails with [`SwapError::InvalidAmount`] when the string is not a decimal,
/// is negative, has more fractional digits than `decimals`, or overflows.
/// The result is always exact; nothing is rounded.
///
/// ```
/// use zrx_swap::types::amount::to_base_units;
///
/// assert!(to_base_units("0.001", 2).is_err()); // too precise
/// assert!(to_base_units("-1", 18).is_err());
/// ```
pub fn to_base_units(s: &str, decimals: u8) -> Result<U256> {
    let invalid = || SwapError::InvalidAmount(s.to_string());

    if decimals > MAX_DECIMALS {
        return Err(invalid());
    }

    let text = s.trim();
    match Decimal::from_str_exact(text) {
        Ok(decimal) => decimal_to_base_units(decimal, decimals).ok_or_else(invalid),
        // more digits than a Decimal mantissa holds
        Err(_) => wide_to_base_units(text, decimals).ok_or_else(invalid),
    }
}

fn decimal_to_base_units(decimal: Decimal, decimals: u8) -> Option<U256> {
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return None;
    }

    let decimal = decimal.normalize();
    let scale = decimal.scale();
    if scale > u32::from(decimals) {
        return None;
    }

    // mantissa is non-negative after the sign check
    let mantissa = U256::from(decimal.mantissa().unsigned_abs());
    mantissa.checked_mul(pow10(u32::from(decimals) - scale))
}

/// Digit-by-digit conversion for amounts beyond 28 significant digits.
fn wide_to_base_units(text: &str, decimals: u8) -> Option<U256> {
    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    let frac = frac.trim_end_matches('0');

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return None;
    }

    let decimals = usize::from(decimals);
    if frac.len() > decimals {
        return None;
    }

    let digits = format!("{whole}{frac:0<decimals$}");
    U256::from_str_radix(&digits, 10).ok()
}

/// Convert base units to a human decimal string with trailing zeros trimmed.
///
/// ```
/// use alloy_primitives::U256;
/// use zrx_swap::types::amount::from_base_units;
///
/// assert_eq!(from_base_units(U256::from(1_000_000u64), 6), "1");
/// assert_eq!(from_base_units(U256::from(1_230_000u64), 6), "1.23");
/// assert_eq!(from_base_units(U256::from(5u64), 6), "0.000005");
/// ```
pub fn from_base_units(value: U256, decimals: u8) -> String {
    if decimals == 0 || decimals > MAX_DECIMALS {
        return value.to_string();
    }

    let (whole, frac) = value.div_rem(pow10(u32::from(decimals)));
    if frac.is_zero() {
        return whole.to_string();
    }

    let frac = format!("{:0>width$}", frac.to_string(), width = usize::from(decimals));
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

// ============================================================================
// Unit Tests
// ============================================================================
