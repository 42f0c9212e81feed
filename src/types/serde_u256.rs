//! Serde helpers that write `U256` as a decimal string.
//!
//! The 0x order JSON carries every uint256 as a base-10 string. On input we
//! also accept `0x` hex strings and plain JSON integers.

use alloy_primitives::U256;
use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;
use std::fmt;

use crate::types::token_id::parse_u256;

pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    deserializer.deserialize_any(U256Visitor)
}

struct U256Visitor;

impl<'de> Visitor<'de> for U256Visitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a uint256 as a decimal string, hex string or unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
        u64::try_from(v)
            .map(U256::from)
            .map_err(|_| E::custom(format!("negative uint256: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        parse_u256(v).ok_or_else(|| E::custom(format!("invalid uint256: {v:?}")))
    }
}

/// Same encoding for `Vec<U256>`.
pub mod vec {
    use super::*;
    use serde::ser::SerializeSeq;
    use serde::Deserialize;

    pub fn serialize<S: Serializer>(values: &[U256], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<U256>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(with = "super")] U256);

        let items = Vec::<Wrapped>::deserialize(deserializer)?;
        Ok(items.into_iter().map(|Wrapped(v)| v).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super")]
        value: U256,
        #[serde(with = "super::vec")]
        values: Vec<U256>,
    }

    #[test]
    fn test_writes_decimal_strings() {
        let holder = Holder {
            value: U256::from(10).pow(U256::from(18)),
            values: vec![U256::from(1), U256::from(2)],
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(
            json,
            r#"{"value":"1000000000000000000","values":["1","2"]}"#
        );
    }

    #[test]
    fn test_accepts_hex_and_integers() {
        let holder: Holder =
            serde_json::from_str(r#"{"value":"0x2a","values":[7,"0x08"]}"#).unwrap();
        assert_eq!(holder.value, U256::from(42));
        assert_eq!(holder.values, vec![U256::from(7), U256::from(8)]);
    }

    #[test]
    fn test_rejects_negative() {
        assert!(serde_json::from_str::<Holder>(r#"{"value":-1,"values":[]}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"value":"-1","values":[]}"#).is_err());
    }
}
