//! 金额字段的序列化辅助
//!
//! rust_decimal 默认把 Decimal 序列化为字符串，前端需要的是 JSON 数值，
//! 因此金额字段统一通过这里转换；反序列化同时接受数值和数字字符串。

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// `#[serde(with = "crate::serde_helpers::decimal_as_number")]`
pub mod decimal_as_number {
    use super::*;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value.normalize().to_f64() {
            Some(number) => number.serialize(serializer),
            None => value.to_string().serialize(serializer),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Serialize, Deserialize)]
    struct Amount {
        #[serde(with = "decimal_as_number")]
        value: Decimal,
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&Amount { value: dec!(19.80) }).unwrap();
        assert_eq!(json, r#"{"value":19.8}"#);
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: Amount = serde_json::from_str(r#"{"value":99}"#).unwrap();
        assert_eq!(from_number.value, dec!(99));

        let from_string: Amount = serde_json::from_str(r#"{"value":"12.5"}"#).unwrap();
        assert_eq!(from_string.value, dec!(12.5));
    }
}
